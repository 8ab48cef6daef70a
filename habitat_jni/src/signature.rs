//! Parser for JVM method descriptors such as `()Ljava/lang/String;` or
//! `(I[JLjava/lang/Object;)V`. The runtime uses these strings to pick the
//! right overload when natives are registered, so a malformed one is
//! rejected before it is handed over.

use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::char,
    combinator::{all_consuming, map, value},
    error::context,
    multi::many0,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A field (parameter or non-void return) type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaType {
    /// `Z`
    Boolean,
    /// `B`
    Byte,
    /// `C`
    Char,
    /// `S`
    Short,
    /// `I`
    Int,
    /// `J`
    Long,
    /// `F`
    Float,
    /// `D`
    Double,
    /// `L<internal name>;`
    Object(String),
    /// `[<component>`
    Array(Box<JavaType>),
}

/// The return slot of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReturnType {
    /// `V`
    Void,
    /// Any field type.
    Value(JavaType),
}

/// A parsed method descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    /// Parameter types, in declaration order.
    pub params: Vec<JavaType>,
    /// Return type.
    pub ret: ReturnType,
}

/// Descriptor parse failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The text does not follow the `(<params>)<return>` grammar.
    #[error("malformed method descriptor {descriptor:?}")]
    Malformed {
        /// The rejected descriptor.
        descriptor: String,
    },
}

type ParseResult<'a, T> = IResult<&'a str, T>;

fn object_type(input: &str) -> ParseResult<JavaType> {
    context(
        "object type",
        map(
            delimited(char('L'), is_not(";[()."), char(';')),
            |name: &str| JavaType::Object(name.to_string()),
        ),
    )(input)
}

fn array_type(input: &str) -> ParseResult<JavaType> {
    context(
        "array type",
        map(preceded(char('['), field_type), |component| {
            JavaType::Array(Box::new(component))
        }),
    )(input)
}

fn field_type(input: &str) -> ParseResult<JavaType> {
    alt((
        value(JavaType::Boolean, char('Z')),
        value(JavaType::Byte, char('B')),
        value(JavaType::Char, char('C')),
        value(JavaType::Short, char('S')),
        value(JavaType::Int, char('I')),
        value(JavaType::Long, char('J')),
        value(JavaType::Float, char('F')),
        value(JavaType::Double, char('D')),
        object_type,
        array_type,
    ))(input)
}

fn return_type(input: &str) -> ParseResult<ReturnType> {
    alt((
        value(ReturnType::Void, char('V')),
        map(field_type, ReturnType::Value),
    ))(input)
}

fn method_signature(input: &str) -> ParseResult<MethodSignature> {
    context(
        "method descriptor",
        map(
            pair(
                preceded(char('('), terminated(many0(field_type), char(')'))),
                return_type,
            ),
            |(params, ret)| MethodSignature { params, ret },
        ),
    )(input)
}

impl MethodSignature {
    /// Parse a complete descriptor. Trailing text is an error.
    pub fn parse(descriptor: &str) -> Result<Self, SignatureError> {
        all_consuming(method_signature)(descriptor)
            .map(|(_, signature)| signature)
            .map_err(|_| SignatureError::Malformed {
                descriptor: descriptor.to_string(),
            })
    }
}

impl FromStr for MethodSignature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Boolean => f.write_str("Z"),
            JavaType::Byte => f.write_str("B"),
            JavaType::Char => f.write_str("C"),
            JavaType::Short => f.write_str("S"),
            JavaType::Int => f.write_str("I"),
            JavaType::Long => f.write_str("J"),
            JavaType::Float => f.write_str("F"),
            JavaType::Double => f.write_str("D"),
            JavaType::Object(name) => write!(f, "L{name};"),
            JavaType::Array(component) => write!(f, "[{component}"),
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::Void => f.write_str("V"),
            ReturnType::Value(ty) => ty.fmt(f),
        }
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for param in &self.params {
            param.fmt(f)?;
        }
        write!(f, "){}", self.ret)
    }
}
