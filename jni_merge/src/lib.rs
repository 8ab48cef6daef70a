#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]

//! Generates the Java glue for merged native libraries.
//!
//! When several `lib*.so` files are linked into one, Java code still calls
//! `System.loadLibrary` with the old names and still expects each old
//! library's `JNI_OnLoad` to run. `MergedSoMapping.java` maps every
//! pre-merge name to the library it now lives in, and routes each old
//! `JNI_OnLoad` through a `native` method on a nested class.
//!
//! The input is a "merge map": one line per pre-merge library,
//! `lib<pre>.so lib<merged>.so`.

use anyhow::Context;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info};

/// Package the generated class is placed in unless told otherwise.
pub const DEFAULT_PACKAGE: &str = "com.facebook.soloader";

// `.` matches any character here, so `libfoo_so` gives `foo`.
static LIBRARY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"lib([-\w]+).so").expect("library name pattern is valid"));

/// Problems with the merge map.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MergeMapError {
    /// A name that does not contain `lib<base>.so`.
    #[error("bad library name: {0}")]
    BadLibraryName(String),

    /// A line that is not exactly two library names.
    #[error("line {line}: expected `lib<pre>.so lib<merged>.so`, got {text:?}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },

    /// The same pre-merge library appears twice.
    #[error("line {line}: lib{name}.so is already mapped")]
    DuplicateLibrary {
        /// 1-based line number of the repeat.
        line: usize,
        /// Library base name.
        name: String,
    },

    /// Two different pre-merge libraries would get the same
    /// `Invoke_JNI_OnLoad` method name.
    #[error("line {line}: lib{name}.so and lib{other}.so both become lib{sanitized}_so")]
    SanitizedCollision {
        /// 1-based line number of the second library.
        line: usize,
        /// Library base name on this line.
        name: String,
        /// Earlier library with the same sanitized name.
        other: String,
        /// The shared identifier part.
        sanitized: String,
    },
}

/// Extract `<base>` from the first `lib<base>.so` in `name`.
pub fn library_base(name: &str) -> Result<&str, MergeMapError> {
    LIBRARY_NAME
        .captures(name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| MergeMapError::BadLibraryName(name.to_string()))
}

/// Make a library base name usable inside a Java identifier.
pub fn sanitize(base: &str) -> String {
    base.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// A parsed merge map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeMap {
    pre_merge: Vec<String>,
    merged_to_constituents: BTreeMap<String, Vec<String>>,
    /// sanitized name -> pre-merge name it came from
    identifiers: BTreeMap<String, String>,
}

impl MergeMap {
    /// Parse merge-map text. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, MergeMapError> {
        let mut map = Self::default();
        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let words: Vec<&str> = line.split_whitespace().collect();
            match words.as_slice() {
                [] => continue,
                [src, dst] => {
                    let src = library_base(src)?;
                    let dst = library_base(dst)?;
                    map.add(line_no, src, dst)?;
                }
                _ => {
                    return Err(MergeMapError::MalformedLine {
                        line: line_no,
                        text: line.to_string(),
                    })
                }
            }
        }
        Ok(map)
    }

    fn add(&mut self, line: usize, src: &str, dst: &str) -> Result<(), MergeMapError> {
        if self.pre_merge.iter().any(|p| p == src) {
            return Err(MergeMapError::DuplicateLibrary {
                line,
                name: src.to_string(),
            });
        }
        let sanitized = sanitize(src);
        if let Some(other) = self.identifiers.get(&sanitized) {
            return Err(MergeMapError::SanitizedCollision {
                line,
                name: src.to_string(),
                other: other.clone(),
                sanitized,
            });
        }
        debug!(from = src, into = dst, "merge mapping");
        self.identifiers.insert(sanitized, src.to_string());
        self.pre_merge.push(src.to_string());
        self.merged_to_constituents
            .entry(dst.to_string())
            .or_default()
            .push(src.to_string());
        Ok(())
    }

    /// Number of pre-merge libraries.
    pub fn len(&self) -> usize {
        self.pre_merge.len()
    }

    /// True if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.pre_merge.is_empty()
    }

    fn sorted_pre_merge(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.pre_merge.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Render `MergedSoMapping.java` for `package`.
    pub fn render_java(&self, package: &str) -> String {
        JavaSource { map: self, package }.to_string()
    }
}

/// `MergedSoMapping.java` for one map and package.
struct JavaSource<'a> {
    map: &'a MergeMap,
    package: &'a str,
}

impl fmt::Display for JavaSource<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let package = self.package;
        writeln!(out, "package {package};")?;
        writeln!(out)?;
        writeln!(out, "class MergedSoMapping {{")?;
        writeln!(out, "  static String mapLibName(String preMergedLibName) {{")?;
        writeln!(out, "    switch (preMergedLibName) {{")?;
        for (merged, constituents) in &self.map.merged_to_constituents {
            for constituent in constituents {
                writeln!(out, "      case \"{constituent}\":")?;
            }
            writeln!(out, "        return \"{merged}\";")?;
        }
        writeln!(out, "      default:")?;
        writeln!(out, "        return null;")?;
        writeln!(out, "    }}")?;
        writeln!(out, "  }}")?;
        writeln!(out)?;
        writeln!(out, "  static void invokeJniOnload(String preMergedLibName) {{")?;
        writeln!(out, "    int result = 0;")?;
        writeln!(out, "    switch (preMergedLibName) {{")?;
        for pre in self.map.sorted_pre_merge() {
            writeln!(out, "      case \"{pre}\":")?;
            writeln!(
                out,
                "        result = Invoke_JNI_OnLoad.lib{}_so();",
                sanitize(pre)
            )?;
            writeln!(out, "        break;")?;
        }
        writeln!(out, "      default:")?;
        writeln!(out, "        throw new IllegalArgumentException(")?;
        writeln!(out, "            \"Unknown library: \" + preMergedLibName);")?;
        writeln!(out, "    }}")?;
        writeln!(out)?;
        writeln!(out, "    if (result != 0) {{")?;
        writeln!(
            out,
            "      throw new UnsatisfiedLinkError(\"Failed to invoke native library JNI_OnLoad\");"
        )?;
        writeln!(out, "    }}")?;
        writeln!(out, "  }}")?;
        writeln!(out)?;
        writeln!(out, "  static class Invoke_JNI_OnLoad {{")?;
        for pre in self.map.sorted_pre_merge() {
            writeln!(out, "    static native int lib{}_so();", sanitize(pre))?;
        }
        writeln!(out, "  }}")?;
        writeln!(out, "}}")
    }
}

/// Read the merge map at `map_path` and write the generated Java to
/// `output_path`.
pub fn generate_file(map_path: &Path, output_path: &Path, package: &str) -> anyhow::Result<MergeMap> {
    let text = std::fs::read_to_string(map_path)
        .with_context(|| format!("reading merge map {}", map_path.display()))?;
    let map = MergeMap::parse(&text)
        .with_context(|| format!("parsing merge map {}", map_path.display()))?;
    std::fs::write(output_path, map.render_java(package))
        .with_context(|| format!("writing {}", output_path.display()))?;
    info!(
        libraries = map.len(),
        output = %output_path.display(),
        "generated MergedSoMapping"
    );
    Ok(map)
}
