use clap::Parser;
use jni_merge::{generate_file, DEFAULT_PACKAGE};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Generate MergedSoMapping.java from a native library merge map.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Merge map: one `lib<pre>.so lib<merged>.so` pair per line
    map: PathBuf,

    /// Where to write the generated Java source
    output: PathBuf,

    /// Java package of the generated class
    #[arg(long, default_value = DEFAULT_PACKAGE)]
    package: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = generate_file(&cli.map, &cli.output, &cli.package) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
