use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(name = "codefixer")]
#[clap(about = "Ask a local LLM server to fix a source file, then apply the fix with a backup")]
#[clap(version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_TIME"), ")"))]
pub struct Cli {
    /// File to fix
    #[clap(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_file_is_optional_positional() {
        let cli = Cli::parse_from(["codefixer", "buggy.go"]);
        assert_eq!(cli.file, Some(PathBuf::from("buggy.go")));

        let cli = Cli::parse_from(["codefixer"]);
        assert!(cli.file.is_none());
    }
}
