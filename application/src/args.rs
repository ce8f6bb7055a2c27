//! Command line [`Args`] of the offer calculator server.

use clap::Parser;

/// Server of the electrical installation offer calculator.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Apply pending database migrations and exit without serving.
    #[arg(long)]
    pub migrate_only: bool,
}

impl Args {
    /// Parses [`Args`] out of the process command line.
    ///
    /// # Errors
    ///
    /// If the command line is malformed, or `--help`/`--version` is
    /// requested.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use super::Args;

    #[test]
    fn defaults_config_path() {
        let args = Args::try_parse_from(["server"]).unwrap();

        assert_eq!(args.config, "config.toml");
        assert!(!args.migrate_only);
    }

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "server",
            "-c",
            "prod.toml",
            "--migrate-only",
        ])
        .unwrap();

        assert_eq!(args.config, "prod.toml");
        assert!(args.migrate_only);
    }
}
