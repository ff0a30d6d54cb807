use clap::{Parser, Subcommand};

/// Command-line interface definition for playmart
/// CLI application to load song-play JSON data into a SQLite star schema
#[derive(Parser)]
#[command(
    name = "playmart",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small ETL CLI: load song-catalog and play-log JSON files into SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database schema and configuration
    Init,

    /// Run the ETL: load catalog files, then play-log files
    Load {
        /// Root directory of the song-catalog files (overrides config)
        #[arg(long = "songs", value_name = "DIR")]
        songs: Option<String>,

        /// Root directory of the play-log files (overrides config)
        #[arg(long = "logs", value_name = "DIR")]
        logs: Option<String>,

        /// Abort the whole batch on the first failed file
        /// (default: report the file and continue)
        #[arg(long = "strict")]
        strict: bool,
    },

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the database (stats, integrity checks, etc.)
    Db {
        #[arg(long = "info", help = "Show table row counts and load statistics")]
        info: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,
    },
}
