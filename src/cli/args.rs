use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "atlas")]
#[command(version)]
#[command(about = "Browse, search and filter countries, and keep a list of favorites", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Keep the session in memory only (nothing is written to disk)
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List countries, optionally searched or filtered (one filter at a time)
    List {
        /// Search by country name
        #[arg(short, long, conflicts_with_all = ["region", "language"])]
        search: Option<String>,
        /// Only countries in this region
        #[arg(short, long, conflicts_with = "language")]
        region: Option<String>,
        /// Only countries speaking this language
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Show one country by its three-letter code
    Show {
        /// Alpha-3 code, e.g. DEU
        code: String,
        /// Add the country to favorites, or remove it if already there
        #[arg(long)]
        toggle_favorite: bool,
    },
    /// Log in
    Login {
        username: String,
        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Log out and forget favorites
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },
    /// List the regions offered by the region filter
    Regions,
    /// List the languages offered by the language filter
    Languages,
    /// Interactive shell (default)
    Browse,
    /// Initialize configuration
    Init,
    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum FavoritesAction {
    /// List favorites (default)
    List,
    /// Add a country by code
    Add { code: String },
    /// Remove a country by code
    Remove { code: String },
}
