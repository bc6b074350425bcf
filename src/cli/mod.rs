/// CLI argument parsing and command handling - Gateway
mod args;
mod commands;

pub use args::{Cli, Commands, FavoritesAction};
pub use commands::{handle_command, list_countries, login, show_country, show_version, whoami};
