use anyhow::Result;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::{
    app::AppContext,
    constants::{COMMON_LANGUAGES, REGIONS},
    detail::DetailController,
    listing::ListingController,
    render,
};

/// One line typed into the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Re-fetch the full list
    Reload,
    Search(String),
    Region(String),
    Language(String),
    Clear,
    Show(String),
    /// Toggle the last shown country, or the given code
    Favorite(Option<String>),
    Favorites,
    Login { username: String, password: String },
    Logout,
    Whoami,
    Help,
    Quit,
    Unknown(String),
}

impl ShellCommand {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "reload" | "all" => Self::Reload,
            "search" | "s" => Self::Search(rest.to_string()),
            "region" | "r" => Self::Region(rest.to_string()),
            "language" | "lang" | "l" => Self::Language(rest.to_string()),
            "clear" => Self::Clear,
            "show" if !rest.is_empty() => Self::Show(rest.to_uppercase()),
            "fav" | "favorite" => {
                Self::Favorite((!rest.is_empty()).then(|| rest.to_uppercase()))
            }
            "favorites" | "favs" => Self::Favorites,
            "login" => match rest.split_once(char::is_whitespace) {
                Some((username, password)) => Self::Login {
                    username: username.to_string(),
                    password: password.trim().to_string(),
                },
                None => Self::Unknown(line.to_string()),
            },
            "logout" => Self::Logout,
            "whoami" => Self::Whoami,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        };
        Some(command)
    }
}

const HELP: &str = "\
Commands:
  reload               fetch every country again
  search <name>        search by name (empty restores the full list)
  region <name>        filter by region (empty restores the full list)
  language <name>      filter the full list by language
  clear                clear search and filters
  show <CODE>          show one country
  fav [CODE]           toggle a favorite (defaults to the last shown country)
  favorites            list your favorites
  login <user> <pass>  log in
  logout               log out
  whoami               show the logged-in user
  quit                 leave";

/// Line-oriented browser keeping one listing and one detail page alive
pub struct Shell<'a> {
    ctx: &'a mut AppContext,
    listing: ListingController,
    detail: DetailController,
}

impl<'a> Shell<'a> {
    pub fn new(ctx: &'a mut AppContext) -> Self {
        let listing = ListingController::new(ctx.directory.clone());
        let detail = DetailController::new(ctx.directory.clone());
        Self {
            ctx,
            listing,
            detail,
        }
    }

    /// Read commands from stdin until `quit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        println!("{}", "Explore Countries".bold());
        println!(
            "Regions: {}\nLanguages: {}\nType `help` for commands.\n",
            REGIONS.join(", "),
            COMMON_LANGUAGES.join(", ")
        );

        self.listing.mount().await;
        self.print_listing();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let Some(command) = ShellCommand::parse(&line) else {
                continue;
            };
            if command == ShellCommand::Quit {
                break;
            }
            // A failed command should never end the session
            if let Err(err) = self.execute(command).await {
                warn!("Command failed: {:#}", err);
                println!("{}", format!("{:#}", err).red());
            }
        }
        Ok(())
    }

    /// Run one command against the shell's state
    pub async fn execute(&mut self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Reload => {
                self.listing.mount().await;
                self.print_listing();
            }
            ShellCommand::Search(term) => {
                self.listing.search(&term).await;
                self.print_listing();
            }
            ShellCommand::Region(region) => {
                self.listing.filter_by_region(&region).await;
                self.print_listing();
            }
            ShellCommand::Language(language) => {
                self.listing.filter_by_language(&language);
                self.print_listing();
            }
            ShellCommand::Clear => {
                self.listing.clear_filters();
                self.print_listing();
            }
            ShellCommand::Show(code) => {
                self.detail.mount(&code).await;
                self.print_detail();
            }
            ShellCommand::Favorite(code) => self.toggle_favorite(code).await?,
            ShellCommand::Favorites => match self.ctx.auth.user() {
                Some(user) => println!(
                    "{}",
                    render::favorites_page(&user.username, self.ctx.favorites.list())
                ),
                None => println!("Log in to see your favorites: login <user> <pass>"),
            },
            ShellCommand::Login { username, password } => {
                crate::cli::login(self.ctx, &username, &password)?;
            }
            ShellCommand::Logout => {
                self.ctx.logout()?;
                println!("Logged out.");
            }
            ShellCommand::Whoami => crate::cli::whoami(self.ctx),
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Quit => {}
            ShellCommand::Unknown(line) => {
                println!("Unknown command: {} (type `help`)", line);
            }
        }
        Ok(())
    }

    async fn toggle_favorite(&mut self, code: Option<String>) -> Result<()> {
        if !self.ctx.auth.is_authenticated() {
            println!("Log in to manage favorites: login <user> <pass>");
            return Ok(());
        }

        if let Some(code) = code {
            let loaded = self.detail.country().map(|c| c.cca3.as_str());
            if loaded != Some(code.as_str()) {
                self.detail.mount(&code).await;
            }
        }

        match self
            .detail
            .toggle_favorite(&self.ctx.auth, &mut self.ctx.favorites)?
        {
            Some(true) => println!("Added to favorites."),
            Some(false) => println!("Removed from favorites."),
            None => println!("Show a country first: show <CODE>"),
        }
        Ok(())
    }

    fn print_listing(&self) {
        let ctx = &*self.ctx;
        println!(
            "{}\n",
            render::listing(&self.listing.state(), &self.listing.query(), |code| {
                ctx.favorite_marker(code)
            })
        );
    }

    fn print_detail(&self) {
        match self.detail.country() {
            Some(country) => println!(
                "{}\n",
                render::country_detail(country, self.ctx.favorite_marker(&country.cca3))
            ),
            None => {
                if let crate::detail::DetailState::Error(message) = self.detail.state() {
                    println!("{}\n", message.red());
                }
            }
        }
    }

    pub fn listing(&self) -> &ListingController {
        &self.listing
    }
}
