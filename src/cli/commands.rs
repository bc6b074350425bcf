use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};

use crate::{
    app::{init_config, AppContext},
    constants::{COMMON_LANGUAGES, REGIONS},
    detail::{DetailController, DetailState},
    listing::ListingController,
    render,
    session::LoginOutcome,
    utils::AtlasError,
};

use super::{Commands, FavoritesAction};

/// Handle CLI subcommands
///
/// Returns `false` when the caller should start the interactive shell instead.
pub async fn handle_command(ctx: &mut AppContext, command: &Commands) -> Result<bool> {
    match command {
        Commands::List {
            search,
            region,
            language,
        } => {
            list_countries(ctx, search.as_deref(), region.as_deref(), language.as_deref()).await?;
        }
        Commands::Show {
            code,
            toggle_favorite,
        } => show_country(ctx, code, *toggle_favorite).await?,
        Commands::Login { username, password } => {
            let password = match password {
                Some(p) => p.clone(),
                None => prompt_password()?,
            };
            login(ctx, username, &password)?;
        }
        Commands::Logout => {
            ctx.logout()?;
            println!("Logged out.");
        }
        Commands::Whoami => whoami(ctx),
        Commands::Favorites { action } => {
            let action = action.clone().unwrap_or(FavoritesAction::List);
            favorites(ctx, &action).await?;
        }
        Commands::Regions => {
            for region in REGIONS {
                println!("  • {}", region);
            }
        }
        Commands::Languages => {
            for language in COMMON_LANGUAGES {
                println!("  • {}", language);
            }
        }
        Commands::Init => {
            println!("Initializing Atlas configuration...");
            match init_config()? {
                Some(path) => println!("Created default configuration at: {}", path.display()),
                None => println!("Configuration already exists, nothing to do."),
            }
        }
        Commands::Version => show_version(),
        Commands::Browse => return Ok(false),
    }
    Ok(true)
}

/// Fetch the listing and apply at most one filter
pub async fn list_countries(
    ctx: &AppContext,
    search: Option<&str>,
    region: Option<&str>,
    language: Option<&str>,
) -> Result<()> {
    let listing = load_listing(ctx, search, region, language).await;

    println!(
        "{}",
        render::listing(&listing.state(), &listing.query(), |code| {
            ctx.favorite_marker(code)
        })
    );
    Ok(())
}

/// Run the one filter the `list` flags ask for
///
/// An empty term means "no filter", so it lands on the full listing.
async fn load_listing(
    ctx: &AppContext,
    search: Option<&str>,
    region: Option<&str>,
    language: Option<&str>,
) -> ListingController {
    let listing = ListingController::new(ctx.directory.clone());

    // Search and region hit the network themselves; only the language
    // filter needs the canonical set first.
    match (search, region, language) {
        (Some(term), _, _) if !term.is_empty() => listing.search(term).await,
        (_, Some(region), _) if !region.is_empty() => listing.filter_by_region(region).await,
        (_, _, Some(language)) if !language.is_empty() => {
            listing.mount().await;
            listing.filter_by_language(language);
        }
        _ => listing.mount().await,
    }
    listing
}

/// Show one country, optionally toggling it in the favorites
pub async fn show_country(ctx: &mut AppContext, code: &str, toggle: bool) -> Result<()> {
    let mut detail = DetailController::new(ctx.directory.clone());
    detail.mount(code).await;

    if let DetailState::Error(message) = detail.state() {
        println!("{}", message.red());
        return Ok(());
    }

    if toggle {
        require_login(ctx)?;
        if let Some(now_favorite) = detail.toggle_favorite(&ctx.auth, &mut ctx.favorites)? {
            let verb = if now_favorite { "Added to" } else { "Removed from" };
            println!("{} favorites.\n", verb);
        }
    }

    if let Some(country) = detail.country() {
        println!(
            "{}",
            render::country_detail(country, ctx.favorite_marker(&country.cca3))
        );
    }
    Ok(())
}

/// Log in and report the outcome
pub fn login(ctx: &mut AppContext, username: &str, password: &str) -> Result<()> {
    match ctx.login(username, password)? {
        LoginOutcome::Success { username } => {
            println!("Logged in as {}.", username.green());
        }
        LoginOutcome::Failure { message } => {
            println!("{}", message.red());
        }
    }
    Ok(())
}

pub fn whoami(ctx: &AppContext) {
    match ctx.auth.user() {
        Some(user) => println!("{}", user.username),
        None => println!("Not logged in."),
    }
}

/// Favorites page and mutations; all of them need a logged-in user
pub async fn favorites(ctx: &mut AppContext, action: &FavoritesAction) -> Result<()> {
    require_login(ctx)?;

    match action {
        FavoritesAction::List => {}
        FavoritesAction::Add { code } => {
            let mut detail = DetailController::new(ctx.directory.clone());
            detail.mount(code).await;
            match detail.state() {
                DetailState::Ready(country) => {
                    ctx.favorites.add(&ctx.auth, country)?;
                    println!("Added {} to favorites.\n", country.name.common);
                }
                DetailState::Error(message) => {
                    println!("{}", message.red());
                    return Ok(());
                }
                DetailState::Loading => {}
            }
        }
        FavoritesAction::Remove { code } => {
            ctx.favorites.remove(&ctx.auth, code)?;
        }
    }

    let username = ctx
        .auth
        .user()
        .map(|user| user.username.as_str())
        .unwrap_or_default();
    println!("{}", render::favorites_page(username, ctx.favorites.list()));
    Ok(())
}

/// Commands behind the login wall send the user to `atlas login` instead
fn require_login(ctx: &AppContext) -> Result<(), AtlasError> {
    if ctx.auth.is_authenticated() {
        Ok(())
    } else {
        Err(AtlasError::AuthRequired(
            "run `atlas login <username>`".to_string(),
        ))
    }
}

/// Read a password line from stdin
fn prompt_password() -> Result<String> {
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Show version information
pub fn show_version() {
    println!("Atlas v{}", env!("CARGO_PKG_VERSION"));
    println!("   Browse, search and filter the countries of the world");
}
