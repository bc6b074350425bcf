use colored::Colorize;

use super::format::{format_population, join_or_dash};
use crate::directory::Country;
use crate::listing::{ActiveQuery, ListingState};
use crate::session::FavoriteEntry;

/// One-country summary used by the listing and favorites pages.
///
/// `favorite` is `None` for anonymous users, who get no star at all.
pub fn country_card(country: &Country, favorite: Option<bool>) -> String {
    let star = match favorite {
        Some(true) => format!("{} ", "★".yellow()),
        Some(false) => "☆ ".to_string(),
        None => String::new(),
    };

    format!(
        "{}{} {}\n    Population: {}\n    Region: {}\n    Capital: {}\n    Flag: {}",
        star,
        country.name.common.bold(),
        format!("[{}]", country.cca3).dimmed(),
        format_population(country.population),
        country.region,
        join_or_dash(&country.capital),
        country.flags.best(),
    )
}

/// Listing page body for the given state
pub fn listing(
    state: &ListingState,
    query: &ActiveQuery,
    is_favorite: impl Fn(&str) -> Option<bool>,
) -> String {
    match state {
        ListingState::Loading => "Loading...".dimmed().to_string(),
        ListingState::Error(err) => err.to_string().red().to_string(),
        ListingState::Ready(countries) if countries.is_empty() => {
            query.empty_message().dimmed().to_string()
        }
        ListingState::Ready(countries) => {
            let cards: Vec<String> = countries
                .iter()
                .map(|country| country_card(country, is_favorite(&country.cca3)))
                .collect();
            format!(
                "{}\n\n{} {}",
                cards.join("\n\n"),
                countries.len(),
                if countries.len() == 1 { "country" } else { "countries" }
            )
        }
    }
}

/// Full detail page for one country
pub fn country_detail(country: &Country, favorite: Option<bool>) -> String {
    let mut lines = vec![
        format!("{}", country.name.common.bold().underline()),
        format!("Official name: {}", country.name.official),
        format!("Code: {}", country.cca3),
        format!("Flag: {}", country.flags.best()),
        format!("Population: {}", format_population(country.population)),
        format!("Region: {}", country.region),
        format!(
            "Sub Region: {}",
            country.subregion.as_deref().unwrap_or("-")
        ),
        format!("Capital: {}", join_or_dash(&country.capital)),
    ];

    if !country.tld.is_empty() {
        lines.push(format!("Top Level Domain: {}", country.tld.join(", ")));
    }

    let currencies: Vec<String> = country
        .currencies
        .values()
        .map(|c| format!("{} ({})", c.name, c.symbol.as_deref().unwrap_or("")))
        .collect();
    if !currencies.is_empty() {
        lines.push(format!("Currencies: {}", currencies.join(", ")));
    }

    let languages: Vec<&str> = country.languages.values().map(String::as_str).collect();
    if !languages.is_empty() {
        lines.push(format!("Languages: {}", languages.join(", ")));
    }

    if !country.borders.is_empty() {
        lines.push(format!("Border Countries: {}", country.borders.join(" ")));
    }

    match favorite {
        Some(true) => lines.push(format!("{}", "★ In your favorites".yellow())),
        Some(false) => lines.push("☆ Not in your favorites".to_string()),
        None => {}
    }

    lines.join("\n")
}

/// Favorites page for a logged-in user
pub fn favorites_page(username: &str, favorites: &[FavoriteEntry]) -> String {
    let header = format!("{}'s favorite countries", username).bold().to_string();
    if favorites.is_empty() {
        return format!(
            "{}\n\nYou haven't added any favorites yet.\nExplore countries and mark them with `atlas show <CODE> --toggle-favorite`.",
            header
        );
    }

    let cards: Vec<String> = favorites
        .iter()
        .map(|entry| country_card(&Country::from(entry), Some(true)))
        .collect();
    format!("{}\n\n{}", header, cards.join("\n\n"))
}
