/// Constants module to avoid magic numbers in the codebase

// Remote directory
pub const DEFAULT_DIRECTORY_URL: &str = "https://restcountries.com/v3.1";
/// Field projection used by the listing page to keep the `/all` payload small
pub const LIST_FIELDS: &str = "name,capital,population,region,subregion,flags,cca3,languages";

// Timeouts (0 keeps the HTTP client's own default)
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 0;

// Session persistence
pub const SESSION_COOKIE: &str = "user_session";
pub const FAVORITES_COOKIE: &str = "favorites";
pub const SESSION_LIFETIME_HOURS: i64 = 24;
/// Browsers refuse cookies above roughly this size; it caps the favorites list
pub const MAX_COOKIE_BYTES: usize = 4096;
pub const COOKIE_FILE_NAME: &str = "cookies.json";

// Filters offered by the listing page
pub const REGIONS: &[&str] = &["Africa", "Americas", "Asia", "Europe", "Oceania"];
pub const COMMON_LANGUAGES: &[&str] = &[
    "English",
    "Spanish",
    "French",
    "Arabic",
    "Chinese",
    "Russian",
    "Portuguese",
    "German",
];

// Messages shown to the user
pub const MSG_LOAD_FAILED: &str = "Failed to load countries. Please try again later.";
pub const MSG_NO_CRITERIA_MATCH: &str = "No countries found matching your criteria.";
pub const MSG_COUNTRY_NOT_FOUND: &str = "Country not found";
pub const MSG_DETAIL_FAILED: &str = "Failed to load country details";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
