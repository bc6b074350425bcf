//! Client-side cookie jars.
//!
//! A jar maps cookie names to string values with an absolute expiry. Reads
//! never return an expired cookie, the way a browser would hide it.
//!
//! [`FileCookieJar`] keeps every cookie in one JSON file and rewrites the whole
//! file on each mutation; [`MemoryCookieJar`] lives only as long as the process.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

use crate::constants::MAX_COOKIE_BYTES;
use crate::utils::SessionError;

/// One stored cookie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredCookie {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Name/value storage with expiry
pub trait CookieJar: Send + Sync {
    /// Value of a live cookie
    fn get(&self, name: &str) -> Option<String>;

    /// Create or overwrite a cookie
    fn set(&mut self, name: &str, value: &str, expires_at: DateTime<Utc>) -> Result<(), SessionError>;

    /// Delete a cookie. Removing an absent cookie is not an error.
    fn remove(&mut self, name: &str) -> Result<(), SessionError>;
}

/// Reject values a browser would refuse to store
fn check_size(name: &str, value: &str) -> Result<(), SessionError> {
    let size = name.len() + value.len();
    if size > MAX_COOKIE_BYTES {
        return Err(SessionError::CookieTooLarge {
            name: name.to_string(),
            size,
            limit: MAX_COOKIE_BYTES,
        });
    }
    Ok(())
}

/// In-memory jar
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: BTreeMap<String, StoredCookie>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies
            .get(name)
            .filter(|cookie| cookie.is_live(Utc::now()))
            .map(|cookie| cookie.value.clone())
    }

    fn set(&mut self, name: &str, value: &str, expires_at: DateTime<Utc>) -> Result<(), SessionError> {
        check_size(name, value)?;
        self.cookies.insert(
            name.to_string(),
            StoredCookie {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<(), SessionError> {
        self.cookies.remove(name);
        Ok(())
    }
}

/// On-disk representation of the jar
#[derive(Debug, Default, Serialize, Deserialize)]
struct CookieFile {
    cookies: BTreeMap<String, StoredCookie>,
}

/// JSON file backed jar
///
/// The file is the source of truth: it is re-read on every access, so several
/// processes sharing one file see each other's writes. Writes are not atomic.
#[derive(Debug)]
pub struct FileCookieJar {
    path: PathBuf,
    warned_corrupt: AtomicBool,
}

impl FileCookieJar {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            warned_corrupt: AtomicBool::new(false),
        }
    }

    /// Missing or corrupt files read as an empty jar
    fn load(&self) -> CookieFile {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return CookieFile::default(),
        };

        match serde_json::from_str(&contents) {
            Ok(file) => file,
            Err(err) => {
                if !self.warned_corrupt.swap(true, Ordering::Relaxed) {
                    warn!(
                        "Ignoring unreadable cookie file {}: {}",
                        self.path.display(),
                        err
                    );
                }
                CookieFile::default()
            }
        }
    }

    /// Rewrites the whole file, dropping cookies that already expired
    fn save(&self, mut file: CookieFile) -> Result<(), SessionError> {
        let now = Utc::now();
        file.cookies.retain(|_, cookie| cookie.is_live(now));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, contents)?;
        debug!("Saved {} cookie(s) to {}", file.cookies.len(), self.path.display());
        Ok(())
    }
}

impl CookieJar for FileCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.load()
            .cookies
            .remove(name)
            .filter(|cookie| cookie.is_live(Utc::now()))
            .map(|cookie| cookie.value)
    }

    fn set(&mut self, name: &str, value: &str, expires_at: DateTime<Utc>) -> Result<(), SessionError> {
        check_size(name, value)?;
        let mut file = self.load();
        file.cookies.insert(
            name.to_string(),
            StoredCookie {
                value: value.to_string(),
                expires_at,
            },
        );
        self.save(file)
    }

    fn remove(&mut self, name: &str) -> Result<(), SessionError> {
        let mut file = self.load();
        if file.cookies.remove(name).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.save(file)
    }
}
