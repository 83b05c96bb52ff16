//! JSON-backed cookie jar.
//!
//! [`JsonCookieJar`] wraps an [`InMemoryCookieJar`] and persists it to a
//! single JSON file after every mutation, so a headless host keeps its
//! cookies across "page loads". The wrapper is transparent for reads and
//! eager for writes.
//!
//! I/O and serialization failures are logged and swallowed: the in-memory
//! jar keeps working for the current session, the cookies are just not
//! durable. A missing or malformed file on open yields an empty jar.

use std::fs;
use std::path::PathBuf;

use crate::cookies::jar::InMemoryCookieJar;
use crate::cookies::CookieJar;

/// A cookie jar persisted to a JSON file.
pub struct JsonCookieJar {
    /// Path to the JSON file where cookies are stored.
    path: PathBuf,
    inner: InMemoryCookieJar,
}

impl JsonCookieJar {
    /// Opens (or creates) a JSON-backed jar at `path`.
    ///
    /// An unreadable or malformed file is treated as an empty jar; the
    /// file is rewritten on the next mutation.
    pub fn open(path: PathBuf) -> Self {
        let inner = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default();

        Self { path, inner }
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.inner) {
            Ok(contents) => {
                if let Err(e) = fs::write(&self.path, contents) {
                    log::warn!(
                        "Failed to persist cookie jar to {}: {e}",
                        self.path.display()
                    );
                }
            }
            Err(e) => log::warn!("Failed to serialize cookie jar: {e}"),
        }
    }
}

impl CookieJar for JsonCookieJar {
    fn header(&self) -> String {
        self.inner.header()
    }

    /// Applies the assignment to the inner jar, then persists the
    /// updated state.
    fn write(&mut self, set_str: &str) -> anyhow::Result<()> {
        self.inner.write(set_str)?;
        self.persist();
        Ok(())
    }

    fn names(&self) -> Vec<String> {
        self.inner.names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookies_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        {
            let mut jar = JsonCookieJar::open(path.clone());
            jar.write("session=abc; path=/; SameSite=Lax").unwrap();
        }

        let jar = JsonCookieJar::open(path);
        assert_eq!(jar.header(), "session=abc");
    }

    #[test]
    fn deletion_is_persisted_too() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        {
            let mut jar = JsonCookieJar::open(path.clone());
            jar.write("_ga=GA1.1; path=/").unwrap();
            jar.write("_ga=; Max-Age=0; path=/").unwrap();
        }

        let jar = JsonCookieJar::open(path);
        assert!(jar.names().is_empty());
    }

    #[test]
    fn malformed_file_yields_an_empty_jar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        fs::write(&path, "{ not json").unwrap();

        let jar = JsonCookieJar::open(path);
        assert!(jar.names().is_empty());
    }
}
