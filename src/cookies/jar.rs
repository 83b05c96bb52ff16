//! In-memory reference implementation of the cookie jar.
//!
//! [`InMemoryCookieJar`] models a browser cookie store closely enough for
//! the widget's needs:
//!
//! - A cookie's identity is its (name, domain, path) triple. Writing a
//!   cookie with an existing identity replaces it (last write wins);
//!   writing with a different path or domain creates a sibling.
//! - A leading dot on the `Domain` attribute is stripped, so
//!   `domain=example.com` and `domain=.example.com` address the same
//!   cookie, as per RFC 6265.
//! - `Max-Age=0` (or negative) removes the cookie with the matching
//!   identity and stores nothing. Positive lifetimes and `Expires` are
//!   stored but not enforced; the jar performs no expiration sweeps.

use serde::{Deserialize, Serialize};

use crate::cookies::CookieJar;

/// A single cookie as held by the jar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieEntry {
    /// Cookie name (case-sensitive).
    pub name: String,

    /// Raw cookie value (not URL-decoded).
    pub value: String,

    /// Path scoping (e.g. `"/"`). Part of the cookie's identity.
    pub path: Option<String>,

    /// Domain scoping, stored without a leading dot. Part of the cookie's
    /// identity; `None` means host-only.
    pub domain: Option<String>,

    /// Expiration timestamp as written, if any. Stored, not enforced.
    pub expires: Option<String>,

    /// SameSite policy (`"Strict"`, `"Lax"` or `"None"`).
    pub same_site: Option<String>,
}

impl CookieEntry {
    fn same_identity(&self, other: &CookieEntry) -> bool {
        self.name == other.name && self.domain == other.domain && self.path == other.path
    }
}

/// In-memory cookie jar. Serializable so it can be snapshotted by a
/// persisting wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCookieJar {
    pub entries: Vec<CookieEntry>,
}

impl InMemoryCookieJar {
    /// Creates an empty jar.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CookieJar for InMemoryCookieJar {
    fn header(&self) -> String {
        self.entries
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&mut self, set_str: &str) -> anyhow::Result<()> {
        let Some((name, rest)) = set_str.split_once('=') else {
            anyhow::bail!("cookie assignment without '=': {set_str:?}");
        };

        let mut entry = CookieEntry {
            name: name.trim().to_string(),
            value: String::new(),
            path: None,
            domain: None,
            expires: None,
            same_site: None,
        };

        if entry.name.is_empty() {
            anyhow::bail!("cookie assignment without a name: {set_str:?}");
        }

        let mut max_age: Option<i64> = None;
        let mut value_seen = false;

        for part in rest.split(';') {
            let part = part.trim();

            // The first segment is always the value, even when empty
            if !value_seen {
                entry.value = part.to_string();
                value_seen = true;
                continue;
            }

            if let Some((k, v)) = part.split_once('=') {
                let v = v.trim();
                match k.trim().to_ascii_lowercase().as_str() {
                    "path" => entry.path = Some(v.to_string()),
                    "domain" => entry.domain = Some(v.trim_start_matches('.').to_string()),
                    "expires" => entry.expires = Some(v.to_string()),
                    "max-age" => max_age = v.parse().ok(),
                    "samesite" => {
                        // normalize to "Lax" | "Strict" | "None"
                        if v.eq_ignore_ascii_case("lax") {
                            entry.same_site = Some("Lax".to_string());
                        } else if v.eq_ignore_ascii_case("strict") {
                            entry.same_site = Some("Strict".to_string());
                        } else if v.eq_ignore_ascii_case("none") {
                            entry.same_site = Some("None".to_string());
                        } else {
                            entry.same_site = Some(v.to_string());
                        }
                    }
                    _ => {}
                }
            }
        }

        // An expired write is a deletion of the matching identity
        if matches!(max_age, Some(age) if age <= 0) {
            self.entries.retain(|c| !c.same_identity(&entry));
            return Ok(());
        }

        if let Some(existing) = self.entries.iter_mut().find(|c| c.same_identity(&entry)) {
            *existing = entry;
        } else {
            self.entries.push(entry);
        }

        Ok(())
    }

    fn names(&self) -> Vec<String> {
        self.entries.iter().map(|c| c.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_back() {
        let mut jar = InMemoryCookieJar::new();
        jar.write("session=abc123; path=/; SameSite=Lax").unwrap();
        jar.write("_ga=GA1.1.1234; path=/").unwrap();

        assert_eq!(jar.header(), "session=abc123; _ga=GA1.1.1234");
        assert_eq!(jar.names(), vec!["session", "_ga"]);
    }

    #[test]
    fn same_identity_is_last_write_wins() {
        let mut jar = InMemoryCookieJar::new();
        jar.write("session=old; path=/").unwrap();
        jar.write("session=new; path=/").unwrap();

        assert_eq!(jar.entries.len(), 1);
        assert_eq!(jar.header(), "session=new");
    }

    #[test]
    fn different_path_creates_a_sibling() {
        let mut jar = InMemoryCookieJar::new();
        jar.write("session=a; path=/").unwrap();
        jar.write("session=b; path=/shop/").unwrap();

        assert_eq!(jar.entries.len(), 2);
    }

    #[test]
    fn max_age_zero_removes_only_the_matching_identity() {
        let mut jar = InMemoryCookieJar::new();
        jar.write("_ga=GA1.1; path=/").unwrap();
        jar.write("_ga=GA1.1; path=/shop/").unwrap();

        jar.write("_ga=; Max-Age=0; path=/").unwrap();

        assert_eq!(jar.names(), vec!["_ga"]);
        assert_eq!(jar.entries[0].path.as_deref(), Some("/shop/"));
    }

    #[test]
    fn mismatched_path_deletes_nothing() {
        let mut jar = InMemoryCookieJar::new();
        jar.write("_gid=GA1.2; path=/shop/").unwrap();

        jar.write("_gid=; Max-Age=0; path=/").unwrap();

        assert_eq!(jar.names(), vec!["_gid"]);
    }

    #[test]
    fn dotted_domain_addresses_the_bare_domain_cookie() {
        let mut jar = InMemoryCookieJar::new();
        jar.write("_ga=GA1.1; path=/; domain=example.com").unwrap();

        jar.write("_ga=; Max-Age=0; path=/; domain=.example.com").unwrap();

        assert!(jar.names().is_empty());
    }

    #[test]
    fn deleting_an_absent_cookie_is_a_no_op() {
        let mut jar = InMemoryCookieJar::new();
        jar.write("_ga=; Max-Age=0; path=/").unwrap();

        assert!(jar.entries.is_empty());
    }

    #[test]
    fn assignment_without_equals_is_rejected() {
        let mut jar = InMemoryCookieJar::new();
        assert!(jar.write("not a cookie").is_err());
        assert!(jar.write("=value-without-name").is_err());
    }

    #[test]
    fn samesite_is_normalized() {
        let mut jar = InMemoryCookieJar::new();
        jar.write("a=1; path=/; SameSite=lax").unwrap();
        jar.write("b=2; path=/; SameSite=STRICT").unwrap();

        assert_eq!(jar.entries[0].same_site.as_deref(), Some("Lax"));
        assert_eq!(jar.entries[1].same_site.as_deref(), Some("Strict"));
    }
}
