//! Cookie storage abstraction.
//!
//! The widget never talks to a real browser cookie store. Instead the host
//! supplies an implementation of the [`CookieJar`] trait, which models the
//! store exactly as page scripts see it: one header string of live cookies
//! for reading, and one `document.cookie = "..."`-style assignment at a
//! time for writing.
//!
//! # Concurrency model
//! - [`CookieJarHandle`] is `Arc<RwLock<dyn CookieJar + Send + Sync>>`.
//!   Callers take a **read lock** for [`CookieJar::header`] and
//!   [`CookieJar::names`], and a **write lock** for [`CookieJar::write`].
//!
//! Two implementations ship with the crate: [`InMemoryCookieJar`], which
//! keeps everything in memory, and [`JsonCookieJar`], which persists the
//! jar to a JSON file after every mutation so a headless host keeps its
//! cookies across "page loads".

pub mod codec;
pub mod jar;
pub mod json;
pub mod sweep;

use std::sync::{Arc, RwLock};

pub use jar::InMemoryCookieJar;
pub use json::JsonCookieJar;

/// A handle to a cookie jar trait.
///
/// This is a reference-counted, read/write-locked pointer to a type-erased
/// [`CookieJar`]. Obtain a **read lock** for queries and a **write lock**
/// for mutations.
pub type CookieJarHandle = Arc<RwLock<dyn CookieJar + Send + Sync>>;

/// The host's cookie store as scripts see it.
pub trait CookieJar: Send + Sync {
    /// Returns the live cookies as a `"name=value; name2=value2"` header
    /// string. Empty string when the jar is empty.
    fn header(&self) -> String;

    /// Applies one `document.cookie`-style assignment.
    ///
    /// The string carries `name=value` plus optional `Path`, `Domain`,
    /// `Expires`, `Max-Age` and `SameSite` attributes. A `Max-Age=0` write
    /// removes the cookie with the matching (name, domain, path) identity,
    /// mirroring browser deletion semantics: an overwrite whose scope does
    /// not match the stored cookie silently removes nothing.
    fn write(&mut self, set_str: &str) -> anyhow::Result<()>;

    /// Names of all live cookies.
    fn names(&self) -> Vec<String>;
}
