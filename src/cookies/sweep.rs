//! Best-effort deletion sweep for third-party tracking cookies.
//!
//! The widget never sets these cookies itself; they come from the Google
//! Analytics / Universal Analytics / GTM script families and are identified
//! purely by name prefix. Browsers only delete a cookie when the expiring
//! overwrite matches the path and domain used at set time, so the sweep
//! issues one overwrite per combination in a small path/domain matrix.
//! Cookies set with attributes outside that matrix survive the sweep.

use url::Url;

use crate::cookies::CookieJar;

/// Name prefixes of the GA/UA/GTM cookie families.
pub const GA_COOKIE_PREFIXES: &[&str] = &[
    "_ga", "_gid", "_gat", "_gat_gtag", "_gat_UA", "__utma", "__utmb", "__utmc", "__utmz",
    "__utmt",
];

/// Whether `name` belongs to a GA-family cookie.
pub fn is_ga_cookie(name: &str) -> bool {
    GA_COOKIE_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// The expiring overwrites for `name`, across the full path/domain matrix.
///
/// Paths are the root and the current page's path; domains are unset, the
/// bare hostname without a leading `www.`, and the dot-prefixed hostname.
pub fn expiring_writes(name: &str, page: &Url) -> Vec<String> {
    let host = page.host_str().unwrap_or_default();
    let bare = host.strip_prefix("www.").unwrap_or(host);

    let paths = ["/", page.path()];
    let domains = [None, Some(bare.to_string()), Some(format!(".{bare}"))];

    let mut writes = Vec::new();
    for path in &paths {
        for domain in &domains {
            let mut write = format!("{name}=; Max-Age=0; path={path}");
            if let Some(domain) = domain {
                write.push_str(&format!("; domain={domain}"));
            }
            writes.push(write);
        }
    }

    writes
}

/// Removes every GA-family cookie currently in `jar`, best effort.
///
/// Individual write failures are logged and do not abort the sweep.
pub fn sweep(jar: &mut dyn CookieJar, page: &Url) {
    let targets: Vec<String> = jar.names().into_iter().filter(|n| is_ga_cookie(n)).collect();

    for name in &targets {
        for write in expiring_writes(name, page) {
            if let Err(e) = jar.write(&write) {
                log::warn!("Failed to expire tracking cookie {name}: {e}");
            }
        }
    }

    if !targets.is_empty() {
        log::debug!("Swept {} tracking cookie(s)", targets.len());
    }
}
