use url::Url;

const DEFAULT_COOKIE_NAME: &str = "cookie-consent";
const DEFAULT_EXPIRY_DAYS: i64 = 365;

/// Main widget configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Name of the cookie holding the serialized consent record
    pub cookie_name: String,
    /// Lifetime of the consent cookie, in days
    pub expiry_days: i64,
    /// Location of the hosting page. Feeds the path/domain matrix of the
    /// tracking-cookie deletion sweep.
    pub page: Url,
    /// Whether the banner is accompanied by an overlay and page-blur effect
    pub overlay: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            expiry_days: DEFAULT_EXPIRY_DAYS,
            page: Url::parse("https://localhost/").expect("default page URL is valid"),
            overlay: true,
        }
    }
}
