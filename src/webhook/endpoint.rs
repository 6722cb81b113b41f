//! Webhook address validation.

use std::sync::LazyLock;

use regex::Regex;

/// Host every accepted webhook must live on.
const PROVIDER_HOST: &str = "discord.com";

static ENDPOINT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^https://{}/api/", regex::escape(PROVIDER_HOST)))
        .expect("endpoint pattern is a valid regex")
});

/// Returns true if `url` has the shape `https://discord.com/api/<anything>`.
///
/// The match is anchored at the start of the string: an address that merely
/// contains the provider prefix somewhere (for example in its path) is
/// rejected.
///
/// # Example
///
/// ```
/// use hook_pacer::webhook::is_valid_endpoint;
///
/// assert!(is_valid_endpoint("https://discord.com/api/webhooks/123/abc"));
/// assert!(!is_valid_endpoint("http://discord.com/api/x"));
/// assert!(!is_valid_endpoint("https://evil.com/discord.com/api/x"));
/// ```
#[must_use]
pub fn is_valid_endpoint(url: &str) -> bool {
    ENDPOINT_PATTERN.is_match(url)
}
