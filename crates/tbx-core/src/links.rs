//! Link classifier: decides whether a message is eligible for resolution.

/// Known TeraBox mirror hosts.
///
/// The test is a raw substring match, not URL parsing: input containing any of
/// these anywhere (even outside a well-formed URL) is classified eligible.
/// Intentionally permissive; the external resolver is the source of truth for
/// actual link validity.
pub const TERABOX_HOSTS: &[&str] = &[
    "www.mirrobox.com",
    "www.nephobox.com",
    "freeterabox.com",
    "www.freeterabox.com",
    "1024tera.com",
    "4funbox.co",
    "www.4funbox.com",
    "teraboxlink.com",
    "terasharelink.com",
    "terabox.app",
    "terabox.com",
    "www.terabox.app",
    "terabox.fun",
    "www.terabox.com",
    "www.1024tera.com",
    "www.momerybox.com",
    "teraboxapp.com",
    "momerybox.com",
    "tibibox.com",
    "www.teraboxshare.com",
    "www.teraboxapp.com",
];

pub fn is_terabox_link(text: &str) -> bool {
    TERABOX_HOSTS.iter().any(|host| text.contains(host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_full_share_urls() {
        assert!(is_terabox_link("https://terabox.com/s/abc123"));
        assert!(is_terabox_link("https://www.1024tera.com/sharing/link?surl=x"));
        assert!(is_terabox_link("http://tibibox.com/s/1"));
    }

    #[test]
    fn matches_host_anywhere_in_text() {
        // Substring semantics: surrounding prose does not matter.
        assert!(is_terabox_link("check this out terabox.app/s/xyz please"));
        assert!(is_terabox_link("momerybox.com"));
        // Even non-URLs that merely contain a host string are eligible.
        assert!(is_terabox_link("myterabox.com-is-not-a-url"));
    }

    #[test]
    fn rejects_unrelated_text() {
        assert!(!is_terabox_link("https://example.com/not-a-link"));
        assert!(!is_terabox_link("hello there"));
        assert!(!is_terabox_link(""));
    }

    #[test]
    fn match_is_case_sensitive() {
        assert!(!is_terabox_link("https://TERABOX.COM/s/abc123"));
    }
}
