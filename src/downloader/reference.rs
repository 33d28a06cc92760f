// Post link parsing

use lazy_static::lazy_static;
use regex::Regex;

use super::errors::DownloadError;
use super::models::PostReference;

lazy_static! {
    static ref POST_LINK_RE: Regex =
        Regex::new(r"^https?://(?:www\.)?(?:twitter\.com|x\.com)/[A-Za-z0-9_]+/status/([0-9]+)").unwrap();
    static ref HOST_RE: Regex =
        Regex::new(r"^(https?://)(?:www\.)?(?:twitter\.com|x\.com)").unwrap();
}

impl PostReference {
    /// Parse a post link such as `https://x.com/user/status/1234567890`.
    ///
    /// Accepts `twitter.com` and `x.com` (optionally `www.`) over http or https.
    /// Query strings and trailing path segments (`/video/1`) are ignored.
    pub fn parse(link: &str) -> Result<Self, DownloadError> {
        let link = link.trim();

        let id = POST_LINK_RE
            .captures(link)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| DownloadError::InvalidReference(link.to_string()))?;

        Ok(Self {
            id,
            link: link.to_string(),
        })
    }

    /// Same link with the host swapped for the mobile rendering host
    pub fn mobile_link(&self, mobile_host: &str) -> String {
        HOST_RE
            .replace(&self.link, |caps: &regex::Captures| {
                format!("{}{}", &caps[1], mobile_host)
            })
            .into_owned()
    }
}

/// Quick shape check without building a reference
pub fn is_valid_post_link(link: &str) -> bool {
    POST_LINK_RE.is_match(link.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_numeric_status_segment() {
        let cases = [
            ("https://x.com/user/status/1234567890", "1234567890"),
            ("https://twitter.com/some_user/status/42", "42"),
            ("http://www.twitter.com/a/status/7?s=20", "7"),
            ("https://www.x.com/a/status/99/video/1", "99"),
        ];

        for (link, id) in cases {
            let reference = PostReference::parse(link).unwrap();
            assert_eq!(reference.id(), id, "link: {}", link);
            assert_eq!(reference.link(), link);
        }
    }

    #[test]
    fn test_rejects_other_shapes() {
        let links = [
            "",
            "not a url",
            "https://example.com/user/status/123",
            "https://x.com/user/status/",
            "https://x.com/user/status/abc",
            "https://x.com/user/likes",
            "ftp://x.com/user/status/1",
            "https://mobile.x.com.evil.io/user/status/1",
            "https://x.com/ユーザー/status/1",
            "https://x.com/user/status/١٢٣",
        ];

        for link in links {
            assert_eq!(
                PostReference::parse(link),
                Err(DownloadError::InvalidReference(link.to_string())),
                "link: {}",
                link
            );
            assert!(!is_valid_post_link(link));
        }
    }

    #[test]
    fn test_mobile_link_rewrites_host_only() {
        let x = PostReference::parse("https://x.com/user/status/1").unwrap();
        assert_eq!(x.mobile_link("m.twitter.com"), "https://m.twitter.com/user/status/1");

        let www = PostReference::parse("https://www.twitter.com/user/status/2?s=1").unwrap();
        assert_eq!(
            www.mobile_link("m.twitter.com"),
            "https://m.twitter.com/user/status/2?s=1"
        );
    }
}
