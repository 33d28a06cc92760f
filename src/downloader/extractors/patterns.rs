// Pattern table shared by the page scrapers
//
// Each group names one way a video URL shows up in the markup, plus how to
// pull the URL out of a match. Groups run in table order and their results
// are pooled; dedupe and filtering happen in the strategy.

use lazy_static::lazy_static;
use regex::Regex;

use crate::downloader::utils::unescape_slashes;

/// How a URL is extracted from a pattern match
#[derive(Debug)]
pub enum PatternKind {
    /// The whole match is the URL
    Direct(Regex),
    /// Find enclosing blocks first, then URLs inside each block
    Nested { block: Regex, inner: Regex },
    /// Capture group 1 holds a slash-escaped URL
    EscapedCapture(Regex),
    /// The URL is the first `https://` run inside the match text
    Quoted(Regex),
}

#[derive(Debug)]
pub struct PatternGroup {
    pub name: &'static str,
    pub kind: PatternKind,
}

lazy_static! {
    static ref DESKTOP_PATTERNS: Vec<PatternGroup> = vec![
        PatternGroup {
            name: "direct_mp4",
            kind: PatternKind::Direct(
                Regex::new(r#"https://video\.twimg\.com/[^"]+\.mp4[^"]*"#).unwrap()
            ),
        },
        PatternGroup {
            name: "amplify_video",
            kind: PatternKind::Direct(
                Regex::new(r#"https://video\.twimg\.com/amplify_video/[^"]+"#).unwrap()
            ),
        },
        PatternGroup {
            name: "video_info_json",
            kind: PatternKind::Nested {
                block: Regex::new(r#""video_info":\s*\{[^}]+\}"#).unwrap(),
                inner: Regex::new(r#"https://video\.twimg\.com/[^"]+"#).unwrap(),
            },
        },
        PatternGroup {
            name: "script_playback_url",
            kind: PatternKind::EscapedCapture(
                Regex::new(r#"(?s)<script[^>]*>.*?"playback_url":"([^"]*)".*?</script>"#).unwrap()
            ),
        },
    ];

    static ref MOBILE_PATTERNS: Vec<PatternGroup> = vec![
        PatternGroup {
            name: "direct_mp4",
            kind: PatternKind::Quoted(
                Regex::new(r#"https://video\.twimg\.com/[^"'\s]+\.mp4[^"'\s]*"#).unwrap()
            ),
        },
        PatternGroup {
            name: "amplify_video",
            kind: PatternKind::Quoted(
                Regex::new(r#"https://video\.twimg\.com/amplify_video/[^"'\s]+"#).unwrap()
            ),
        },
        PatternGroup {
            name: "playback_url_field",
            kind: PatternKind::Quoted(Regex::new(r#""playback_url":"([^"]+)""#).unwrap()),
        },
        PatternGroup {
            name: "video_url_key",
            kind: PatternKind::Quoted(
                Regex::new(r#"video_url['"]\s*:\s*['"]([^'"]+)['"]"#).unwrap()
            ),
        },
    ];

    static ref QUOTED_URL_RE: Regex = Regex::new(r#"https://[^"'\s]+"#).unwrap();
}

/// Patterns for the desktop page
pub fn desktop_patterns() -> &'static [PatternGroup] {
    &DESKTOP_PATTERNS
}

/// Patterns for the mobile page
pub fn mobile_patterns() -> &'static [PatternGroup] {
    &MOBILE_PATTERNS
}

impl PatternGroup {
    /// URLs this group finds in `body`, in match order
    pub fn extract(&self, body: &str) -> Vec<String> {
        match &self.kind {
            PatternKind::Direct(re) => re.find_iter(body).map(|m| m.as_str().to_string()).collect(),
            PatternKind::Nested { block, inner } => block
                .find_iter(body)
                .flat_map(|b| inner.find_iter(b.as_str()).map(|m| m.as_str().to_string()))
                .collect(),
            PatternKind::EscapedCapture(re) => re
                .captures_iter(body)
                .filter_map(|caps| caps.get(1))
                .map(|m| unescape_slashes(m.as_str()))
                .collect(),
            PatternKind::Quoted(re) => re
                .find_iter(body)
                .map(|m| {
                    let text = m.as_str();
                    QUOTED_URL_RE
                        .find(text)
                        .map_or(text, |url| url.as_str())
                        .to_string()
                })
                .collect(),
        }
    }
}

/// Pool matches from every group, in table order, duplicates included
pub fn collect_matches(body: &str, groups: &[PatternGroup]) -> Vec<String> {
    groups.iter().flat_map(|group| group.extract(body)).collect()
}

/// Desktop filter: has a video file extension or a video marker
pub fn looks_like_video(url: &str) -> bool {
    url.contains(".mp4") || url.contains("video")
}

/// Mobile filter: on the video CDN and either a file or an amplify URL
pub fn looks_like_cdn_video(url: &str) -> bool {
    url.contains("video.twimg.com") && (url.contains(".mp4") || url.contains("amplify"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group<'a>(groups: &'a [PatternGroup], name: &str) -> &'a PatternGroup {
        groups.iter().find(|g| g.name == name).unwrap()
    }

    #[test]
    fn test_tables_keep_application_order() {
        let desktop: Vec<_> = desktop_patterns().iter().map(|g| g.name).collect();
        assert_eq!(
            desktop,
            ["direct_mp4", "amplify_video", "video_info_json", "script_playback_url"]
        );
        let mobile: Vec<_> = mobile_patterns().iter().map(|g| g.name).collect();
        assert_eq!(
            mobile,
            ["direct_mp4", "amplify_video", "playback_url_field", "video_url_key"]
        );
    }

    #[test]
    fn test_direct_mp4_stops_at_quote() {
        let body = r#"<video src="https://video.twimg.com/ext_tw_video/1/pu/vid/720x1280/a.mp4?tag=12"></video>"#;
        assert_eq!(
            group(desktop_patterns(), "direct_mp4").extract(body),
            vec!["https://video.twimg.com/ext_tw_video/1/pu/vid/720x1280/a.mp4?tag=12"]
        );
    }

    #[test]
    fn test_video_info_block_urls() {
        let body = r#"{"video_info": {"variants": "https://video.twimg.com/x/1.m3u8", "b": "https://video.twimg.com/x/2.mp4"}}"#;
        assert_eq!(
            group(desktop_patterns(), "video_info_json").extract(body),
            vec!["https://video.twimg.com/x/1.m3u8", "https://video.twimg.com/x/2.mp4"]
        );
    }

    #[test]
    fn test_script_playback_url_is_unescaped() {
        let body = r#"<script type="text/javascript">window.x={"playback_url":"https://video.twimg.com/amplify_video/9/vid.mp4"};</script>"#;
        assert_eq!(
            group(desktop_patterns(), "script_playback_url").extract(body),
            vec!["https://video.twimg.com/amplify_video/9/vid.mp4"]
        );
    }

    #[test]
    fn test_mobile_quoted_fields_yield_bare_urls() {
        let body = r#"{"playback_url":"https://video.twimg.com/amplify_video/5/a.mp4"} video_url': 'https://video.twimg.com/b.mp4'"#;
        assert_eq!(
            group(mobile_patterns(), "playback_url_field").extract(body),
            vec!["https://video.twimg.com/amplify_video/5/a.mp4"]
        );
        assert_eq!(
            group(mobile_patterns(), "video_url_key").extract(body),
            vec!["https://video.twimg.com/b.mp4"]
        );
    }

    #[test]
    fn test_quoted_match_without_url_is_kept_verbatim() {
        let body = r#"video_url": "/relative/path.mp4""#;
        assert_eq!(
            group(mobile_patterns(), "video_url_key").extract(body),
            vec![r#"video_url": "/relative/path.mp4""#]
        );
    }

    #[test]
    fn test_collect_pools_across_groups() {
        let body = r#""https://video.twimg.com/amplify_video/1/a.mp4""#;
        let pooled = collect_matches(body, desktop_patterns());
        // hit by both direct_mp4 and amplify_video
        assert_eq!(pooled.len(), 2);
        assert!(pooled.iter().all(|u| u == "https://video.twimg.com/amplify_video/1/a.mp4"));
    }

    #[test]
    fn test_filters() {
        assert!(looks_like_video("https://cdn.example/a.mp4"));
        assert!(looks_like_video("https://video.twimg.com/x.m3u8"));
        assert!(!looks_like_video("https://pbs.twimg.com/media/a.jpg"));

        assert!(looks_like_cdn_video("https://video.twimg.com/amplify_video/1/pl.m3u8"));
        assert!(looks_like_cdn_video("https://video.twimg.com/x/a.mp4"));
        assert!(!looks_like_cdn_video("https://video.twimg.com/x/pl.m3u8"));
        assert!(!looks_like_cdn_video("https://cdn.example/a.mp4"));
    }
}
