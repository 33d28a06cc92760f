// Helper functions shared by the strategies

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// Upper bound for the sanitized title part of a file name
pub const MAX_FILENAME_LEN: usize = 100;

/// Title used when a page carries no usable metadata
pub const DEFAULT_TITLE: &str = "twitter_video";

const SEPARATOR: char = '_';

lazy_static! {
    static ref SITE_SUFFIX_RE: Regex = Regex::new(r"\s*/\s*(?:Twitter|X)\s*$").unwrap();
}

/// Reduce an arbitrary title to `[a-z0-9_]`, at most [`MAX_FILENAME_LEN`] chars.
///
/// Each character outside ASCII alphanumerics becomes its own `_`.
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                SEPARATOR
            }
        })
        .take(MAX_FILENAME_LEN)
        .collect()
}

/// `<sanitized title>_<post id>.mp4`
pub fn media_filename(title: &str, post_id: &str) -> String {
    format!("{}_{}.mp4", sanitize_filename(title), post_id)
}

/// Remove exact duplicates, keeping first-seen order
pub fn dedupe(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(urls.len());
    urls.into_iter()
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Undo JSON-style slash escaping (`/`, `\/`)
pub fn unescape_slashes(raw: &str) -> String {
    raw.replace("\\u002F", "/")
        .replace("\\u002f", "/")
        .replace("\\/", "/")
}

/// Strip the trailing " / Twitter" (or " / X") site name and surrounding whitespace
pub fn clean_title(raw: &str) -> String {
    SITE_SUFFIX_RE.replace(raw, "").trim().to_string()
}
