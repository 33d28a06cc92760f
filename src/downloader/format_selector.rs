// VariantSelector - picks the best encoding out of several candidates
//
// Rules:
// - only video-typed (MP4) candidates are considered
// - a declared bitrate beats no bitrate
// - higher bitrate wins; on ties and among bitrate-less entries the first seen wins

use super::models::MediaCandidate;

/// Bitrate-based variant selection
pub struct VariantSelector;

impl VariantSelector {
    /// Highest-bitrate video candidate, or `None` if there is no video entry
    pub fn select_best(candidates: &[MediaCandidate]) -> Option<&MediaCandidate> {
        candidates
            .iter()
            .filter(|c| c.is_video())
            .reduce(|best, current| match (best.bitrate, current.bitrate) {
                (None, Some(_)) => current,
                (Some(b), Some(c)) if c > b => current,
                _ => best,
            })
    }

    /// Quality label from a reported vertical resolution
    pub fn quality_label(height: Option<u32>) -> String {
        match height {
            Some(h) if h > 0 => format!("{}p", h),
            _ => "auto".to_string(),
        }
    }
}
