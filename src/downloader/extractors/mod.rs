// Extraction strategies
//
// Three independent ways to find a post's video, tried in order:
// - desktop page scrape (richest, most fragile)
// - mobile page scrape (different markup, same origin)
// - mirror API (structured JSON, depends on a third party)
//
// Each strategy absorbs its own faults and reports NoResult; the
// orchestrator only decides whether to move on.

mod desktop;
mod diagnostics;
mod mirror;
mod mobile;
mod orchestrator;
mod patterns;
mod traits;

pub use desktop::DesktopPageExtractor;
pub use diagnostics::{diagnose_error, diagnose_fault, FaultReason};
pub use mirror::MirrorApiExtractor;
pub use mobile::MobilePageExtractor;
pub use orchestrator::ExtractionOrchestrator;
pub use patterns::{collect_matches, desktop_patterns, mobile_patterns, PatternGroup, PatternKind};
pub use traits::{settle, ExtractorConfig, Strategy};
