// Downloader module - resolution pipeline and persistence

pub mod backends;
pub mod errors;
pub mod extractors;
pub mod fetch;
pub mod format_selector;
pub mod models;
pub mod orchestrator;
pub mod reference;
pub mod traits;
pub mod utils;

pub use errors::{DownloadError, StrategyFault};
pub use extractors::{ExtractionOrchestrator, ExtractorConfig, Strategy};
pub use format_selector::VariantSelector;
pub use models::{
    ClientIdentity, DownloadOptions, MediaCandidate, NetworkConfig, PostReference, ResolvedMedia,
    StrategyOutcome,
};
pub use orchestrator::Downloader;
pub use traits::{MediaPersister, PageFetcher};
