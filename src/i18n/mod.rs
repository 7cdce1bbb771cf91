//! Language metadata and translation bookkeeping.
//!
//! - `registry`: table of known language codes and their names
//! - `language`: validated locale code naming one locale bundle
//! - `validator`: checks that translations keep placeholders, markup and URLs
//! - `metrics`: per-run counters and the final `SyncReport`

mod language;
mod metrics;
mod registry;
mod validator;

pub use language::Language;
pub use metrics::{SyncMetrics, SyncReport};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use validator::{TranslationValidator, ValidationReport};
