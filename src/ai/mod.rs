//! AI Integration Layer
//!
//! LLM backends, the model catalog, prompt construction, response
//! validation and the analysis client that ties them together.

pub mod analysis;
pub mod prompt;
pub mod provider;
pub mod registry;
pub mod timeout;
pub mod validation;

pub use analysis::{AnalysisClient, AnalysisSource, ClientState};
pub use prompt::{AnalysisPrompt, PromptBuilder, PromptSection};
pub use provider::{ChatBackend, ProviderConfig, ProviderKind, SharedBackend, create_backend};
pub use registry::{ModelOption, ProviderRegistry};
pub use timeout::with_timeout;
pub use validation::{ValidatedAnalysis, validate_analysis};
