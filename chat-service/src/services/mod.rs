pub mod prompt;
pub mod providers;

pub use prompt::PromptTemplate;
pub use providers::{MockGenerator, ProviderError, TextGenerator};
