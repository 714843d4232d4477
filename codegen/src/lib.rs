mod credential;
mod error;
mod generate;
mod llm;
mod model;
mod prompt;
mod reference;
pub(crate) mod utils;
mod writer;

pub use credential::ApiKey;
pub use error::CodegenError;
pub use generate::generate;
pub use llm::{ChatModel, LLM, UnknownModel, openai};
pub use model::{
    UsageExample,
    snippet::{Snippet, parse_snippets},
};
pub use prompt::{PromptSource, SystemPromptTemplate};
pub use reference::ReferenceContext;
pub use writer::write_snippets;
