//! Prompt domain
//!
//! Templates for the prompts each pipeline stage sends to the model.

mod template;

pub use template::PromptTemplate;
