pub mod completions;
pub mod generate;

pub use completions::CompletionsCommand;
pub use generate::{GenerateCommand, GenerateError, Outcome, generate};
