pub mod api;
pub mod apply;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod renderer;

// Re-export commonly used types
pub use api::{CodeFix, InferenceClient};
pub use apply::{FixApplier, Prompter};
pub use config::Config;
pub use error::{FixError, Result};
