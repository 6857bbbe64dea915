pub mod connection;
pub mod endpoints;

// Re-export the pieces the rest of the crate reaches for.
pub use connection::{GenerationBackend, GenerationError, OpenRouterBackend, API_KEY_ENV_VAR};
pub use endpoints::GenerationTask;
