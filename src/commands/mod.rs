pub mod create;
pub mod load;

// Re-export command functions for convenience
pub use create::{create, CreateParams};
pub use load::load;
