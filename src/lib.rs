pub mod builder;
pub mod config;
pub mod dirty;
pub mod model;
pub mod mutate;
pub mod paths;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use builder::build_boolean;
pub use config::Config;
pub use model::{Bucket, Operator, OutputMode, QueryModel, Term};
pub use session::Session;
pub use store::SavedSearchStore;
