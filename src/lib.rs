pub mod models;
pub mod error;
pub mod partition;
pub mod engine;
pub mod verdict;
pub mod reporting;
pub mod cancel;
pub mod dispatcher;
pub mod wordlist;
pub mod cli;
pub mod logging;

// Re-export commonly used items
pub use models::*;
pub use error::*;
pub use partition::*;
pub use engine::*;
pub use verdict::*;
pub use reporting::*;
pub use cancel::*;
pub use dispatcher::*;
pub use wordlist::*;
pub use cli::FuzzConfig;
