// Todo Core - Domain, Cancellation Context & Repository Port
// NO infrastructure dependencies: backends live in their own adapter crates

pub mod context;
pub mod domain;
pub mod error;
pub mod port;

pub use context::{CancelHandle, Context};
pub use domain::Todo;
pub use error::{AppError, Result};
pub use port::TodoRepository;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
