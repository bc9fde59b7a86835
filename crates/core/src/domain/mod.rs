// Domain Layer - The single persisted entity

pub mod todo;

// Re-exports
pub use todo::{Todo, TodoId};
