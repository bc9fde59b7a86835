// Port Layer - Interfaces implemented by backends

pub mod todo_repository;

// Re-exports
pub use todo_repository::TodoRepository;
