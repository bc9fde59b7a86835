// Todo Infrastructure - In-Memory Adapter
// Implements: TodoRepository

mod todo_repository;

pub use todo_repository::InMemoryTodoRepository;
