//! Repository Contract Tests
//!
//! Every backend runs the same scenarios and must produce identical results.

use std::sync::Arc;
use std::time::Duration;

use todo_core::domain::TodoId;
use todo_core::{AppError, Context, Todo, TodoRepository};
use todo_infra_memory::InMemoryTodoRepository;
use todo_infra_sqlite::{SqliteConfig, SqliteTodoRepository};

const TEST_TIMEOUT: Duration = Duration::from_secs(5);

async fn backends() -> Vec<(&'static str, Arc<dyn TodoRepository>)> {
    let ctx = Context::with_timeout(TEST_TIMEOUT);
    let sqlite = SqliteTodoRepository::connect(&ctx, &SqliteConfig::new("sqlite::memory:"))
        .await
        .unwrap();

    let memory: Arc<dyn TodoRepository> = Arc::new(InMemoryTodoRepository::new());
    let sqlite: Arc<dyn TodoRepository> = Arc::new(sqlite);
    vec![
        ("InMemoryTodoRepository", memory),
        ("SqliteTodoRepository", sqlite),
    ]
}

/// Init -> Create -> List -> Done -> Done -> List, recording every observable result
async fn run_scenario(repo: &dyn TodoRepository) -> Vec<String> {
    let ctx = Context::with_timeout(TEST_TIMEOUT);
    let mut observed = Vec::new();

    repo.init(&ctx).await.unwrap();
    repo.create(&ctx, "task").await.unwrap();
    observed.push(format!("{:?}", repo.list(&ctx).await));
    observed.push(format!("{:?}", repo.done(&ctx, 1).await));
    observed.push(format!("{:?}", repo.done(&ctx, 1).await));
    observed.push(format!("{:?}", repo.list(&ctx).await));
    observed
}

#[tokio::test]
async fn test_basic_scenario() {
    for (name, repo) in backends().await {
        let ctx = Context::with_timeout(TEST_TIMEOUT);

        repo.init(&ctx).await.unwrap();
        repo.create(&ctx, "task").await.unwrap();

        let todos = repo.list(&ctx).await.unwrap();
        assert_eq!(todos, vec![Todo::new(1, "task")], "{}", name);

        repo.done(&ctx, 1).await.unwrap();

        let err = repo.done(&ctx, 1).await.unwrap_err();
        assert!(err.is_not_found(), "{}: {:?}", name, err);

        let todos = repo.list(&ctx).await.unwrap();
        assert_eq!(todos, Vec::<Todo>::new(), "{}", name);
    }
}

#[tokio::test]
async fn test_backends_are_equivalent() {
    let mut results = Vec::new();
    for (name, repo) in backends().await {
        results.push((name, run_scenario(repo.as_ref()).await));
    }

    let (first_name, first) = &results[0];
    for (name, observed) in &results[1..] {
        assert_eq!(observed, first, "{} diverges from {}", name, first_name);
    }
}

#[tokio::test]
async fn test_n_creates_list_in_order() {
    for (name, repo) in backends().await {
        let ctx = Context::with_timeout(TEST_TIMEOUT);
        repo.init(&ctx).await.unwrap();

        for i in 1..=10 {
            repo.create(&ctx, &format!("task {}", i)).await.unwrap();
        }

        let todos = repo.list(&ctx).await.unwrap();
        let expected: Vec<Todo> = (1..=10)
            .map(|i| Todo::new(i, format!("task {}", i)))
            .collect();
        assert_eq!(todos, expected, "{}", name);
    }
}

#[tokio::test]
async fn test_done_never_issued_id() {
    for (name, repo) in backends().await {
        let ctx = Context::with_timeout(TEST_TIMEOUT);
        repo.init(&ctx).await.unwrap();
        repo.create(&ctx, "only").await.unwrap();

        for id in [0, 2, 1_000] {
            let res = repo.done(&ctx, id).await;
            assert_eq!(res, Err(AppError::NotFound(id)), "{}", name);
        }
        assert_eq!(repo.list(&ctx).await.unwrap().len(), 1, "{}", name);
    }
}

#[tokio::test]
async fn test_init_resets_regardless_of_prior_state() {
    for (name, repo) in backends().await {
        let ctx = Context::with_timeout(TEST_TIMEOUT);
        repo.init(&ctx).await.unwrap();
        for task in ["a", "b", "c"] {
            repo.create(&ctx, task).await.unwrap();
        }
        repo.done(&ctx, 2).await.unwrap();

        repo.init(&ctx).await.unwrap();
        assert!(repo.list(&ctx).await.unwrap().is_empty(), "{}", name);

        repo.create(&ctx, "fresh").await.unwrap();
        assert_eq!(
            repo.list(&ctx).await.unwrap(),
            vec![Todo::new(1, "fresh")],
            "{}",
            name
        );
    }
}

#[tokio::test]
async fn test_list_on_empty_store_is_empty_vec() {
    for (name, repo) in backends().await {
        let ctx = Context::with_timeout(TEST_TIMEOUT);
        repo.init(&ctx).await.unwrap();
        let todos = repo.list(&ctx).await;
        assert_eq!(todos, Ok(Vec::new()), "{}", name);
    }
}

#[tokio::test]
async fn test_returned_todos_are_copies() {
    for (name, repo) in backends().await {
        let ctx = Context::with_timeout(TEST_TIMEOUT);
        repo.init(&ctx).await.unwrap();
        repo.create(&ctx, "original").await.unwrap();

        let mut todos = repo.list(&ctx).await.unwrap();
        todos[0].task.push_str(" (edited)");
        todos.push(Todo::new(99, "injected"));

        assert_eq!(
            repo.list(&ctx).await.unwrap(),
            vec![Todo::new(1, "original")],
            "{}",
            name
        );
    }
}

#[tokio::test]
async fn test_interleaved_creates_and_dones() {
    for (name, repo) in backends().await {
        let ctx = Context::with_timeout(TEST_TIMEOUT);
        repo.init(&ctx).await.unwrap();

        for i in 0..5 {
            repo.create(&ctx, &format!("{}", i)).await.unwrap();
        }
        repo.done(&ctx, 1).await.unwrap();
        repo.done(&ctx, 4).await.unwrap();
        repo.create(&ctx, "late").await.unwrap();

        let ids: Vec<TodoId> = repo.list(&ctx).await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 5, 6], "{}", name);
    }
}

#[tokio::test]
async fn test_cancelled_context_fails_every_operation() {
    for (name, repo) in backends().await {
        let (ctx, cancel) = Context::with_cancel();
        cancel.cancel();

        assert_eq!(repo.init(&ctx).await, Err(AppError::Cancelled), "{}", name);
        assert_eq!(repo.create(&ctx, "x").await, Err(AppError::Cancelled), "{}", name);
        assert_eq!(repo.done(&ctx, 1).await, Err(AppError::Cancelled), "{}", name);
        assert_eq!(repo.list(&ctx).await, Err(AppError::Cancelled), "{}", name);
    }
}

#[tokio::test]
async fn test_concurrent_creates_distinct_ids() {
    for (name, repo) in backends().await {
        repo.init(&Context::with_timeout(TEST_TIMEOUT)).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..20 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let ctx = Context::with_timeout(TEST_TIMEOUT);
                repo.create(&ctx, &format!("task {}", i)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut ids: Vec<TodoId> = repo
            .list(&Context::with_timeout(TEST_TIMEOUT))
            .await
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>(), "{}", name);
    }
}

#[tokio::test]
async fn test_unreachable_database_fails_at_deadline() {
    let ctx = Context::with_timeout(Duration::from_millis(300));
    let config = SqliteConfig::new("sqlite:///nonexistent-todo-dir/nested/todo.db");

    let res = tokio::time::timeout(
        Duration::from_secs(3),
        SqliteTodoRepository::connect(&ctx, &config),
    )
    .await
    .expect("connect hung past its deadline");

    match res {
        Err(err) => assert_eq!(err, AppError::DeadlineExceeded),
        Ok(_) => panic!("connected to an unreachable database"),
    }
}
