// End-to-end integration tests for the PlanWisr Backend API
//
// These tests use a shared testcontainers PostgreSQL instance with a database
// pool for test isolation. Each test receives its own isolated database from
// the pool, allowing tests to run in parallel without conflicts.
//
// Architecture:
// - One shared PostgreSQL container for the entire test suite
// - Database pool creates/manages isolated databases (test_db_<uuid>)
// - Each test gets a unique database via test-context lifecycle hooks
// - Databases are cleaned and recycled after test completion
// - The AI assistant is replaced by a scripted mock, no network calls are made

mod test_ai;
mod test_analytics;
mod test_auth;
mod test_entries;
mod test_feedback;
mod test_projects;
mod test_tasks;
