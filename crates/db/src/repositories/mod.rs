//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Every project query is filtered
//! by owner and every task query by project in SQL -- ownership is a
//! mandatory predicate on the lookup, never a check applied after an
//! unscoped fetch.

pub mod project_repo;
pub mod task_repo;
pub mod user_repo;

pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
