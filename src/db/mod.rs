pub mod pool;
pub mod queries;
pub mod schema;

pub use pool::{create_memory_pool, create_pool};
pub use queries::Table;
pub use schema::ensure_schema;
