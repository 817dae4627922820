pub mod database;
pub mod memory;
pub mod store;

pub use database::MongoStore;
pub use memory::InMemoryStore;
pub use store::DocumentStore;
