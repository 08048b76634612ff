pub mod error;
pub mod record;
pub mod schema;
pub mod store;
