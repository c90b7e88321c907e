pub mod schema;
pub mod store;

pub use store::{Menu, Record, SearchFilters, Store};
