pub mod executor;

pub use executor::{SearchQueryExecutor, search};
