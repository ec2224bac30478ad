pub mod columns;
pub mod customers;
pub mod document;
pub mod error;
pub mod expired;
pub mod fields;
pub mod query;

pub use error::{QueryError, Result};
pub use query::{QueryOutcome, QueryService};
