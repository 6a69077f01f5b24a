//! Filter & aggregate engine. Stateless: every function is pure over its
//! inputs.

pub mod aggregate;
pub mod filter;

pub use aggregate::{Aggregation, Groupable, aggregate};
pub use filter::{DateRange, FilterSpec, Selection, filter};
