//! Runtime value and record types

mod value;

pub use value::{Record, Value};
