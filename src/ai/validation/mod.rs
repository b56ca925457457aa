//! Model Response Validation
//!
//! Turns raw completion text into JSON values. Field-level validation of
//! colors and fonts happens in the interpreters, which run every suggestion
//! back through the same parsers the collector uses.

mod json_repair;

pub use json_repair::{parse_model_json, parse_with_repair_status, strip_code_fences};
