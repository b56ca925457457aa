pub mod output;

pub use output::{Output, OutputFormat, emit, parse_color, render};
