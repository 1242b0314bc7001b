//! Output formatting module
//!
//! Rich terminal output with colors and tables, and JSON export.

pub mod json;
pub mod tables;
pub mod terminal;

pub use json::print_json;
pub use terminal::{
    print_alerts, print_certificate, print_error, print_header, print_info, print_outcome,
    print_success, print_warning,
};
