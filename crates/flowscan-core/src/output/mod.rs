//! Report rendering

pub mod json_format;
pub mod text;

pub use json_format::report_to_json;
pub use text::render_text;
