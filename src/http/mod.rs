//! HTTP protocol layer module
//!
//! MIME detection, date handling, path translation and response builders,
//! independent of how requests are dispatched.

pub mod date;
pub mod mime;
pub mod path;
pub mod response;

// Re-export commonly used types
pub use mime::MimeTable;
pub use response::{
    build_301_response, build_304_response, build_403_response, build_404_response,
    build_405_response, build_500_response, build_file_head_response, build_file_response,
    build_html_response,
};
