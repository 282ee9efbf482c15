//! HTTP protocol layer module
//!
//! Response construction, decoupled from routing and the sink itself.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_404_response, build_405_response, build_500_response, build_ok_response,
    build_preflight_response,
};
