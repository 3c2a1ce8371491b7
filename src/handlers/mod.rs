//! # HTTP Request Handlers
//!
//! ## Available Handlers
//!
//! - **Health Check** (`health_check`) - Liveness check
//! - **Root** (`root`) - API greeting
//! - **Status** (`status`) - Status check creation and listing

mod health_check;
mod root;
mod status;

pub use health_check::*;
pub use root::*;
pub use status::*;
