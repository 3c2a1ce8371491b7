//! # Services
//!
//! ## Available Services
//!
//! - **JWT** (`jwt`) - Bearer token verification and caller identity
//! - **Store** (`store`) - Status check persistence

pub mod jwt;
pub mod store;
