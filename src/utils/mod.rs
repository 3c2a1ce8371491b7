//! # Utility Modules
//!
//! Constants, validators and helpers shared across the service.
//!
//! ## Available Utilities
//!
//! - **Constants** (`constant`) - Limits and defaults
//! - **Secret** (`secret`) - Secret loading from files or environment
//! - **Validators** (`validator`) - Client name normalization and character rules

pub mod constant;
pub mod secret;
pub mod validator;
