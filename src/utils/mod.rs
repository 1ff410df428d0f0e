//! Helpers shared by the feature modules.
//!
//! - [`auth_helpers`]: ownership checks that route through the authorization policy
//! - [`store_errors`]: mapping of persistence failures onto API errors

pub mod auth_helpers;
pub mod store_errors;
