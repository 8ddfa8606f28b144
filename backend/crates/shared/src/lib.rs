//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Error classification and the unified application error
//! - Typed integer IDs for store-assigned identifiers
//!
//! Only things with the same meaning in every crate of the workspace
//! belong here.

pub mod error {
    pub mod app_error;
    pub mod kind;
}
pub mod id;
