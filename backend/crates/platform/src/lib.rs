//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, salted, PHC string format)
//! - Zeroization of clear text secrets

pub mod password;
