//! Value Object Module

pub mod account_id;
pub mod user_name;
pub mod user_password;
