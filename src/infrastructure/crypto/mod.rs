//! Token and password crypto

pub mod jwt;
pub mod password;
