//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with zeroized clear text)
//! - Signed access tokens (HS256 JWT)

pub mod jwt;
pub mod password;
