//! Credential handling for back-office accounts: Argon2id password
//! hashing ([`password`]) and the access/refresh token pair ([`jwt`]).

pub mod jwt;
pub mod password;
