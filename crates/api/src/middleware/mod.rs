//! Request extractors that gate handlers on identity and role.
//!
//! [`auth::AuthUser`] proves who is calling; [`rbac::RequireAdmin`] and
//! [`rbac::RequireEditor`] add the role check on top.

pub mod auth;
pub mod rbac;
