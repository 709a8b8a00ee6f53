//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod application;
pub mod blog;
pub mod comment;
pub mod competition;
pub mod engagement;
pub mod event;
pub mod media;
pub mod programme;
pub mod publication;
pub mod session;
pub mod taxonomy;
pub mod user;
