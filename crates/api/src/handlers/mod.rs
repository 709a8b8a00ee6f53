//! Request handlers, one submodule per resource.
//!
//! Public handlers serve the site frontend (slug-addressed, published rows
//! only); admin handlers back the admin area (id-addressed, full rows,
//! role-gated via the extractors in [`crate::middleware`]). All of them
//! delegate persistence to `meridian_db` repositories and map failures
//! through [`crate::error::AppError`].

pub mod applications;
pub mod auth;
pub mod blogs;
pub mod comments;
pub mod competitions;
pub mod engagement;
pub mod events;
pub mod programmes;
pub mod publications;
pub mod taxonomy;
pub mod uploads;
pub mod users;
