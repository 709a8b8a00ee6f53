//! Competition application forms.
//!
//! An admin composes an ordered list of field definitions in the back
//! office; the config is stored wholesale as one JSON document on the
//! competition row and rendered to applicants on the public site. The
//! submodules split the concerns:
//!
//! - [`schema`] — the field/config data shapes, serde wire form, and
//!   boundary normalization.
//! - [`builder`] — the in-memory editing operations behind the admin UI.
//! - [`validate`] — pre-submission answer validation (required, email,
//!   phone) with the user-facing message strings.
//! - [`render`] — the per-field control plan consumed by the renderer.

pub mod builder;
pub mod render;
pub mod schema;
pub mod validate;

pub use builder::{FieldPatch, MoveDirection};
pub use render::{render_plan, FieldControl, RenderedField};
pub use schema::{ApplicationFormConfig, FieldType, FormField, NumberBounds};
pub use validate::{
    is_valid_email, is_valid_phone, validate_answers, AnswerMap, FormValidationError,
};
