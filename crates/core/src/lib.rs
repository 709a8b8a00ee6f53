//! Domain logic for the Meridian content platform.
//!
//! This crate has no internal dependencies and no I/O: it holds the form
//! schema (definitions, builder operations, validation, render planning),
//! guest-identity helpers for the engagement counters, slug utilities,
//! status vocabularies, and the shared [`error::CoreError`] type. Both the
//! API service and the engagement client build on it.

pub mod error;
pub mod form;
pub mod guest;
pub mod roles;
pub mod slug;
pub mod status;
pub mod types;
