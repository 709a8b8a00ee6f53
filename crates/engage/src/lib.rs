//! Engagement client library for Meridian blog posts.
//!
//! Provides pluggable guest-identity storage, a typed wrapper for the
//! public view/like endpoints, a debounced one-shot view tracker, and a
//! cancellable fixed-interval counter poller. The `engage-demo` binary
//! wires them together against a running API server.

pub mod api;
pub mod identity;
pub mod tracker;
