//! Long-running jobs spawned next to the HTTP server.
//!
//! Every job takes a [`CancellationToken`] and exits promptly when it
//! fires, so shutdown never hangs on a sleeping loop.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod maintenance;
