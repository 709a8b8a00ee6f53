use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::ObjectStore;

/// Everything a handler can reach through `State<AppState>`.
///
/// Clones are cheap by construction: `sqlx::PgPool` is internally shared
/// and the rest sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: meridian_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Where admin uploads land (local disk or S3, per config).
    pub store: Arc<dyn ObjectStore>,
}
