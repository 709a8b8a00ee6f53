use serde::Deserialize;

/// Common `?limit&offset` pagination query parameters.
///
/// Both fields are optional; repositories clamp `limit` to their own
/// defaults and maximums.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
