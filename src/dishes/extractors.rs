use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use tracing::warn;

use crate::error::ApiError;

/// Numeric `:id` segment of a dish route.
pub struct DishId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for DishId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                warn!(error = %e.body_text(), "dish id rejected");
                ApiError::bad_request("Invalid dish id")
            })?;
        Ok(DishId(id))
    }
}
