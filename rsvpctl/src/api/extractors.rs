//! Request extractors that reject with the crate [`Error`] instead of axum's plain-text bodies.

use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::errors::Error;

/// JSON body extractor. Malformed bodies, a wrong content type and values of the
/// wrong type all become a 400 `{"error": ...}` response.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
