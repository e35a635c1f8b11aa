use axum::{
    Json,
    extract::{FromRequest, Query, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use crate::error::SchoolError;

/// Create parameters, read from a JSON body when the request declares
/// `application/json`, otherwise from the query string.
pub struct CreateParams<T>(pub T);

impl<S, T> FromRequest<S> for CreateParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = SchoolError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(params) = Json::<T>::from_request(req, state).await?;
            return Ok(Self(params));
        }

        let Query(params) = Query::<T>::try_from_uri(req.uri())?;
        Ok(Self(params))
    }
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().starts_with("application/json"))
}
