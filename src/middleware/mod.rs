use axum::{
    Json,
    body::Body,
    extract::{FromRequest, FromRequestParts, Request},
    http::{HeaderValue, request::Parts},
    middleware::Next,
    response::Response,
};
use log::debug;
use serde::de::DeserializeOwned;

use crate::{error::AppError, schema::Validate, utils::time_sortable_uid};

pub const INVOCATION_HEADER: &str = "x-invocation-id";

/// Identifier attached to one engine invocation, used to correlate log lines.
#[derive(Debug, Clone)]
pub struct InvocationId(pub String);

impl<S> FromRequestParts<S> for InvocationId
where
    S: Send + Sync + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<InvocationId>()
            .cloned()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("invocation id missing")))
    }
}

pub async fn invocation_middleware(req: Request<Body>, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let id = time_sortable_uid();
    debug!("[{}] {} {}", id, parts.method, parts.uri.path());
    parts.extensions.insert(InvocationId(id.clone()));

    let mut response = next.run(Request::from_parts(parts, body)).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(INVOCATION_HEADER, value);
    }
    response
}

/// JSON body extractor that also runs [`Validate`] on the decoded value.
/// Decode and validation failures both come back as `AppError::Validation`.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync + 'static,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
