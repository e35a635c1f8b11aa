use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::db::StoreSession;
use crate::error::SchoolError;
use crate::router::SchoolState;

/// Per-request unit of work. Opened before the handler runs and released when
/// the handler returns; handlers that write must call `commit`.
pub struct DbSession(pub StoreSession);

impl FromRequestParts<SchoolState> for DbSession {
    type Rejection = SchoolError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &SchoolState,
    ) -> Result<Self, Self::Rejection> {
        let session = state.storage.session().await?;
        Ok(Self(session))
    }
}

/// Like [`DbSession`], but holds the store's write lock from the start. Used by
/// handlers that insert.
pub struct DbWriteSession(pub StoreSession);

impl FromRequestParts<SchoolState> for DbWriteSession {
    type Rejection = SchoolError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &SchoolState,
    ) -> Result<Self, Self::Rejection> {
        let session = state.storage.write_session().await?;
        Ok(Self(session))
    }
}
