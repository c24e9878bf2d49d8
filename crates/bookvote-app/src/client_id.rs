use std::convert::Infallible;

use axum::extract::FromRequestParts;
use bookvote_types::ClientId;
use headers::{Header, HeaderMapExt as _};
use http::{request::Parts, HeaderName, HeaderValue};

pub static X_CLIENT_ID: HeaderName = HeaderName::from_static("x-client-id");

/// `X-Client-Id` header - opaque id of voting device
#[derive(Debug, Clone)]
pub struct XClientId(pub ClientId);

impl Header for XClientId {
    fn name() -> &'static HeaderName {
        &X_CLIENT_ID
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        values
            .next()
            .and_then(|v| v.to_str().ok())
            .and_then(|v| ClientId::new(v))
            .map(XClientId)
            .ok_or_else(headers::Error::invalid)
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        if let Ok(value) = HeaderValue::from_str(self.0.as_str()) {
            values.extend(std::iter::once(value));
        }
    }
}

/// Client id of the voter, if sent.
///
/// Missing, blank or undecodable header all mean anonymous vote, so extraction never fails.
#[derive(Debug, Clone)]
pub struct Voter(pub Option<ClientId>);

impl<S> FromRequestParts<S> for Voter
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let client_id = parts.headers.typed_get::<XClientId>().map(|h| h.0);
        Ok(Voter(client_id))
    }
}
