use thiserror::Error;

use crate::provider::ServiceId;

/// A remote lookup that produced no usable result.
///
/// Transport failures, non-success statuses and unparseable bodies all end up
/// here. The detail is meant for humans and logs; callers should only care
/// whether a result is present.
#[derive(Debug, Error)]
#[error("{service} request failed: {detail}")]
pub struct ResolveError {
    pub service: ServiceId,
    detail: String,
}

impl ResolveError {
    pub fn new(service: ServiceId, detail: impl Into<String>) -> Self {
        Self { service, detail: detail.into() }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}
