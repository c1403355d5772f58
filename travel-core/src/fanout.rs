//! Concurrent per-place detail lookups.
//!
//! Every summary gets its own detail request; all of them run on the calling
//! task and the fan-out returns once each has either rendered or failed.

use std::future::Future;

use futures::future::join_all;
use tracing::debug;

use crate::{
    ResolveError,
    model::{PlaceDetail, PlaceSummary},
    provider::PlacesProvider,
};

/// Outcome counts of one fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanOut {
    pub requested: usize,
    pub rendered: usize,
}

impl FanOut {
    pub fn dropped(&self) -> usize {
        self.requested - self.rendered
    }
}

/// Resolve one place and hand the detail to `handler`.
///
/// The handler only runs on success; its output is returned as is.
pub async fn resolve_place_detail_with<P, H, Fut, R>(
    provider: &P,
    xid: &str,
    lang: &str,
    handler: &H,
) -> Result<R, ResolveError>
where
    P: PlacesProvider + ?Sized,
    H: Fn(PlaceDetail) -> Fut,
    Fut: Future<Output = R>,
{
    let detail = provider.place_detail(xid, lang).await?;
    Ok(handler(detail).await)
}

/// Fetch and handle the detail of every summary concurrently.
///
/// Failed lookups are dropped without affecting the others. Handlers run in
/// completion order, not in summary order.
pub async fn fetch_details<P, H, Fut, R>(
    provider: &P,
    summaries: &[PlaceSummary],
    lang: &str,
    handler: H,
) -> FanOut
where
    P: PlacesProvider + ?Sized,
    H: Fn(PlaceDetail) -> Fut,
    Fut: Future<Output = R>,
{
    let handler = &handler;
    let lookups = summaries
        .iter()
        .map(|summary| resolve_place_detail_with(provider, &summary.xid, lang, handler));

    let results = join_all(lookups).await;

    let mut rendered = 0;
    for (summary, result) in summaries.iter().zip(&results) {
        match result {
            Ok(_) => rendered += 1,
            Err(e) => debug!(xid = %summary.xid, error = %e, "dropping place without details"),
        }
    }

    FanOut { requested: summaries.len(), rendered }
}
