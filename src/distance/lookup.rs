use std::future::Future;

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::great_circle::compute_distance;
use super::providers::OsrmRouter;
use crate::config::{DistanceProviderKind, RetryPolicy};
use crate::domain::types::Coordinate;
use crate::error::DistanceError;

/// Where pickup-to-delivery distances come from
#[derive(Debug, Clone)]
pub enum DistanceSource {
    GreatCircle,
    Osrm(OsrmRouter),
}

impl DistanceSource {
    pub fn from_settings(
        kind: &DistanceProviderKind,
        retry: &RetryPolicy,
    ) -> Result<Self, DistanceError> {
        match kind {
            DistanceProviderKind::GreatCircle => Ok(DistanceSource::GreatCircle),
            DistanceProviderKind::Osrm {
                base_url,
                contact_email,
            } => Ok(DistanceSource::Osrm(OsrmRouter::new(
                base_url,
                contact_email.as_deref(),
                retry.timeout,
            )?)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DistanceSource::GreatCircle => "great-circle",
            DistanceSource::Osrm(_) => "osrm",
        }
    }
}

/// Distance in miles from the configured source. Network sources are retried
/// according to `retry`.
pub async fn lookup_distance(
    source: &DistanceSource,
    pickup: Coordinate,
    delivery: Coordinate,
    retry: &RetryPolicy,
) -> Result<f64, DistanceError> {
    match source {
        DistanceSource::GreatCircle => Ok(compute_distance(pickup, delivery)),
        DistanceSource::Osrm(router) => {
            if pickup == delivery {
                debug!("Pickup equals delivery, skipping OSRM call");
                return Ok(0.0);
            }
            retry_with_backoff(retry, |_| router.route_miles(pickup, delivery)).await
        }
    }
}

/// Look up many pairs concurrently, preserving input order
pub async fn lookup_distances(
    source: &DistanceSource,
    pairs: &[(Coordinate, Coordinate)],
    retry: &RetryPolicy,
) -> Vec<Result<f64, DistanceError>> {
    info!(
        "Looking up {} distances using source '{}'",
        pairs.len(),
        source.name()
    );
    let lookups = pairs
        .iter()
        .map(|(pickup, delivery)| lookup_distance(source, *pickup, *delivery, retry));
    join_all(lookups).await
}

/// Run `op` until it succeeds, fails permanently, or retries run out.
/// The delay doubles after every transient failure.
pub async fn retry_with_backoff<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, DistanceError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, DistanceError>>,
{
    let mut attempt = 0;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < policy.max_retries => {
                let delay = policy.base_delay * 2u32.saturating_pow(attempt);
                warn!(
                    "Distance lookup attempt {} failed ({}), retrying in {:?}",
                    attempt + 1,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
