//! Location stream provider boundary.
//!
//! Authorization to read device location is negotiated out of band; a
//! provider is only asked to subscribe once the caller believes access has
//! been granted.

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One (latitude, longitude) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoSample {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoSample {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Lazy, unbounded sample sequence. Dropping the stream unsubscribes.
pub type LocationStream = BoxStream<'static, Result<GeoSample>>;

#[async_trait]
pub trait LocationStreamProvider: Send + Sync {
    async fn subscribe(&self) -> Result<LocationStream>;
}

pub struct MissingLocationProvider;

#[async_trait]
impl LocationStreamProvider for MissingLocationProvider {
    async fn subscribe(&self) -> Result<LocationStream> {
        Err(anyhow!("location provider unavailable"))
    }
}

/// Provider that cycles through a fixed list of waypoints on a timer.
///
/// Used by the demo binary in place of real device positioning hardware.
pub struct FixedRouteLocationProvider {
    waypoints: Vec<GeoSample>,
    interval: Duration,
}

impl FixedRouteLocationProvider {
    pub fn new(waypoints: Vec<GeoSample>, interval: Duration) -> Self {
        Self {
            waypoints,
            interval,
        }
    }
}

#[async_trait]
impl LocationStreamProvider for FixedRouteLocationProvider {
    async fn subscribe(&self) -> Result<LocationStream> {
        if self.waypoints.is_empty() {
            return Err(anyhow!("fixed route requires at least one waypoint"));
        }

        debug!(
            waypoints = self.waypoints.len(),
            interval = ?self.interval,
            "starting fixed-route location stream"
        );

        let waypoints = self.waypoints.clone();
        let interval = self.interval;
        let stream = stream::unfold(0usize, move |index| {
            let waypoints = waypoints.clone();
            async move {
                tokio::time::sleep(interval).await;
                let sample = waypoints[index % waypoints.len()];
                Some((Ok(sample), index + 1))
            }
        });

        Ok(stream.boxed())
    }
}
