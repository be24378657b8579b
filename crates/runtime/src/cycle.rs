//! The fetch, transform and redraw sequence run on every tick.

use std::sync::Arc;

use feed::{empty_collection, feature_collection, VehicleSource};
use geojson::FeatureCollection;
use layers::{LayerId, MapSurface, MarkerLayer, SurfaceSnapshot};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::metrics::CycleStats;

/// What readers of the map see after a refresh.
#[derive(Debug, Clone)]
pub struct MapState {
    pub surface: SurfaceSnapshot,
    /// Vehicles drawn by the latest refresh; empty when it failed.
    pub vehicles: FeatureCollection,
    pub stats: CycleStats,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new marker layer with this many markers is attached.
    Drawn(usize),
    /// The fetch failed; the surface has no marker layer until the next refresh.
    Failed,
}

/// Owns the map surface and redraws it from the vehicle source.
///
/// Refreshes take `&mut self`, so two can never run at once and a slow
/// fetch can never land on top of a newer one.
pub struct RenderCycle {
    surface: MapSurface,
    source: Box<dyn VehicleSource>,
    generation: u64,
    stats: CycleStats,
    publisher: watch::Sender<Arc<MapState>>,
}

impl RenderCycle {
    pub fn new(surface: MapSurface, source: Box<dyn VehicleSource>) -> Self {
        let stats = CycleStats::new();
        let initial = MapState {
            surface: surface.snapshot(0),
            vehicles: empty_collection(),
            stats: stats.clone(),
        };
        let (publisher, _) = watch::channel(Arc::new(initial));
        Self {
            surface,
            source,
            generation: 0,
            stats,
            publisher,
        }
    }

    /// A receiver that always holds the latest published state.
    pub fn subscribe(&self) -> watch::Receiver<Arc<MapState>> {
        self.publisher.subscribe()
    }

    pub fn surface(&self) -> &MapSurface {
        &self.surface
    }

    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Runs one cycle. Fetch failures are logged and never escape.
    ///
    /// Existing markers are removed before fetching, so a failed fetch leaves
    /// the bare map until the next successful refresh.
    pub async fn refresh(&mut self) -> RefreshOutcome {
        self.generation = self.generation.wrapping_add(1);
        let removed = self.surface.remove_marker_layers();
        debug!(generation = self.generation, removed, "cleared marker layers");

        let (outcome, vehicles) = match self.source.fetch_vehicles().await {
            Ok(reports) => {
                let vehicles = feature_collection(&reports);
                let layer = MarkerLayer::from_features(
                    LayerId(self.generation),
                    &vehicles,
                    self.surface.icon().clone(),
                );
                let drawn = layer.len();
                self.surface.add_marker_layer(layer);
                self.stats.record_success(drawn);
                debug!(generation = self.generation, markers = drawn, "vehicle markers drawn");
                (RefreshOutcome::Drawn(drawn), vehicles)
            }
            Err(err) => {
                warn!(
                    generation = self.generation,
                    consecutive_failures = self.stats.consecutive_failures + 1,
                    "error fetching and processing vehicle data: {err}"
                );
                self.stats.record_failure(err.to_string());
                (RefreshOutcome::Failed, empty_collection())
            }
        };

        self.publish(vehicles);
        outcome
    }

    fn publish(&self, vehicles: FeatureCollection) {
        let state = MapState {
            surface: self.surface.snapshot(self.generation),
            vehicles,
            stats: self.stats.clone(),
        };
        // Kept even without subscribers so late ones see the latest state.
        self.publisher.send_replace(Arc::new(state));
    }
}
