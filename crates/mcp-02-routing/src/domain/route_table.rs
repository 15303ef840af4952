//! # Envelope Route Table
//!
//! Resolves an inbound envelope's `(layer, payloadType)` to a destination
//! subsystem and the intent it is routed under. Destinations are selected
//! by the `Subsystem` tag, so every resolved target has a dispatch port.

use crate::domain::errors::RoutingError;
use parking_lot::RwLock;
use serde::Serialize;
use shared_types::{Intent, Layer, Subsystem};
use std::collections::HashMap;
use tracing::debug;

/// Where an envelope goes and under which intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteTarget {
    /// Destination subsystem.
    pub subsystem: Subsystem,
    /// Intent the lifted message carries.
    pub intent: Intent,
}

/// Registry of envelope routes, populated at wiring time.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: RwLock<HashMap<(Layer, String), RouteTarget>>,
}

impl RouteTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route, returning the target it replaced.
    pub fn register(
        &self,
        layer: Layer,
        payload_type: impl Into<String>,
        target: RouteTarget,
    ) -> Option<RouteTarget> {
        let payload_type = payload_type.into();
        debug!(%layer, %payload_type, to = %target.subsystem, "[RouteTable] registered");
        self.routes.write().insert((layer, payload_type), target)
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with_route(
        self,
        layer: Layer,
        payload_type: &str,
        subsystem: Subsystem,
        intent: Intent,
    ) -> Self {
        self.register(layer, payload_type, RouteTarget { subsystem, intent });
        self
    }

    /// Destination for an envelope.
    ///
    /// # Errors
    /// * `RoutingError::NoRoute` - nothing registered for the pair
    pub fn resolve(&self, layer: Layer, payload_type: &str) -> Result<RouteTarget, RoutingError> {
        self.routes
            .read()
            .get(&(layer, payload_type.to_string()))
            .copied()
            .ok_or_else(|| RoutingError::NoRoute {
                layer,
                payload_type: payload_type.to_string(),
            })
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.read().len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.routes.read().is_empty()
    }
}
