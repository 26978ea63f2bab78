//! Touch zones: an ordered, bounded list of rectangular hit-test areas.
//!
//! Capped at [`MAX_ZONES`] entries (embedded-safe, no heap). Lookup returns
//! the first zone in insertion order that contains the point.

use embedded_graphics::primitives::{ContainsPoint, Rectangle};
use embedded_graphics::prelude::Point;
use heapless::Vec;

/// Maximum number of zones.
pub const MAX_ZONES: usize = 10;

/// A named rectangular hit area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchZone {
    /// Caller-chosen identifier.
    pub id: u8,
    /// Hit area.
    pub area: Rectangle,
}

/// Returned when all [`MAX_ZONES`] slots are taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ZonesFull;

/// Ordered set of touch zones keyed by id.
#[derive(Debug, Default, Clone)]
pub struct TouchZones {
    zones: Vec<TouchZone, MAX_ZONES>,
}

impl TouchZones {
    /// Create an empty zone list.
    pub fn new() -> Self {
        Self { zones: Vec::new() }
    }

    /// Add a zone. A zone with the same id is replaced in place, keeping its
    /// position in the lookup order.
    ///
    /// # Errors
    ///
    /// Returns [`ZonesFull`] when the id is new and the list is at capacity.
    pub fn add(&mut self, id: u8, area: Rectangle) -> Result<(), ZonesFull> {
        if let Some(zone) = self.zones.iter_mut().find(|z| z.id == id) {
            zone.area = area;
            return Ok(());
        }
        self.zones.push(TouchZone { id, area }).map_err(|_| ZonesFull)
    }

    /// Remove the zone with `id`. Returns `true` if one was removed.
    pub fn remove(&mut self, id: u8) -> bool {
        match self.zones.iter().position(|z| z.id == id) {
            Some(i) => {
                self.zones.remove(i);
                true
            }
            None => false,
        }
    }

    /// Remove every zone.
    pub fn clear(&mut self) {
        self.zones.clear();
    }

    /// Id of the first zone containing `point`.
    pub fn hit(&self, point: Point) -> Option<u8> {
        self.zones
            .iter()
            .find(|z| z.area.contains(point))
            .map(|z| z.id)
    }

    /// Number of zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// `true` when no zones are registered.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
