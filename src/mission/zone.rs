//! Work zone drawing.
//!
//! The drawer is a three-state machine. Only a `Closed` zone filters node
//! placement; an abandoned sketch is kept for display and nothing else.

use std::mem;

use thiserror::Error;

use crate::geometry::{self, Containment, LatLng};

/// Minimum vertices for a zone to close.
pub const MIN_ZONE_POINTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneError {
    #[error("work zone is already closed")]
    AlreadyClosed,

    #[error("work zone needs at least {MIN_ZONE_POINTS} points to close, has {have}")]
    TooFewPoints { have: usize },
}

/// A work zone polygon: open while drawn, immutable once closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkZone {
    points: Vec<LatLng>,
    closed: bool,
}

impl WorkZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    #[allow(dead_code)]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn push(&mut self, point: LatLng) -> Result<(), ZoneError> {
        if self.closed {
            return Err(ZoneError::AlreadyClosed);
        }
        self.points.push(point);
        Ok(())
    }

    pub fn close(&mut self) -> Result<(), ZoneError> {
        if self.closed {
            return Err(ZoneError::AlreadyClosed);
        }
        if self.points.len() < MIN_ZONE_POINTS {
            return Err(ZoneError::TooFewPoints {
                have: self.points.len(),
            });
        }
        self.closed = true;
        Ok(())
    }

    /// Whether `point` falls inside this zone under `rule`.
    pub fn contains(&self, point: LatLng, rule: Containment) -> bool {
        geometry::contained_by(&self.points, point, rule)
    }
}

/// Observable drawer state, without the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerState {
    Disabled,
    Drawing,
    Closed,
}

/// What a drawer transition did.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    /// Drawing enabled; any previous zone or sketch was discarded.
    Started,

    /// Drawing disabled before the zone closed.
    Stopped,

    /// A vertex was appended. `count` is the new total.
    PointAdded { count: usize },

    /// The zone closed. The closing click is not a vertex.
    Closed { points: usize },

    /// Not drawing; the click was not for the drawer.
    Ignored,
}

/// The work zone state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkZoneDrawer {
    /// Not drawing. `sketch` is whatever was left open when drawing stopped.
    Disabled { sketch: WorkZone },

    /// Accepting clicks; `zone` is open.
    Drawing { zone: WorkZone },

    /// A closed zone is in force. Drawing is off.
    Closed { zone: WorkZone },
}

impl Default for WorkZoneDrawer {
    fn default() -> Self {
        Self::Disabled {
            sketch: WorkZone::new(),
        }
    }
}

impl WorkZoneDrawer {
    pub fn state(&self) -> DrawerState {
        match self {
            Self::Disabled { .. } => DrawerState::Disabled,
            Self::Drawing { .. } => DrawerState::Drawing,
            Self::Closed { .. } => DrawerState::Closed,
        }
    }

    #[allow(dead_code)]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// The zone that currently filters placement, if any.
    pub fn closed_zone(&self) -> Option<&WorkZone> {
        match self {
            Self::Closed { zone } => Some(zone),
            _ => None,
        }
    }

    /// The open preview line: points of a zone being drawn or abandoned.
    pub fn sketch(&self) -> &[LatLng] {
        match self {
            Self::Disabled { sketch } => sketch.points(),
            Self::Drawing { zone } => zone.points(),
            Self::Closed { .. } => &[],
        }
    }

    /// Whether a node may be placed at `point`. Unrestricted without a closed zone.
    pub fn allows(&self, point: LatLng, rule: Containment) -> bool {
        self.closed_zone().is_none_or(|zone| zone.contains(point, rule))
    }

    /// The work zone button.
    ///
    /// Enabling always starts from nothing. Disabling mid-sketch keeps the
    /// sketch on screen but it never becomes a filter.
    pub fn toggle(&mut self) -> DrawOutcome {
        match mem::take(self) {
            Self::Drawing { zone } => {
                *self = Self::Disabled { sketch: zone };
                DrawOutcome::Stopped
            }
            Self::Disabled { .. } | Self::Closed { .. } => {
                *self = Self::Drawing {
                    zone: WorkZone::new(),
                };
                DrawOutcome::Started
            }
        }
    }

    /// A single map click.
    ///
    /// With at least three vertices, a click closer than `close_radius_m`
    /// to the first vertex closes the zone instead of adding a vertex.
    pub fn click(&mut self, point: LatLng, close_radius_m: f64) -> Result<DrawOutcome, ZoneError> {
        let Self::Drawing { zone } = self else {
            return Ok(DrawOutcome::Ignored);
        };

        let closes = zone.points().len() >= MIN_ZONE_POINTS
            && zone.points()[0].distance_to(&point) < close_radius_m;

        if closes {
            zone.close()?;
            let zone = mem::take(zone);
            let points = zone.points().len();
            *self = Self::Closed { zone };
            return Ok(DrawOutcome::Closed { points });
        }

        zone.push(point)?;
        Ok(DrawOutcome::PointAdded {
            count: zone.points().len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS: f64 = 20.0;

    /// Roughly 111 m apart: far enough not to close on each other.
    fn triangle() -> [LatLng; 3] {
        [
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 0.001),
            LatLng::new(0.001, 0.001),
        ]
    }

    fn drawing_with(points: &[LatLng]) -> WorkZoneDrawer {
        let mut drawer = WorkZoneDrawer::default();
        assert_eq!(drawer.toggle(), DrawOutcome::Started);
        for p in points {
            drawer.click(*p, RADIUS).unwrap();
        }
        drawer
    }

    #[test]
    fn starts_disabled_and_ignores_clicks() {
        let mut drawer = WorkZoneDrawer::default();
        assert_eq!(drawer.state(), DrawerState::Disabled);
        assert_eq!(
            drawer.click(LatLng::new(0.0, 0.0), RADIUS).unwrap(),
            DrawOutcome::Ignored
        );
        assert!(drawer.sketch().is_empty());
    }

    #[test]
    fn closing_click_is_not_appended() {
        let [p0, p1, p2] = triangle();
        let mut drawer = drawing_with(&[p0, p1, p2]);

        // About 1 m from p0.
        let near_start = LatLng::new(0.000_01, 0.0);
        assert_eq!(
            drawer.click(near_start, RADIUS).unwrap(),
            DrawOutcome::Closed { points: 3 }
        );
        assert_eq!(drawer.state(), DrawerState::Closed);
        assert_eq!(drawer.closed_zone().unwrap().points(), &[p0, p1, p2]);
        assert!(drawer.closed_zone().unwrap().is_closed());
    }

    #[test]
    fn near_start_with_two_points_appends() {
        let [p0, p1, _] = triangle();
        let mut drawer = drawing_with(&[p0, p1]);
        assert_eq!(
            drawer.click(p0, RADIUS).unwrap(),
            DrawOutcome::PointAdded { count: 3 }
        );
        assert!(drawer.is_drawing());
    }

    #[test]
    fn far_click_with_three_points_appends() {
        let mut drawer = drawing_with(&triangle());
        assert_eq!(
            drawer.click(LatLng::new(0.001, 0.0), RADIUS).unwrap(),
            DrawOutcome::PointAdded { count: 4 }
        );
    }

    #[test]
    fn disabling_keeps_sketch_without_filtering() {
        let mut drawer = drawing_with(&triangle());
        assert_eq!(drawer.toggle(), DrawOutcome::Stopped);
        assert_eq!(drawer.sketch().len(), 3);
        assert!(drawer.closed_zone().is_none());
        assert!(drawer.allows(LatLng::new(50.0, 50.0), Containment::Bounds));
    }

    #[test]
    fn reenabling_discards_closed_zone() {
        let [p0, p1, p2] = triangle();
        let mut drawer = drawing_with(&[p0, p1, p2, p0]);
        assert_eq!(drawer.state(), DrawerState::Closed);

        assert_eq!(drawer.toggle(), DrawOutcome::Started);
        assert!(drawer.sketch().is_empty());
        assert!(drawer.closed_zone().is_none());
    }

    #[test]
    fn closed_zone_filters_placement() {
        let [p0, p1, p2] = triangle();
        let drawer = drawing_with(&[p0, p1, p2, p0]);

        assert!(drawer.allows(LatLng::new(0.0005, 0.0008), Containment::Bounds));
        assert!(!drawer.allows(LatLng::new(0.01, 0.01), Containment::Bounds));
        // Inside the box, outside the triangle.
        let corner = LatLng::new(0.0009, 0.0001);
        assert!(drawer.allows(corner, Containment::Bounds));
        assert!(!drawer.allows(corner, Containment::Polygon));
    }

    #[test]
    fn closed_zone_rejects_edits() {
        let mut zone = WorkZone::new();
        for p in triangle() {
            zone.push(p).unwrap();
        }
        zone.close().unwrap();
        assert_eq!(zone.push(LatLng::new(1.0, 1.0)), Err(ZoneError::AlreadyClosed));
        assert_eq!(zone.close(), Err(ZoneError::AlreadyClosed));
    }

    #[test]
    fn zone_needs_three_points() {
        let mut zone = WorkZone::new();
        zone.push(LatLng::new(0.0, 0.0)).unwrap();
        assert_eq!(zone.close(), Err(ZoneError::TooFewPoints { have: 1 }));
    }
}
