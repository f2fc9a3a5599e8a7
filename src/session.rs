//! Session control: mode flags, event dispatch, and full resets.
//!
//! A session owns everything an operator builds. Each event is handled to
//! completion by one call and answers with a notice or a rejection.

use std::fmt;

use tracing::{debug, info};
use uuid::Uuid;

use crate::export;
use crate::geometry::{Containment, LatLng};
use crate::mission::{
    Closure, DoubleClick, DrawOutcome, MissionDocument, PathBuilder, PathState, Placed, Rejection,
    WorkZoneDrawer,
};
use crate::model::{Event, ExportDocument, MissionMetadata, NodeRequest};

/// Tunables a session runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Double clicks closer than this to a node select it, in metres.
    pub match_radius_m: f64,

    /// Zone clicks closer than this to the first vertex close it, in metres.
    pub close_radius_m: f64,

    pub containment: Containment,

    /// Metadata defaults, restored on every clear.
    pub version: String,
    pub author: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            match_radius_m: 20.0,
            close_radius_m: 20.0,
            containment: Containment::default(),
            version: "1.0".to_string(),
            author: "Unknown".to_string(),
        }
    }
}

/// What the operator is told after a successful event.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    MissionMode { enabled: bool },
    WorkZoneDrawing,
    WorkZoneStopped,
    WorkZonePoint { count: usize },
    WorkZoneCreated { points: usize },
    NodePending(LatLng),
    NodeAdded { id: String, index: usize },
    DockAdded { id: String },
    PathClosed(Closure),
    Cancelled,
    Cleared,

    /// The export document, ready to be saved.
    Exported(Box<ExportDocument>),

    /// The event had no effect in the current mode.
    Ignored,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissionMode { enabled: true } => f.write_str("mission planner mode enabled"),
            Self::MissionMode { enabled: false } => f.write_str("mission planner mode disabled"),
            Self::WorkZoneDrawing => {
                f.write_str("work zone mode: click to add points, click the first point to close")
            }
            Self::WorkZoneStopped => f.write_str("work zone mode disabled"),
            Self::WorkZonePoint { count } => write!(f, "work zone point {count} added"),
            Self::WorkZoneCreated { points } => write!(f, "work zone created ({points} points)"),
            Self::NodePending(at) => {
                write!(f, "node position chosen at {:.6}, {:.6}", at.lat, at.lng)
            }
            Self::NodeAdded { id, index } => write!(f, "node {id} added at #{index}"),
            Self::DockAdded { id } => write!(f, "safety dock {id} added"),
            Self::PathClosed(Closure::Ended) => f.write_str("mission ended at home"),
            Self::PathClosed(Closure::ClosedLoop { .. }) => {
                f.write_str("closed loop mission created")
            }
            Self::PathClosed(Closure::LoopDetected { index }) => {
                write!(f, "infinity working loop detected back to #{index}")
            }
            Self::Cancelled => f.write_str("node creation cancelled"),
            Self::Cleared => f.write_str("mission cleared"),
            Self::Exported(doc) => write!(
                f,
                "mission exported ({} nodes, {} docks)",
                doc.mission_path.len(),
                doc.safety_docks.len()
            ),
            Self::Ignored => f.write_str("ignored"),
        }
    }
}

/// One operator's planning session.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    settings: Settings,
    mission_mode: bool,
    document: MissionDocument,
    path: PathBuilder,
    drawer: WorkZoneDrawer,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, "session started");
        Self {
            id,
            document: MissionDocument::new(fresh_metadata(&settings)),
            settings,
            mission_mode: false,
            path: PathBuilder::new(),
            drawer: WorkZoneDrawer::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    #[allow(dead_code)]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[allow(dead_code)]
    pub fn mission_mode(&self) -> bool {
        self.mission_mode
    }

    pub fn document(&self) -> &MissionDocument {
        &self.document
    }

    pub fn path(&self) -> &PathBuilder {
        &self.path
    }

    pub fn drawer(&self) -> &WorkZoneDrawer {
        &self.drawer
    }

    pub fn path_state(&self) -> PathState {
        self.path.state(&self.document)
    }

    /// The mission line as it would be drawn.
    pub fn polyline(&self) -> Option<Vec<LatLng>> {
        self.path.polyline(&self.document)
    }

    /// Dispatch one event.
    pub fn handle(&mut self, event: &Event) -> Result<Notice, Rejection> {
        let result = match event {
            Event::ToggleMission => Ok(self.toggle_mission()),
            Event::ToggleWorkZone => Ok(self.toggle_work_zone()),
            Event::Click { at } => self.click(*at),
            Event::DoubleClick { at } => self.double_click(*at),
            Event::Submit(request) => self.submit(request),
            Event::Cancel => Ok(self.cancel()),
            Event::Clear => Ok(self.clear()),
            Event::Export => self.export().map(|doc| Notice::Exported(Box::new(doc))),
        };

        match &result {
            Ok(notice) => debug!(session = %self.id, ?event, %notice, "event handled"),
            Err(rejection) => info!(session = %self.id, ?event, %rejection, "event rejected"),
        }
        result
    }

    /// Mission mode only gates double clicks and export; the drawer is independent.
    pub fn toggle_mission(&mut self) -> Notice {
        self.mission_mode = !self.mission_mode;
        Notice::MissionMode {
            enabled: self.mission_mode,
        }
    }

    pub fn toggle_work_zone(&mut self) -> Notice {
        match self.drawer.toggle() {
            DrawOutcome::Started => Notice::WorkZoneDrawing,
            _ => Notice::WorkZoneStopped,
        }
    }

    pub fn click(&mut self, at: LatLng) -> Result<Notice, Rejection> {
        let notice = match self.drawer.click(at, self.settings.close_radius_m)? {
            DrawOutcome::PointAdded { count } => Notice::WorkZonePoint { count },
            DrawOutcome::Closed { points } => {
                info!(session = %self.id, points, "work zone closed");
                Notice::WorkZoneCreated { points }
            }
            DrawOutcome::Started | DrawOutcome::Stopped | DrawOutcome::Ignored => Notice::Ignored,
        };
        Ok(notice)
    }

    pub fn double_click(&mut self, at: LatLng) -> Result<Notice, Rejection> {
        if !self.mission_mode {
            return Ok(Notice::Ignored);
        }
        let drawer = &self.drawer;
        let rule = self.settings.containment;
        let outcome = self.path.double_click(
            &self.document,
            at,
            self.settings.match_radius_m,
            |p| drawer.allows(p, rule),
        )?;

        Ok(match outcome {
            DoubleClick::Pending(p) => Notice::NodePending(p),
            DoubleClick::Closed(closure) => {
                info!(session = %self.id, ?closure, "mission path closed");
                Notice::PathClosed(closure)
            }
        })
    }

    pub fn submit(&mut self, request: &NodeRequest) -> Result<Notice, Rejection> {
        Ok(match self.path.submit(&mut self.document, request)? {
            Placed::Node { id, index } => Notice::NodeAdded { id, index },
            Placed::Dock { id } => Notice::DockAdded { id },
        })
    }

    pub fn cancel(&mut self) -> Notice {
        if self.path.cancel() {
            Notice::Cancelled
        } else {
            Notice::Ignored
        }
    }

    /// Back to a fresh session: same id and settings, everything else reset.
    pub fn clear(&mut self) -> Notice {
        self.mission_mode = false;
        self.document = MissionDocument::new(fresh_metadata(&self.settings));
        self.path = PathBuilder::new();
        self.drawer = WorkZoneDrawer::default();
        info!(session = %self.id, "mission cleared");
        Notice::Cleared
    }

    /// Build the export document. Only offered while mission mode is on.
    pub fn export(&self) -> Result<ExportDocument, Rejection> {
        if !self.mission_mode {
            return Err(Rejection::MissionModeDisabled);
        }
        Ok(export::export(self))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

fn fresh_metadata(settings: &Settings) -> MissionMetadata {
    MissionMetadata::new(settings.version.clone(), settings.author.clone())
}
