//! Core data model for Plotter.
//!
//! These types represent what an operator builds on the map:
//! nodes, safety docks, mission metadata, the events that drive a session,
//! and the exchange document a session exports.

mod event;
mod export;
mod metadata;
mod node;
mod request;

pub use event::Event;
pub use export::{
    ExportDocument, ExportedDock, ExportedNode, ExportedWorkZone, HoldTime, MissionStatus,
    TaskDuration, TimeUnit,
};
pub use metadata::{MissionKind, MissionMetadata};
pub use node::{MissionNode, NodeKind, SafetyDock};
pub use request::{NodeRequest, TimeFields, split_clock};
