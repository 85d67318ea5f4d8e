//! Core-Domänentypen: Kontrollpunkte, Segmente, Segment-Kette und Aufbau.

pub mod chain;
pub mod construction;
pub mod control_point;
/// Kubisches Bézier-Segment
///
/// Auswertung (Position, Ableitungen, Tangente, Normale, Krümmung),
/// Abtastung an den Probe-Parametern und Hitbox-Prüfung.
pub mod segment;

pub use chain::{SegmentChain, Segments};
pub use construction::{ConstructionState, ConstructionStep};
pub use control_point::{ControlPoint, PointRef, PointRole, SegmentId};
pub use segment::{Segment, HIT_TEST_ORDER};
