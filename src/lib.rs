//! Palaeo Curve Library.
//! Kette kubischer Bézier-Segmente mit C1-Kontinuität, Krümmungsanalyse
//! und interaktiver Bearbeitung; als Library exportiert für Host und Tests.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{CurveAnalysis, CurveSession, MaximumCurvaturePoint, Modifiers, SessionAction};
pub use core::{
    ConstructionState, ControlPoint, PointRef, PointRole, Segment, SegmentChain, SegmentId,
    HIT_TEST_ORDER,
};
pub use shared::{CurvatureExponent, CurveOptions, GeometryConfig, SampleSpacing};
