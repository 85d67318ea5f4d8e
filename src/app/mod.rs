//! Application-Layer: Sitzung (Zeiger-Ereignisse) und Auswertungs-Snapshot.

/// Auswertung der Kette: Kurvenpunkte, Krümmung, Maxima, Hilfslinien.
pub mod analysis;
pub mod session;

pub use analysis::{CurveAnalysis, GuideLine, MaximumCurvaturePoint, MAXIMUM_CURVATURE_THRESHOLD};
pub use session::{CurveSession, Modifiers, SessionAction};
