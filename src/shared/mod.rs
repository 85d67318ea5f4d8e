//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Konfiguration und Abtastung, die zwischen `core` und `app`
//! geteilt werden, um direkte Abhängigkeiten zu vermeiden.

pub mod options;
pub mod sampling;

pub use options::{CurvatureExponent, CurveOptions, GeometryConfig, SampleSpacing};
pub use options::{CONTROL_POINT_WIDTH, PROBE_NUMBER};
pub use sampling::sample_parameters;
