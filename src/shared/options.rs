//! Zentrale Konfiguration für das Palaeo-Kurven-Werkzeug.
//!
//! `CurveOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Geometrie ───────────────────────────────────────────────────────

/// Standard-Breite eines Kontrollpunkts (Pixel). Die Hitbox ist 4× so breit.
pub const CONTROL_POINT_WIDTH: u32 = 8;
/// Standard-Anzahl an Probe-Punkten pro Segment.
pub const PROBE_NUMBER: usize = 256;

// ── Hilfslinien ─────────────────────────────────────────────────────

/// Standard-Skalierung der Tangenten-Hilfslinien.
pub const TANGENT_SCALE_FACTOR: f64 = 15.0;
/// Standard-Skalierung der Normalen-Hilfslinien.
pub const NORMAL_SCALE_FACTOR: f64 = 15.0;

// ── Maximale Krümmung ──────────────────────────────────────────────

/// Outline-Farbe der Maximal-Krümmungs-Marker (RGBA: Rot).
pub const MAXIMUM_CURVATURE_STROKE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
/// Füllfarbe der Maximal-Krümmungs-Marker (RGBA: Rot).
pub const MAXIMUM_CURVATURE_FILL: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// Verteilung der Parameterwerte `t` über ein Segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleSpacing {
    /// Historische Formel: `t(0) = 1/n`, `t(i) = ((1 - 1/n) / n) · i`.
    ///
    /// Nicht monoton (`t(1) < t(0)`) und endet vor `t = 1`.
    #[default]
    Legacy,
    /// Gleichmäßig und monoton: `t(i) = i / (n - 1)`, inklusive beider Enden.
    Uniform,
}

/// Exponent im Nenner der Krümmungsformel `(dx² + dy²)^e`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CurvatureExponent {
    /// Korrekte Krümmung: `e = 3/2`
    #[default]
    ThreeHalves,
    /// Historisches Verhalten mit Ganzzahl-Division `3/2 = 1`: `e = 1`
    Legacy,
}

impl CurvatureExponent {
    /// Zahlenwert des Exponenten.
    pub fn value(self) -> f64 {
        match self {
            CurvatureExponent::ThreeHalves => 1.5,
            CurvatureExponent::Legacy => 1.0,
        }
    }
}

/// Read-only Geometrie-Parameter für Kette und Segmente.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    /// Probe-Punkte pro Segment
    pub probe_number: usize,
    /// Kontrollpunkt-Breite für die Hitbox
    pub control_point_width: u32,
    /// Verteilung der Parameterwerte
    pub sample_spacing: SampleSpacing,
    /// Exponent der Krümmungsformel
    pub curvature_exponent: CurvatureExponent,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            probe_number: PROBE_NUMBER,
            control_point_width: CONTROL_POINT_WIDTH,
            sample_spacing: SampleSpacing::default(),
            curvature_exponent: CurvatureExponent::default(),
        }
    }
}

impl GeometryConfig {
    /// Geometrie-Konfiguration mit abweichender Probe-Anzahl.
    pub fn with_probe_number(probe_number: usize) -> Self {
        Self {
            probe_number,
            ..Self::default()
        }
    }
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Kurven-Optionen.
/// Wird als `palaeo_curve.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveOptions {
    // ── Geometrie ───────────────────────────────────────────────
    /// Kontrollpunkt-Breite in Pixeln (Darstellung und Hitbox)
    pub control_point_width: u32,
    /// Anzahl Probe-Punkte pro Segment
    pub probe_number: usize,
    /// Verteilung der Parameterwerte
    #[serde(default)]
    pub sample_spacing: SampleSpacing,
    /// Exponent der Krümmungsformel
    #[serde(default)]
    pub curvature_exponent: CurvatureExponent,

    // ── Hilfslinien ─────────────────────────────────────────────
    /// Tangenten an den Probe-Punkten anzeigen
    pub show_tangents: bool,
    /// Normalen an den Probe-Punkten anzeigen
    pub show_normals: bool,
    /// Länge der Tangenten-Linien
    pub tangent_scale_factor: f64,
    /// Länge der Normalen-Linien
    pub normal_scale_factor: f64,

    // ── Maximale Krümmung ───────────────────────────────────────
    /// Punkte maximaler Krümmung markieren
    pub show_maximum_curvature_points: bool,
    /// Outline-Farbe der Marker (RGBA)
    pub maximum_curvature_points_stroke: [f32; 4],
    /// Füllfarbe der Marker (RGBA)
    pub maximum_curvature_points_fill: [f32; 4],
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            control_point_width: CONTROL_POINT_WIDTH,
            probe_number: PROBE_NUMBER,
            sample_spacing: SampleSpacing::default(),
            curvature_exponent: CurvatureExponent::default(),

            show_tangents: false,
            show_normals: false,
            tangent_scale_factor: TANGENT_SCALE_FACTOR,
            normal_scale_factor: NORMAL_SCALE_FACTOR,

            show_maximum_curvature_points: true,
            maximum_curvature_points_stroke: MAXIMUM_CURVATURE_STROKE,
            maximum_curvature_points_fill: MAXIMUM_CURVATURE_FILL,
        }
    }
}

impl CurveOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("palaeo_curve"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("palaeo_curve.toml")
    }

    /// Setzt alle Werte auf die Standardwerte zurück.
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    /// Leitet die Geometrie-Parameter für Kette und Segmente ab.
    pub fn geometry(&self) -> GeometryConfig {
        GeometryConfig {
            probe_number: self.probe_number,
            control_point_width: self.control_point_width,
            sample_spacing: self.sample_spacing,
            curvature_exponent: self.curvature_exponent,
        }
    }

    /// Kantenlänge der Hitbox eines Kontrollpunkts in Pixeln.
    pub fn hitbox_size(&self) -> u32 {
        self.control_point_width.saturating_mul(4)
    }
}
