//! Ein kubisches Bézier-Segment mit vier Kontrollpunkten.
//!
//! - p0 (`Start`) und p3 (`End`) sind die Anker, geteilt mit den Nachbarn
//! - p1 (`Control1`) und p2 (`Control2`) sind die Handles
//!
//! Die Nachbar-Verweise `prev`/`next` sind IDs in der Arena der
//! `SegmentChain`; das Segment selbst besitzt nur seine vier Punkte.
//! Alle Geometrie-Funktionen klemmen `t` auf `[0, 1]`.

use super::control_point::{ControlPoint, PointRole, SegmentId};
use crate::shared::sampling::sample_parameters;
use crate::shared::{CurvatureExponent, GeometryConfig};
use glam::DVec2;

/// Reihenfolge der Hitbox-Prüfung innerhalb eines Segments.
///
/// Überlappende Hitboxen lösen immer auf den ersten Treffer in dieser
/// Reihenfolge auf. Clone/Remove im Session-Layer verlassen sich darauf.
pub const HIT_TEST_ORDER: [PointRole; 4] = [
    PointRole::Control1,
    PointRole::Start,
    PointRole::Control2,
    PointRole::End,
];

/// Kubisches Bézier-Segment in einer Kette.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    points: [ControlPoint; 4],
    pub(crate) prev: Option<SegmentId>,
    pub(crate) next: Option<SegmentId>,
}

impl Segment {
    /// Erstellt ein ungebundenes Segment aus Start, Steuerpunkt 1, Steuerpunkt 2, Ende.
    pub fn new(start: DVec2, control1: DVec2, control2: DVec2, end: DVec2) -> Self {
        Self {
            points: [
                ControlPoint::new(PointRole::Start, start),
                ControlPoint::new(PointRole::Control1, control1),
                ControlPoint::new(PointRole::Control2, control2),
                ControlPoint::new(PointRole::End, end),
            ],
            prev: None,
            next: None,
        }
    }

    /// Erstellt ein Segment aus `[p0, p1, p2, p3]`.
    pub fn from_points(points: [DVec2; 4]) -> Self {
        Self::new(points[0], points[1], points[2], points[3])
    }

    /// Kontrollpunkt mit der gegebenen Rolle.
    pub fn point(&self, role: PointRole) -> &ControlPoint {
        &self.points[role.index()]
    }

    pub(crate) fn point_mut(&mut self, role: PointRole) -> &mut ControlPoint {
        &mut self.points[role.index()]
    }

    /// Position des Kontrollpunkts mit der gegebenen Rolle.
    pub fn position_of(&self, role: PointRole) -> DVec2 {
        self.points[role.index()].position
    }

    pub fn start(&self) -> DVec2 {
        self.position_of(PointRole::Start)
    }

    pub fn control1(&self) -> DVec2 {
        self.position_of(PointRole::Control1)
    }

    pub fn control2(&self) -> DVec2 {
        self.position_of(PointRole::Control2)
    }

    pub fn end(&self) -> DVec2 {
        self.position_of(PointRole::End)
    }

    /// Vorgänger in der Kette (falls vorhanden).
    pub fn prev(&self) -> Option<SegmentId> {
        self.prev
    }

    /// Nachfolger in der Kette (falls vorhanden).
    pub fn next(&self) -> Option<SegmentId> {
        self.next
    }

    /// Kontrollpunkte in Kurven-Reihenfolge `[p0, p1, p2, p3]` (für den Pfad).
    pub fn bezier_points(&self) -> [DVec2; 4] {
        [self.start(), self.control1(), self.control2(), self.end()]
    }

    /// Kontrollpunkte als Anker/Handle-Paare: `[Start, Control1, End, Control2]`.
    pub fn point_coordinates(&self) -> [DVec2; 4] {
        [self.start(), self.control1(), self.end(), self.control2()]
    }

    /// Verschiebt alle vier Punkte um `delta`.
    pub(crate) fn translate(&mut self, delta: DVec2) {
        for point in &mut self.points {
            point.position += delta;
        }
    }

    /// Erster Kontrollpunkt (in `HIT_TEST_ORDER`), dessen Hitbox `probe` enthält.
    pub fn hit_test(&self, probe: DVec2, width: u32) -> Option<PointRole> {
        HIT_TEST_ORDER
            .into_iter()
            .find(|role| self.point(*role).contains(probe, width))
    }

    // ── Geometrie ───────────────────────────────────────────────

    /// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
    pub fn position(&self, t: f64) -> DVec2 {
        let t = t.clamp(0.0, 1.0);
        let [p0, p1, p2, p3] = self.bezier_points();
        let inv = 1.0 - t;
        let inv2 = inv * inv;
        let t2 = t * t;
        inv2 * inv * p0 + 3.0 * inv2 * t * p1 + 3.0 * inv * t2 * p2 + t2 * t * p3
    }

    /// B'(t) = 3(1-t)²(P1-P0) + 6(1-t)t(P2-P1) + 3t²(P3-P2)
    pub fn first_derivative(&self, t: f64) -> DVec2 {
        let t = t.clamp(0.0, 1.0);
        let [p0, p1, p2, p3] = self.bezier_points();
        let inv = 1.0 - t;
        3.0 * inv * inv * (p1 - p0) + 6.0 * inv * t * (p2 - p1) + 3.0 * t * t * (p3 - p2)
    }

    /// B''(t) = 6(1-t)(P2-2P1+P0) + 6t(P3-2P2+P1)
    pub fn second_derivative(&self, t: f64) -> DVec2 {
        let t = t.clamp(0.0, 1.0);
        let [p0, p1, p2, p3] = self.bezier_points();
        6.0 * (1.0 - t) * (p2 - 2.0 * p1 + p0) + 6.0 * t * (p3 - 2.0 * p2 + p1)
    }

    /// Normierte erste Ableitung.
    ///
    /// Bei verschwindender Ableitung (zusammenfallende Punkte) ist das
    /// Ergebnis NaN.
    pub fn tangent(&self, t: f64) -> DVec2 {
        let d = self.first_derivative(t);
        d / d.length()
    }

    /// Tangente um 90° gedreht: `(-ty, tx)`.
    pub fn normal(&self, t: f64) -> DVec2 {
        let tangent = self.tangent(t);
        DVec2::new(-tangent.y, tangent.x)
    }

    /// Vorzeichenbehaftete Krümmung κ(t) = (dx·ddy − ddx·dy) / (dx² + dy²)^e.
    ///
    /// NaN wenn der Nenner exakt 0 ist.
    pub fn kappa(&self, t: f64, exponent: CurvatureExponent) -> f64 {
        let d = self.first_derivative(t);
        let dd = self.second_derivative(t);
        let numerator = d.x * dd.y - dd.x * d.y;
        let denominator = d.length_squared().powf(exponent.value());
        if denominator == 0.0 {
            return f64::NAN;
        }
        numerator / denominator
    }

    /// Radius des Schmiegekreises: 1/κ(t).
    pub fn radius_of_fitted_circle(&self, t: f64, exponent: CurvatureExponent) -> f64 {
        1.0 / self.kappa(t, exponent)
    }

    // ── Abtastung ───────────────────────────────────────────────

    /// Parameterwerte der Probe-Punkte.
    pub fn curve_t_values(&self, config: &GeometryConfig) -> Vec<f64> {
        sample_parameters(config.probe_number, config.sample_spacing)
    }

    /// Kurvenpunkte an allen Probe-Parametern.
    pub fn curve_coordinates(&self, config: &GeometryConfig) -> Vec<DVec2> {
        self.sample(config, |t| self.position(t))
    }

    /// Tangenten an allen Probe-Parametern.
    pub fn curve_tangents(&self, config: &GeometryConfig) -> Vec<DVec2> {
        self.sample(config, |t| self.tangent(t))
    }

    /// Normalen an allen Probe-Parametern.
    pub fn curve_normals(&self, config: &GeometryConfig) -> Vec<DVec2> {
        self.sample(config, |t| self.normal(t))
    }

    /// Krümmungen an allen Probe-Parametern.
    pub fn curve_kappas(&self, config: &GeometryConfig) -> Vec<f64> {
        let exponent = config.curvature_exponent;
        self.sample(config, |t| self.kappa(t, exponent))
    }

    /// Schmiegekreis-Radien an allen Probe-Parametern.
    pub fn radii_of_fitted_circle(&self, config: &GeometryConfig) -> Vec<f64> {
        let exponent = config.curvature_exponent;
        self.sample(config, |t| self.radius_of_fitted_circle(t, exponent))
    }

    fn sample<T>(&self, config: &GeometryConfig, eval: impl Fn(f64) -> T) -> Vec<T> {
        self.curve_t_values(config).into_iter().map(eval).collect()
    }
}
