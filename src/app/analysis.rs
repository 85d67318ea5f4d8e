//! Auswertungs-Snapshot der Kette für die Darstellung.
//!
//! Reine Daten: Kurvenpunkte, Tangenten, Normalen, Krümmungen, Kontrollpunkte
//! und die Punkte maximaler Krümmung. Der Host zeichnet daraus Overlay und Labels.

use crate::core::{SegmentChain, SegmentId};
use crate::shared::CurveOptions;
use glam::DVec2;
use serde::Serialize;

/// Startwert der Maximum-Suche; flachere Stellen werden nie markiert.
pub const MAXIMUM_CURVATURE_THRESHOLD: f64 = 0.01;

/// Punkt maximaler Krümmung.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaximumCurvaturePoint {
    /// Position auf der Kurve
    pub position: DVec2,
    /// Segment, in dem das Maximum liegt
    pub segment: SegmentId,
    /// Index des Probe-Punkts im Segment
    pub sample: usize,
    /// Vorzeichenbehaftete Krümmung an dieser Stelle
    pub kappa: f64,
    /// Anteil `t / Segment-Anzahl`
    pub fraction: f64,
}

impl MaximumCurvaturePoint {
    /// Anteil in Prozent.
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }

    /// Beschriftung für den Marker, 5 signifikante Stellen (z.B. `"12.500%"`).
    pub fn label(&self) -> String {
        format!("{}%", format_significant(self.percent(), 5))
    }
}

/// Hilfslinie `(von, bis)` für Tangente oder Normale.
pub type GuideLine = (DVec2, DVec2);

/// Snapshot aller Abfragen einer Kette.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurveAnalysis {
    /// Kurvenpunkte `[segment][sample]`
    pub coordinates: Vec<Vec<DVec2>>,
    /// Tangenten `[segment][sample]`
    pub tangents: Vec<Vec<DVec2>>,
    /// Normalen `[segment][sample]`
    pub normals: Vec<Vec<DVec2>>,
    /// Krümmungen `[segment][sample]`
    pub kappas: Vec<Vec<f64>>,
    /// Parameterwerte `[segment][sample]`
    pub t_values: Vec<Vec<f64>>,
    /// Kontrollpunkte als Anker/Handle-Paare (inkl. Aufbau-Vorschau)
    pub control_points: Vec<DVec2>,
    /// Kurvenzug für den Pfad: `[p0, p1, p2, p3]` je Segment
    pub path: Vec<[DVec2; 4]>,
    /// Punkte maximaler Krümmung
    pub maxima: Vec<MaximumCurvaturePoint>,
}

impl CurveAnalysis {
    /// Wertet die Kette einmal vollständig aus.
    pub fn from_chain(chain: &SegmentChain) -> Self {
        let coordinates = chain.curve_coordinates();
        let kappas = chain.curve_kappas();
        let t_values = chain.curve_t_values();
        let ids: Vec<SegmentId> = chain.segments().map(|(id, _)| id).collect();
        let maxima = find_maxima(&ids, &coordinates, &kappas, &t_values);

        Self {
            coordinates,
            tangents: chain.curve_tangents(),
            normals: chain.curve_normals(),
            kappas,
            t_values,
            control_points: chain.control_point_coordinates(),
            path: chain.bezier_points(),
            maxima,
        }
    }

    /// Enthält der Snapshot eine Kurve?
    pub fn has_curve(&self) -> bool {
        !self.path.is_empty()
    }

    /// Anker→Handle-Linien aus den Kontrollpunkt-Paaren.
    pub fn handle_lines(&self) -> Vec<GuideLine> {
        self.control_points
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }

    /// Tangenten- und Normalen-Hilfslinien gemäß den Optionen.
    pub fn guide_lines(&self, options: &CurveOptions) -> Vec<GuideLine> {
        let mut lines = Vec::new();
        if options.show_tangents {
            lines.extend(scaled_lines(
                &self.coordinates,
                &self.tangents,
                options.tangent_scale_factor,
            ));
        }
        if options.show_normals {
            lines.extend(scaled_lines(
                &self.coordinates,
                &self.normals,
                options.normal_scale_factor,
            ));
        }
        lines
    }

    /// Maxima, sofern die Optionen ihre Anzeige erlauben.
    pub fn visible_maxima(&self, options: &CurveOptions) -> &[MaximumCurvaturePoint] {
        if options.show_maximum_curvature_points {
            &self.maxima
        } else {
            &[]
        }
    }
}

fn scaled_lines<'a>(
    coordinates: &'a [Vec<DVec2>],
    directions: &'a [Vec<DVec2>],
    scale: f64,
) -> impl Iterator<Item = GuideLine> + 'a {
    coordinates
        .iter()
        .zip(directions)
        .flat_map(|(points, dirs)| points.iter().zip(dirs))
        .map(move |(p, d)| (*p, *p + *d * scale))
}

/// Sucht die Stellen mit dem größten |κ| in Ketten-Reihenfolge.
///
/// Ein größerer Wert ersetzt die bisherigen Treffer, ein exakt gleicher wird
/// angehängt. NaN erfüllt keinen der beiden Vergleiche.
fn find_maxima(
    ids: &[SegmentId],
    coordinates: &[Vec<DVec2>],
    kappas: &[Vec<f64>],
    t_values: &[Vec<f64>],
) -> Vec<MaximumCurvaturePoint> {
    let segment_count = kappas.len() as f64;
    let mut threshold = MAXIMUM_CURVATURE_THRESHOLD;
    let mut maxima = Vec::new();

    for (j, segment_kappas) in kappas.iter().enumerate() {
        for (k, &kappa) in segment_kappas.iter().enumerate() {
            let magnitude = kappa.abs();
            let is_new_max = magnitude > threshold;
            if !is_new_max && magnitude != threshold {
                continue;
            }
            if is_new_max {
                threshold = magnitude;
                maxima.clear();
            }
            maxima.push(MaximumCurvaturePoint {
                position: coordinates[j][k],
                segment: ids[j],
                sample: k,
                kappa,
                fraction: t_values[j][k] / segment_count,
            });
        }
    }
    maxima
}

/// Formatiert `value` mit `digits` signifikanten Stellen (ohne Exponent).
fn format_significant(value: f64, digits: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{:.*}", (digits - 1).max(0) as usize, value);
    }
    let decimals_for = |v: f64| (digits - 1 - v.abs().log10().floor() as i32).max(0) as usize;
    let decimals = decimals_for(value);
    // Rundung kann die Größenordnung erhöhen (99.9999 → 100.000)
    let rounded: f64 = format!("{:.*}", decimals, value).parse().unwrap_or(value);
    format!("{:.*}", decimals_for(rounded), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PointRef;
    use crate::core::PointRole;
    use crate::shared::GeometryConfig;
    use approx::assert_relative_eq;

    fn chain_with(points: [DVec2; 4], probe_number: usize) -> SegmentChain {
        let mut chain = SegmentChain::new(GeometryConfig::with_probe_number(probe_number));
        // Klick-Reihenfolge: Start, C1, Ende, C2
        for pos in [points[0], points[1], points[3], points[2]] {
            chain.place_point(pos);
        }
        chain
    }

    #[test]
    fn test_empty_chain_has_empty_snapshot() {
        let analysis = CurveAnalysis::from_chain(&SegmentChain::default());
        assert!(!analysis.has_curve());
        assert!(analysis.coordinates.is_empty());
        assert!(analysis.maxima.is_empty());
        assert!(analysis.control_points.is_empty());
    }

    #[test]
    fn test_straight_line_has_no_maxima() {
        let chain = chain_with(
            [
                DVec2::new(0.0, 0.0),
                DVec2::new(100.0, 0.0),
                DVec2::new(200.0, 0.0),
                DVec2::new(300.0, 0.0),
            ],
            32,
        );
        let analysis = CurveAnalysis::from_chain(&chain);
        assert!(analysis.has_curve());
        assert!(analysis.maxima.is_empty(), "Gerade darf kein Maximum haben");
    }

    #[test]
    fn test_maximum_is_sharpest_sample() {
        let chain = chain_with(
            [
                DVec2::new(0.0, 0.0),
                DVec2::new(10.0, 0.0),
                DVec2::new(20.0, 10.0),
                DVec2::new(20.0, 20.0),
            ],
            8,
        );
        let analysis = CurveAnalysis::from_chain(&chain);
        assert_eq!(analysis.maxima.len(), 1);

        let best = analysis.maxima[0];
        let max_abs = analysis.kappas[0]
            .iter()
            .fold(0.0_f64, |acc, k| acc.max(k.abs()));
        assert_relative_eq!(best.kappa.abs(), max_abs);
        assert_eq!(best.position, analysis.coordinates[0][best.sample]);
        assert_relative_eq!(best.fraction, analysis.t_values[0][best.sample]);
        assert_relative_eq!(best.percent(), best.fraction * 100.0);
    }

    #[test]
    fn test_fraction_is_divided_by_segment_count() {
        let mut chain = chain_with(
            [
                DVec2::new(0.0, 0.0),
                DVec2::new(10.0, 0.0),
                DVec2::new(20.0, 10.0),
                DVec2::new(20.0, 20.0),
            ],
            8,
        );
        let head = chain.head().expect("Head muss existieren");
        let end = chain
            .clone_point(PointRef::new(head, PointRole::End))
            .expect("Klonen muss gelingen");
        chain.set_point(end, DVec2::new(20.0, 400.0));

        let analysis = CurveAnalysis::from_chain(&chain);
        assert!(!analysis.maxima.is_empty());
        for max in &analysis.maxima {
            let segment_index = chain
                .segments()
                .position(|(id, _)| id == max.segment)
                .expect("Segment muss in der Kette liegen");
            assert_relative_eq!(
                max.fraction,
                analysis.t_values[segment_index][max.sample] / 2.0
            );
        }
    }

    #[test]
    fn test_equal_maxima_are_all_kept() {
        let ids = [SegmentId(0), SegmentId(1)];
        let coordinates = vec![
            vec![DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0)],
            vec![DVec2::new(2.0, 0.0), DVec2::new(3.0, 0.0)],
        ];
        let kappas = vec![vec![0.5, f64::NAN], vec![-0.5, 0.2]];
        let t_values = vec![vec![0.5, 0.25], vec![0.5, 0.25]];

        let maxima = find_maxima(&ids, &coordinates, &kappas, &t_values);
        assert_eq!(maxima.len(), 2, "|κ| gleich → beide Stellen markiert");
        assert_eq!(maxima[0].segment, SegmentId(0));
        assert_eq!(maxima[1].segment, SegmentId(1));
        assert_eq!(maxima[1].kappa, -0.5);
        assert_relative_eq!(maxima[1].fraction, 0.25);
    }

    #[test]
    fn test_guide_lines_follow_toggles() {
        let chain = chain_with(
            [
                DVec2::new(0.0, 0.0),
                DVec2::new(10.0, 0.0),
                DVec2::new(20.0, 10.0),
                DVec2::new(20.0, 20.0),
            ],
            4,
        );
        let analysis = CurveAnalysis::from_chain(&chain);

        let mut options = CurveOptions::default();
        assert!(analysis.guide_lines(&options).is_empty());

        options.show_tangents = true;
        let lines = analysis.guide_lines(&options);
        assert_eq!(lines.len(), 4);
        let (from, to) = lines[0];
        assert_eq!(from, analysis.coordinates[0][0]);
        assert_relative_eq!(from.distance(to), options.tangent_scale_factor, epsilon = 1e-9);

        options.show_normals = true;
        assert_eq!(analysis.guide_lines(&options).len(), 8);

        options.show_maximum_curvature_points = false;
        assert!(analysis.visible_maxima(&options).is_empty());
    }

    #[test]
    fn test_handle_lines_pair_anchor_and_handle() {
        let chain = chain_with(
            [
                DVec2::new(0.0, 0.0),
                DVec2::new(10.0, 0.0),
                DVec2::new(20.0, 10.0),
                DVec2::new(20.0, 20.0),
            ],
            4,
        );
        let lines = CurveAnalysis::from_chain(&chain).handle_lines();
        assert_eq!(
            lines,
            vec![
                (DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)),
                (DVec2::new(20.0, 20.0), DVec2::new(20.0, 10.0)),
            ]
        );
    }

    #[test]
    fn test_label_uses_five_significant_digits() {
        let point = MaximumCurvaturePoint {
            position: DVec2::ZERO,
            segment: SegmentId(0),
            sample: 0,
            kappa: 0.1,
            fraction: 0.125,
        };
        assert_eq!(point.label(), "12.500%");
        assert_eq!(format_significant(0.5, 5), "0.50000");
        assert_eq!(format_significant(123456.0, 5), "123456");
        assert_eq!(format_significant(99.999996, 5), "100.00");
        assert_eq!(format_significant(9.999996, 5), "10.000");
    }
}
