//! Parameterwerte `t` für die Probe-Punkte eines Segments.
//!
//! Layer-neutral: wird von `core::segment` und der Analyse gleichermaßen genutzt.

use super::options::SampleSpacing;

/// Berechnet die `n` Parameterwerte eines Segments für die gewählte Verteilung.
///
/// `n = 0` liefert eine leere Liste.
pub fn sample_parameters(n: usize, spacing: SampleSpacing) -> Vec<f64> {
    match spacing {
        SampleSpacing::Legacy => legacy_parameters(n),
        SampleSpacing::Uniform => uniform_parameters(n),
    }
}

/// `t(0) = 1/n`, `t(i) = ((1 - 1/n) / n) · i` für `i ≥ 1`.
fn legacy_parameters(n: usize) -> Vec<f64> {
    let count = n as f64;
    let step = (1.0 - 1.0 / count) / count;
    (0..n)
        .map(|i| if i == 0 { 1.0 / count } else { step * i as f64 })
        .collect()
}

/// `t(i) = i / (n - 1)`; bei `n = 1` nur `t = 0`.
fn uniform_parameters(n: usize) -> Vec<f64> {
    let denominator = n.saturating_sub(1).max(1) as f64;
    (0..n).map(|i| i as f64 / denominator).collect()
}
