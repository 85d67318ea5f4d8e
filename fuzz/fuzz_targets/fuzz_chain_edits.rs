#![no_main]

use glam::DVec2;
use libfuzzer_sys::fuzz_target;
use palaeo_curve::{GeometryConfig, PointRef, PointRole, SegmentChain};

/// Liest eine Koordinate aus zwei Bytes (Bereich -512..512).
fn coord(bytes: &[u8]) -> DVec2 {
    DVec2::new(
        f64::from(bytes[0]) * 4.0 - 512.0,
        f64::from(bytes[1]) * 4.0 - 512.0,
    )
}

fuzz_target!(|data: &[u8]| {
    let mut chain = SegmentChain::new(GeometryConfig::with_probe_number(8));
    for chunk in data.chunks_exact(2).take(4) {
        chain.place_point(coord(chunk));
    }
    if chain.is_empty() {
        return;
    }

    // Je Operation 4 Bytes: Opcode, Segment-Index, Koordinate
    for op in data.get(8..).unwrap_or_default().chunks_exact(4) {
        let ids: Vec<_> = chain.segments().map(|(id, _)| id).collect();
        let segment = ids[usize::from(op[1]) % ids.len()];
        let role = PointRole::ALL[usize::from(op[0] >> 4) % 4];
        let point = PointRef::new(segment, role);
        let pos = coord(&op[2..4]);

        match op[0] % 4 {
            0 => {
                chain.set_point(point, pos);
            }
            1 => {
                if let Some(cloned) = chain.clone_point(point) {
                    chain.set_point(cloned, pos);
                }
            }
            2 => {
                chain.remove_point(point);
            }
            _ => {
                chain.cursor_pos(pos);
                chain.drag_to(pos + DVec2::new(1.0, -1.0));
            }
        }

        assert!(chain.segment_count() >= 1);
        assert_eq!(chain.segments().count(), chain.segment_count());
        assert!(
            chain.max_continuity_error() < 1e-6,
            "C1-Kontinuität verletzt"
        );
        let _ = chain.inside_control_point(pos);
        let _ = chain.curve_kappas();
    }
});
