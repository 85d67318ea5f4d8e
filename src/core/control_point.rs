//! Kontrollpunkte eines kubischen Bézier-Segments.
//!
//! Ein `ControlPoint` ist reine Daten: Position plus Rolle im Segment.
//! Die Zugehörigkeit zum Segment wird über `PointRef` (Segment-ID + Rolle)
//! ausgedrückt, nicht über einen Rückverweis.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Rolle eines Kontrollpunkts innerhalb eines Segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointRole {
    /// Startpunkt (Anker, geteilt mit dem Vorgänger)
    Start,
    /// Erster Steuerpunkt (Handle am Startpunkt)
    Control1,
    /// Zweiter Steuerpunkt (Handle am Endpunkt)
    Control2,
    /// Endpunkt (Anker, geteilt mit dem Nachfolger)
    End,
}

impl PointRole {
    /// Alle Rollen in Speicherreihenfolge (p0..p3).
    pub const ALL: [PointRole; 4] = [
        PointRole::Start,
        PointRole::Control1,
        PointRole::Control2,
        PointRole::End,
    ];

    /// Index im Punkt-Array des Segments (p0 = 0 … p3 = 3).
    pub fn index(self) -> usize {
        match self {
            PointRole::Start => 0,
            PointRole::Control1 => 1,
            PointRole::Control2 => 2,
            PointRole::End => 3,
        }
    }

    /// True für Start- und Endpunkt.
    pub fn is_anchor(self) -> bool {
        matches!(self, PointRole::Start | PointRole::End)
    }

    /// True für die beiden Steuerpunkte.
    pub fn is_handle(self) -> bool {
        !self.is_anchor()
    }
}

/// Einzelner Kontrollpunkt mit Rolle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Position im Bildraum
    pub position: DVec2,
    role: PointRole,
}

impl ControlPoint {
    /// Erstellt einen Kontrollpunkt an `position`.
    pub fn new(role: PointRole, position: DVec2) -> Self {
        Self { position, role }
    }

    /// Rolle des Punkts im Segment.
    pub fn role(&self) -> PointRole {
        self.role
    }

    /// Verschiebt den Punkt ohne Kontinuitäts-Regeln auszulösen.
    pub fn move_to(&mut self, position: DVec2) {
        self.position = position;
    }

    /// Liegt `probe` in der Hitbox des Punkts?
    ///
    /// Die Hitbox ist ein Quadrat der Kantenlänge `4 * width`, zentriert auf dem
    /// Punkt. Wie im Bild-Raster werden Punkt und Probe auf ganze Pixel
    /// abgeschnitten; die Box ist halboffen (`[p - 2w, p + 2w)`).
    pub fn contains(&self, probe: DVec2, width: u32) -> bool {
        let half = 2 * i64::from(width);
        let size = 4 * i64::from(width);
        let left = self.position.x as i64 - half;
        let top = self.position.y as i64 - half;
        let px = probe.x as i64;
        let py = probe.y as i64;
        px >= left && px < left + size && py >= top && py < top + size
    }
}

/// Stabiler Handle auf ein Segment in der Kette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub(crate) u64);

impl SegmentId {
    /// Rohwert der ID (nur für Logging/Debugging).
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Identität eines Kontrollpunkts: besitzendes Segment + Rolle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointRef {
    /// Segment, dem der Punkt gehört
    pub segment: SegmentId,
    /// Rolle des Punkts im Segment
    pub role: PointRole,
}

impl PointRef {
    /// Erstellt eine Referenz auf `role` in `segment`.
    pub fn new(segment: SegmentId, role: PointRole) -> Self {
        Self { segment, role }
    }
}
