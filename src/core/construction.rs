//! Punkt-für-Punkt-Aufbau des ersten Segments.
//!
//! Reihenfolge der Klicks: Start → Steuerpunkt 1 → Ende → Steuerpunkt 2.
//! Erst der vierte Punkt erzeugt ein Segment; vorher existieren nur die
//! gesammelten Punkte für die Vorschau.

use super::control_point::PointRole;
use glam::DVec2;

/// Zustand des Segment-Aufbaus (wartet jeweils auf die genannte Rolle).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ConstructionState {
    /// Noch kein Punkt gesetzt
    #[default]
    AwaitingStart,
    /// Startpunkt gesetzt
    AwaitingControl1 { start: DVec2 },
    /// Start und Steuerpunkt 1 gesetzt
    AwaitingEnd { start: DVec2, control1: DVec2 },
    /// Start, Steuerpunkt 1 und Ende gesetzt
    AwaitingControl2 {
        start: DVec2,
        control1: DVec2,
        end: DVec2,
    },
}

/// Ergebnis eines Aufbau-Schritts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstructionStep {
    /// Weitere Punkte nötig
    Pending(ConstructionState),
    /// Alle vier Punkte vorhanden: `[p0, p1, p2, p3]`
    Complete([DVec2; 4]),
}

impl ConstructionState {
    /// Rolle, die der nächste Klick belegt.
    pub fn expected_role(&self) -> PointRole {
        match self {
            ConstructionState::AwaitingStart => PointRole::Start,
            ConstructionState::AwaitingControl1 { .. } => PointRole::Control1,
            ConstructionState::AwaitingEnd { .. } => PointRole::End,
            ConstructionState::AwaitingControl2 { .. } => PointRole::Control2,
        }
    }

    /// Übernimmt den nächsten Punkt.
    pub fn advance(self, pos: DVec2) -> ConstructionStep {
        match self {
            ConstructionState::AwaitingStart => {
                ConstructionStep::Pending(ConstructionState::AwaitingControl1 { start: pos })
            }
            ConstructionState::AwaitingControl1 { start } => {
                ConstructionStep::Pending(ConstructionState::AwaitingEnd {
                    start,
                    control1: pos,
                })
            }
            ConstructionState::AwaitingEnd { start, control1 } => {
                ConstructionStep::Pending(ConstructionState::AwaitingControl2 {
                    start,
                    control1,
                    end: pos,
                })
            }
            ConstructionState::AwaitingControl2 {
                start,
                control1,
                end,
            } => ConstructionStep::Complete([start, control1, pos, end]),
        }
    }

    /// Vorschau-Punkte als Anker/Handle-Paare.
    ///
    /// `cursor` ersetzt den noch fehlenden Handle, solange der Benutzer zieht.
    pub fn preview_points(&self, cursor: DVec2) -> Vec<DVec2> {
        match *self {
            ConstructionState::AwaitingStart => Vec::new(),
            ConstructionState::AwaitingControl1 { start } => vec![start, cursor],
            ConstructionState::AwaitingEnd { start, control1 } => vec![start, control1],
            ConstructionState::AwaitingControl2 {
                start,
                control1,
                end,
            } => vec![start, control1, end, cursor],
        }
    }
}
