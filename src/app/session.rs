//! Interaktive Sitzung: übersetzt Zeiger-Ereignisse in Ketten-Operationen.
//!
//! Ablauf:
//! - leere Kette: Drücken und Loslassen setzen abwechselnd Anker und Handle
//!   des ersten Segments, Ziehen aktualisiert die Vorschau
//! - Drücken auf einen Kontrollpunkt macht ihn zum aktiven Punkt
//!   (Shift klont einen Anker, Strg entfernt ihn)
//! - Ziehen verschiebt den aktiven Punkt oder ohne aktiven Punkt die ganze Kette
//! - Alt-Klick ins Leere verwirft die Kurve

use super::analysis::CurveAnalysis;
use crate::core::{PointRef, SegmentChain};
use crate::shared::CurveOptions;
use glam::DVec2;

/// Gedrückte Modifier-Tasten eines Zeiger-Ereignisses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Keine Modifier gedrückt.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };
    /// Nur Shift (Anker klonen)
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };
    /// Nur Strg (Anker entfernen)
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };
    /// Nur Alt (Kurve verwerfen)
    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

/// Rückgabe eines Ereignisses: steuert das Neuzeichnen beim Host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// Nichts Sichtbares geändert
    Idle,
    /// Kette oder Vorschau geändert, Overlay neu zeichnen
    Redraw,
    /// Kurve verworfen, Overlay leeren
    Cleared,
}

/// Eine Bearbeitungs-Sitzung mit genau einer Segment-Kette.
pub struct CurveSession {
    chain: SegmentChain,
    options: CurveOptions,
    /// Punkt, der beim Ziehen verschoben wird
    active: Option<PointRef>,
    /// Zuletzt berechneter Snapshot; `None` nach jeder Änderung
    analysis: Option<CurveAnalysis>,
}

impl Default for CurveSession {
    fn default() -> Self {
        Self::new(CurveOptions::default())
    }
}

impl CurveSession {
    /// Erstellt eine Sitzung mit leerer Kette.
    pub fn new(options: CurveOptions) -> Self {
        Self {
            chain: SegmentChain::new(options.geometry()),
            options,
            active: None,
            analysis: None,
        }
    }

    pub fn chain(&self) -> &SegmentChain {
        &self.chain
    }

    pub fn options(&self) -> &CurveOptions {
        &self.options
    }

    /// Aktuell gegriffener Kontrollpunkt.
    pub fn active_point(&self) -> Option<PointRef> {
        self.active
    }

    /// Übernimmt neue Optionen; der Snapshot wird neu berechnet.
    pub fn apply_options(&mut self, options: CurveOptions) {
        self.chain.set_config(options.geometry());
        self.options = options;
        self.invalidate();
    }

    /// Snapshot der Kette, nur nach Änderungen neu berechnet.
    pub fn analysis(&mut self) -> &CurveAnalysis {
        let chain = &self.chain;
        self.analysis.get_or_insert_with(|| CurveAnalysis::from_chain(chain))
    }

    fn invalidate(&mut self) {
        self.analysis = None;
    }

    fn redraw(&mut self) -> SessionAction {
        self.invalidate();
        SessionAction::Redraw
    }

    // ── Ereignisse ──────────────────────────────────────────────

    /// Maustaste gedrückt.
    pub fn pointer_pressed(&mut self, pos: DVec2, modifiers: Modifiers) -> SessionAction {
        if self.chain.is_empty() {
            self.chain.place_point(pos);
            return self.redraw();
        }

        self.active = self.chain.inside_control_point(pos);
        let Some(point) = self.active else {
            self.chain.cursor_pos(pos);
            return SessionAction::Idle;
        };

        if modifiers.shift {
            if point.role.is_anchor() {
                self.active = self.chain.clone_point(point);
            }
            return self.redraw();
        }

        if modifiers.ctrl {
            if self.chain.only_one_segment() {
                log::debug!("Letztes Segment bleibt erhalten");
                return SessionAction::Idle;
            }
            if point.role.is_anchor() && self.chain.remove_point(point) {
                self.active = None;
                self.chain.cursor_pos(pos);
                return self.redraw();
            }
        }
        SessionAction::Idle
    }

    /// Maus mit gedrückter Taste bewegt.
    pub fn pointer_dragged(&mut self, pos: DVec2) -> SessionAction {
        if self.chain.is_empty() {
            self.chain.cursor_pos(pos);
            return self.redraw();
        }

        match self.active {
            None => self.chain.drag_to(pos),
            Some(point) => {
                if !self.chain.set_point(point, pos) {
                    self.active = None;
                }
            }
        }
        self.redraw()
    }

    /// Maustaste losgelassen.
    pub fn pointer_released(&mut self, pos: DVec2) -> SessionAction {
        if self.chain.is_empty() {
            self.chain.place_point(pos);
            return self.redraw();
        }

        let action = if self.active.is_none() {
            self.chain.cursor_pos(pos);
            self.redraw()
        } else {
            SessionAction::Idle
        };
        self.active = None;
        action
    }

    /// Vollständiger Klick (nach dem Loslassen).
    pub fn pointer_clicked(&mut self, pos: DVec2, modifiers: Modifiers) -> SessionAction {
        if self.chain.is_empty() {
            return SessionAction::Idle;
        }

        self.active = self.chain.inside_control_point(pos);
        if self.active.is_none() && modifiers.alt {
            log::info!("Kurve verworfen ({} Segment(e))", self.chain.segment_count());
            self.chain = SegmentChain::new(self.options.geometry());
            self.invalidate();
            return SessionAction::Cleared;
        }
        SessionAction::Idle
    }
}
