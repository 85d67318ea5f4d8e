//! Die zentrale Segment-Kette: doppelt verkettete Folge kubischer Segmente.
//!
//! Segmente liegen in einer Arena (`HashMap<SegmentId, Segment>`); `prev`/`next`
//! sind IDs. Invarianten:
//! - die Kette ist ein einfacher Pfad, `head.prev` und `tail.next` sind leer
//! - `head == tail` genau dann, wenn genau ein Segment existiert
//! - benachbarte Segmente A→B teilen den Anker (`A.End == B.Start`) und die
//!   Handles sind am Anker gespiegelt (`B.Control1 == 2·B.Start − A.Control2`)

use super::construction::{ConstructionState, ConstructionStep};
use super::control_point::{PointRef, PointRole, SegmentId};
use super::segment::Segment;
use crate::shared::GeometryConfig;
use glam::DVec2;
use std::collections::HashMap;

/// Doppelt verkettete Kette kubischer Bézier-Segmente.
#[derive(Debug, Clone)]
pub struct SegmentChain {
    segments: HashMap<SegmentId, Segment>,
    head: Option<SegmentId>,
    tail: Option<SegmentId>,
    next_id: u64,
    /// Aufbau des ersten Segments (nur relevant solange die Kette leer ist)
    construction: ConstructionState,
    /// Letzte Cursor-Position (Vorschau beim Aufbau, Referenz beim Ketten-Drag)
    cursor: DVec2,
    config: GeometryConfig,
}

impl Default for SegmentChain {
    fn default() -> Self {
        Self::new(GeometryConfig::default())
    }
}

impl SegmentChain {
    /// Erstellt eine leere Kette.
    pub fn new(config: GeometryConfig) -> Self {
        Self {
            segments: HashMap::new(),
            head: None,
            tail: None,
            next_id: 0,
            construction: ConstructionState::default(),
            cursor: DVec2::ZERO,
            config,
        }
    }

    /// Aktive Geometrie-Parameter.
    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// Ersetzt die Geometrie-Parameter (Probe-Anzahl, Hitbox, …).
    pub fn set_config(&mut self, config: GeometryConfig) {
        self.config = config;
    }

    /// Enthält die Kette noch kein fertiges Segment?
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Besteht die Kette aus genau einem Segment?
    pub fn only_one_segment(&self) -> bool {
        self.head.is_some() && self.head == self.tail
    }

    /// Anzahl der Segmente
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn head(&self) -> Option<SegmentId> {
        self.head
    }

    pub fn tail(&self) -> Option<SegmentId> {
        self.tail
    }

    /// Segment zu einer ID.
    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(&id)
    }

    /// Iteriert die Segmente von `head` nach `tail`.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            chain: self,
            current: self.head,
        }
    }

    /// Position eines Kontrollpunkts.
    pub fn point(&self, point: PointRef) -> Option<DVec2> {
        self.segments
            .get(&point.segment)
            .map(|seg| seg.position_of(point.role))
    }

    /// Kontrollpunkte aller Segmente in Kurven-Reihenfolge (für den Pfad).
    pub fn bezier_points(&self) -> Vec<[DVec2; 4]> {
        self.segments().map(|(_, seg)| seg.bezier_points()).collect()
    }

    // ── Aufbau ──────────────────────────────────────────────────

    /// Aktueller Aufbau-Zustand.
    pub fn construction(&self) -> ConstructionState {
        self.construction
    }

    /// Letzte bekannte Cursor-Position.
    pub fn cursor(&self) -> DVec2 {
        self.cursor
    }

    /// Aktualisiert die Cursor-Position.
    pub fn cursor_pos(&mut self, pos: DVec2) {
        self.cursor = pos;
    }

    /// Setzt den nächsten Punkt des ersten Segments.
    ///
    /// Gibt `false` zurück, wenn die Kette bereits gebaut ist; weiteres
    /// Wachstum erfolgt ausschließlich über `clone_point`.
    pub fn place_point(&mut self, pos: DVec2) -> bool {
        if !self.is_empty() {
            log::debug!("Kette bereits aufgebaut, Punkt ({:.2}, {:.2}) ignoriert", pos.x, pos.y);
            return false;
        }

        let placed_role = self.construction.expected_role();
        match self.construction.advance(pos) {
            ConstructionStep::Pending(next) => {
                if placed_role.is_anchor() {
                    self.cursor = pos;
                }
                self.construction = next;
            }
            ConstructionStep::Complete(points) => {
                let id = self.insert_detached(Segment::from_points(points));
                self.head = Some(id);
                self.tail = Some(id);
                self.construction = ConstructionState::default();
                log::debug!("Erstes Segment #{} aufgebaut", id.raw());
            }
        }
        true
    }

    // ── Kontinuität ─────────────────────────────────────────────

    /// Wendet die Kontinuitäts-Regel der Rolle an, ohne den Zielpunkt selbst zu schreiben.
    ///
    /// `pos` ist die neue Position des Zielpunkts:
    /// - `Start`: Steuerpunkt 1 wird um dieselbe Differenz verschoben
    /// - `Control1`: Steuerpunkt 2 des Vorgängers wird am Start gespiegelt
    /// - `Control2`: Steuerpunkt 1 des Nachfolgers wird am Ende gespiegelt
    /// - `End`: Steuerpunkt 2 wird mitverschoben, der Start des Nachfolgers
    ///   wird gesetzt (inklusive dessen Start-Regel)
    pub fn move_point(&mut self, point: PointRef, pos: DVec2) -> bool {
        let Some(seg) = self.segments.get(&point.segment) else {
            log::warn!("Segment #{} existiert nicht", point.segment.raw());
            return false;
        };
        let (start, end) = (seg.start(), seg.end());
        let (prev, next) = (seg.prev, seg.next);

        match point.role {
            PointRole::Start => {
                self.shift_point(point.segment, PointRole::Control1, pos - start);
            }
            PointRole::Control1 => {
                if let Some(prev) = prev {
                    self.write_point(PointRef::new(prev, PointRole::Control2), 2.0 * start - pos);
                }
            }
            PointRole::Control2 => {
                if let Some(next) = next {
                    self.write_point(PointRef::new(next, PointRole::Control1), 2.0 * end - pos);
                }
            }
            PointRole::End => {
                self.shift_point(point.segment, PointRole::Control2, pos - end);
                if let Some(next) = next {
                    self.update_point(PointRef::new(next, PointRole::Start), pos);
                }
            }
        }
        true
    }

    /// Setzt einen Kontrollpunkt und hält die C1-Kontinuität an den Nachbarn.
    ///
    /// Der Start eines Segments mit Vorgänger ist derselbe Anker wie dessen
    /// Ende und wird darauf aufgelöst.
    pub fn set_point(&mut self, point: PointRef, pos: DVec2) -> bool {
        let point = self.resolve_shared_anchor(point);
        self.update_point(point, pos)
    }

    fn update_point(&mut self, point: PointRef, pos: DVec2) -> bool {
        if !self.move_point(point, pos) {
            return false;
        }
        self.write_point(point, pos);
        true
    }

    fn resolve_shared_anchor(&self, point: PointRef) -> PointRef {
        if point.role != PointRole::Start {
            return point;
        }
        match self.segments.get(&point.segment).and_then(|seg| seg.prev) {
            Some(prev) => PointRef::new(prev, PointRole::End),
            None => point,
        }
    }

    fn write_point(&mut self, point: PointRef, pos: DVec2) {
        if let Some(seg) = self.segments.get_mut(&point.segment) {
            seg.point_mut(point.role).move_to(pos);
        }
    }

    fn shift_point(&mut self, segment: SegmentId, role: PointRole, delta: DVec2) {
        if let Some(seg) = self.segments.get_mut(&segment) {
            seg.point_mut(role).position += delta;
        }
    }

    /// Größte Abweichung von der Anker- und Handle-Invariante über alle Gelenke.
    ///
    /// 0.0 für Ketten mit weniger als zwei Segmenten, NaN sobald ein Gelenk
    /// nicht-endliche Koordinaten enthält.
    pub fn max_continuity_error(&self) -> f64 {
        let segments: Vec<&Segment> = self.segments().map(|(_, seg)| seg).collect();
        segments
            .windows(2)
            .map(|pair| {
                let (a, b) = (pair[0], pair[1]);
                let anchor = a.end().distance(b.start());
                let handle = b.control1().distance(2.0 * b.start() - a.control2());
                max_or_nan(anchor, handle)
            })
            .fold(0.0, max_or_nan)
    }

    // ── Struktur ────────────────────────────────────────────────

    fn insert_detached(&mut self, segment: Segment) -> SegmentId {
        let id = SegmentId(self.next_id);
        self.next_id += 1;
        self.segments.insert(id, segment);
        id
    }

    /// Fügt `segment` hinter `anchor` ein und gibt die neue ID zurück.
    ///
    /// Es wird keine Kontinuität angewendet; die Handles des neuen Segments
    /// müssen bereits passen.
    pub fn insert_as_next(&mut self, anchor: SegmentId, mut segment: Segment) -> Option<SegmentId> {
        let Some(old_next) = self.segments.get(&anchor).map(|seg| seg.next) else {
            log::warn!("Einfügen hinter unbekanntem Segment #{}", anchor.raw());
            return None;
        };
        segment.prev = Some(anchor);
        segment.next = old_next;
        let id = self.insert_detached(segment);

        match old_next {
            Some(next) => {
                if let Some(seg) = self.segments.get_mut(&next) {
                    seg.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        if let Some(seg) = self.segments.get_mut(&anchor) {
            seg.next = Some(id);
        }
        Some(id)
    }

    /// Fügt `segment` vor `anchor` ein und gibt die neue ID zurück.
    pub fn insert_as_previous(
        &mut self,
        anchor: SegmentId,
        mut segment: Segment,
    ) -> Option<SegmentId> {
        let Some(old_prev) = self.segments.get(&anchor).map(|seg| seg.prev) else {
            log::warn!("Einfügen vor unbekanntem Segment #{}", anchor.raw());
            return None;
        };
        segment.prev = old_prev;
        segment.next = Some(anchor);
        let id = self.insert_detached(segment);

        match old_prev {
            Some(prev) => {
                if let Some(seg) = self.segments.get_mut(&prev) {
                    seg.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        if let Some(seg) = self.segments.get_mut(&anchor) {
            seg.prev = Some(id);
        }
        Some(id)
    }

    /// Entfernt einen Anker und damit ein Segment aus der Kette.
    ///
    /// - `End` des Heads: Nachfolger wird Head und übernimmt Start/Steuerpunkt 1
    /// - `End` des Tails: Tail wird abgeschnitten
    /// - `End` innen: Nachbarn werden verbunden, Kontinuität am neuen Gelenk wiederhergestellt
    /// - `Start` (nur am Head): Nachfolger wird Head
    ///
    /// Handles und das letzte verbleibende Segment werden abgelehnt (`false`).
    pub fn remove_point(&mut self, point: PointRef) -> bool {
        let Some(seg) = self.segments.get(&point.segment) else {
            log::warn!("Segment #{} existiert nicht", point.segment.raw());
            return false;
        };
        if point.role.is_handle() {
            log::warn!("Steuerpunkte können nicht entfernt werden ({:?})", point.role);
            return false;
        }
        if self.only_one_segment() {
            log::warn!("Letztes Segment kann nicht entfernt werden");
            return false;
        }

        let id = point.segment;
        let (prev, next) = (seg.prev, seg.next);
        let is_head = self.head == Some(id);
        let is_tail = self.tail == Some(id);

        match (point.role, prev, next) {
            (PointRole::End, _, Some(new_head)) if is_head => {
                let (start, control1) = (seg.start(), seg.control1());
                self.segments.remove(&id);
                if let Some(seg) = self.segments.get_mut(&new_head) {
                    seg.prev = None;
                    seg.point_mut(PointRole::Start).move_to(start);
                    seg.point_mut(PointRole::Control1).move_to(control1);
                }
                self.head = Some(new_head);
            }
            (PointRole::End, Some(new_tail), _) if is_tail => {
                self.segments.remove(&id);
                self.tail = Some(new_tail);
                let end = self.unlink_next(new_tail);
                self.move_point(PointRef::new(new_tail, PointRole::End), end);
            }
            (PointRole::End, Some(prev), Some(next)) => {
                self.segments.remove(&id);
                if let Some(seg) = self.segments.get_mut(&next) {
                    seg.prev = Some(prev);
                }
                let Some(seg) = self.segments.get_mut(&prev) else {
                    return false;
                };
                seg.next = Some(next);
                let (end, control2) = (seg.end(), seg.control2());
                self.move_point(PointRef::new(prev, PointRole::End), end);
                self.move_point(PointRef::new(prev, PointRole::Control2), control2);
            }
            (PointRole::Start, None, Some(new_head)) if is_head => {
                self.segments.remove(&id);
                self.head = Some(new_head);
                let start = match self.segments.get_mut(&new_head) {
                    Some(seg) => {
                        seg.prev = None;
                        seg.start()
                    }
                    None => return false,
                };
                self.move_point(PointRef::new(new_head, PointRole::Start), start);
            }
            _ => {
                log::warn!(
                    "{:?} von Segment #{} kann nicht entfernt werden",
                    point.role,
                    id.raw()
                );
                return false;
            }
        }

        log::debug!(
            "{:?} von Segment #{} entfernt, {} Segment(e) verbleiben",
            point.role,
            id.raw(),
            self.segments.len()
        );
        true
    }

    /// Trennt den Nachfolger-Verweis und gibt das Ende des Segments zurück.
    fn unlink_next(&mut self, id: SegmentId) -> DVec2 {
        match self.segments.get_mut(&id) {
            Some(seg) => {
                seg.next = None;
                seg.end()
            }
            None => DVec2::NAN,
        }
    }

    /// Klont einen Anker als neues Segment.
    ///
    /// Das neue Segment startet degeneriert am geklonten Anker; sein nach außen
    /// zeigender Handle ist am Anker gespiegelt, damit die Kontinuität am neuen
    /// Gelenk gilt. `End` wird hinter, `Start` vor dem Quell-Segment eingefügt
    /// (an einem Ende der Kette wird das neue Segment Tail bzw. Head).
    ///
    /// Gibt den neuen Anker zurück, der anschließend gezogen werden kann.
    pub fn clone_point(&mut self, point: PointRef) -> Option<PointRef> {
        let Some(seg) = self.segments.get(&point.segment) else {
            log::warn!("Segment #{} existiert nicht", point.segment.raw());
            return None;
        };
        let [start, control1, end, control2] = seg.point_coordinates();

        let cloned = match point.role {
            PointRole::End => {
                let segment = Segment::new(end, 2.0 * end - control2, control2, end);
                let id = self.insert_as_next(point.segment, segment)?;
                PointRef::new(id, PointRole::End)
            }
            PointRole::Start => {
                let segment = Segment::new(start, control1, 2.0 * start - control1, start);
                let id = self.insert_as_previous(point.segment, segment)?;
                PointRef::new(id, PointRole::Start)
            }
            role => {
                log::warn!("Steuerpunkte können nicht geklont werden ({:?})", role);
                return None;
            }
        };

        log::debug!(
            "{:?} von Segment #{} geklont → Segment #{}",
            point.role,
            point.segment.raw(),
            cloned.segment.raw()
        );
        Some(cloned)
    }

    /// Verschiebt die gesamte Kette um die Differenz zur letzten Cursor-Position.
    pub fn drag_to(&mut self, pos: DVec2) {
        let delta = pos - self.cursor;
        for seg in self.segments.values_mut() {
            seg.translate(delta);
        }
        self.cursor = pos;
    }

    /// Erster Kontrollpunkt unter `pos` (Ketten-Reihenfolge, je Segment `HIT_TEST_ORDER`).
    pub fn inside_control_point(&self, pos: DVec2) -> Option<PointRef> {
        let width = self.config.control_point_width;
        self.segments()
            .find_map(|(id, seg)| seg.hit_test(pos, width).map(|role| PointRef::new(id, role)))
    }

    // ── Abfragen ────────────────────────────────────────────────

    /// Kurvenpunkte je Segment: `[segment][sample]`.
    pub fn curve_coordinates(&self) -> Vec<Vec<DVec2>> {
        self.collect_per_segment(|seg, config| seg.curve_coordinates(config))
    }

    /// Tangenten je Segment: `[segment][sample]`.
    pub fn curve_tangents(&self) -> Vec<Vec<DVec2>> {
        self.collect_per_segment(|seg, config| seg.curve_tangents(config))
    }

    /// Normalen je Segment: `[segment][sample]`.
    pub fn curve_normals(&self) -> Vec<Vec<DVec2>> {
        self.collect_per_segment(|seg, config| seg.curve_normals(config))
    }

    /// Krümmungen je Segment: `[segment][sample]`.
    pub fn curve_kappas(&self) -> Vec<Vec<f64>> {
        self.collect_per_segment(|seg, config| seg.curve_kappas(config))
    }

    /// Parameterwerte je Segment: `[segment][sample]`.
    pub fn curve_t_values(&self) -> Vec<Vec<f64>> {
        self.collect_per_segment(|seg, config| seg.curve_t_values(config))
    }

    /// Schmiegekreis-Radien je Segment: `[segment][sample]`.
    pub fn radii_of_fitted_circle(&self) -> Vec<Vec<f64>> {
        self.collect_per_segment(|seg, config| seg.radii_of_fitted_circle(config))
    }

    /// Kontrollpunkte als flache Liste von Anker/Handle-Paaren.
    ///
    /// Solange die Kette leer ist, liefert der Aufbau-Zustand die Vorschau.
    pub fn control_point_coordinates(&self) -> Vec<DVec2> {
        if self.is_empty() {
            return self.construction.preview_points(self.cursor);
        }
        self.segments()
            .flat_map(|(_, seg)| seg.point_coordinates())
            .collect()
    }

    fn collect_per_segment<T>(
        &self,
        eval: impl Fn(&Segment, &GeometryConfig) -> Vec<T>,
    ) -> Vec<Vec<T>> {
        self.segments()
            .map(|(_, seg)| eval(seg, &self.config))
            .collect()
    }
}

/// Iterator über die Segmente einer Kette in Ketten-Reihenfolge.
pub struct Segments<'a> {
    chain: &'a SegmentChain,
    current: Option<SegmentId>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = (SegmentId, &'a Segment);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let segment = self.chain.segments.get(&id)?;
        self.current = segment.next;
        Some((id, segment))
    }
}

/// `f64::max`, das NaN weiterreicht statt es zu verschlucken.
fn max_or_nan(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}
