//! Timed card relocations with single-shot completion notification.
//!
//! The scheduler owns the render state of every card (`CardView`) and the
//! in-flight moves. It knows poses, timing, and who to tell when a move is
//! done; it has no game-rule knowledge. The completion target is an opaque
//! tag `T` chosen by the caller.
//!
//! ## Tick semantics
//!
//! For each in-flight move, `u = (now - start) / duration`:
//! - `u < 0`: hold at the start pose (staggered moves waiting their turn)
//! - `0 <= u < 1`: eased interpolation; past the configured thresholds the
//!   destination sort order and layer are committed early
//! - `u >= 1`: snap to the end pose, commit hints, hand back the bound
//!   completion target exactly once
//!
//! ```
//! use std::time::Duration;
//! use bartok_engine::cards::CardId;
//! use bartok_engine::core::{MotionConfig, Pose, SortLayer, Vec3};
//! use bartok_engine::motion::{MoveScheduler, RenderHints, Start};
//!
//! let mut scheduler: MoveScheduler<&str> = MoveScheduler::new(&MotionConfig::default());
//! let card = CardId::new(0);
//! scheduler.place(card, Pose::default(), RenderHints::new(0, SortLayer(1)));
//!
//! let hints = RenderHints::new(4, SortLayer(2));
//! scheduler.move_card(card, Pose::at(Vec3::new(1.0, 0.0, 0.0)), Start::Now, hints);
//! scheduler.bind(card, "done");
//!
//! assert!(scheduler.advance(Duration::from_millis(250)).is_empty());
//! let done = scheduler.advance(Duration::from_millis(500));
//! assert_eq!(done[0].target, Some("done"));
//! ```

use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::easing::Easing;
use crate::cards::CardId;
use crate::core::{MotionConfig, Pose, SortLayer};

/// Draw-order hints for the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderHints {
    pub sort_order: i32,
    pub layer: SortLayer,
}

impl RenderHints {
    #[must_use]
    pub const fn new(sort_order: i32, layer: SortLayer) -> Self {
        Self { sort_order, layer }
    }
}

/// What the renderer should currently show for a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub pose: Pose,
    pub face_up: bool,
    pub hints: RenderHints,
}

/// Identifier of a scheduled move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MoveId(pub u64);

/// When a move begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Start {
    /// At the current time.
    Now,
    /// At an absolute time, possibly in the future (stagger).
    At(Duration),
    /// Keep the start time of a move that has not begun yet, else start now.
    KeepPending,
}

/// A pending relocation.
#[derive(Clone, Debug)]
pub struct Move<T> {
    pub id: MoveId,
    pub card: CardId,
    pub from: Pose,
    pub to: Pose,
    pub start: Duration,
    pub duration: Duration,
    /// Hints committed while the move progresses.
    pub eventual: RenderHints,
    completion: Option<T>,
    notified: bool,
}

impl<T> Move<T> {
    /// Time at which the move reaches its end pose.
    #[must_use]
    pub fn end(&self) -> Duration {
        self.start + self.duration
    }

    /// Normalized progress; `None` while the move has not begun.
    #[must_use]
    pub fn progress(&self, now: Duration) -> Option<f32> {
        let elapsed = now.checked_sub(self.start)?;
        Some(elapsed.as_secs_f32() / self.duration.as_secs_f32())
    }

    #[must_use]
    pub fn has_completion(&self) -> bool {
        self.completion.is_some()
    }

    /// Consume the completion binding. A move may only ever notify once.
    fn notify(&mut self) -> Option<T> {
        debug_assert!(!self.notified, "move {:?} for {} notified twice", self.id, self.card);
        self.notified = true;
        self.completion.take()
    }
}

/// A move that reached its end pose during `advance`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveCompleted<T> {
    pub id: MoveId,
    pub card: CardId,
    /// The binding that was registered, if any.
    pub target: Option<T>,
}

/// Schedules and ticks card moves.
#[derive(Clone, Debug)]
pub struct MoveScheduler<T> {
    views: FxHashMap<CardId, CardView>,
    in_flight: FxHashMap<CardId, Move<T>>,
    easing: Easing,
    duration: Duration,
    order_commit_at: f32,
    layer_commit_at: f32,
    now: Duration,
    next_id: u64,
}

impl<T> MoveScheduler<T> {
    #[must_use]
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            views: FxHashMap::default(),
            in_flight: FxHashMap::default(),
            easing: config.easing,
            duration: config.move_duration(),
            order_commit_at: config.order_commit_at,
            layer_commit_at: config.layer_commit_at,
            now: Duration::ZERO,
            next_id: 0,
        }
    }

    /// Time of the last `advance`.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Snap a card to a pose with the given hints, without animation.
    ///
    /// Any in-flight move of the card is dropped; it must not carry a
    /// completion binding.
    pub fn place(&mut self, card: CardId, pose: Pose, hints: RenderHints) {
        if let Some(dropped) = self.in_flight.remove(&card) {
            debug_assert!(
                !dropped.has_completion(),
                "placing {card} would drop a bound completion"
            );
        }
        let view = self.views.entry(card).or_default();
        view.pose = pose;
        view.hints = hints;
    }

    /// Schedule a move of `card` to `to`.
    ///
    /// The move starts from the card's current pose. If the card is already
    /// moving, the existing move is retargeted: its completion binding is
    /// kept, and with `Start::KeepPending` so is a start time that lies in
    /// the future.
    pub fn move_card(
        &mut self,
        card: CardId,
        to: Pose,
        start: Start,
        eventual: RenderHints,
    ) -> MoveId {
        let now = self.now;
        let from = self.views.entry(card).or_default().pose;
        let previous = self.in_flight.remove(&card);

        let start = match (start, &previous) {
            (Start::Now, _) => now,
            (Start::At(at), _) => at,
            (Start::KeepPending, Some(prev)) if prev.start > now => prev.start,
            (Start::KeepPending, _) => now,
        };

        let id = MoveId(self.next_id);
        self.next_id += 1;

        tracing::trace!(%card, move_id = id.0, start_ms = start.as_millis() as u64, "move scheduled");

        self.in_flight.insert(
            card,
            Move {
                id,
                card,
                from,
                to,
                start,
                duration: self.duration,
                eventual,
                completion: previous.and_then(|mut p| p.completion.take()),
                notified: false,
            },
        );
        id
    }

    /// Register the completion target of the card's in-flight move.
    ///
    /// Returns `false` if the card is not moving. A move holds a single
    /// binding; binding twice is a programming error.
    pub fn bind(&mut self, card: CardId, target: T) -> bool {
        match self.in_flight.get_mut(&card) {
            Some(m) => {
                debug_assert!(m.completion.is_none(), "{card} already has a completion bound");
                m.completion = Some(target);
                true
            }
            None => false,
        }
    }

    /// Set the visual layer immediately (e.g. lift a card above the table
    /// while it travels).
    pub fn set_layer(&mut self, card: CardId, layer: SortLayer) {
        self.views.entry(card).or_default().hints.layer = layer;
    }

    pub fn set_face_up(&mut self, card: CardId, face_up: bool) {
        self.views.entry(card).or_default().face_up = face_up;
    }

    /// Advance all in-flight moves to `now`.
    ///
    /// Returns the moves that finished, ordered by the time they reached
    /// their end pose (ties by scheduling order).
    pub fn advance(&mut self, now: Duration) -> Vec<MoveCompleted<T>> {
        self.now = now;
        let mut finished = Vec::new();

        for (card, m) in &mut self.in_flight {
            let view = self.views.entry(*card).or_default();
            match m.progress(now) {
                None => view.pose = m.from,
                Some(u) if u < 1.0 => {
                    view.pose = m.from.lerp(m.to, self.easing.apply(u));
                    if u > self.order_commit_at {
                        view.hints.sort_order = m.eventual.sort_order;
                    }
                    if u > self.layer_commit_at {
                        view.hints.layer = m.eventual.layer;
                    }
                }
                Some(_) => {
                    view.pose = m.to;
                    view.hints = m.eventual;
                    finished.push((m.end(), m.id, *card));
                }
            }
        }

        finished.sort_unstable();
        finished
            .into_iter()
            .filter_map(|(_, _, card)| self.in_flight.remove(&card))
            .map(|mut m| {
                let target = m.notify();
                tracing::trace!(card = %m.card, move_id = m.id.0, "move completed");
                MoveCompleted { id: m.id, card: m.card, target }
            })
            .collect()
    }

    #[must_use]
    pub fn view(&self, card: CardId) -> Option<&CardView> {
        self.views.get(&card)
    }

    #[must_use]
    pub fn is_moving(&self, card: CardId) -> bool {
        self.in_flight.contains_key(&card)
    }

    #[must_use]
    pub fn in_flight_move(&self, card: CardId) -> Option<&Move<T>> {
        self.in_flight.get(&card)
    }

    /// In-flight moves ordered by start time.
    #[must_use]
    pub fn in_flight(&self) -> Vec<&Move<T>> {
        let mut moves: Vec<_> = self.in_flight.values().collect();
        moves.sort_by_key(|m| (m.start, m.id));
        moves
    }

    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vec3;

    const D: Duration = Duration::from_millis(500);

    fn scheduler() -> MoveScheduler<u8> {
        MoveScheduler::new(&MotionConfig::default())
    }

    fn hints(order: i32, layer: u16) -> RenderHints {
        RenderHints::new(order, SortLayer(layer))
    }

    fn end_pose() -> Pose {
        Pose::new(Vec3::new(10.0, 0.0, 0.0), 90.0)
    }

    #[test]
    fn test_midpoint_is_between_and_silent() {
        let mut s = scheduler();
        let card = CardId::new(1);
        s.place(card, Pose::default(), hints(0, 1));
        s.move_card(card, end_pose(), Start::Now, hints(8, 4));
        s.bind(card, 7);

        let done = s.advance(D / 2);
        assert!(done.is_empty());

        let pose = s.view(card).unwrap().pose;
        assert!(pose.position.x > 0.0 && pose.position.x < 10.0);
        assert!(pose.rotation > 0.0 && pose.rotation < 90.0);
        assert!(s.is_moving(card));
    }

    #[test]
    fn test_completion_fires_once() {
        let mut s = scheduler();
        let card = CardId::new(1);
        s.place(card, Pose::default(), hints(0, 1));
        s.move_card(card, end_pose(), Start::Now, hints(8, 4));
        s.bind(card, 7);

        let done = s.advance(D);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].target, Some(7));
        assert_eq!(s.view(card).unwrap().pose, end_pose());
        assert_eq!(s.view(card).unwrap().hints, hints(8, 4));

        assert!(s.advance(D * 2).is_empty());
        assert!(!s.is_moving(card));
    }

    #[test]
    fn test_staggered_move_holds_start_pose() {
        let mut s = scheduler();
        let card = CardId::new(2);
        let start = Pose::at(Vec3::new(-1.0, 0.0, 0.0));
        s.place(card, start, hints(0, 1));
        s.move_card(card, end_pose(), Start::At(Duration::from_millis(300)), hints(0, 4));

        s.advance(Duration::from_millis(200));
        assert_eq!(s.view(card).unwrap().pose, start);

        assert!(s.advance(Duration::from_millis(700)).is_empty());
        assert_eq!(s.advance(Duration::from_millis(800)).len(), 1);
    }

    #[test]
    fn test_hints_commit_at_thresholds() {
        let mut s = scheduler();
        let card = CardId::new(3);
        s.place(card, Pose::default(), hints(-4, 1));
        s.set_layer(card, SortLayer(10));
        s.move_card(card, end_pose(), Start::Now, hints(12, 4));

        s.advance(Duration::from_millis(200));
        assert_eq!(s.view(card).unwrap().hints, hints(-4, 10));

        s.advance(Duration::from_millis(300));
        assert_eq!(s.view(card).unwrap().hints, hints(12, 10));

        s.advance(Duration::from_millis(400));
        assert_eq!(s.view(card).unwrap().hints, hints(12, 4));
    }

    #[test]
    fn test_completions_ordered_by_end_time() {
        let mut s = scheduler();
        for (i, delay) in [(0u32, 200u64), (1, 0), (2, 100)] {
            let card = CardId::new(i);
            s.place(card, Pose::default(), hints(0, 1));
            s.move_card(card, end_pose(), Start::At(Duration::from_millis(delay)), hints(0, 1));
            s.bind(card, i as u8);
        }

        let order: Vec<_> = s
            .advance(Duration::from_secs(5))
            .into_iter()
            .filter_map(|c| c.target)
            .collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_retarget_keeps_binding_and_pending_start() {
        let mut s = scheduler();
        let card = CardId::new(4);
        s.place(card, Pose::default(), hints(0, 1));
        s.move_card(card, end_pose(), Start::At(Duration::from_millis(400)), hints(0, 4));
        s.bind(card, 9);

        let other = Pose::at(Vec3::new(0.0, 5.0, 0.0));
        s.move_card(card, other, Start::KeepPending, hints(4, 4));

        let m = s.in_flight_move(card).unwrap();
        assert_eq!(m.start, Duration::from_millis(400));
        assert_eq!(m.to, other);
        assert!(m.has_completion());

        let done = s.advance(Duration::from_millis(900));
        assert_eq!(done[0].target, Some(9));
        assert_eq!(s.view(card).unwrap().pose, other);
    }

    #[test]
    fn test_unbound_move_completes_without_target() {
        let mut s = scheduler();
        let card = CardId::new(5);
        s.move_card(card, end_pose(), Start::Now, hints(0, 1));

        let done = s.advance(D);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].target, None);
    }

    #[test]
    fn test_bind_requires_move() {
        let mut s = scheduler();
        assert!(!s.bind(CardId::new(6), 1));
    }
}
