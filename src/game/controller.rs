//! The session: turn state machine driven by move completions.
//!
//! ## Flow
//!
//! ```text
//! start() ── deal (staggered) ──▶ last card lands ──▶ turn up target
//!                                                        │
//!        ┌───────────────────────────────────────────────┘
//!        ▼
//!   pass_turn_to(dealer + 1) ──▶ Pre ──▶ decision ──▶ Waiting
//!        ▲                                               │
//!        └──── pass_turn_next() ◀── move completes ◀─────┘
//! ```
//!
//! Every player action is a scheduled move. The session never advances a
//! turn from inside the action that scheduled the move; it advances when
//! `tick` reports that move's completion. Completion targets are a single
//! tagged value per move (`Completion`), so a move notifies exactly one
//! party exactly once.
//!
//! ## Ignored input
//!
//! `card_activated` outside the human's `Pre` phase, or with an unplayable
//! card, changes nothing. It is reported as `Activation::Ignored`, logged at
//! `debug`, and queued as `SessionEvent::InputIgnored`.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::events::{Activation, IgnoreReason, SessionEvent};
use crate::ai::{Decision, RandomLegalPlay, TurnStrategy};
use crate::cards::{CardId, Deck};
use crate::core::{
    EngineError, GameConfig, GameRng, Player, PlayerId, PlayerKind, PlayerMap, Pose,
    SessionResult, TurnPhase, TurnState,
};
use crate::deck::DeckManager;
use crate::motion::{CardView, Move, MoveScheduler, RenderHints, Start};
use crate::rules::{BartokRules, RulesEngine};
use crate::zones::{FanParams, Location, Transit, ZoneManager};

/// Who is told when a move completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Completion {
    /// The last dealt card landed; turn up the first target.
    DealFinished,
    /// The first target landed; start the first turn.
    TargetShown,
    /// A player's draw or play landed; pass the turn.
    Player(PlayerId),
}

/// One game of Bartok, from deal to restart signal.
pub struct Session {
    config: GameConfig,
    rng: GameRng,
    rules: BartokRules,
    deck: Deck,
    deck_manager: DeckManager,
    zones: ZoneManager,
    players: PlayerMap<Player>,
    state: TurnState,
    scheduler: MoveScheduler<Completion>,
    strategy: Box<dyn TurnStrategy>,
    events: Vec<SessionEvent>,
    dealt: bool,
    restart_at: Option<Duration>,
    restart_requested: bool,
}

impl Session {
    /// Build a session: validate the config, build and shuffle the deck,
    /// seat the players and stack the draw pile.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;

        let rng = GameRng::new(seed);
        let mut deck_manager = DeckManager::new(rng.for_context("shuffle"));
        let strategy = Box::new(RandomLegalPlay::new(rng.for_context("ai")));

        let deck = DeckManager::create_deck(&config.deck);
        let player_count = config.rules.player_count;
        let human = config.rules.human_seat;

        let players = PlayerMap::new(player_count, |p| {
            let kind = if human == Some(p.0) {
                PlayerKind::Human
            } else {
                PlayerKind::Ai
            };
            let seat = config.layout.seat_of(p).map_or(p.index(), |(i, _)| i);
            Player::new(p, kind, seat)
        });
        let kinds = PlayerMap::new(player_count, |p| players[p].kind);

        let mut zones = ZoneManager::new(&kinds);
        zones.fill_draw_pile(deck_manager.shuffled_ids(&deck));

        let mut session = Self {
            scheduler: MoveScheduler::new(&config.motion),
            config,
            rng,
            rules: BartokRules,
            deck,
            deck_manager,
            zones,
            players,
            state: TurnState::new(),
            strategy,
            events: Vec::new(),
            dealt: false,
            restart_at: None,
            restart_requested: false,
        };
        session.arrange_draw_pile();

        info!(seed, players = player_count, cards = session.deck.len(), "session created");
        Ok(session)
    }

    /// Replace the AI strategy (builder pattern).
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl TurnStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// A brand-new session with the same config and a seed drawn from this
    /// session's RNG. Nothing carries over.
    pub fn restart(self) -> Result<Self, EngineError> {
        let mut rng = self.rng;
        let seed = rng.next_seed();
        info!(seed, "restarting session");
        Session::new(self.config, seed)
    }

    /// Deal the starting hands. Does nothing if already dealt.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.dealt {
            return Ok(());
        }
        self.dealt = true;

        let rules = &self.config.rules;
        let plan = DeckManager::deal_plan(
            rules.starting_cards,
            rules.player_count,
            PlayerId::new(rules.dealer),
            self.config.motion.deal_stagger(),
        );
        let now = self.scheduler.now();
        let duration = self.config.motion.move_duration();

        info!(cards = plan.len(), "dealing");
        self.events.push(SessionEvent::DealStarted { cards: plan.len() });

        for step in plan {
            let start = now + step.delay;
            let card = self
                .zones
                .draw_to_hand(step.recipient, &self.deck, Transit { start, duration })
                .ok_or(EngineError::NoCardsAvailable)?;
            self.fan_hand(step.recipient, Some((card, Start::At(start))))?;
            if step.last {
                self.scheduler.bind(card, Completion::DealFinished);
            }
        }
        Ok(())
    }

    /// Advance time to `now`: move cards, dispatch completions, and raise
    /// the restart signal when due.
    pub fn tick(&mut self, now: Duration) -> Result<(), EngineError> {
        let finished = self.scheduler.advance(now);
        for done in &finished {
            self.zones.settle(done.card);
        }
        for done in finished {
            match done.target {
                Some(Completion::DealFinished) => self.reveal_first_target()?,
                Some(Completion::TargetShown) => self.start_game()?,
                Some(Completion::Player(player)) => {
                    debug_assert_eq!(self.state.current_player, Some(player));
                    self.pass_turn_next()?;
                }
                None => {}
            }
        }

        if let Some(at) = self.restart_at {
            if now >= at && !self.restart_requested {
                self.restart_requested = true;
                info!("restart requested");
                self.events.push(SessionEvent::RestartRequested);
            }
        }
        Ok(())
    }

    /// External input: the user activated `card`.
    pub fn card_activated(&mut self, card: CardId) -> Result<Activation, EngineError> {
        if !self.deck.contains(card) {
            return Err(EngineError::UnknownCard(card));
        }

        let player = match self.state.current_player {
            _ if self.state.is_over() => return Ok(self.ignore(card, IgnoreReason::GameFinished)),
            None => return Ok(self.ignore(card, IgnoreReason::NoTurnYet)),
            Some(p) => p,
        };
        if !self.players[player].kind.is_human() {
            return Ok(self.ignore(card, IgnoreReason::NotHumanTurn));
        }
        if !self.state.accepts_moves() {
            return Ok(self.ignore(card, IgnoreReason::MoveInProgress));
        }

        match self.zones.location(card) {
            Some(Location::DrawPile) => {
                let drawn = self.draw_for(player)?;
                Ok(Activation::Drew(drawn))
            }
            Some(Location::Hand(owner)) if owner == player => {
                if self.is_valid_play(card)? {
                    self.play(player, card)?;
                    Ok(Activation::Played(card))
                } else {
                    Ok(self.ignore(card, IgnoreReason::IllegalPlay))
                }
            }
            _ => Ok(self.ignore(card, IgnoreReason::NotInHand)),
        }
    }

    /// Whether `card` may be played onto the current target.
    pub fn is_valid_play(&self, card: CardId) -> Result<bool, EngineError> {
        let card = self.deck.get(card).ok_or(EngineError::UnknownCard(card))?;
        let target = match self.zones.target() {
            Some(id) => Some(self.deck.get(id).ok_or(EngineError::UnknownCard(id))?),
            None => None,
        };
        self.rules.valid_play(card, target)
    }

    /// Pass the turn to the next seat (seat 0 if nobody has played yet).
    pub fn pass_turn_next(&mut self) -> Result<(), EngineError> {
        let count = self.config.rules.player_count;
        let next = self
            .state
            .current_player
            .map_or(PlayerId::new(0), |p| p.next(count));
        self.pass_turn_to(next)
    }

    /// Pass the turn to `next`.
    ///
    /// If someone already holds the turn, game over is checked first (which
    /// also recycles an empty draw pile); a finished game keeps its state.
    pub fn pass_turn_to(&mut self, next: PlayerId) -> Result<(), EngineError> {
        if self.players.get(next).is_none() {
            return Err(EngineError::UnknownPlayer(next));
        }
        if self.state.is_over() {
            debug!(%next, "turn pass after game over ignored");
            return Ok(());
        }

        let previous = self.state.current_player;
        if previous.is_some() && self.check_game_over()? {
            return Ok(());
        }

        self.state.begin_turn(next);
        info!(
            from = previous.map(|p| p.0),
            to = next.0,
            turn = self.state.turn,
            "turn passed"
        );
        self.events.push(SessionEvent::TurnPassed {
            from: previous,
            to: next,
            turn: self.state.turn,
        });

        self.take_turn()
    }

    /// Recycle an empty draw pile, then end the game if the current player
    /// has emptied their hand.
    pub fn check_game_over(&mut self) -> Result<bool, EngineError> {
        if self.zones.draw_pile().is_empty() {
            self.reshuffle_discard()?;
        }

        let Some(current) = self.state.current_player else {
            return Ok(false);
        };
        let hand = self.zones.hand(current).ok_or(EngineError::UnknownPlayer(current))?;
        if !hand.is_empty() {
            return Ok(false);
        }

        let result = SessionResult {
            winner: current,
            kind: self.players[current].kind,
        };
        self.state.finish(result);
        self.restart_at = Some(self.scheduler.now() + self.config.motion.restart_delay());

        info!(winner = current.0, kind = ?result.kind, turns = self.state.turn, "game over");
        self.events.push(SessionEvent::GameOver(result));
        Ok(true)
    }

    /// Run the current player's turn: humans wait for input, AI decides now.
    fn take_turn(&mut self) -> Result<(), EngineError> {
        let Some(player) = self.state.current_player else {
            return Ok(());
        };
        if self.players[player].kind.is_human() {
            return Ok(());
        }

        let hand = self.zones.hand(player).ok_or(EngineError::UnknownPlayer(player))?;
        let decision = self
            .strategy
            .decide(&self.rules, &self.deck, hand.cards(), self.zones.target())?;

        match decision {
            Decision::Draw => {
                self.draw_for(player)?;
            }
            Decision::Play(card) => self.play(player, card)?,
        }
        Ok(())
    }

    /// Draw the top card into `player`'s hand and wait for it to land.
    fn draw_for(&mut self, player: PlayerId) -> Result<CardId, EngineError> {
        if self.zones.draw_pile().is_empty() {
            self.reshuffle_discard()?;
        }
        let transit = self.transit_now();
        let card = self
            .zones
            .draw_to_hand(player, &self.deck, transit)
            .ok_or(EngineError::NoCardsAvailable)?;

        self.fan_hand(player, Some((card, Start::Now)))?;
        self.scheduler.bind(card, Completion::Player(player));
        self.state.phase = TurnPhase::Waiting;

        debug!(%player, %card, "draw");
        self.events.push(SessionEvent::CardDrawn { player, card });
        Ok(card)
    }

    /// Play `card` from `player`'s hand onto the target and wait for it.
    fn play(&mut self, player: PlayerId, card: CardId) -> Result<(), EngineError> {
        let transit = self.transit_now();
        let displaced = self
            .zones
            .play_from_hand(player, card, transit)
            .ok_or(EngineError::UnknownCard(card))?;

        self.show_target(card, displaced);
        self.fan_hand(player, None)?;
        self.scheduler.bind(card, Completion::Player(player));
        self.state.phase = TurnPhase::Waiting;

        debug!(%player, %card, "play");
        self.events.push(SessionEvent::CardPlayed { player, card });
        Ok(())
    }

    fn reveal_first_target(&mut self) -> Result<(), EngineError> {
        let transit = self.transit_now();
        let (card, displaced) = self
            .zones
            .draw_to_target(transit)
            .ok_or(EngineError::NoCardsAvailable)?;

        self.show_target(card, displaced);
        self.scheduler.bind(card, Completion::TargetShown);

        info!(%card, "first target revealed");
        self.events.push(SessionEvent::TargetRevealed(card));
        Ok(())
    }

    fn start_game(&mut self) -> Result<(), EngineError> {
        let dealer = PlayerId::new(self.config.rules.dealer);
        self.pass_turn_to(dealer.next(self.config.rules.player_count))
    }

    /// Shuffle the discard into a new draw pile. An empty discard is only
    /// a problem once someone actually has to draw.
    fn reshuffle_discard(&mut self) -> Result<usize, EngineError> {
        if self.zones.discard_pile().is_empty() {
            warn!(draw = self.zones.draw_pile().len(), "nothing to reshuffle");
            return Ok(0);
        }

        let cards = self.deck_manager.reshuffle_discard_into_draw(&mut self.zones)?;
        self.arrange_draw_pile();

        info!(cards, "discard reshuffled into draw pile");
        self.events.push(SessionEvent::DiscardReshuffled { cards });
        Ok(cards)
    }

    fn transit_now(&self) -> Transit {
        Transit {
            start: self.scheduler.now(),
            duration: self.config.motion.move_duration(),
        }
    }

    /// Snap the draw pile into a face-down stack, top card frontmost.
    fn arrange_draw_pile(&mut self) {
        let layout = &self.config.layout;
        let pose = Pose::at(layout.anchor_position(&layout.draw_pile));
        let layer = layout.draw_pile.layer;
        let top = self.zones.draw_pile().len().saturating_sub(1);

        for (i, &card) in self.zones.draw_pile().iter().enumerate() {
            let depth = (top - i) as i32;
            self.scheduler.place(card, pose, RenderHints::new(-depth * 4, layer));
            self.scheduler.set_face_up(card, false);
        }
    }

    /// Send `card` to the target slot; snap the card it displaced onto the
    /// discard pile.
    fn show_target(&mut self, card: CardId, displaced: Option<CardId>) {
        self.state.target = Some(card);
        let layout = &self.config.layout;
        let motion = &self.config.motion;
        let discard_at = layout.anchor_position(&layout.discard_pile);

        let sort_order = self.scheduler.view(card).map_or(0, |v| v.hints.sort_order);
        self.scheduler.set_layer(card, motion.transit_layer);
        self.scheduler.set_face_up(card, true);
        self.scheduler.move_card(
            card,
            Pose::at(discard_at.toward_viewer(1.0)),
            Start::Now,
            RenderHints::new(sort_order, layout.target.layer),
        );

        if let Some(old) = displaced {
            let order = (self.zones.discard_pile().len() * 4) as i32;
            self.scheduler.place(
                old,
                Pose::at(discard_at.toward_viewer(0.5)),
                RenderHints::new(order, layout.discard_pile.layer),
            );
        }
    }

    /// Re-lay `player`'s hand. `fresh` is a card that just joined the hand
    /// and the start it should use; the rest start now, or keep a pending
    /// start while the deal is still running.
    fn fan_hand(&mut self, player: PlayerId, fresh: Option<(CardId, Start)>) -> Result<(), EngineError> {
        let seat_index = self.players.get(player).ok_or(EngineError::UnknownPlayer(player))?.seat;
        let layout = &self.config.layout;
        let motion = &self.config.motion;
        let seat = layout.seats.get(seat_index).ok_or(EngineError::UnknownPlayer(player))?;

        let params = FanParams {
            origin: layout.seat_position(seat),
            rotation: seat.rotation,
            fan_degrees: self.config.rules.hand_fan_degrees,
            card_height: motion.card_height,
            depth_step: motion.depth_step,
            layer: seat.layer,
        };
        let hand = self.zones.hand(player).ok_or(EngineError::UnknownPlayer(player))?;
        let default_start = if self.state.phase == TurnPhase::Idle {
            Start::KeepPending
        } else {
            Start::Now
        };

        for slot in hand.fan_layout(&params) {
            let start = match fresh {
                Some((card, start)) if card == slot.card => start,
                _ => default_start,
            };
            let hints = RenderHints::new(slot.sort_order, slot.layer);
            let settled = self.scheduler.view(slot.card).is_some_and(|v| {
                v.pose == slot.pose && v.hints == hints && v.face_up == slot.face_up
            });
            if settled && !self.scheduler.is_moving(slot.card) {
                continue;
            }

            self.scheduler.set_layer(slot.card, motion.transit_layer);
            self.scheduler.set_face_up(slot.card, slot.face_up);
            self.scheduler.move_card(slot.card, slot.pose, start, hints);
        }
        Ok(())
    }

    fn ignore(&mut self, card: CardId, reason: IgnoreReason) -> Activation {
        debug!(%card, ?reason, phase = ?self.state.phase, "input ignored");
        self.events.push(SessionEvent::InputIgnored { card, reason });
        Activation::Ignored(reason)
    }

    /// Take all events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// What the renderer should show for `card` right now.
    #[must_use]
    pub fn card_view(&self, card: CardId) -> Option<&CardView> {
        self.scheduler.view(card)
    }

    /// Active moves with their timing windows, earliest start first.
    #[must_use]
    pub fn in_flight(&self) -> Vec<&Move<Completion>> {
        self.scheduler.in_flight()
    }

    /// Where the turn indicator belongs: above the current player's seat.
    #[must_use]
    pub fn turn_indicator_pose(&self) -> Option<Pose> {
        let player = self.state.current_player?;
        let layout = &self.config.layout;
        let seat = layout.seats.get(self.players.get(player)?.seat)?;
        Some(Pose::at(
            layout
                .seat_position(seat)
                .toward_viewer(self.config.motion.turn_light_offset),
        ))
    }

    #[must_use]
    pub fn state(&self) -> &TurnState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.state.phase
    }

    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.state.current_player
    }

    #[must_use]
    pub fn result(&self) -> Option<SessionResult> {
        self.state.result
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    #[must_use]
    pub fn restart_due(&self) -> bool {
        self.restart_requested
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Whether the session is waiting on a move (nothing to do but tick).
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scheduler.in_flight_count() > 0
    }
}
