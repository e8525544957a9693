//! The duel engine.
//!
//! `Duel` owns both rosters, the duel state and an injected `EventSink`.
//! A host drives it with three calls:
//!
//! 1. `start` once per duel
//! 2. `set_selection` with the player's card (fresh or replacement)
//! 3. `resolve_pending_exchange` to commit
//!
//! and repeats 2-3 until the duel reports `Ended`. Every rejected call is
//! reported through `EventSink::on_error` and returned as `Err`; state is
//! left untouched.
//!
//! ## Example
//!
//! ```
//! use chain_duel::cards::{Card, CardId, Selection};
//! use chain_duel::core::{ScriptedCoins, Side};
//! use chain_duel::duel::{Duel, EventLog, Resolution};
//!
//! let player = vec![
//!     Card::monster(CardId::new(1), "A", 1000, 100),
//!     Card::monster(CardId::new(2), "B", 500, 500),
//!     Card::monster(CardId::new(3), "C", 2000, 50),
//! ];
//! let ai = vec![
//!     Card::monster(CardId::new(4), "D", 800, 300),
//!     Card::monster(CardId::new(5), "E", 100, 100),
//!     Card::monster(CardId::new(6), "F", 1500, 900),
//! ];
//!
//! let coins = ScriptedCoins::new(0).starting_side([true]);
//! let mut duel = Duel::with_coins(&player, &ai, EventLog::new(), coins);
//! duel.start().unwrap();
//!
//! duel.set_selection(Selection::attack(player[0].clone())).unwrap();
//! assert_eq!(duel.current_defender(), Some(CardId::new(6)));
//!
//! let resolution = duel.resolve_pending_exchange().unwrap();
//! assert!(matches!(resolution, Resolution::Completed { .. }));
//! assert_eq!(duel.turn(), Side::Ai);
//! ```

use super::chain::{ChainEnd, Resolver};
use super::events::{EventSink, Outcome};
use super::policy::{ResponderPolicy, StrongestAttack};
use super::state::{DuelPhase, DuelSnapshot, DuelState};
use crate::cards::{Card, CardId, Position, Roster, Selection};
use crate::core::{CoinSource, DuelConfig, DuelError, DuelResult, DuelRng, Side, SideMap, Toss};

/// What `resolve_pending_exchange` left the duel waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// `side` must submit a replacement, then resolve again.
    ReplacementRequested(Side),
    /// The exchange finished and the turn passed.
    Completed { outcome: Outcome },
    /// The exchange finished and ended the duel.
    Ended { round: Outcome, winner: Outcome },
}

/// Two-sided chain-combat duel.
pub struct Duel<S: EventSink, C: CoinSource = DuelRng> {
    config: DuelConfig,
    /// Lineups as supplied; rosters are rebuilt from these on `start`.
    lineups: SideMap<Vec<Card>>,
    rosters: SideMap<Roster>,
    state: DuelState,
    policy: Box<dyn ResponderPolicy>,
    coins: C,
    sink: S,
}

impl<S: EventSink> Duel<S, DuelRng> {
    /// Create a duel whose coin flips are seeded from entropy.
    ///
    /// Both rosters are copied; the caller's slices are never touched.
    #[must_use]
    pub fn new(player_roster: &[Card], ai_roster: &[Card], sink: S) -> Self {
        Self::with_coins(player_roster, ai_roster, sink, DuelRng::from_entropy())
    }

    /// Create a duel with reproducible coin flips.
    #[must_use]
    pub fn seeded(player_roster: &[Card], ai_roster: &[Card], sink: S, seed: u64) -> Self {
        Self::with_coins(player_roster, ai_roster, sink, DuelRng::new(seed))
    }
}

impl<S: EventSink, C: CoinSource> Duel<S, C> {
    /// Create a duel drawing its coin flips from `coins`.
    #[must_use]
    pub fn with_coins(player_roster: &[Card], ai_roster: &[Card], sink: S, coins: C) -> Self {
        let config = DuelConfig::default();
        let lineups = SideMap::from_pair(player_roster.to_vec(), ai_roster.to_vec());
        let rosters = build_rosters(&lineups, &config);
        Self {
            config,
            lineups,
            rosters,
            state: DuelState::new(),
            policy: Box::new(StrongestAttack),
            coins,
            sink,
        }
    }

    /// Rebuild a duel from a checkpoint.
    #[must_use]
    pub fn resume(snapshot: DuelSnapshot, sink: S, coins: C) -> Self {
        Self {
            config: snapshot.config,
            lineups: snapshot.lineups,
            rosters: snapshot.rosters,
            state: snapshot.state,
            policy: Box::new(StrongestAttack),
            coins,
            sink,
        }
    }

    /// Replace the rule constants. Rosters are recomputed for an unstarted
    /// duel; a running duel picks the new life formula up at its next `start`.
    #[must_use]
    pub fn with_config(mut self, config: DuelConfig) -> Self {
        if self.state.phase == DuelPhase::NotStarted {
            self.rosters = build_rosters(&self.lineups, &config);
        }
        self.config = config;
        self
    }

    /// Replace the AI responder policy.
    #[must_use]
    pub fn with_policy(mut self, policy: impl ResponderPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    // === Lifecycle ===

    /// Begin a duel.
    ///
    /// Rebuilds both rosters from the construction-time lineups, resets
    /// scores, flips for the starting side and emits `on_duel_started`
    /// followed by `on_score_changed`.
    pub fn start(&mut self) -> DuelResult<()> {
        if self.state.phase.is_active() {
            return self.reject(DuelError::AlreadyActive);
        }

        let rosters = build_rosters(&self.lineups, &self.config);
        for side in Side::BOTH {
            if rosters[side].len() < self.config.min_roster_size {
                return self.reject(DuelError::RosterTooSmall {
                    side,
                    size: rosters[side].len(),
                    required: self.config.min_roster_size,
                });
            }
        }

        let turn = Side::from_turn_bit(self.coins.flip(Toss::StartingSide));
        self.rosters = rosters;
        self.state = DuelState::started(turn);

        log::info!(
            "duel started: {} vs {} cards, {} moves first",
            self.rosters[Side::Player].len(),
            self.rosters[Side::Ai].len(),
            turn
        );
        self.sink.on_duel_started(turn);
        self.sink.on_score_changed(0, 0);
        Ok(())
    }

    /// Submit the player's card.
    ///
    /// While a replacement is pending the card becomes the new attacker for
    /// the interrupted chain. Otherwise it opens a fresh exchange: the AI
    /// responder is picked by policy, placed in a random position and
    /// becomes the current defender.
    pub fn set_selection(&mut self, selection: impl Into<Option<Selection>>) -> DuelResult<()> {
        self.ensure_active()?;

        let selection: Option<Selection> = selection.into();
        let Some(selection) = selection else {
            return self.reject(DuelError::MissingSelection);
        };
        let Some(card) = self.rosters[Side::Player].get(selection.card.id).cloned() else {
            return self.reject(DuelError::CardUnavailable {
                side: Side::Player,
                card: selection.card.id,
            });
        };
        // Stats come from the roster, not from the caller's copy.
        let selection = Selection::new(card, selection.position);

        if self.state.phase == DuelPhase::AwaitingReplacement {
            log::debug!("replacement attacker: {}", selection);
            self.state.pending[Side::Player] = Some(selection);
            self.state.phase = DuelPhase::AwaitingResolution;
            return Ok(());
        }

        let Some(responder) = self.policy.choose(&self.rosters[Side::Ai]).cloned() else {
            return self.reject(DuelError::NoCardsAvailable { side: Side::Ai });
        };
        let position = if self.coins.flip(Toss::AiPosition) {
            Position::Attack
        } else {
            Position::Defense
        };

        log::debug!("player selects {}, AI answers {} [{}]", selection, responder.name, position);
        self.state.current_defender = Some(responder.id);
        self.state.pending[Side::Player] = Some(selection);
        self.state.pending[Side::Ai] = Some(Selection::new(responder, position));
        self.state.phase = DuelPhase::AwaitingResolution;
        Ok(())
    }

    /// Commit the pending exchange.
    pub fn resolve_pending_exchange(&mut self) -> DuelResult<Resolution> {
        self.ensure_active()?;

        let Some(player_selection) = self.state.pending[Side::Player].clone() else {
            return self.reject(DuelError::PendingSelectionMissing { side: Side::Player });
        };
        let Some(ai_selection) = self.state.pending[Side::Ai].clone() else {
            return self.reject(DuelError::PendingSelectionMissing { side: Side::Ai });
        };

        let turn = self.state.turn;
        let opening_defender = match turn {
            Side::Player => match self.current_defender_card() {
                Some(card) => card,
                None => return self.reject(DuelError::NoCardsAvailable { side: Side::Ai }),
            },
            Side::Ai => player_selection.card.clone(),
        };

        let mut resolver = Resolver {
            config: &self.config,
            policy: self.policy.as_ref(),
            coins: &mut self.coins,
            rosters: &mut self.rosters,
            scores: &mut self.state.scores,
            tally: &mut self.state.tally,
            current_defender: &mut self.state.current_defender,
        };

        let end = match turn {
            Side::Player => {
                let end = resolver.player_chain(&player_selection.card, opening_defender);
                let struck_ai = !resolver.tally.removed[Side::Ai].is_empty();
                if matches!(end, ChainEnd::Blocked | ChainEnd::Exhausted) && struck_ai {
                    resolver.counter_offensive()
                } else {
                    end
                }
            }
            Side::Ai => resolver.single_battle(&ai_selection.card, &opening_defender),
        };
        log::debug!("exchange chain ended: {:?}", end);

        if turn == Side::Player
            && end == ChainEnd::AttackerFell
            && !self.rosters[Side::Player].is_empty()
            && !self.state.score_reached(self.config.winning_score)
        {
            self.state.pending[Side::Player] = None;
            self.state.phase = DuelPhase::AwaitingReplacement;
            self.sink.on_replacement_requested(Side::Player);
            return Ok(Resolution::ReplacementRequested(Side::Player));
        }

        Ok(self.complete_exchange(&player_selection, &ai_selection))
    }

    fn complete_exchange(&mut self, player_selection: &Selection, ai_selection: &Selection) -> Resolution {
        let tally = std::mem::take(&mut self.state.tally);
        let round = tally.outcome();
        let turn = self.state.turn;

        self.sink
            .on_cards_removed(&tally.removed[Side::Player], &tally.removed[Side::Ai]);
        self.sink
            .on_turn_resolved(player_selection, ai_selection, turn, round);
        self.sink
            .on_score_changed(self.state.scores[Side::Player], self.state.scores[Side::Ai]);

        self.state.clear_exchange();
        self.state.exchanges_resolved += 1;

        if self.is_terminal() {
            let winner = self.end();
            return Resolution::Ended { round, winner };
        }

        self.state.turn = turn.opponent();
        self.state.phase = DuelPhase::AwaitingSelection;
        Resolution::Completed { outcome: round }
    }

    fn is_terminal(&self) -> bool {
        self.state.score_reached(self.config.winning_score)
            || self.rosters[Side::Player].is_empty()
            || self.rosters[Side::Ai].is_empty()
            || self.state.exchanges_resolved >= self.config.max_exchanges
    }

    fn end(&mut self) -> Outcome {
        let winner = self.state.leader();
        self.state.phase = DuelPhase::Ended(winner);
        log::info!(
            "duel ended after {} exchanges: Player {} - {} AI, winner {}",
            self.state.exchanges_resolved,
            self.state.scores[Side::Player],
            self.state.scores[Side::Ai],
            winner
        );
        self.sink.on_duel_ended(winner);
        winner
    }

    fn current_defender_card(&self) -> Option<Card> {
        let ai = &self.rosters[Side::Ai];
        self.state
            .current_defender
            .and_then(|id| ai.get(id))
            .or_else(|| self.policy.choose(ai))
            .cloned()
    }

    fn ensure_active(&mut self) -> DuelResult<()> {
        let phase = self.state.phase;
        match phase {
            DuelPhase::NotStarted => self.reject(DuelError::NotStarted),
            DuelPhase::Ended(_) => self.reject(DuelError::AlreadyEnded),
            _ => Ok(()),
        }
    }

    fn reject<T>(&mut self, error: DuelError) -> DuelResult<T> {
        log::warn!("rejected in {:?}: {}", self.state.phase, error);
        self.sink.on_error(&error);
        Err(error)
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> DuelPhase {
        self.state.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.phase.is_active()
    }

    #[must_use]
    pub fn state(&self) -> &DuelState {
        &self.state
    }

    #[must_use]
    pub fn scores(&self) -> (u8, u8) {
        (self.state.scores[Side::Player], self.state.scores[Side::Ai])
    }

    #[must_use]
    pub fn score(&self, side: Side) -> u8 {
        self.state.scores[side]
    }

    /// Side attacking first in the current (or next) exchange.
    #[must_use]
    pub fn turn(&self) -> Side {
        self.state.turn
    }

    #[must_use]
    pub fn roster(&self, side: Side) -> &Roster {
        &self.rosters[side]
    }

    /// Live cards for `side`, in lineup order.
    #[must_use]
    pub fn available(&self, side: Side) -> Vec<Card> {
        self.rosters[side].to_vec()
    }

    #[must_use]
    pub fn life_of(&self, side: Side, card: CardId) -> Option<i64> {
        self.rosters[side].life(card)
    }

    /// Sum of remaining life across a side's roster.
    #[must_use]
    pub fn remaining_life(&self, side: Side) -> i64 {
        self.rosters[side].total_life()
    }

    #[must_use]
    pub fn pending_selection(&self, side: Side) -> Option<&Selection> {
        self.state.pending[side].as_ref()
    }

    #[must_use]
    pub fn current_defender(&self) -> Option<CardId> {
        self.state.current_defender
    }

    #[must_use]
    pub fn exchanges_resolved(&self) -> u32 {
        self.state.exchanges_resolved
    }

    /// Copy the observable duel out as a checkpoint.
    #[must_use]
    pub fn snapshot(&self) -> DuelSnapshot {
        DuelSnapshot {
            config: self.config.clone(),
            lineups: self.lineups.clone(),
            rosters: self.rosters.clone(),
            state: self.state.clone(),
        }
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the duel, returning its sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}

fn build_rosters(lineups: &SideMap<Vec<Card>>, config: &DuelConfig) -> SideMap<Roster> {
    lineups.map(|_, cards| Roster::new(cards.iter().cloned(), config))
}
