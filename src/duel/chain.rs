//! Chain resolution: the battle arithmetic of one exchange.
//!
//! A single battle compares the attacker's `attack` against the
//! defender's remaining life:
//!
//! - `attack > life`: the defender is eliminated
//! - `attack < life`: the defender survives with `life - attack`
//! - `attack == life`: a coin flip; the loser is eliminated
//!
//! Every elimination earns the opposing side one point.
//!
//! ## Chains
//!
//! - **Player chain** (player's turn): the player's attacker keeps fighting
//!   successive AI defenders, picked by the responder policy, for as long
//!   as it wins outright.
//! - **Single battle** (AI's turn): the AI's attacker fights only the
//!   player's submitted card; the player never auto-supplies defenders.
//! - **Counter-offensive** (after a player chain that eliminated an AI
//!   card): the AI's strongest card attacks the player's first live card,
//!   repeatedly, under the same rules.
//!
//! Every chain stops once either score reaches the winning score.

use super::policy::ResponderPolicy;
use super::state::ExchangeTally;
use crate::cards::{Card, CardId, Roster, Wound};
use crate::core::{CoinSource, DuelConfig, Side, SideMap, Toss};

/// Result of one battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Clash {
    /// The defender left its roster.
    DefenderEliminated,
    /// The defender held with this much life left.
    DefenderHeld(i64),
    /// The attacker lost a tie-break and left its roster.
    AttackerEliminated,
}

/// Why a chain stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainEnd {
    /// A defender survived the hit.
    Blocked,
    /// The defending roster is empty.
    Exhausted,
    /// A score reached the winning score.
    Decided,
    /// The attacking card was eliminated in a tie-break.
    AttackerFell,
    /// The AI's counter-attacker was eliminated in a tie-break.
    CounterFell,
}

/// Mutable view of everything one exchange touches.
pub struct Resolver<'a> {
    pub config: &'a DuelConfig,
    pub policy: &'a dyn ResponderPolicy,
    pub coins: &'a mut dyn CoinSource,
    pub rosters: &'a mut SideMap<Roster>,
    pub scores: &'a mut SideMap<u8>,
    pub tally: &'a mut ExchangeTally,
    /// AI card standing as defender during a player chain.
    pub current_defender: &'a mut Option<CardId>,
}

impl<'a> Resolver<'a> {
    /// Whether either score has reached the winning score.
    #[must_use]
    pub fn decided(&self) -> bool {
        self.scores
            .iter()
            .any(|(_, &s)| s >= self.config.winning_score)
    }

    /// Fight one battle between `attacker` (owned by `attacker_side`) and
    /// `defender` (owned by the opposing side).
    pub fn battle(&mut self, attacker_side: Side, attacker: &Card, defender: &Card) -> Clash {
        let defender_side = attacker_side.opponent();
        let atk = attacker.attack;
        let life = self.rosters[defender_side]
            .life(defender.id)
            .unwrap_or_else(|| self.config.fallback_life(defender.defense));

        if atk > life {
            log::debug!("{} ({}) overpowers {} ({} life)", attacker.name, atk, defender.name, life);
            self.eliminate(defender_side, defender);
            return Clash::DefenderEliminated;
        }

        if atk < life {
            let left = match self.rosters[defender_side].wound(defender.id, atk) {
                Some(Wound::Survived(left)) => left,
                _ => life.saturating_sub(atk),
            };
            log::debug!("{} ({}) hits {}: {} -> {} life", attacker.name, atk, defender.name, life, left);
            return Clash::DefenderHeld(left);
        }

        let attacker_wins = self.coins.flip(Toss::TieBreak);
        log::debug!(
            "{} ({}) ties {} ({} life), coin favours {}",
            attacker.name,
            atk,
            defender.name,
            life,
            if attacker_wins { attacker_side } else { defender_side }
        );
        if attacker_wins {
            self.eliminate(defender_side, defender);
            Clash::DefenderEliminated
        } else {
            self.eliminate(attacker_side, attacker);
            Clash::AttackerEliminated
        }
    }

    /// Player's attacker chains through the AI roster starting at `defender`.
    pub fn player_chain(&mut self, attacker: &Card, defender: Card) -> ChainEnd {
        let mut defender = defender;
        loop {
            *self.current_defender = Some(defender.id);
            match self.battle(Side::Player, attacker, &defender) {
                Clash::DefenderHeld(_) => return ChainEnd::Blocked,
                Clash::AttackerEliminated => return ChainEnd::AttackerFell,
                Clash::DefenderEliminated => {}
            }

            if self.decided() {
                return ChainEnd::Decided;
            }
            match self.policy.choose(&self.rosters[Side::Ai]) {
                Some(next) => {
                    log::debug!("{} steps in to defend", next.name);
                    defender = next.clone();
                }
                None => return ChainEnd::Exhausted,
            }
        }
    }

    /// AI's attacker fights the player's submitted card once.
    pub fn single_battle(&mut self, attacker: &Card, defender: &Card) -> ChainEnd {
        match self.battle(Side::Ai, attacker, defender) {
            Clash::DefenderHeld(_) => ChainEnd::Blocked,
            Clash::AttackerEliminated => ChainEnd::AttackerFell,
            Clash::DefenderEliminated if self.decided() => ChainEnd::Decided,
            Clash::DefenderEliminated if self.rosters[Side::Player].is_empty() => {
                ChainEnd::Exhausted
            }
            // No continuation: the player does not auto-supply defenders.
            Clash::DefenderEliminated => ChainEnd::Blocked,
        }
    }

    /// AI strikes back at the player's lineup front to back.
    pub fn counter_offensive(&mut self) -> ChainEnd {
        loop {
            if self.decided() {
                return ChainEnd::Decided;
            }
            let Some(attacker) = self.policy.choose(&self.rosters[Side::Ai]).cloned() else {
                return ChainEnd::Exhausted;
            };
            let Some(defender) = self.rosters[Side::Player].first().cloned() else {
                return ChainEnd::Exhausted;
            };
            log::debug!("counter-offensive: {} attacks {}", attacker.name, defender.name);

            match self.battle(Side::Ai, &attacker, &defender) {
                Clash::DefenderHeld(_) => return ChainEnd::Blocked,
                Clash::AttackerEliminated => return ChainEnd::CounterFell,
                Clash::DefenderEliminated => {}
            }
        }
    }

    fn eliminate(&mut self, owner: Side, card: &Card) {
        let removed = self.rosters[owner]
            .remove(card.id)
            .unwrap_or_else(|| card.clone());
        log::debug!("{} loses {}", owner, removed.name);
        self.scores[owner.opponent()] += 1;
        self.tally.record_elimination(owner, removed);
    }
}
