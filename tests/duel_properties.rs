//! Property tests over randomly generated duels.
//!
//! Every duel is driven by `RandomChoice` with a seeded `DuelRng`, and the
//! invariants are checked at each quiescent point between public calls.

use proptest::prelude::*;

use chain_duel::cards::{Card, CardId, Selection};
use chain_duel::core::{CoinSource, DuelConfig, ScriptedCoins, Side};
use chain_duel::duel::{
    play_out, Duel, DuelPhase, EventLog, RandomChoice, Resolution, SelectionChooser,
};

fn lineup(stats: &[(i64, i64)], base: u32) -> Vec<Card> {
    stats
        .iter()
        .enumerate()
        .map(|(i, &(atk, def))| {
            let id = base + i as u32;
            Card::monster(CardId::new(id), format!("Monster {}", id), atk, def)
        })
        .collect()
}

fn stats() -> impl Strategy<Value = Vec<(i64, i64)>> {
    // Multiples of 100 make exact ties reasonably common.
    prop::collection::vec(((0i64..40).prop_map(|a| a * 100), (0i64..20).prop_map(|d| d * 100)), 3..7)
}

/// Cards removed so far for `side`: reported events plus the paused tally.
fn removed_count<C: CoinSource>(duel: &Duel<EventLog, C>, side: Side) -> usize {
    let (player, ai) = duel.sink().removed_cards();
    let reported = match side {
        Side::Player => player.len(),
        Side::Ai => ai.len(),
    };
    reported + duel.state().tally.removed[side].len()
}

proptest! {
    /// Scores never decrease and stay within the winning score. Rosters
    /// are conserved and every live card has positive life. A replacement
    /// is only requested once the submitted attacker is gone.
    #[test]
    fn invariants_hold_at_every_step(
        player in stats(),
        ai in stats(),
        seed in any::<u64>(),
        winning in 2u8..4,
    ) {
        let player = lineup(&player, 1);
        let ai = lineup(&ai, 100);
        let sizes = (player.len(), ai.len());
        let mut duel = Duel::seeded(&player, &ai, EventLog::new(), seed)
            .with_config(DuelConfig::default().with_winning_score(winning));
        let mut chooser = RandomChoice::new(seed ^ 0x5eed);
        duel.start().unwrap();

        let mut last = (0u8, 0u8);
        let mut steps = 0usize;
        while duel.is_active() {
            let selection = chooser.choose(duel.roster(Side::Player)).unwrap();
            let attacker = selection.card.id;
            duel.set_selection(selection).unwrap();
            let resolution = duel.resolve_pending_exchange().unwrap();
            steps += 1;

            if let Resolution::ReplacementRequested(side) = resolution {
                prop_assert_eq!(side, Side::Player);
                prop_assert!(!duel.roster(Side::Player).contains(attacker));
            }

            let scores = duel.scores();
            prop_assert!(scores.0 >= last.0 && scores.1 >= last.1);
            prop_assert!(scores.0 <= winning && scores.1 <= winning);
            last = scores;

            prop_assert_eq!(duel.roster(Side::Player).len() + removed_count(&duel, Side::Player), sizes.0);
            prop_assert_eq!(duel.roster(Side::Ai).len() + removed_count(&duel, Side::Ai), sizes.1);

            for side in Side::BOTH {
                let roster = duel.roster(side);
                for card in roster.cards() {
                    prop_assert!(roster.life(card.id).unwrap_or(0) > 0);
                }
            }

            prop_assert!(steps <= 64 + sizes.0 + 1, "duel did not terminate");
        }

        prop_assert!(matches!(duel.phase(), DuelPhase::Ended(_)));
    }

    /// Fixed coin outcomes give identical removals and scores.
    #[test]
    fn scripted_coins_are_deterministic(
        player in stats(),
        ai in stats(),
        flips in prop::collection::vec(any::<bool>(), 1..32),
    ) {
        let player = lineup(&player, 1);
        let ai = lineup(&ai, 100);
        let run = || {
            let coins = ScriptedCoins::new(9)
                .starting_side(flips.iter().copied().take(1))
                .ai_positions(flips.iter().copied())
                .tie_breaks(flips.iter().copied().rev());
            let mut duel = Duel::with_coins(&player, &ai, EventLog::new(), coins);
            duel.start().unwrap();
            let winner = play_out(&mut duel, &mut RandomChoice::new(3)).unwrap();
            (winner, duel.scores(), duel.into_sink().removed_cards())
        };

        prop_assert_eq!(run(), run());
    }

    /// Every duel ends, even one in which nobody can hurt anybody.
    #[test]
    fn exchange_limit_terminates(limit in 1u32..20, seed in any::<u64>()) {
        let zero = [(0, 0), (0, 0), (0, 0)];
        let player = lineup(&zero, 1);
        let mut duel = Duel::seeded(&player, &lineup(&zero, 100), EventLog::new(), seed)
            .with_config(DuelConfig::default().with_max_exchanges(limit));
        duel.start().unwrap();

        let mut last = None;
        while duel.is_active() {
            duel.set_selection(Selection::attack(player[0].clone())).unwrap();
            last = Some(duel.resolve_pending_exchange().unwrap());
        }

        prop_assert_eq!(duel.exchanges_resolved(), limit);
        prop_assert!(matches!(last, Some(Resolution::Ended { .. })), "last resolution was not Ended: {:?}", last);
    }
}
