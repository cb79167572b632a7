// ═══════════════════════════════════════════════════════════════════════
// Card supply — draw pile / discard pile / hand
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::{card_id_from_key, DEFAULT_DECK, FALLBACK_CARD};
use crate::types::{BattleState, CardId, CardInstance};
use rand::seq::SliceRandom;

/// Build physical card instances from content keys. Unknown keys fall
/// back to the default card so deck construction never fails; an empty
/// list yields the default deck. Every copy gets its own uid.
pub fn instantiate_deck(keys: &[&str], next_uid: &mut u32) -> Vec<CardInstance> {
    let ids: Vec<CardId> = if keys.is_empty() {
        DEFAULT_DECK.to_vec()
    } else {
        keys.iter()
            .map(|key| card_id_from_key(key).unwrap_or(FALLBACK_CARD))
            .collect()
    };

    ids.into_iter()
        .map(|card| {
            *next_uid += 1;
            CardInstance { uid: *next_uid, card }
        })
        .collect()
}

/// Draw one card. An empty draw pile reshuffles the discard pile back
/// in first; if both piles are empty the draw simply stops.
pub fn draw_one(state: &mut BattleState) -> Option<CardInstance> {
    if state.draw_pile.is_empty() && !state.discard_pile.is_empty() {
        let mut rng = state.derive_rng();
        state.draw_pile = std::mem::take(&mut state.discard_pile);
        state.draw_pile.shuffle(&mut rng);
    }
    state.draw_pile.pop()
}

/// Top the hand back up; the hand may come up short when the supply is
/// exhausted.
pub fn draw_to_hand_size(state: &mut BattleState, target: usize) {
    while state.hand.len() < target {
        match draw_one(state) {
            Some(card) => state.hand.push(card),
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Phase, HAND_SIZE};

    fn empty_state() -> BattleState {
        BattleState {
            players: Vec::new(),
            enemies: Vec::new(),
            hand: Vec::new(),
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
            phase: Phase::PlayerThinking,
            actions_taken: 0,
            log: String::new(),
            seed: 7,
            rng_counter: 0,
            next_uid: 0,
        }
    }

    #[test]
    fn copies_of_one_card_get_distinct_uids() {
        let mut next_uid = 0;
        let deck = instantiate_deck(&["strike", "strike", "strike"], &mut next_uid);
        assert_eq!(deck.len(), 3);
        assert!(deck.iter().all(|c| c.card == CardId::Strike));
        let mut uids: Vec<u32> = deck.iter().map(|c| c.uid).collect();
        uids.dedup();
        assert_eq!(uids.len(), 3);
    }

    #[test]
    fn unknown_keys_fall_back_instead_of_failing() {
        let mut next_uid = 0;
        let deck = instantiate_deck(&["no_such_card", "guard"], &mut next_uid);
        assert_eq!(deck[0].card, FALLBACK_CARD);
        assert_eq!(deck[1].card, CardId::Guard);
    }

    #[test]
    fn empty_key_list_yields_the_default_deck() {
        let mut next_uid = 0;
        let deck = instantiate_deck(&[], &mut next_uid);
        assert_eq!(deck.len(), DEFAULT_DECK.len());
    }

    #[test]
    fn empty_draw_pile_reshuffles_the_discard() {
        let mut state = empty_state();
        state.discard_pile = vec![
            CardInstance { uid: 1, card: CardId::Strike },
            CardInstance { uid: 2, card: CardId::Guard },
            CardInstance { uid: 3, card: CardId::Salve },
        ];
        let drawn = draw_one(&mut state).expect("reshuffle should provide a card");
        assert!(state.discard_pile.is_empty());
        assert_eq!(state.draw_pile.len() + 1 + state.hand.len(), 3);
        assert!([1, 2, 3].contains(&drawn.uid));
    }

    #[test]
    fn exhausted_supply_leaves_a_short_hand() {
        let mut state = empty_state();
        state.draw_pile = vec![
            CardInstance { uid: 1, card: CardId::Strike },
            CardInstance { uid: 2, card: CardId::Guard },
        ];
        draw_to_hand_size(&mut state, HAND_SIZE);
        assert_eq!(state.hand.len(), 2);
        assert!(state.draw_pile.is_empty());
    }
}
