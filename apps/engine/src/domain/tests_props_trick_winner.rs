//! Property-based tests for trick winner determination.

use proptest::prelude::*;

use crate::domain::cards_logic::led_color;
use crate::domain::{test_gens, test_prelude, trick_winner, CardFace, Trump};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: every complete trick has exactly one winner, and it is one of the players.
    #[test]
    fn prop_winner_is_a_player(
        trick in test_gens::complete_trick(),
        trump in test_gens::trump(),
    ) {
        let winner = trick_winner(&trick, trump);
        prop_assert!(winner.is_some());
        prop_assert!(trick.iter().any(|p| Some(p.seat) == winner));
    }

    /// Property: the first Wizard played always takes the trick.
    #[test]
    fn prop_first_wizard_wins(
        trick in test_gens::complete_trick(),
        trump in test_gens::trump(),
    ) {
        let first_wizard = trick.iter().find(|p| p.card.is_wizard()).map(|p| p.seat);
        if let Some(seat) = first_wizard {
            prop_assert_eq!(trick_winner(&trick, trump), Some(seat));
        }
    }

    /// Property: without Wizards, a winning number card is trump or the led color.
    #[test]
    fn prop_winning_number_is_trump_or_led(
        trick in test_gens::complete_trick(),
        trump in test_gens::trump(),
    ) {
        prop_assume!(!trick.iter().any(|p| p.card.is_wizard()));
        let winner = trick_winner(&trick, trump).unwrap();
        let card = trick.iter().find(|p| p.seat == winner).unwrap().card;
        match card.face {
            CardFace::Number { color, .. } => {
                let is_trump = trump == Trump::Color(color);
                let is_led = led_color(&trick) == Some(color);
                prop_assert!(is_trump || is_led, "winner {:?} neither trump nor led", card);
            }
            CardFace::Fool => {
                // Only possible when every card is a Fool; the first player wins.
                prop_assert!(trick.iter().all(|p| p.card.is_fool()));
                prop_assert_eq!(winner, trick[0].seat);
            }
            CardFace::Wizard => prop_assert!(false, "no wizards in this trick"),
        }
    }
}
