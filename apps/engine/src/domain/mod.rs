//! Domain layer: pure game logic types and helpers.

pub mod bidding;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod player_view;
pub mod roster;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_trick_winner;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use cards_logic::{is_card_allowed, legal_cards, sort_hand, trick_winner};
pub use cards_parsing::CardDescriptor;
pub use cards_types::{Card, CardFace, CardId, Color, Rank, Trump};
pub use dealing::{deal_hands, full_deck};
pub use roster::{Player, Roster};
pub use rules::{deck_size, suit_count_for};
pub use scoring::InactiveScoring;
pub use seed_derivation::derive_dealing_seed;
pub use state::{Phase, Seat, TablePlay};
