use crate::cards::{Card, DealtCard, Rank, Suit};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Size of a full deck.
pub const DECK_SIZE: usize = 52;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("the deck is empty")]
    Empty,
}

/// A standard 52-card deck. The top of the deck is the end of the vector.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// An ordered, unshuffled deck.
    ///
    /// ```
    /// use holdem_engine::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.remaining(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut deck = Self { cards: Vec::with_capacity(DECK_SIZE) };
        deck.reset();
        deck
    }

    /// Rebuild the ordered 52-card set, discarding whatever was left.
    pub fn reset(&mut self) {
        self.cards.clear();
        for &s in &Suit::ALL {
            for &r in &Rank::ALL {
                self.cards.push(Card::new(r, s));
            }
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Fisher-Yates: walk from the last index down, swapping each slot with a
    /// uniformly chosen slot at or below it.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.random_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffle_with(&mut rng);
    }

    /// Remove and return the top card.
    pub fn draw_card(&mut self, face_up: bool) -> Result<DealtCard, DeckError> {
        self.cards.pop().map(|c| DealtCard::new(c, face_up)).ok_or(DeckError::Empty)
    }

    /// Draw up to `n` cards; returns fewer when the deck runs out.
    pub fn draw_cards(&mut self, n: usize, face_up: bool) -> Vec<DealtCard> {
        (0..n).map_while(|_| self.draw_card(face_up).ok()).collect()
    }

    /// Discard the top card face down.
    pub fn burn(&mut self) -> Result<(), DeckError> {
        self.draw_card(false).map(|_| ())
    }

    #[cfg(test)]
    pub(crate) fn as_slice(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}
