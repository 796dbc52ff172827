use std::collections::{HashSet, VecDeque};

use rand::{seq::SliceRandom, Rng};

use crate::{BattleError, CardInstanceId, IllegalAction};

/// Fisher-Yates shuffle of a pile, driven by the injected random source.
pub fn shuffle_pile<R: Rng + ?Sized>(pile: &mut [CardInstanceId], rng: &mut R) {
    pile.shuffle(rng);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawReport {
    pub requested: usize,
    pub drawn: Vec<CardInstanceId>,
    pub reshuffled: bool,
}

impl DrawReport {
    pub fn shortfall(&self) -> usize {
        self.requested - self.drawn.len()
    }
}

/// Deck, hand and discard. The front of the deck is drawn first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Piles {
    deck: VecDeque<CardInstanceId>,
    hand: Vec<CardInstanceId>,
    discard: Vec<CardInstanceId>,
}

impl Piles {
    pub fn new(deck: impl IntoIterator<Item = CardInstanceId>) -> Self {
        Self {
            deck: deck.into_iter().collect(),
            hand: Vec::new(),
            discard: Vec::new(),
        }
    }

    pub fn deck(&self) -> &VecDeque<CardInstanceId> {
        &self.deck
    }

    pub fn hand(&self) -> &[CardInstanceId] {
        &self.hand
    }

    pub fn discard(&self) -> &[CardInstanceId] {
        &self.discard
    }

    pub fn total(&self) -> usize {
        self.deck.len() + self.hand.len() + self.discard.len()
    }

    pub fn in_hand(&self, id: CardInstanceId) -> bool {
        self.hand.contains(&id)
    }

    pub fn shuffle_deck<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        shuffle_pile(self.deck.make_contiguous(), rng);
    }

    /// Moves up to `n` cards from the deck into the hand. When the deck runs
    /// dry the discard pile is shuffled back under it, at most once per call.
    pub fn draw<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> DrawReport {
        let mut report = DrawReport {
            requested: n,
            ..Default::default()
        };
        while report.drawn.len() < n {
            if self.deck.is_empty() {
                if report.reshuffled || self.discard.is_empty() {
                    break;
                }
                shuffle_pile(&mut self.discard, rng);
                self.deck.extend(self.discard.drain(..));
                report.reshuffled = true;
            }
            let Some(id) = self.deck.pop_front() else {
                break;
            };
            self.hand.push(id);
            report.drawn.push(id);
        }
        report
    }

    /// Moves a played card from the hand to the discard pile.
    pub fn play(&mut self, id: CardInstanceId) -> Result<(), IllegalAction> {
        let Some(index) = self.hand.iter().position(|c| *c == id) else {
            return Err(IllegalAction::CardNotInHand(id));
        };
        let card = self.hand.remove(index);
        self.discard.push(card);
        Ok(())
    }

    pub fn discard_hand(&mut self) -> usize {
        let count = self.hand.len();
        self.discard.append(&mut self.hand);
        count
    }

    /// Checks that the piles hold exactly `pool` with no card in two places.
    pub fn verify<'a>(
        &self,
        pool: impl ExactSizeIterator<Item = &'a CardInstanceId>,
    ) -> Result<(), BattleError> {
        if pool.len() != self.total() {
            return Err(BattleError::Invariant(format!(
                "piles hold {} cards but the pool has {}",
                self.total(),
                pool.len()
            )));
        }
        let expected: HashSet<CardInstanceId> = pool.copied().collect();
        let mut seen: HashSet<CardInstanceId> = HashSet::with_capacity(expected.len());
        for id in self.deck.iter().chain(&self.hand).chain(&self.discard) {
            if !expected.contains(id) {
                return Err(BattleError::Invariant(format!("card {id} is not in the pool")));
            }
            if !seen.insert(*id) {
                return Err(BattleError::Invariant(format!("card {id} is in two piles")));
            }
        }
        Ok(())
    }
}
