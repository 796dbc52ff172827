use std::sync::Arc;

use indexmap::IndexMap;
use models::{Card, CardId, Catalog};
use rand::Rng;

use crate::{BattleError, CardInstanceId, DeckSerial, DrawReport, IllegalAction, Piles};

/// The full card pool of one combatant for one battle plus the piles it is
/// spread over.
#[derive(Clone, Debug)]
pub struct Deck {
    serial: DeckSerial,
    cards: IndexMap<CardInstanceId, Arc<Card>>,
    piles: Piles,
}

impl Deck {
    pub fn build(
        card_ids: &[CardId],
        catalog: &dyn Catalog,
        max_deck_size: usize,
    ) -> Result<Self, BattleError> {
        if card_ids.is_empty() {
            return Err(BattleError::InvalidDeck("no cards equipped".to_string()));
        }
        if card_ids.len() > max_deck_size {
            return Err(BattleError::InvalidDeck(format!(
                "{} cards equipped, the limit is {max_deck_size}",
                card_ids.len()
            )));
        }
        let serial = DeckSerial::next();
        let mut cards: IndexMap<CardInstanceId, Arc<Card>> = IndexMap::new();
        for (slot, card_id) in card_ids.iter().enumerate() {
            let card = catalog
                .card_by_id(card_id)
                .ok_or_else(|| BattleError::card_not_found(card_id))?;
            let id = serial.card(slot);
            tracing::debug!(%id, card = %card_id, "register card");
            cards.insert(id, card);
        }
        let piles = Piles::new(cards.keys().copied());
        Ok(Self {
            serial,
            cards,
            piles,
        })
    }

    pub fn serial(&self) -> DeckSerial {
        self.serial
    }

    pub fn card(&self, id: CardInstanceId) -> Option<&Arc<Card>> {
        if !id.belongs_to(self.serial) {
            return None;
        }
        self.cards.get(&id)
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    pub fn hand(&self) -> Vec<(CardInstanceId, Arc<Card>)> {
        self.piles
            .hand()
            .iter()
            .filter_map(|id| self.cards.get(id).map(|card| (*id, Arc::clone(card))))
            .collect()
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.piles.shuffle_deck(rng);
    }

    pub fn draw<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> DrawReport {
        self.piles.draw(n, rng)
    }

    pub fn play(&mut self, id: CardInstanceId) -> Result<(), IllegalAction> {
        self.piles.play(id)
    }

    pub fn discard_hand(&mut self) -> usize {
        self.piles.discard_hand()
    }

    pub fn restore(&mut self, piles: Piles) {
        self.piles = piles;
    }

    pub fn verify(&self) -> Result<(), BattleError> {
        self.piles.verify(self.cards.keys())
    }
}
