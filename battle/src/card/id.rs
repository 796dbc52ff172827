use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_DECK: AtomicU32 = AtomicU32::new(1);

/// Tags every card instance minted for one deck. Serials are never reused
/// within a process, so ids from two decks cannot collide.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeckSerial(u32);

impl DeckSerial {
    pub fn next() -> Self {
        Self(NEXT_DECK.fetch_add(1, Ordering::Relaxed))
    }

    /// Id of the copy sitting at `slot` of the equipped card list.
    pub fn card(self, slot: usize) -> CardInstanceId {
        CardInstanceId {
            deck: self,
            slot: slot as u32,
        }
    }
}

impl std::fmt::Display for DeckSerial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "deck{}", self.0)
    }
}

/// One physical copy of a card in a battle: the deck it belongs to and its
/// position in that deck's equipped list. Two copies of the same definition
/// sit at different slots. Ordering is by deck, then slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardInstanceId {
    deck: DeckSerial,
    slot: u32,
}

impl CardInstanceId {
    pub fn deck(&self) -> DeckSerial {
        self.deck
    }

    pub fn slot(&self) -> usize {
        self.slot as usize
    }

    pub fn belongs_to(&self, deck: DeckSerial) -> bool {
        self.deck == deck
    }
}

impl std::fmt::Display for CardInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.deck, self.slot)
    }
}
