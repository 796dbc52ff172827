use std::cell::RefCell;
use std::rc::Rc;

use models::{Card, CardId, Effect, LevelId, StatusKind};

use crate::{BattleOutcome, CardInstanceId, Delta, Side, StatsSnapshot};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardSummary {
    pub id: CardInstanceId,
    pub card_id: CardId,
    pub name: String,
    pub cost: u32,
}

impl CardSummary {
    pub fn new(id: CardInstanceId, card: &Card) -> Self {
        Self {
            id,
            card_id: card.id.clone(),
            name: card.name.clone(),
            cost: card.cost,
        }
    }
}

impl std::fmt::Display for CardSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Card<id={}, card={}, name={}, cost={}>",
            self.id, self.card_id, self.name, self.cost
        )
    }
}

/// State changes a presentation layer may want to react to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleEvent {
    BattleStarted { level: LevelId, enemy: String },
    TurnStarted { turn: u32, side: Side },
    CardsDrawn { count: usize, reshuffled: bool, shortfall: usize },
    CardPlayed { card: CardSummary, mana_left: u32 },
    Damaged { side: Side, absorbed: u32, lost: u32 },
    Healed { side: Side, amount: u32 },
    BlockGained { side: Side, amount: u32 },
    ManaGained { side: Side, amount: u32 },
    StatusApplied { side: Side, kind: StatusKind, magnitude: u32, duration: u32 },
    StatusExpired { side: Side, kind: StatusKind },
    EnemyActed { effect: Effect },
    BattleOver { outcome: BattleOutcome, stats: StatsSnapshot },
    Warning(String),
}

impl BattleEvent {
    /// The notification for an engine delta. Draw requests have none of
    /// their own, they surface as [`BattleEvent::CardsDrawn`] once resolved.
    pub fn from_delta(delta: &Delta) -> Option<Self> {
        let event = match *delta {
            Delta::Damaged {
                side,
                absorbed,
                lost,
            } => BattleEvent::Damaged {
                side,
                absorbed,
                lost,
            },
            Delta::Healed { side, amount } => BattleEvent::Healed { side, amount },
            Delta::BlockGained { side, amount } => BattleEvent::BlockGained { side, amount },
            Delta::ManaGained { side, amount } => BattleEvent::ManaGained { side, amount },
            Delta::StatusApplied {
                side,
                kind,
                magnitude,
                duration,
            } => BattleEvent::StatusApplied {
                side,
                kind,
                magnitude,
                duration,
            },
            Delta::StatusExpired { side, kind } => BattleEvent::StatusExpired { side, kind },
            Delta::Draw(..) => return None,
        };
        Some(event)
    }
}

pub trait BattleObserver {
    fn notify(&mut self, event: &BattleEvent);
}

impl BattleObserver for std::sync::mpsc::Sender<BattleEvent> {
    fn notify(&mut self, event: &BattleEvent) {
        // A dropped receiver only means nobody is listening anymore.
        let _ = self.send(event.clone());
    }
}

/// Shared in-memory event recorder. Clones observe the same log, so one can
/// be handed to the session while another is kept for inspection.
#[derive(Clone, Debug, Default)]
pub struct EventLog(Rc<RefCell<Vec<BattleEvent>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BattleEvent> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl BattleObserver for EventLog {
    fn notify(&mut self, event: &BattleEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}
