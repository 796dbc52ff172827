use std::sync::Arc;

use models::{Card, Catalog, Effect, EnemyStats, LevelId, Rewards};
use rand::{rngs::StdRng, SeedableRng};
use tracing::Level;

use crate::{
    apply_card_effects, tick_status_effects, BattleError, BattleEvent, BattleObserver,
    BattleOutcome, BattleReport, BattleRules, BattleStats, BattleTemplate, BlockDecay,
    CardInstanceId, CardSummary, Combatant, Deck, Delta, DrawReport, IllegalAction,
    PlayerTemplate, Side, TurnPhase,
};

/// One live battle between the player and the enemy of a level.
///
/// The session is driven by two inputs, [`BattleSession::play_card`] and
/// [`BattleSession::end_turn`]. Everything between the end of the player's
/// turn and the start of the next one (enemy turn included) runs
/// synchronously inside `end_turn`.
pub struct BattleSession {
    level: LevelId,
    rewards: Rewards,
    enemy_stats: EnemyStats,
    rules: BattleRules,
    turn: u32,
    phase: TurnPhase,
    player: Combatant,
    enemy: Combatant,
    deck: Deck,
    stats: BattleStats,
    enemy_turns_taken: usize,
    rng: StdRng,
    observers: Vec<Box<dyn BattleObserver>>,
}

impl TryFrom<BattleTemplate> for BattleSession {
    type Error = BattleError;

    fn try_from(template: BattleTemplate) -> Result<Self, Self::Error> {
        Self::from_template(template, &*gamedata::CATALOG)
    }
}

impl BattleSession {
    pub fn new(
        player: &PlayerTemplate,
        level_id: LevelId,
        catalog: &dyn Catalog,
        rules: BattleRules,
        mut rng: StdRng,
    ) -> Result<Self, BattleError> {
        let level = catalog
            .level_by_id(level_id)
            .ok_or_else(|| BattleError::level_not_found(level_id))?;
        let mut deck = Deck::build(&player.cards, catalog, rules.max_deck_size)?;
        deck.shuffle(&mut rng);
        tracing::event!(
            name: "battle created",
            Level::INFO,
            level = %level_id,
            enemy = %level.enemy.name,
            deck = deck.size(),
        );
        Ok(Self {
            level: level_id,
            rewards: level.rewards.clone(),
            enemy_stats: level.enemy.clone(),
            rules,
            turn: 1,
            phase: TurnPhase::PlayerTurnStart,
            player: Combatant::player(player),
            enemy: Combatant::enemy(&level.enemy),
            deck,
            stats: BattleStats::default(),
            enemy_turns_taken: 0,
            rng,
            observers: Vec::new(),
        })
    }

    pub fn from_template(
        template: BattleTemplate,
        catalog: &dyn Catalog,
    ) -> Result<Self, BattleError> {
        let rng = match template.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => Self::create_rng(),
        };
        Self::new(
            &template.player,
            template.level,
            catalog,
            template.rules,
            rng,
        )
    }

    pub fn create_rng() -> StdRng {
        StdRng::from_rng(&mut rand::rng())
    }

    pub fn with_observer(mut self, observer: impl BattleObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn with_channel(self, sender: std::sync::mpsc::Sender<BattleEvent>) -> Self {
        self.with_observer(sender)
    }

    /// Runs the first player turn start: mana refill, status tick and the
    /// opening draw.
    #[tracing::instrument(level = "debug", skip(self), fields(level = %self.level))]
    pub fn start(&mut self) -> Result<(), BattleError> {
        self.ensure_live()?;
        if self.phase != TurnPhase::PlayerTurnStart {
            return Err(IllegalAction::OutOfPhase(self.phase).into());
        }
        self.emit(BattleEvent::BattleStarted {
            level: self.level,
            enemy: self.enemy.name.clone(),
        });
        let result = self.begin_player_turn();
        self.guard(result)
    }

    /// Plays a card from the hand. Rejected plays leave the session
    /// untouched; a play whose resolution fails is rolled back.
    ///
    /// A lethal play ends the battle on the spot, without waiting for
    /// [`BattleSession::end_turn`].
    #[tracing::instrument(level = "debug", skip(self), fields(turn = self.turn))]
    pub fn play_card(&mut self, id: CardInstanceId) -> Result<(), BattleError> {
        self.ensure_live()?;
        if self.phase != TurnPhase::PlayerActing {
            return Err(IllegalAction::OutOfPhase(self.phase).into());
        }
        if !self.deck.piles().in_hand(id) {
            return Err(IllegalAction::CardNotInHand(id).into());
        }
        let Some(card) = self.deck.card(id).cloned() else {
            let error = BattleError::Invariant(format!("card {id} is in hand but not in the pool"));
            return self.guard(Err(error));
        };
        let available = self.player.mana.current();
        if !card.is_affordable(available) {
            return Err(IllegalAction::InsufficientMana {
                required: card.cost,
                available,
            }
            .into());
        }

        let result = self.resolve_card(id, &card);
        let (deltas, draws) = self.guard(result)?;

        tracing::event!(
            name: "card played",
            Level::INFO,
            card = %card.id,
            mana_left = self.player.mana.current(),
        );
        self.stats.record_card_played();
        self.emit(BattleEvent::CardPlayed {
            card: CardSummary::new(id, &card),
            mana_left: self.player.mana.current(),
        });
        self.publish(&deltas);
        for report in &draws {
            self.publish_draw(report);
        }
        self.settle(Side::Player);
        Ok(())
    }

    /// Ends the player's turn and runs the enemy's turn. Unless the battle
    /// ends along the way, control is back with the player when this
    /// returns.
    #[tracing::instrument(level = "debug", skip(self), fields(turn = self.turn))]
    pub fn end_turn(&mut self) -> Result<(), BattleError> {
        self.ensure_live()?;
        if self.phase != TurnPhase::PlayerActing {
            return Err(IllegalAction::OutOfPhase(self.phase).into());
        }
        let result = self.run_enemy_round();
        self.guard(result)
    }

    /// Gives up the battle. The result is a defeat without rewards unless the
    /// battle was already decided.
    pub fn surrender(self) -> BattleReport {
        if let Some(report) = self.report() {
            return report;
        }
        tracing::event!(name: "surrender", Level::INFO, level = %self.level, turn = self.turn);
        BattleReport {
            outcome: BattleOutcome::Defeat,
            level: self.level,
            stats: self.stats.snapshot(self.turn),
            rewards: None,
            player_health: self.player.health.current(),
        }
    }

    pub fn report(&self) -> Option<BattleReport> {
        let TurnPhase::BattleOver(outcome) = self.phase else {
            return None;
        };
        let rewards = match outcome {
            BattleOutcome::Victory => Some(self.rewards.clone()),
            BattleOutcome::Defeat => None,
        };
        Some(BattleReport {
            outcome,
            level: self.level,
            stats: self.stats.snapshot(self.turn),
            rewards,
            player_health: self.player.health.current(),
        })
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_player_turn(&self) -> bool {
        self.phase.side() == Some(Side::Player)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, TurnPhase::BattleOver(..))
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            TurnPhase::BattleOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn hand(&self) -> Vec<(CardInstanceId, Arc<Card>)> {
        self.deck.hand()
    }

    pub fn stats(&self) -> &BattleStats {
        &self.stats
    }

    pub fn level(&self) -> LevelId {
        self.level
    }

    pub fn rules(&self) -> &BattleRules {
        &self.rules
    }

    fn ensure_live(&self) -> Result<(), BattleError> {
        match self.phase {
            TurnPhase::Aborted => Err(BattleError::Aborted),
            TurnPhase::BattleOver(..) => Err(IllegalAction::BattleOver.into()),
            _ => Ok(()),
        }
    }

    /// An invariant violation leaves the session unusable.
    fn guard<T>(&mut self, result: Result<T, BattleError>) -> Result<T, BattleError> {
        if let Err(BattleError::Invariant(reason)) = &result {
            tracing::error!(%reason, turn = self.turn, "aborting battle");
            self.phase = TurnPhase::Aborted;
        }
        result
    }

    fn resolve_card(
        &mut self,
        id: CardInstanceId,
        card: &Card,
    ) -> Result<(Vec<Delta>, Vec<DrawReport>), BattleError> {
        let player = self.player.clone();
        let enemy = self.enemy.clone();
        let piles = self.deck.piles().clone();
        self.try_resolve_card(id, card).inspect_err(|error| {
            tracing::warn!(%error, card = %card.id, "rolling back card resolution");
            self.player = player;
            self.enemy = enemy;
            self.deck.restore(piles);
        })
    }

    fn try_resolve_card(
        &mut self,
        id: CardInstanceId,
        card: &Card,
    ) -> Result<(Vec<Delta>, Vec<DrawReport>), BattleError> {
        self.player.mana -= card.cost;
        let deltas = apply_card_effects(&card.effects, &mut self.player, &mut self.enemy, self.turn)?;
        let mut draws = Vec::new();
        for delta in &deltas {
            if let Delta::Draw(n) = delta {
                draws.push(self.deck.draw(*n as usize, &mut self.rng));
            }
        }
        self.deck.play(id)?;
        self.deck.verify()?;
        Ok((deltas, draws))
    }

    fn run_enemy_round(&mut self) -> Result<(), BattleError> {
        self.phase = TurnPhase::PlayerTurnEnd;
        let discarded = self.deck.discard_hand();
        tracing::debug!(discarded, "hand discarded");
        self.deck.verify()?;
        if self.settle(Side::Player) {
            return Ok(());
        }

        self.phase = TurnPhase::EnemyTurnStart;
        self.emit(BattleEvent::TurnStarted {
            turn: self.turn,
            side: Side::Enemy,
        });
        if self.rules.block == BlockDecay::Reset {
            self.enemy.block = 0;
        }
        let deltas = tick_status_effects(&mut self.enemy, self.turn);
        self.publish(&deltas);
        self.enemy.check_invariants()?;
        if self.settle(Side::Enemy) {
            return Ok(());
        }

        self.phase = TurnPhase::EnemyActing;
        let action = self.enemy_stats.action_for_turn(self.enemy_turns_taken);
        self.enemy_turns_taken += 1;
        tracing::event!(name: "enemy action", Level::INFO, enemy = %self.enemy.name, %action);
        self.emit(BattleEvent::EnemyActed {
            effect: action.clone(),
        });
        if let Effect::Draw(..) = action {
            let message = format!("{} cannot draw cards, skipping \"{action}\"", self.enemy.name);
            tracing::warn!("{message}");
            self.emit(BattleEvent::Warning(message));
        } else {
            let deltas = apply_card_effects(
                std::slice::from_ref(&action),
                &mut self.enemy,
                &mut self.player,
                self.turn,
            )?;
            self.publish(&deltas);
        }
        if self.settle(Side::Enemy) {
            return Ok(());
        }

        self.phase = TurnPhase::EnemyTurnEnd;
        self.turn += 1;
        self.begin_player_turn()
    }

    fn begin_player_turn(&mut self) -> Result<(), BattleError> {
        self.phase = TurnPhase::PlayerTurnStart;
        self.emit(BattleEvent::TurnStarted {
            turn: self.turn,
            side: Side::Player,
        });
        self.player.mana.refill();
        if self.rules.block == BlockDecay::Reset {
            self.player.block = 0;
        }
        let deltas = tick_status_effects(&mut self.player, self.turn);
        self.publish(&deltas);
        self.player.check_invariants()?;
        if self.settle(Side::Player) {
            return Ok(());
        }

        let space = self
            .rules
            .hand_size
            .saturating_sub(self.deck.piles().hand().len());
        let report = self.deck.draw(space, &mut self.rng);
        self.publish_draw(&report);
        self.deck.verify()?;
        self.phase = TurnPhase::PlayerActing;
        Ok(())
    }

    /// Checks for a decided battle after `actor` did something. The other
    /// combatant is looked at first, so a move that drops both sides to zero
    /// goes to whoever made it.
    fn detect_outcome(&self, actor: Side) -> Option<BattleOutcome> {
        [actor.other(), actor]
            .into_iter()
            .find(|side| self.combatant(*side).is_defeated())
            .map(|side| match side {
                Side::Enemy => BattleOutcome::Victory,
                Side::Player => BattleOutcome::Defeat,
            })
    }

    fn settle(&mut self, actor: Side) -> bool {
        match self.detect_outcome(actor) {
            Some(outcome) => {
                self.finish(outcome);
                true
            }
            None => false,
        }
    }

    fn finish(&mut self, outcome: BattleOutcome) {
        if self.phase.side() == Some(Side::Player) {
            self.deck.discard_hand();
        }
        self.phase = TurnPhase::BattleOver(outcome);
        let stats = self.stats.snapshot(self.turn);
        tracing::event!(
            name: "battle over",
            Level::INFO,
            %outcome,
            turn = self.turn,
            player = %self.player,
            enemy = %self.enemy,
        );
        self.emit(BattleEvent::BattleOver { outcome, stats });
    }

    fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    fn record(&mut self, delta: &Delta) {
        match *delta {
            Delta::Damaged {
                side: Side::Enemy,
                lost,
                ..
            } => self.stats.record_damage(lost),
            Delta::Damaged {
                side: Side::Player,
                lost,
                ..
            } => self.stats.record_damage_taken(lost),
            Delta::Healed {
                side: Side::Player,
                amount,
            } => self.stats.record_healing(amount),
            _ => {}
        }
    }

    fn publish(&mut self, deltas: &[Delta]) {
        for delta in deltas {
            self.record(delta);
            if let Some(event) = BattleEvent::from_delta(delta) {
                self.emit(event);
            }
        }
    }

    fn publish_draw(&mut self, report: &DrawReport) {
        let shortfall = report.shortfall();
        if shortfall > 0 {
            let message = format!(
                "drew {} of {} requested cards",
                report.drawn.len(),
                report.requested
            );
            tracing::warn!("{message}");
            self.emit(BattleEvent::Warning(message));
        }
        self.emit(BattleEvent::CardsDrawn {
            count: report.drawn.len(),
            reshuffled: report.reshuffled,
            shortfall,
        });
    }

    fn emit(&mut self, event: BattleEvent) {
        tracing::trace!(?event, "dispatch");
        for observer in self.observers.iter_mut() {
            observer.notify(&event);
        }
    }
}

impl std::fmt::Debug for BattleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleSession")
            .field("level", &self.level)
            .field("turn", &self.turn)
            .field("phase", &self.phase)
            .field("player", &self.player)
            .field("enemy", &self.enemy)
            .field("deck", &self.deck)
            .field("stats", &self.stats)
            .field("observers", &self.observers.len())
            .finish()
    }
}
