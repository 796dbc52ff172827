mod aux;

use aux::SEED;
use battle::{
    autoplay, BattleOutcome, BattleReport, BattleSession, MemoryStore, ProgressError,
    ProgressEvent, ProgressState, ProgressStore, StatsSnapshot,
};
use gamedata::CATALOG;
use models::{CardId, ItemId, ItemKind, LevelId, Rewards};
use rstest::rstest;

fn report(outcome: BattleOutcome, level: u32, rewards: Option<Rewards>) -> BattleReport {
    BattleReport {
        outcome,
        level: LevelId(level),
        stats: StatsSnapshot {
            damage_dealt: 30,
            healing: 4,
            cards_played: 6,
            turn_count: 3,
            damage_taken: 12,
        },
        rewards,
        player_health: 88,
    }
}

fn level_rewards(level: u32) -> Option<Rewards> {
    CATALOG.levels().get(level as usize - 1).map(|l| l.rewards.clone())
}

#[test]
fn test_new_game() {
    let state = ProgressState::new_game();
    assert_eq!(state.unlocked_levels, vec![LevelId(1)]);
    assert_eq!(state.equipped_cards, state.owned_cards);
    assert_eq!(state.equipped_cards.len(), 4);
    assert_eq!((state.level, state.experience, state.gold), (1, 0, 0));
    assert_eq!((state.max_health, state.max_mana), (100, 3));
    assert_eq!(state.health, 100);
    assert!(state.items.is_empty());
}

#[test]
fn test_victory_grants_rewards_and_unlocks() {
    let mut state = ProgressState::new_game();
    let summary = state.record_battle(
        &report(BattleOutcome::Victory, 1, level_rewards(1)),
        &*CATALOG,
    );

    assert_eq!(summary.gold, 20);
    assert_eq!(summary.experience, 50);
    assert_eq!(summary.leveled_up_to, None);
    assert_eq!(
        summary.events,
        vec![
            ProgressEvent::LevelUnlocked(LevelId(2)),
            ProgressEvent::CardUnlocked(CardId::from("heavy_blow")),
        ]
    );
    assert_eq!(state.gold, 20);
    assert!(state.is_unlocked(LevelId(2)));
    assert!(state.owns(&CardId::from("heavy_blow")));
    assert!(!state.is_equipped(&CardId::from("heavy_blow")));
    assert_eq!(state.stats.total_battles_won, 1);
    assert_eq!(state.stats.total_gold_earned, 20);
    assert_eq!(state.stats.total_damage_dealt, 30);
    assert_eq!(state.stats.total_cards_played, 6);

    let again = state.record_battle(
        &report(BattleOutcome::Victory, 1, level_rewards(1)),
        &*CATALOG,
    );
    assert!(again.events.is_empty());
    assert_eq!(state.unlocked_levels.len(), 2);
}

#[test]
fn test_experience_carries_over_several_level_ups() {
    let mut state = ProgressState::new_game();
    let summary = state.record_battle(
        &report(BattleOutcome::Victory, 4, level_rewards(4)),
        &*CATALOG,
    );

    assert_eq!(summary.leveled_up_to, Some(3));
    assert_eq!(state.level, 3);
    assert_eq!(state.experience, 0);
    assert_eq!(state.max_health, 120);
    assert_eq!(state.max_mana, 5);
    assert!(summary
        .events
        .iter()
        .all(|e| !matches!(e, ProgressEvent::LevelUnlocked(..))));
    assert_eq!(state.player_template().health, 120);
}

#[test]
fn test_defeat_only_counts_stats() {
    let mut state = ProgressState::new_game();
    let summary = state.record_battle(&report(BattleOutcome::Defeat, 1, None), &*CATALOG);
    assert_eq!(summary, Default::default());
    assert_eq!(state.gold, 0);
    assert_eq!(state.stats.total_battles_won, 0);
    assert_eq!(state.stats.total_damage_taken, 12);
    assert_eq!(state.stats.total_healing, 4);
}

#[test]
fn test_health_carries_over_wins_and_resets_after_losses() {
    let mut state = ProgressState::new_game();
    state.record_battle(&report(BattleOutcome::Victory, 1, level_rewards(1)), &*CATALOG);
    assert_eq!(state.health, 88);
    assert_eq!(state.player_template().current_health, Some(88));

    state.record_battle(&report(BattleOutcome::Defeat, 2, None), &*CATALOG);
    assert_eq!(state.health, state.max_health);
}

#[test]
fn test_buying_items_stacks_counts() {
    let mut state = ProgressState::new_game();
    let potion = ItemId::from("potion");

    assert_eq!(
        state.buy_item(&ItemId::from("no_such_item"), &*CATALOG),
        Err(ProgressError::ItemNotFound(ItemId::from("no_such_item")))
    );
    assert_eq!(
        state.buy_item(&potion, &*CATALOG),
        Err(ProgressError::NotEnoughGold {
            required: 25,
            available: 0
        })
    );
    assert_eq!(state.item_count(&potion), 0);

    state.gold = 60;
    state.buy_item(&potion, &*CATALOG).unwrap();
    state.buy_item(&potion, &*CATALOG).unwrap();
    assert_eq!(state.gold, 10);
    assert_eq!(state.item_count(&potion), 2);
    assert!(matches!(
        state.buy_item(&potion, &*CATALOG),
        Err(ProgressError::NotEnoughGold { available: 10, .. })
    ));
}

#[rstest]
#[case::potion("potion", ItemKind::Heal, 30, (70, 100, 3))]
#[case::elixir_caps_at_max("elixir", ItemKind::Heal, 60, (100, 100, 3))]
#[case::heart_crystal("heart_crystal", ItemKind::MaxHealthUp, 10, (50, 110, 3))]
#[case::mana_crystal("mana_crystal", ItemKind::MaxManaUp, 1, (40, 100, 4))]
fn test_using_items(
    #[case] item: &str,
    #[case] kind: ItemKind,
    #[case] amount: u32,
    #[case] expected: (u32, u32, u32),
) {
    let mut state = ProgressState::new_game();
    let item = ItemId::from(item);
    state.health = 40;
    state.items.insert(item.clone(), 1);

    let event = state.use_item(&item, &*CATALOG).unwrap();
    assert_eq!(
        event,
        ProgressEvent::ItemUsed {
            item: item.clone(),
            kind,
            amount
        }
    );
    assert_eq!((state.health, state.max_health, state.max_mana), expected);
    assert_eq!(state.item_count(&item), 0);
    assert!(!state.items.contains_key(&item));
    assert_eq!(
        state.use_item(&item, &*CATALOG),
        Err(ProgressError::ItemNotOwned(item))
    );
}

#[test]
fn test_using_unknown_or_missing_items_changes_nothing() {
    let mut state = ProgressState::new_game();
    state.health = 40;
    assert_eq!(
        state.use_item(&ItemId::from("no_such_item"), &*CATALOG),
        Err(ProgressError::ItemNotFound(ItemId::from("no_such_item")))
    );
    state.items.insert(ItemId::from("potion"), 0);
    assert_eq!(
        state.use_item(&ItemId::from("potion"), &*CATALOG),
        Err(ProgressError::ItemNotOwned(ItemId::from("potion")))
    );
    assert_eq!(state.health, 40);
}

#[test]
fn test_wounds_follow_the_player_into_battle() -> Result<(), Box<dyn std::error::Error>> {
    let mut state = ProgressState::new_game();
    state.health = 25;
    state.items.insert(ItemId::from("potion"), 1);
    state.use_item(&ItemId::from("potion"), &*CATALOG)?;

    let session = BattleSession::try_from(state.battle_template(LevelId(1))?)?;
    assert_eq!(session.player().health.current(), 55);
    assert_eq!(session.player().health.max(), 100);
    Ok(())
}

#[test]
fn test_reset_clears_the_save() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = MemoryStore::new();
    let mut state = ProgressState::new_game();
    state.gold = 500;
    state.items.insert(ItemId::from("potion"), 3);
    store.save_progress(&state)?;

    store.clear_progress()?;
    let fresh = store.load_progress()?.unwrap_or_default();
    assert_eq!(fresh, ProgressState::new_game());
    Ok(())
}

#[test]
fn test_unknown_reward_cards_are_skipped() {
    let mut state = ProgressState::new_game();
    let rewards = Rewards {
        gold: 5,
        experience: 0,
        cards: vec![CardId::from("no_such_card"), CardId::from("inferno")],
    };
    let summary = state.record_battle(&report(BattleOutcome::Victory, 1, Some(rewards)), &*CATALOG);
    assert!(!state.owns(&CardId::from("no_such_card")));
    assert!(state.owns(&CardId::from("inferno")));
    assert_eq!(summary.gold, 5);
}

#[test]
fn test_shop_and_deck_editing() {
    let mut state = ProgressState::new_game();
    let heavy_blow = CardId::from("heavy_blow");

    assert_eq!(
        state.buy_card(&CardId::from("no_such_card"), &*CATALOG),
        Err(ProgressError::CardNotFound(CardId::from("no_such_card")))
    );
    assert!(matches!(
        state.buy_card(&heavy_blow, &*CATALOG),
        Err(ProgressError::NotEnoughGold { available: 0, .. })
    ));
    assert_eq!(
        state.equip_card(&heavy_blow),
        Err(ProgressError::NotOwned(heavy_blow.clone()))
    );

    state.gold = 1000;
    state.buy_card(&heavy_blow, &*CATALOG).unwrap();
    assert!(state.gold < 1000);
    assert_eq!(
        state.buy_card(&heavy_blow, &*CATALOG),
        Err(ProgressError::AlreadyOwned(heavy_blow.clone()))
    );

    state.equip_card(&heavy_blow).unwrap();
    assert_eq!(
        state.equip_card(&heavy_blow),
        Err(ProgressError::AlreadyEquipped(heavy_blow.clone()))
    );
    state.unequip_card(&heavy_blow).unwrap();
    assert_eq!(
        state.unequip_card(&heavy_blow),
        Err(ProgressError::NotEquipped(heavy_blow.clone()))
    );
}

#[test]
fn test_equipping_stops_at_the_deck_limit() {
    let mut state = ProgressState::new_game();
    let extra: Vec<CardId> = (0..17).map(|i| CardId(format!("extra_{i}"))).collect();
    state.owned_cards.extend(extra.iter().cloned());
    for card in &extra[..16] {
        state.equip_card(card).unwrap();
    }
    assert_eq!(state.equipped_cards.len(), 20);
    assert_eq!(state.equip_card(&extra[16]), Err(ProgressError::DeckFull(20)));
}

#[test]
fn test_locked_levels_cannot_be_fought() {
    let state = ProgressState::new_game();
    assert!(state.battle_template(LevelId(1)).is_ok());
    assert_eq!(
        state.battle_template(LevelId(2)).err(),
        Some(ProgressError::LevelLocked(LevelId(2)))
    );
}

#[test]
fn test_battle_to_store_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = MemoryStore::new();
    let mut state = store.load_progress()?.unwrap_or_default();

    let mut template = state.battle_template(LevelId(1))?;
    template.seed = Some(SEED);
    let session = BattleSession::try_from(template)?;
    let report = autoplay::run_to_completion(session, 50)?;
    assert_eq!(report.outcome, BattleOutcome::Victory);

    state.record_battle(&report, &*CATALOG);
    store.save_progress(&state)?;

    let loaded = store.load_progress()?.unwrap();
    assert!(loaded.is_unlocked(LevelId(2)));
    assert_eq!(loaded.stats.total_battles_won, 1);
    assert!(loaded.stats.total_damage_dealt >= 30);
    Ok(())
}
