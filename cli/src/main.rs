use std::path::PathBuf;
use std::sync::mpsc;

use battle::{
    autoplay, BattleEvent, BattleSession, BattleTemplate, ProgressEvent, ProgressState,
    ProgressStore, TomlFileStore,
};
use clap::Parser;
use gamedata::CATALOG;
use models::{ItemId, LevelId};
use tracing_subscriber::EnvFilter;

/// Fights one battle with automatic play and prints what happened.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Battle template to run. Without one the deck comes from the saved
    /// progress.
    template: Option<PathBuf>,
    /// Level to fight when no template is given.
    #[arg(short, long, default_value_t = 1)]
    level: u32,
    /// Progress file to read and update with the result.
    #[arg(short, long)]
    save: Option<PathBuf>,
    /// Overrides the template seed.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 100)]
    max_turns: u32,
    /// Deletes the progress file first and starts a new game.
    #[arg(long)]
    reset: bool,
    /// Items to buy before the battle.
    #[arg(long = "buy-item", value_name = "ITEM")]
    buy_items: Vec<String>,
    /// Items to use before the battle.
    #[arg(long = "use-item", value_name = "ITEM")]
    use_items: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();
    tracing::info!(?args, "launch");

    let mut store = args.save.as_ref().map(TomlFileStore::new);
    if args.reset {
        if let Some(store) = store.as_mut() {
            store.clear_progress()?;
            println!("Progress in {} reset", store.path().display());
        }
    }
    let mut progress = match &store {
        Some(store) => store.load_progress()?.unwrap_or_default(),
        None => ProgressState::new_game(),
    };
    for item in &args.buy_items {
        progress.buy_item(&ItemId::from(item.as_str()), &*CATALOG)?;
        println!("Bought {item} ({} gold left)", progress.gold);
    }
    for item in &args.use_items {
        let event = progress.use_item(&ItemId::from(item.as_str()), &*CATALOG)?;
        println!("{}", describe_progress(&event));
    }

    let mut template = match &args.template {
        Some(path) => BattleTemplate::read(path)?,
        None => progress.battle_template(LevelId(args.level))?,
    };
    if args.seed.is_some() {
        template.seed = args.seed;
    }

    let (tx, rx) = mpsc::channel();
    let session = BattleSession::try_from(template)?.with_channel(tx);
    let report = autoplay::run_to_completion(session, args.max_turns)?;
    for event in rx.try_iter() {
        if let Some(line) = describe(&event) {
            println!("{line}");
        }
    }
    println!("{report}");

    if let Some(store) = store.as_mut() {
        let summary = progress.record_battle(&report, &*CATALOG);
        for event in &summary.events {
            println!("{}", describe_progress(event));
        }
        store.save_progress(&progress)?;
        println!("Progress saved to {}", store.path().display());
    }
    Ok(())
}

fn describe(event: &BattleEvent) -> Option<String> {
    let line = match event {
        BattleEvent::BattleStarted { level, enemy } => format!("Level {level}: {enemy} appears"),
        BattleEvent::TurnStarted { turn, side } => format!("[{turn}] {side} turn"),
        BattleEvent::CardsDrawn { count, reshuffled, .. } => match reshuffled {
            true => format!("  drew {count} (reshuffled)"),
            false => format!("  drew {count}"),
        },
        BattleEvent::CardPlayed { card, mana_left } => {
            format!("  played {} ({mana_left} mana left)", card.name)
        }
        BattleEvent::Damaged {
            side,
            absorbed,
            lost,
        } => format!("  {side} takes {lost} damage ({absorbed} blocked)"),
        BattleEvent::Healed { side, amount } => format!("  {side} heals {amount}"),
        BattleEvent::BlockGained { side, amount } => format!("  {side} gains {amount} block"),
        BattleEvent::ManaGained { side, amount } => format!("  {side} gains {amount} mana"),
        BattleEvent::StatusApplied {
            side,
            kind,
            magnitude,
            duration,
        } => {
            let unit = if *duration == 1 { "turn" } else { "turns" };
            format!("  {side} has {kind} {magnitude} for {duration} {unit}")
        }
        BattleEvent::StatusExpired { side, kind } => format!("  {side} loses {kind}"),
        BattleEvent::EnemyActed { effect } => format!("  enemy: {effect}"),
        BattleEvent::BattleOver { .. } => return None,
        BattleEvent::Warning(message) => format!("  warning: {message}"),
    };
    Some(line)
}

fn describe_progress(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::LevelUp { level } => format!("Level up! Now level {level}"),
        ProgressEvent::LevelUnlocked(id) => format!("Unlocked level {id}"),
        ProgressEvent::CardUnlocked(card) => format!("New card: {card}"),
        ProgressEvent::ItemUsed { item, kind, amount } => format!("Used {item}: {kind} +{amount}"),
    }
}
