use std::path::PathBuf;

use battle::{autoplay, BattleReport, BattleSession, BattleTemplate};

pub static SEED: u64 = 0x3a3f7af8085da7a2;
pub static MAX_TURNS: u32 = 50;

pub fn read_battle(path: &PathBuf) -> Result<BattleTemplate, Box<dyn std::error::Error>> {
    let template = BattleTemplate::read(path)?;
    Ok(template)
}

pub fn run_battle(
    name: String,
    mut template: BattleTemplate,
) -> Result<BattleReport, Box<dyn std::error::Error>> {
    let name = name.replace('"', "");
    template.seed = Some(template.seed.unwrap_or(SEED));
    let session = BattleSession::try_from(template)?;
    let report = tracing::info_span!("battle", %name)
        .in_scope(|| autoplay::run_to_completion(session, MAX_TURNS))?;
    Ok(report)
}
