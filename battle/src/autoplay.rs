use anyhow::Context;

use crate::{BattleReport, BattleSession, TurnPhase};

/// Upper bound on plays in one automatic turn. Zero-cost draw cards could
/// otherwise cycle forever.
const MAX_PLAYS_PER_TURN: usize = 64;

/// Plays the first affordable card in hand until none is left, then ends
/// the turn. Returns the number of cards played. A rejected or rolled back
/// play ends the turn early; only an aborted battle is an error.
pub fn play_greedy_turn(session: &mut BattleSession) -> anyhow::Result<usize> {
    let mut played = 0;
    while played < MAX_PLAYS_PER_TURN && session.phase() == TurnPhase::PlayerActing {
        let mana = session.player().mana.current();
        let Some((id, card)) = session
            .hand()
            .into_iter()
            .find(|(_, card)| card.is_affordable(mana))
        else {
            break;
        };
        match session.play_card(id) {
            Ok(()) => played += 1,
            Err(error) if !error.is_fatal() => {
                tracing::warn!(%error, card = %card.id, "play rejected, ending turn");
                break;
            }
            Err(error) => {
                return Err(anyhow::Error::from(error).context(format!("unable to play {}", card.id)))
            }
        }
    }
    if session.phase() == TurnPhase::PlayerActing {
        session.end_turn().context("unable to end turn")?;
    }
    Ok(played)
}

/// Drives the battle with [`play_greedy_turn`] until it is decided. Giving
/// up after `max_turns` counts as surrender.
pub fn run_to_completion(
    mut session: BattleSession,
    max_turns: u32,
) -> anyhow::Result<BattleReport> {
    if session.phase() == TurnPhase::PlayerTurnStart {
        session.start().context("unable to start battle")?;
    }
    while !session.phase().is_terminal() {
        if session.turn() > max_turns {
            tracing::warn!(max_turns, "turn limit reached, surrendering");
            return Ok(session.surrender());
        }
        play_greedy_turn(&mut session)?;
    }
    session
        .report()
        .context("battle was aborted")
}
