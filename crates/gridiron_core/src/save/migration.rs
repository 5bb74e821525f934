use super::error::SaveError;
use super::format::GameSave;
use super::SAVE_VERSION;
use crate::season::Standings;
use tracing::{info, warn};

/// Migrate save data from older versions to current version
pub fn migrate_save(mut save: GameSave) -> Result<GameSave, SaveError> {
    let original_version = save.version;

    save = match save.version {
        0 => migrate_v0_to_v1(save)?,
        SAVE_VERSION => save,
        v => {
            warn!("Loading save from future version {} (current: {})", v, SAVE_VERSION);
            return Err(SaveError::VersionMismatch { found: v, expected: SAVE_VERSION });
        }
    };

    save.version = SAVE_VERSION;
    save.validate()?;

    if original_version != SAVE_VERSION {
        save.update_timestamp();
        info!("Migrated save from version {} to {}", original_version, SAVE_VERSION);
    }

    Ok(save)
}

/// Version 0 snapshots did not store standings; rebuild them from the
/// results log.
fn migrate_v0_to_v1(mut save: GameSave) -> Result<GameSave, SaveError> {
    info!("Migrating save from version 0 to 1");

    let session = &mut save.session;
    let mut standings = Standings::new(session.teams());
    for week in session.results() {
        for game in &week.games {
            standings.update(game);
        }
    }
    session.restore_standings(standings);

    if session.current_week() > session.results().len() {
        warn!(
            current_week = session.current_week(),
            played = session.results().len(),
            "Week counter ahead of results log, clamping"
        );
        let played = session.results().len();
        session.set_current_week(played);
    }

    Ok(save)
}
