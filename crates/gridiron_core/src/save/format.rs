use super::error::SaveError;
use super::SAVE_VERSION;
use crate::models::PlayerId;
use crate::session::GameSession;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

const CHECKSUM_LEN: usize = 32;

/// Whole-session snapshot.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameSave {
    /// Save format version for migration
    pub version: u32,

    /// Save timestamp (unix milliseconds)
    pub timestamp: u64,

    pub session: GameSession,
}

impl GameSave {
    pub fn new(session: GameSession) -> Self {
        Self { version: SAVE_VERSION, timestamp: current_timestamp(), session }
    }

    pub fn update_timestamp(&mut self) {
        self.timestamp = current_timestamp();
    }

    /// Every player must exist exactly once across the pool and all rosters,
    /// and rostered players must point back at the team holding them.
    pub fn validate(&self) -> Result<(), SaveError> {
        let Some(draft) = self.session.draft() else {
            return Ok(());
        };

        let mut seen: HashSet<PlayerId> = HashSet::new();
        for player in draft.available() {
            if !seen.insert(player.id) {
                return Err(corrupted(format!("player {} listed twice", player.id)));
            }
            if player.is_drafted() {
                return Err(corrupted(format!("pool player {} has a team", player.id)));
            }
        }

        for team in draft.teams() {
            for player in &team.roster {
                if !seen.insert(player.id) {
                    return Err(corrupted(format!("player {} listed twice", player.id)));
                }
                if player.team() != Some(team.id) {
                    return Err(corrupted(format!(
                        "player {} on {} points at {:?}",
                        player.id,
                        team.id,
                        player.team()
                    )));
                }
            }
        }

        Ok(())
    }
}

fn corrupted(reason: String) -> SaveError {
    SaveError::Corrupted { reason }
}

/// Serialize and compress game save data
pub fn serialize_and_compress(save: &GameSave) -> Result<Vec<u8>, SaveError> {
    save.validate()?;

    // 1. MessagePack with field names
    let msgpack = to_vec_named(save)?;

    // 2. LZ4, size prepended
    let compressed = compress_prepend_size(&msgpack);

    // 3. SHA256 checksum trailer
    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize game save data
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<GameSave, SaveError> {
    // size header + checksum
    if bytes.len() < 4 + CHECKSUM_LEN {
        return Err(corrupted(format!("only {} bytes", bytes.len())));
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - CHECKSUM_LEN);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;
    let save: GameSave = from_slice(&msgpack)?;

    if save.version > SAVE_VERSION {
        return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
    }

    Ok(save)
}

pub fn current_timestamp() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeagueConfig;
    use crate::models::TeamId;

    fn drafted_session() -> GameSession {
        let mut session = GameSession::new();
        session.start_new_game(LeagueConfig { num_teams: 3, ..LeagueConfig::default() }).unwrap();
        session.run_draft_phase().unwrap();
        session
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let save = GameSave::new(drafted_session());

        let serialized = serialize_and_compress(&save).unwrap();
        let deserialized = decompress_and_deserialize(&serialized).unwrap();

        assert_eq!(deserialized.version, SAVE_VERSION);
        assert_eq!(deserialized.session.teams().len(), 3);
        assert_eq!(deserialized.session.teams()[1].roster, save.session.teams()[1].roster);
        assert_eq!(deserialized.session.schedule(), save.session.schedule());
    }

    #[test]
    fn test_checksum_validation() {
        let save = GameSave::new(drafted_session());
        let mut serialized = serialize_and_compress(&save).unwrap();

        if let Some(last) = serialized.last_mut() {
            *last = last.wrapping_add(1);
        }

        let result = decompress_and_deserialize(&serialized);
        assert!(matches!(result, Err(SaveError::ChecksumMismatch)));
    }

    #[test]
    fn test_truncated_data_is_corrupted() {
        let result = decompress_and_deserialize(&[0u8; 10]);
        assert!(matches!(result, Err(SaveError::Corrupted { .. })));
    }

    #[test]
    fn test_future_version_rejected() {
        let mut save = GameSave::new(GameSession::new());
        save.version = SAVE_VERSION + 1;
        let serialized = serialize_and_compress(&save).unwrap();

        assert!(matches!(
            decompress_and_deserialize(&serialized),
            Err(SaveError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn test_duplicate_player_rejected() {
        let mut session = drafted_session();
        let draft = session.draft_mut().unwrap();
        let stolen = draft.teams()[0].roster[0].clone();
        draft.teams_mut()[1].roster.push(stolen);

        let save = GameSave::new(session);
        assert!(matches!(save.validate(), Err(SaveError::Corrupted { .. })));
        assert!(serialize_and_compress(&save).is_err());
    }

    #[test]
    fn test_wrong_back_reference_rejected() {
        let mut session = GameSession::new();
        session.start_new_game(LeagueConfig::default()).unwrap();
        session.run_draft_phase().unwrap();

        let draft = session.draft_mut().unwrap();
        let moved = draft.teams_mut()[0].roster.remove(0);
        assert_eq!(moved.team(), Some(TeamId(0)));
        draft.teams_mut()[1].roster.push(moved);

        assert!(GameSave::new(session).validate().is_err());
    }

    #[test]
    fn test_empty_session_is_valid() {
        assert!(GameSave::new(GameSession::new()).validate().is_ok());
    }
}
