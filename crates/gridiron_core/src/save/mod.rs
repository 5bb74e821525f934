//! Session snapshots: MessagePack + LZ4 with a version number and a SHA-256
//! integrity trailer.

pub mod error;
pub mod format;
pub mod manager;
pub mod migration;

pub use error::SaveError;
pub use format::{decompress_and_deserialize, serialize_and_compress, GameSave};
pub use manager::{SaveInfo, SaveManager, DEFAULT_SAVE_FILE};
pub use migration::migrate_save;

pub const SAVE_VERSION: u32 = 1;

/// Whole-session persistence keyed by filename.
pub trait SnapshotStore {
    fn save(&self, filename: &str, save: &GameSave) -> Result<(), SaveError>;
    fn load(&self, filename: &str) -> Result<GameSave, SaveError>;
}
