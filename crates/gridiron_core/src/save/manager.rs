use super::error::SaveError;
use super::format::{decompress_and_deserialize, serialize_and_compress, GameSave};
use super::migration::migrate_save;
use super::SnapshotStore;

use std::fs::{self, remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_SAVE_FILE: &str = "game_save.dat";

/// Snapshot files under one save directory, addressed by filename.
#[derive(Debug, Clone)]
pub struct SaveManager {
    save_dir: PathBuf,
}

impl SaveManager {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self { save_dir: save_dir.into() }
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.path_for(filename).map(|p| p.exists()).unwrap_or(false)
    }

    pub fn delete(&self, filename: &str) -> Result<(), SaveError> {
        let path = self.path_for(filename)?;
        if path.exists() {
            remove_file(&path)?;
            info!("Deleted save {}", filename);
        }
        Ok(())
    }

    /// Metadata of every readable save in the directory, most recent first.
    pub fn list_saves(&self) -> Vec<SaveInfo> {
        let Ok(entries) = fs::read_dir(&self.save_dir) else {
            return Vec::new();
        };

        let mut saves: Vec<SaveInfo> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("dat"))
            .filter_map(|entry| {
                let filename = entry.file_name().to_string_lossy().into_owned();
                let save = Self::load_from_path(&entry.path()).ok()?;
                Some(SaveInfo::from_save(filename, &save))
            })
            .collect();

        saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        saves
    }

    fn path_for(&self, filename: &str) -> Result<PathBuf, SaveError> {
        Self::validate_filename(filename)?;
        Ok(self.save_dir.join(filename))
    }

    fn validate_filename(filename: &str) -> Result<(), SaveError> {
        let invalid = filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains(['/', '\\'])
            || filename.ends_with(".tmp");
        if invalid {
            return Err(SaveError::InvalidFilename { name: filename.to_string() });
        }
        Ok(())
    }

    fn save_to_path(path: &Path, save: &GameSave) -> Result<(), SaveError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serialize_and_compress(save)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }

        rename(&temp_path, path)?;

        debug!("Saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    fn load_from_path(path: &Path) -> Result<GameSave, SaveError> {
        if !path.exists() {
            return Err(SaveError::FileNotFound { path: path.display().to_string() });
        }

        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let save = migrate_save(decompress_and_deserialize(&data)?)?;

        debug!("Loaded {} bytes from {:?}", data.len(), path);
        Ok(save)
    }
}

impl SnapshotStore for SaveManager {
    fn save(&self, filename: &str, save: &GameSave) -> Result<(), SaveError> {
        let path = self.path_for(filename)?;
        Self::save_to_path(&path, save)?;
        info!("Game saved successfully to {}", path.display());
        Ok(())
    }

    fn load(&self, filename: &str) -> Result<GameSave, SaveError> {
        let path = self.path_for(filename)?;
        let save = Self::load_from_path(&path)?;
        info!("Game loaded successfully from {}", path.display());
        Ok(save)
    }
}

#[derive(Debug, Clone)]
pub struct SaveInfo {
    pub filename: String,
    pub timestamp: u64,
    pub version: u32,
    pub phase: String,
    pub season: u32,
    pub week: usize,
    pub team_count: usize,
}

impl SaveInfo {
    fn from_save(filename: String, save: &GameSave) -> Self {
        Self {
            filename,
            timestamp: save.timestamp,
            version: save.version,
            phase: save.session.phase().to_string(),
            season: save.session.current_season(),
            week: save.session.current_week(),
            team_count: save.session.teams().len(),
        }
    }

    pub fn format_timestamp(&self) -> String {
        use time::{format_description::well_known::Rfc3339, OffsetDateTime};

        let timestamp =
            OffsetDateTime::from_unix_timestamp_nanos((self.timestamp as i128) * 1_000_000)
                .unwrap_or_else(|_| OffsetDateTime::now_utc());

        timestamp.format(&Rfc3339).unwrap_or_else(|_| "Unknown".to_string())
    }

    pub fn get_display_text(&self) -> String {
        format!(
            "{}: {} - Week {} Season {} ({} teams)",
            self.filename, self.phase, self.week, self.season, self.team_count
        )
    }
}
