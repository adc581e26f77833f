use chrono::Utc;
use fs2::FileExt;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use super::asset::{content_type_for, Asset, AssetId, AssetKind};
use crate::error::AssetError;

/// Persistent asset catalog backed by a JSON file.
///
/// Stores asset metadata in `library.json` within the data directory and
/// uses atomic writes (write to temp file, then rename) for crash safety.
///
/// An exclusive advisory lock on `library.lock` is held for the lifetime of
/// this struct, so a running panel and a CLI invocation never interleave
/// their writes.
pub struct Catalog {
    path: PathBuf,
    assets: Vec<Asset>,
    /// Dropping this releases the `fs2` lock.
    _lock_file: File,
}

impl Catalog {
    /// Open `data_dir/library.json`, blocking until the lock is available.
    ///
    /// A missing file yields an empty catalog. A corrupted file is logged
    /// and replaced by an empty catalog on the next save.
    pub fn open(data_dir: &Path) -> Result<Self, AssetError> {
        let lock_file = File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(data_dir.join("library.lock"))?;
        lock_file.lock_exclusive()?;

        let path = data_dir.join("library.json");
        let assets = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            match serde_json::from_str::<Vec<Asset>>(&contents) {
                Ok(assets) => assets,
                Err(e) => {
                    tracing::warn!("Corrupted library.json, starting fresh: {}", e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            assets,
            _lock_file: lock_file,
        })
    }

    pub fn save(&self) -> Result<(), AssetError> {
        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&self.assets)?;
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Register a file as a course asset. Images get a thumbnail reference
    /// pointing at the asset itself.
    pub fn import(&mut self, file: &Path, course_id: &str) -> Result<&Asset, AssetError> {
        if !file.is_file() {
            return Err(AssetError::FileNotFound {
                path: file.to_path_buf(),
            });
        }
        let display_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| AssetError::FileNotFound {
                path: file.to_path_buf(),
            })?;

        let id = AssetId::for_course_file(course_id, &display_name);
        if self.get(&id).is_some() {
            return Err(AssetError::AssetExists { id: id.to_string() });
        }

        let content_type = content_type_for(file).to_string();
        let thumbnail = (AssetKind::from_content_type(&content_type) == AssetKind::Images)
            .then(|| format!("/{}", id));

        tracing::debug!(%id, %content_type, "Importing asset");
        self.assets.push(Asset {
            id,
            display_name,
            content_type,
            thumbnail,
            locked: false,
            date_added: Utc::now(),
            loading: BTreeSet::new(),
        });
        let last = self.assets.len() - 1;
        Ok(&self.assets[last])
    }

    pub fn list(&self) -> &[Asset] {
        &self.assets
    }

    pub fn get(&self, id: &AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| &a.id == id)
    }

    /// Remove an asset, returning its last known record.
    pub fn remove(&mut self, id: &AssetId) -> Result<Asset, AssetError> {
        let pos = self
            .assets
            .iter()
            .position(|a| &a.id == id)
            .ok_or_else(|| AssetError::AssetNotFound { id: id.to_string() })?;
        Ok(self.assets.remove(pos))
    }

    pub fn set_locked(&mut self, id: &AssetId, locked: bool) -> Result<(), AssetError> {
        let asset = self
            .assets
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| AssetError::AssetNotFound { id: id.to_string() })?;
        asset.locked = locked;
        Ok(())
    }
}
