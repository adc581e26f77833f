//! Remote asset operations.
//!
//! The dispatcher talks to an [`AssetService`]; the shipped implementation
//! works against the on-disk catalog and runs the blocking file work on
//! tokio's blocking pool.

use std::future::Future;
use std::path::PathBuf;

use crate::config::types::CourseContext;
use crate::error::AssetError;
use crate::library::asset::{Asset, AssetId};
use crate::library::catalog::Catalog;

pub trait AssetService: Send + Sync + 'static {
    /// Fetch every asset of the course.
    fn list_assets(
        &self,
        course: CourseContext,
    ) -> impl Future<Output = Result<Vec<Asset>, AssetError>> + Send;

    /// Delete an asset from the course.
    fn delete_asset(
        &self,
        id: AssetId,
        course: CourseContext,
    ) -> impl Future<Output = Result<(), AssetError>> + Send;

    /// Set the lock flag. Resolves to the flag the service stored.
    fn set_locked(
        &self,
        id: AssetId,
        locked: bool,
        course: CourseContext,
    ) -> impl Future<Output = Result<bool, AssetError>> + Send;
}

/// Asset service backed by the catalog in a data directory.
#[derive(Debug, Clone)]
pub struct LibraryService {
    data_dir: PathBuf,
}

impl LibraryService {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

impl AssetService for LibraryService {
    async fn list_assets(&self, course: CourseContext) -> Result<Vec<Asset>, AssetError> {
        let data_dir = self.data_dir.clone();
        tokio::task::spawn_blocking(move || {
            let catalog = Catalog::open(&data_dir)?;
            tracing::debug!(course = %course.id, count = catalog.list().len(), "Assets listed");
            Ok(catalog.list().to_vec())
        })
        .await?
    }

    async fn delete_asset(&self, id: AssetId, course: CourseContext) -> Result<(), AssetError> {
        let data_dir = self.data_dir.clone();
        tokio::task::spawn_blocking(move || {
            let mut catalog = Catalog::open(&data_dir)?;
            let removed = catalog.remove(&id)?;
            catalog.save()?;
            tracing::info!(course = %course.id, asset = %removed.id, "Asset deleted");
            Ok(())
        })
        .await?
    }

    async fn set_locked(
        &self,
        id: AssetId,
        locked: bool,
        course: CourseContext,
    ) -> Result<bool, AssetError> {
        let data_dir = self.data_dir.clone();
        tokio::task::spawn_blocking(move || {
            let mut catalog = Catalog::open(&data_dir)?;
            catalog.set_locked(&id, locked)?;
            catalog.save()?;
            tracing::info!(course = %course.id, asset = %id, locked, "Asset lock updated");
            Ok(locked)
        })
        .await?
    }
}
