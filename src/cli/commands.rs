//! Non-interactive subcommands. Each opens the catalog, does one thing and
//! saves; listing goes through `AssetStore` so the CLI and the panel sort
//! and filter identically.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::types::AppConfig;
use crate::error::AssetError;
use crate::library::asset::{Asset, AssetId, SortParams};
use crate::library::catalog::Catalog;
use crate::library::store::AssetStore;

use super::args::{IdArgs, ImportArgs, ListArgs};

/// Print the library as a table on stdout.
pub fn list(data_dir: &Path, args: ListArgs, out: &mut impl Write) -> Result<(), AssetError> {
    let catalog = Catalog::open(data_dir)?;
    let mut store = AssetStore::new(catalog.list().to_vec());
    store.update_sort(SortParams {
        key: args.sort,
        direction: args.direction,
    });
    store.update_filters(args.types.into_iter().collect::<BTreeSet<_>>());

    if store.assets().is_empty() {
        writeln!(out, "No assets")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<28} {:<24} {:<16} {:<6} ID",
        "NAME", "TYPE", "ADDED", "LOCK"
    )?;
    for asset in store.assets() {
        writeln!(out, "{}", format_row(asset))?;
    }
    Ok(())
}

fn format_row(asset: &Asset) -> String {
    format!(
        "{:<28} {:<24} {:<16} {:<6} {}",
        truncate_str(&asset.display_name, 28),
        truncate_str(&asset.content_type, 24),
        asset.date_added.format("%Y-%m-%d %H:%M"),
        if asset.locked { "yes" } else { "no" },
        asset.id
    )
}

/// Import every file, stopping at the first failure. Files imported before
/// the failure are kept.
pub fn import(
    data_dir: &Path,
    config: &AppConfig,
    args: ImportArgs,
    out: &mut impl Write,
) -> Result<(), AssetError> {
    let mut catalog = Catalog::open(data_dir)?;
    let mut result = Ok(());
    let mut imported: Vec<PathBuf> = Vec::new();
    for file in &args.files {
        match catalog.import(file, &config.course.id) {
            Ok(asset) => {
                writeln!(out, "{}", asset.id)?;
                imported.push(file.clone());
            }
            Err(e) => {
                result = Err(e);
                break;
            }
        }
    }
    if !imported.is_empty() {
        catalog.save()?;
        tracing::info!(count = imported.len(), "Assets imported");
    }
    result
}

/// Remove one asset. Returns its display name.
pub fn delete(data_dir: &Path, args: IdArgs) -> Result<String, AssetError> {
    let mut catalog = Catalog::open(data_dir)?;
    let removed = catalog.remove(&AssetId::new(args.id))?;
    catalog.save()?;
    tracing::info!(asset = %removed.id, "Asset deleted");
    Ok(removed.display_name)
}

/// Flip one asset's lock flag. Returns its display name and the new flag.
pub fn toggle_lock(data_dir: &Path, args: IdArgs) -> Result<(String, bool), AssetError> {
    let id = AssetId::new(args.id);
    let mut catalog = Catalog::open(data_dir)?;
    let (name, locked) = match catalog.get(&id) {
        Some(asset) => (asset.display_name.clone(), !asset.locked),
        None => return Err(AssetError::AssetNotFound { id: id.to_string() }),
    };
    catalog.set_locked(&id, locked)?;
    catalog.save()?;
    tracing::info!(asset = %id, locked, "Lock toggled");
    Ok((name, locked))
}

/// Truncate a string to the given max length, appending "..." if truncated.
fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let head: String = s.chars().take(keep).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::asset::{AssetKind, Direction, SortKey};

    fn write_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"data").unwrap();
        path
    }

    fn import_all(data_dir: &Path, files: Vec<PathBuf>) -> String {
        let mut out = Vec::new();
        import(
            data_dir,
            &AppConfig::default(),
            ImportArgs { files },
            &mut out,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn import_prints_ids_and_persists() {
        let lib = tempfile::tempdir().unwrap();
        let src = tempfile::tempdir().unwrap();
        let out = import_all(
            lib.path(),
            vec![write_file(src.path(), "a.png"), write_file(src.path(), "b.pdf")],
        );
        assert!(out.contains("asset-v1:demo+type@asset+block@a.png"));
        assert!(out.contains("asset-v1:demo+type@asset+block@b.pdf"));

        let catalog = Catalog::open(lib.path()).unwrap();
        assert_eq!(catalog.list().len(), 2);
    }

    #[test]
    fn import_keeps_files_before_a_failure() {
        let lib = tempfile::tempdir().unwrap();
        let src = tempfile::tempdir().unwrap();
        let files = vec![write_file(src.path(), "a.png"), src.path().join("missing.png")];
        let mut out = Vec::new();
        let err = import(lib.path(), &AppConfig::default(), ImportArgs { files }, &mut out)
            .unwrap_err();
        assert!(matches!(err, AssetError::FileNotFound { .. }));

        let catalog = Catalog::open(lib.path()).unwrap();
        assert_eq!(catalog.list().len(), 1);
    }

    #[test]
    fn list_sorts_and_filters() {
        let lib = tempfile::tempdir().unwrap();
        let src = tempfile::tempdir().unwrap();
        import_all(
            lib.path(),
            vec![
                write_file(src.path(), "b.png"),
                write_file(src.path(), "a.png"),
                write_file(src.path(), "notes.pdf"),
            ],
        );

        let mut out = Vec::new();
        list(
            lib.path(),
            ListArgs {
                sort: SortKey::DisplayName,
                direction: Direction::Asc,
                types: vec![AssetKind::Images],
            },
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        let a = text.find("a.png").unwrap();
        let b = text.find("b.png").unwrap();
        assert!(a < b);
        assert!(!text.contains("notes.pdf"));
    }

    #[test]
    fn list_empty_library() {
        let lib = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        list(
            lib.path(),
            ListArgs {
                sort: SortKey::DateAdded,
                direction: Direction::Desc,
                types: Vec::new(),
            },
            &mut out,
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No assets\n");
    }

    #[test]
    fn delete_and_lock_by_id() {
        let lib = tempfile::tempdir().unwrap();
        let src = tempfile::tempdir().unwrap();
        import_all(lib.path(), vec![write_file(src.path(), "a.png")]);
        let id = "asset-v1:demo+type@asset+block@a.png".to_string();

        let (name, locked) = toggle_lock(lib.path(), IdArgs { id: id.clone() }).unwrap();
        assert_eq!(name, "a.png");
        assert!(locked);
        let (_, locked) = toggle_lock(lib.path(), IdArgs { id: id.clone() }).unwrap();
        assert!(!locked);

        assert_eq!(delete(lib.path(), IdArgs { id: id.clone() }).unwrap(), "a.png");
        assert!(matches!(
            delete(lib.path(), IdArgs { id }),
            Err(AssetError::AssetNotFound { .. })
        ));
    }

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("abcdefghij", 8), "abcde...");
    }
}
