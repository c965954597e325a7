// Catalog files: a JSON array of catalog items
use anyhow::{bail, Context, Result};
use specmatch_core::CatalogItem;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Read a catalog file. Attribute values are normalized on the way in.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogItem>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open catalog {}", path.display()))?;
    let items: Vec<CatalogItem> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("malformed catalog {}", path.display()))?;

    if items.is_empty() {
        bail!("catalog {} contains no items", path.display());
    }

    tracing::info!(path = %path.display(), items = items.len(), "catalog loaded");
    Ok(items)
}

/// Write a catalog file
pub fn save_catalog<P: AsRef<Path>>(path: P, items: &[CatalogItem]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, items)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use specmatch_core::{Attribute, AttributeRecord, AttributeValue};
    use tempfile::tempdir;

    #[test]
    fn test_load_normalizes_specs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"[
                {
                    "id": "HV-1",
                    "name": "11kV cable",
                    "text": "11kV Aluminium XLPE cable",
                    "specs": {"voltage": "11kV", "conductor_material": "Aluminium", "core_count": 3},
                    "category": "HT Power Cable"
                }
            ]"#,
        )
        .unwrap();

        let items = load_catalog(&path).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].attributes.get(Attribute::ConductorMaterial),
            Some(&AttributeValue::Text("al".to_string()))
        );
        assert_eq!(items[0].attributes.get(Attribute::CoreCount), Some(&AttributeValue::Count(3)));
        assert_eq!(items[0].category.as_deref(), Some("HT Power Cable"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.json");
        let items = vec![CatalogItem::new(
            "LV-1",
            "1.1kV cable",
            "1.1kV copper PVC",
            AttributeRecord::builder().voltage("1.1kv").conductor_material("cu").build(),
        )];

        save_catalog(&path, &items).unwrap();
        assert_eq!(load_catalog(&path).unwrap(), items);
    }

    #[test]
    fn test_empty_catalog_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "[]").unwrap();
        assert!(load_catalog(&path).is_err());
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(load_catalog("/nonexistent/catalog.json").is_err());
    }
}
