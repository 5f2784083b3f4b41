use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::entry::CatalogEntry;
use crate::catalog::error::CatalogError;
use crate::tle::OrbitalElementRecord;

/// Summary of one loaded object.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogObject {
    pub norad_id: u32,
    pub name: String,
    pub international_designator: String,
    pub epoch: DateTime<Utc>,
    pub source: String,
}

/// A GP document is either a single object or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum GpDocument {
    Many(Vec<CatalogEntry>),
    One(Box<CatalogEntry>),
}

struct Loaded {
    record: OrbitalElementRecord,
    source: String,
}

/// Orbital-element records keyed by catalog number, read from GP JSON files.
pub struct Catalog {
    records: BTreeMap<u32, Loaded>,
}

impl Catalog {
    pub fn empty() -> Self {
        Catalog {
            records: BTreeMap::new(),
        }
    }

    /// Loads a single `.json` file, or every `.json` file in a directory.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::PathNotFound(path.display().to_string()));
        }

        let files: Vec<PathBuf> = if path.is_dir() {
            let mut files = Vec::new();
            for entry in fs::read_dir(path)? {
                let file = entry?.path();
                if file.is_file() && file.extension().is_some_and(|ext| ext == "json") {
                    files.push(file);
                }
            }
            files.sort();
            files
        } else {
            vec![path.to_path_buf()]
        };

        let mut catalog = Catalog::empty();
        for file in &files {
            match catalog.load_file(file) {
                Ok(count) => log::info!("Loaded {} objects from {}", count, file.display()),
                Err(e) => log::warn!("Failed to load catalog file {}: {}", file.display(), e),
            }
        }
        Ok(catalog)
    }

    fn load_file(&mut self, path: &Path) -> Result<usize, CatalogError> {
        let content = fs::read_to_string(path)?;
        let source = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let records = parse_gp_json(&source, &content)?;
        let count = records.len();
        for record in records {
            self.records.insert(
                record.catalog_number,
                Loaded {
                    record,
                    source: source.clone(),
                },
            );
        }
        Ok(count)
    }

    pub fn get(&self, norad_id: u32) -> Result<&OrbitalElementRecord, CatalogError> {
        self.records
            .get(&norad_id)
            .map(|l| &l.record)
            .ok_or(CatalogError::UnknownObject(norad_id))
    }

    pub fn objects(&self) -> Vec<CatalogObject> {
        self.records
            .values()
            .map(|l| CatalogObject {
                norad_id: l.record.catalog_number,
                name: l.record.display_name(),
                international_designator: l.record.international_designator.to_string(),
                epoch: l.record.epoch,
                source: l.source.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parses a GP JSON document, skipping objects that cannot become records.
pub fn parse_gp_json(
    source: &str,
    content: &str,
) -> Result<Vec<OrbitalElementRecord>, CatalogError> {
    let invalid = |e: serde_json::Error| CatalogError::InvalidJson {
        file: source.to_string(),
        message: e.to_string(),
    };
    let document: GpDocument = serde_json::from_str(content).map_err(invalid)?;

    let entries = match document {
        GpDocument::Many(entries) => entries,
        GpDocument::One(entry) => vec![*entry],
    };

    let mut records = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        let label = entry
            .norad_cat_id
            .map(|id| format!("NORAD {}", id))
            .unwrap_or_else(|| format!("entry {}", i));
        match OrbitalElementRecord::try_from(entry) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("Skipping {} in {}: {}", label, source, e),
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entry::tests::VELOX_JSON;
    use std::io::Write;

    const MISSING_EPOCH: &str = r#"{"NORAD_CAT_ID": 11111, "OBJECT_ID": "1990-001A"}"#;

    #[test]
    fn parses_single_object_and_array() {
        let single = parse_gp_json("velox.json", VELOX_JSON).unwrap();
        assert_eq!(single.len(), 1);

        let array = format!("[{}, {}]", VELOX_JSON, MISSING_EPOCH);
        let records = parse_gp_json("active.json", &array).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].catalog_number, 57482);
    }

    #[test]
    fn rejects_non_json() {
        let err = parse_gp_json("broken.json", "1 25544U ...").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidJson { file, .. } if file == "broken.json"));
    }

    #[test]
    fn loads_directory_and_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut good = fs::File::create(dir.path().join("active.json")).unwrap();
        write!(good, "[{}]", VELOX_JSON).unwrap();
        fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.is_empty());

        let record = catalog.get(57482).unwrap();
        assert_eq!(record.display_name(), "VELOX-AM");

        let objects = catalog.objects();
        assert_eq!(objects[0].international_designator, "2023-091A");
        assert_eq!(objects[0].source, "active.json");

        assert!(matches!(catalog.get(25544), Err(CatalogError::UnknownObject(25544))));
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Catalog::load(&dir.path().join("nope")),
            Err(CatalogError::PathNotFound(_))
        ));
    }
}
