//! The map index asset: which map identifiers resolve to which definition
//! files. Loaded once at startup; map definitions themselves are loaded
//! lazily at map-select time.

use std::path::Path;

use serde_json::Value;

use crate::data::schema;
use crate::prelude::HashSet;
use crate::{MapError, Result, SchemaViolation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapMapping {
    entries: Vec<MapEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    pub id: String,
    pub path: String,
}

impl MapMapping {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MapError::AssetNotFound(name));
            }
            Err(e) => return Err(MapError::Io(e)),
        };

        Self::parse(&name, &raw)
    }

    pub fn parse(name: &str, raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).map_err(|e| MapError::MalformedAsset {
            name: name.to_string(),
            violation: SchemaViolation::Syntax(e.to_string()),
        })?;

        Self::from_value(&value).map_err(|violation| MapError::MalformedAsset {
            name: name.to_string(),
            violation,
        })
    }

    fn from_value(value: &Value) -> std::result::Result<Self, SchemaViolation> {
        let maps = schema::as_array(schema::require(value, "maps")?, "maps")?;

        let mut entries = Vec::new();
        let mut seen: HashSet<String> = HashSet::default();
        for entry in maps {
            let id = schema::req_str(entry, "id")?;
            if !seen.insert(id.clone()) {
                return Err(SchemaViolation::DuplicateName { kind: "map", name: id });
            }
            entries.push(MapEntry {
                id,
                path: schema::req_str(entry, "path")?,
            });
        }

        Ok(Self { entries })
    }

    /// Definition paths in declaration order.
    pub fn map_def_paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    pub fn path_for(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.path.as_str())
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }
}
