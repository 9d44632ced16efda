//! Immutable map definitions loaded from per-map JSON assets.
//!
//! Loading is synchronous and side-effect-free: a failed load returns an
//! error and retains no partial state, so the caller falls back to "no map
//! loaded" instead of half-initialized layers.

use std::path::Path;

use serde_json::Value;

use crate::core::geo::{Color, Point, WorldPosition};
use crate::data::schema;
use crate::dynamic::categories::MarkerCategory;
use crate::prelude::HashSet;
use crate::{MapError, Result, SchemaViolation};

/// Immutable description of one map: world bounds, rotation, default level,
/// ordered layers, and static marker placements.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDef {
    pub display_name: String,
    /// World-unit corner points of the overall map footprint.
    pub bounds: Vec<Point>,
    /// Rotation applied to align the pre-rotated map art with world axes.
    pub coordinate_rotation: f64,
    pub default_level: i32,
    /// Ordered: definition order is preserved for stable iteration.
    pub layers: Vec<LayerDef>,
    pub static_markers: Vec<(String, MarkerDef)>,
}

/// One floor/story of a map. Floors may share a level.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDef {
    pub name: String,
    pub level: i32,
    /// World heights mapped to this floor as (min, max).
    pub height_bounds: (f64, f64),
    pub image: String,
}

/// Description used to instantiate a visual marker, static or dynamic.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDef {
    pub category: MarkerCategory,
    pub image: String,
    pub text: String,
    pub color: Color,
    pub position: WorldPosition,
    /// Pins the marker to one layer; it hides when that layer is not the
    /// selected level.
    pub layer: Option<String>,
}

impl MapDef {
    /// Loads and validates a map definition from a JSON file.
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

    /// Parses a map definition from raw JSON text.
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
        schema::as_object(value, "root")?;

        let display_name = schema::req_str(value, "display_name")?;
        let coordinate_rotation = schema::req_f64(value, "coordinate_rotation")?;
        let default_level = schema::req_i32(value, "default_level")?;

        let bounds_value = schema::require(value, "bounds")?;
        let bounds = parse_points(bounds_value, "bounds")?;
        if bounds.len() < 2 {
            return Err(SchemaViolation::WrongType {
                field: "bounds".to_string(),
                expected: "array of at least two points",
            });
        }

        let layers_value = schema::require(value, "layers")?;
        let mut layers = Vec::new();
        let mut layer_names = HashSet::default();
        for entry in schema::as_array(layers_value, "layers")? {
            let layer = LayerDef::from_value(entry)?;
            if !layer_names.insert(layer.name.clone()) {
                return Err(SchemaViolation::DuplicateName {
                    kind: "layer",
                    name: layer.name,
                });
            }
            layers.push(layer);
        }

        let mut static_markers = Vec::new();
        if let Some(markers_value) = value.get("static_markers") {
            let mut marker_names: HashSet<String> = HashSet::default();
            for entry in schema::as_array(markers_value, "static_markers")? {
                let name = schema::req_str(entry, "name")?;
                if !marker_names.insert(name.clone()) {
                    return Err(SchemaViolation::DuplicateName {
                        kind: "marker",
                        name,
                    });
                }
                static_markers.push((name, MarkerDef::from_value(entry, &layer_names)?));
            }
        }

        Ok(Self {
            display_name,
            bounds,
            coordinate_rotation,
            default_level,
            layers,
            static_markers,
        })
    }
}

impl LayerDef {
    fn from_value(value: &Value) -> std::result::Result<Self, SchemaViolation> {
        let name = schema::req_str(value, "name")?;
        let level = schema::req_i32(value, "level")?;
        let image = schema::req_str(value, "image")?;

        let hb = schema::as_array(schema::require(value, "height_bounds")?, "height_bounds")?;
        if hb.len() != 2 {
            return Err(SchemaViolation::WrongType {
                field: "height_bounds".to_string(),
                expected: "[min, max] number pair",
            });
        }
        let height_bounds = (
            schema::as_f64(&hb[0], "height_bounds[0]")?,
            schema::as_f64(&hb[1], "height_bounds[1]")?,
        );

        Ok(Self {
            name,
            level,
            height_bounds,
            image,
        })
    }
}

impl MarkerDef {
    fn from_value(
        value: &Value,
        layer_names: &HashSet<String>,
    ) -> std::result::Result<Self, SchemaViolation> {
        let category_label = schema::req_str(value, "category")?;
        let category =
            MarkerCategory::from_label(&category_label).ok_or(SchemaViolation::WrongType {
                field: "category".to_string(),
                expected: "known marker category label",
            })?;

        let image = schema::req_str(value, "image")?;
        let text = schema::req_str(value, "text")?;
        let position = parse_world_position(schema::require(value, "position")?)?;

        let color = match value.get("color") {
            Some(color_value) => parse_color(color_value)?,
            None => category.color(),
        };

        let layer = match value.get("layer") {
            Some(layer_value) => {
                let name = schema::as_str(layer_value, "layer")?.to_string();
                if !layer_names.contains(&name) {
                    return Err(SchemaViolation::WrongType {
                        field: "layer".to_string(),
                        expected: "name of a declared layer",
                    });
                }
                Some(name)
            }
            None => None,
        };

        Ok(Self {
            category,
            image,
            text,
            color,
            position,
            layer,
        })
    }
}

fn parse_points(value: &Value, field: &str) -> std::result::Result<Vec<Point>, SchemaViolation> {
    let mut points = Vec::new();
    for entry in schema::as_array(value, field)? {
        points.push(Point::new(
            schema::req_f64(entry, "x")?,
            schema::req_f64(entry, "y")?,
        ));
    }
    Ok(points)
}

fn parse_world_position(value: &Value) -> std::result::Result<WorldPosition, SchemaViolation> {
    Ok(WorldPosition::new(
        schema::req_f64(value, "x")?,
        schema::req_f64(value, "y")?,
        schema::req_f64(value, "z")?,
    ))
}

fn parse_color(value: &Value) -> std::result::Result<Color, SchemaViolation> {
    let parts = schema::as_array(value, "color")?;
    if parts.len() < 3 || parts.len() > 4 {
        return Err(SchemaViolation::WrongType {
            field: "color".to_string(),
            expected: "[r, g, b] or [r, g, b, a] array",
        });
    }
    let component = |i: usize| -> std::result::Result<f32, SchemaViolation> {
        Ok(schema::as_f64(&parts[i], "color")? as f32)
    };
    let a = if parts.len() == 4 { component(3)? } else { 1.0 };
    Ok(Color::rgba(component(0)?, component(1)?, component(2)?, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "display_name": "Customs",
            "coordinate_rotation": 180.0,
            "default_level": 0,
            "bounds": [
                { "x": -300.0, "y": -160.0 },
                { "x": 420.0, "y": 230.0 }
            ],
            "layers": [
                {
                    "name": "Ground",
                    "level": 0,
                    "height_bounds": [-100.0, 4.5],
                    "image": "maps/customs_ground.png"
                },
                {
                    "name": "Second Floor",
                    "level": 1,
                    "height_bounds": [4.5, 100.0],
                    "image": "maps/customs_second.png"
                }
            ],
            "static_markers": [
                {
                    "name": "ZB-1011",
                    "category": "Extraction",
                    "image": "markers/exit.png",
                    "text": "ZB-1011",
                    "position": { "x": 398.0, "y": 2.0, "z": -110.0 }
                }
            ]
        }"#
    }

    #[test]
    fn test_parse_valid_map() {
        let def = MapDef::parse("customs.json", sample_json()).unwrap();
        assert_eq!(def.display_name, "Customs");
        assert_eq!(def.coordinate_rotation, 180.0);
        assert_eq!(def.default_level, 0);
        assert_eq!(def.layers.len(), 2);
        assert_eq!(def.layers[0].name, "Ground");
        assert_eq!(def.layers[1].height_bounds, (4.5, 100.0));
        assert_eq!(def.static_markers.len(), 1);
        assert_eq!(def.static_markers[0].0, "ZB-1011");
        assert_eq!(
            def.static_markers[0].1.category,
            MarkerCategory::Extraction
        );
    }

    #[test]
    fn test_missing_field_is_distinguishable() {
        let raw = sample_json().replacen("\"default_level\": 0,", "", 1);
        let err = MapDef::parse("m.json", &raw).unwrap_err();
        match err {
            MapError::MalformedAsset { violation, .. } => assert_eq!(
                violation,
                SchemaViolation::MissingField("default_level".to_string())
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_type_is_distinguishable() {
        let raw = sample_json().replacen(
            "\"coordinate_rotation\": 180.0",
            "\"coordinate_rotation\": \"sideways\"",
            1,
        );
        let err = MapDef::parse("m.json", &raw).unwrap_err();
        match err {
            MapError::MalformedAsset { violation, .. } => assert!(matches!(
                violation,
                SchemaViolation::WrongType { ref field, .. } if field == "coordinate_rotation"
            )),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_layer_name_rejected() {
        let raw = sample_json().replacen("Second Floor", "Ground", 1);
        let err = MapDef::parse("m.json", &raw).unwrap_err();
        match err {
            MapError::MalformedAsset { violation, .. } => assert_eq!(
                violation,
                SchemaViolation::DuplicateName {
                    kind: "layer",
                    name: "Ground".to_string()
                }
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_json_is_syntax_violation() {
        let err = MapDef::parse("m.json", "{ not json").unwrap_err();
        match err {
            MapError::MalformedAsset { violation, .. } => {
                assert!(matches!(violation, SchemaViolation::Syntax(_)))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_asset_not_found() {
        let err = MapDef::load_from_path("/nonexistent/nowhere.json").unwrap_err();
        assert!(matches!(err, MapError::AssetNotFound(_)));
    }

    #[test]
    fn test_marker_layer_must_exist() {
        let raw = sample_json().replacen(
            "\"position\": { \"x\": 398.0, \"y\": 2.0, \"z\": -110.0 }",
            "\"position\": { \"x\": 398.0, \"y\": 2.0, \"z\": -110.0 }, \"layer\": \"Basement\"",
            1,
        );
        let err = MapDef::parse("m.json", &raw).unwrap_err();
        match err {
            MapError::MalformedAsset { violation, .. } => assert!(matches!(
                violation,
                SchemaViolation::WrongType { ref field, .. } if field == "layer"
            )),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
