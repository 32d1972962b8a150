use std::fs;
use std::path::Path;

use crate::color::Rgba;

/// Default colors for each kind of scene item.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ItemColors {
    pub point: Rgba,
    pub terrain: Rgba,
    pub alignment: Rgba,
    pub editable: Rgba,
    pub label: Rgba,
    pub axis_x: Rgba,
    pub axis_y: Rgba,
    pub axis_z: Rgba,
}

impl Default for ItemColors {
    fn default() -> Self {
        Self {
            point: Rgba::rgb(0xff, 0x00, 0x00),
            terrain: Rgba::rgb(0x00, 0xff, 0x00),
            alignment: Rgba::rgb(0xff, 0x00, 0x00),
            editable: Rgba::rgb(0xcc, 0x60, 0x00),
            label: Rgba::rgb(0xc8, 0x00, 0xff),
            axis_x: Rgba::rgb(0xfe, 0x2e, 0x4e),
            axis_y: Rgba::rgb(0x39, 0x9e, 0x19),
            axis_z: Rgba::rgb(0x28, 0x83, 0xef),
        }
    }
}

/// Tunables of a scene. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Maximum number of entries kept on the undo stack.
    pub undo_limit: usize,
    /// Samples per circular arc segment.
    pub arc_samples: usize,
    /// Samples per clothoid segment.
    pub spiral_samples: usize,
    pub selected_color: Rgba,
    pub hovered_color: Rgba,
    pub background: Rgba,
    pub line_width: f32,
    /// Draw terrain as triangle edges instead of filled faces.
    pub wireframe: bool,
    pub colors: ItemColors,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            undo_limit: 200,
            arc_samples: 100,
            spiral_samples: 100,
            selected_color: Rgba::rgb(0x00, 0x7f, 0xff),
            hovered_color: Rgba::rgb(0x00, 0x58, 0xb2),
            background: Rgba::BLACK,
            line_width: 3.0,
            wireframe: true,
            colors: ItemColors::default(),
        }
    }
}

impl SceneConfig {
    /// Loads a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let data = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Saves this configuration as pretty printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: SceneConfig =
            serde_json::from_str(r##"{"undo_limit": 5, "colors": {"terrain": "#123456"}}"##).unwrap();
        assert_eq!(cfg.undo_limit, 5);
        assert_eq!(cfg.arc_samples, 100);
        assert_eq!(cfg.colors.terrain, Rgba::rgb(0x12, 0x34, 0x56));
        assert_eq!(cfg.colors.point, Rgba::rgb(0xff, 0, 0));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let mut cfg = SceneConfig::default();
        cfg.spiral_samples = 42;
        cfg.save(&path).unwrap();
        assert_eq!(SceneConfig::from_json_file(&path).unwrap(), cfg);
    }

    #[test]
    fn bad_color_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"background": "blue"}"#).unwrap();
        let err = SceneConfig::from_json_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
