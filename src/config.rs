//! Conversion configuration.

use serde::{Deserialize, Serialize};

/// Main conversion configuration.
///
/// The texel-density pair normalizes UV projection when the real texture
/// resolution for a material is unknown: a `texel_density_tex`-pixel
/// texture is assumed to span `texel_density_units` world units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Reference texture size in pixels.
    pub texel_density_tex: f32,
    /// World-space span (in map units) covered by the reference texture.
    pub texel_density_units: f32,
    /// Uniform scale applied to output positions (0.01 maps 100 units to 1 meter).
    pub unit_scale: f32,
    /// Materials whose faces are dropped during regrouping.
    pub excluded_materials: Vec<String>,
    /// Drop normal indices from faces in a real smoothing group, leaving
    /// normal resolution to the consumer. Flat-shaded faces keep theirs.
    pub strip_smoothed_normals: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            texel_density_tex: 2048.0,
            texel_density_units: 300.0,
            unit_scale: 0.01,
            excluded_materials: vec!["TOOLSNODRAW".to_string()],
            strip_smoothed_normals: false,
        }
    }
}

impl ConvertConfig {
    /// Load a config from a JSON file.
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> crate::error::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Check whether a material is in the exclusion set.
    pub fn is_excluded(&self, material: &str) -> bool {
        self.excluded_materials.iter().any(|m| m == material)
    }
}
