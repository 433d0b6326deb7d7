//! # VMF Mesher
//!
//! A Rust library for converting VMF brush geometry into Wavefront OBJ
//! meshes.
//!
//! ## Overview
//!
//! This library takes a VMF map document (the nested, brace-delimited
//! key/value format used by level editors for Source-engine games) and
//! produces an OBJ mesh with per-face materials, projected UVs, flat
//! normals, and smoothing-group partitioning. Output faces are grouped by
//! material and duplicate vertex positions are welded.
//!
//! ## Quick Start
//!
//! ```ignore
//! use vmf_mesher::{convert_document, ConvertConfig, NoTextures};
//!
//! let document = std::fs::read_to_string("map.vmf")?;
//! let obj = convert_document(&document, ConvertConfig::default(), NoTextures)?;
//! vmf_mesher::write_atomic("map.obj", &obj)?;
//! ```
//!
//! ## Texture resolutions
//!
//! UV projection is resolution-independent when real texture sizes are
//! available. Point a [`VtfTextureResolver`] at a game directory (any path
//! inside one works, discovery walks up to the `gameinfo.txt` marker) and
//! pass it instead of [`NoTextures`]:
//!
//! ```ignore
//! use vmf_mesher::VtfTextureResolver;
//!
//! let resolver = VtfTextureResolver::discover("C:/games/hl2/maps/map.vmf")
//!     .expect("no gameinfo.txt above the map");
//! let obj = vmf_mesher::convert_document(&document, config, resolver)?;
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod mesher;
pub mod obj;
pub mod textures;
pub mod vmf;

// Re-export main types for convenience
pub use config::ConvertConfig;
pub use error::{ConvertError, Result};
pub use export::write_atomic;
pub use mesher::{MeshBuilder, Mesher};
pub use obj::{render, FaceVertex, ObjRecord, Smoothing};
pub use textures::{NoTextures, TextureResolver, VtfTextureResolver};
pub use vmf::{Side, UvAxis};

/// Convert a VMF document to OBJ text.
pub fn convert_document<R: TextureResolver>(
    document: &str,
    config: ConvertConfig,
    resolver: R,
) -> Result<String> {
    let mesher = Mesher::with_config(resolver, config);
    let records = mesher.mesh(document)?;
    Ok(obj::render(&records))
}

/// Convert a VMF file on disk, writing the OBJ atomically to `output`.
pub fn convert_file<R: TextureResolver>(
    input: impl AsRef<std::path::Path>,
    output: impl AsRef<std::path::Path>,
    config: ConvertConfig,
    resolver: R,
) -> Result<()> {
    let document = std::fs::read_to_string(input)?;
    let rendered = convert_document(&document, config, resolver)?;
    export::write_atomic(output, &rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("box.vmf");
        let output = dir.path().join("box.obj");
        std::fs::write(
            &input,
            r#"solid
            {
                "id" "1"
                side
                {
                    "id" "1"
                    "material" "DEV/DEV_MEASUREGENERIC01"
                    "uaxis" "[1 0 0 0] 0.25"
                    "vaxis" "[0 -1 0 0] 0.25"
                    vertices_plus
                    {
                        "v" "0 0 0"
                        "v" "0 128 0"
                        "v" "128 128 0"
                        "v" "128 0 0"
                    }
                }
            }"#,
        )
        .unwrap();

        convert_file(&input, &output, ConvertConfig::default(), NoTextures).unwrap();

        let obj = std::fs::read_to_string(&output).unwrap();
        assert!(obj.contains("usemtl DEV_MEASUREGENERIC01"));
        assert!(obj.contains("g DEV_MEASUREGENERIC01"));
        assert!(obj.contains("f 4/4/4 3/3/3 2/2/2 1/1/1"));
    }
}
