//! VMF document access: block extraction and side parsing.
//!
//! A map document is a nested, brace-delimited key/value text. Brush
//! geometry lives in `solid` blocks, each containing one `side` block per
//! planar face. Blocks are carved out by brace counting and read by keyed
//! field lookup; no block tree is kept around.

pub mod block;
pub mod fields;

pub use block::{extract_block, BlockIter};
pub use fields::{parse_vertex, read_field, read_field_at_start, read_fields, UvAxis};

use crate::error::{ConvertError, Result};
use crate::obj::Smoothing;
use glam::Vec3;

/// Iterate every `solid` block in a document, in document order.
pub fn solids(document: &str) -> BlockIter<'_> {
    BlockIter::new(document, "solid")
}

/// Iterate every `side` block in a solid's content, in document order.
pub fn sides(solid: &str) -> BlockIter<'_> {
    BlockIter::new(solid, "side")
}

/// Read a block's id attribute (anchored at the block start).
pub fn block_id(block: &str) -> Option<&str> {
    read_field_at_start(block, "id")
}

/// Zero-pad an id to three digits for log labels (`Solid_007`).
pub fn padded_id(id: &str) -> String {
    format!("{id:0>3}")
}

/// One planar brush face, parsed out of a `side` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Side {
    /// Id attribute, used for labeling and error reporting.
    pub id: String,
    /// Material name with the path prefix stripped.
    pub material: String,
    /// Raw plane equation string, kept for diagnostics.
    pub plane: Option<String>,
    /// U texture-projection axis.
    pub uaxis: UvAxis,
    /// V texture-projection axis.
    pub vaxis: UvAxis,
    /// Smoothing group; absent in the source means flat shading.
    pub smoothing: Smoothing,
    /// Face vertices, already reversed from source order so the derived
    /// winding faces outward after coordinate conversion.
    pub vertices: Vec<Vec3>,
}

impl Side {
    /// Parse a side from its block content.
    ///
    /// Material and both UV axes are required; the smoothing group and
    /// plane are optional. Vertex rows (`"v" "x y z"`) are collected in
    /// document order and then reversed.
    pub fn parse(block: &str) -> Result<Self> {
        let id = block_id(block).unwrap_or("?").to_string();

        let missing = |field: &'static str| ConvertError::MissingField {
            field,
            side_id: id.clone(),
        };
        let invalid = |field: &'static str, value: &str| ConvertError::InvalidValue {
            field,
            side_id: id.clone(),
            value: value.to_string(),
        };

        let material_raw = read_field(block, "material").ok_or_else(|| missing("material"))?;
        let material = material_raw
            .rsplit('/')
            .next()
            .unwrap_or(material_raw)
            .to_string();

        let plane = read_field(block, "plane").map(str::to_string);

        let uaxis_raw = read_field(block, "uaxis").ok_or_else(|| missing("uaxis"))?;
        let uaxis = UvAxis::parse(uaxis_raw).ok_or_else(|| invalid("uaxis", uaxis_raw))?;
        let vaxis_raw = read_field(block, "vaxis").ok_or_else(|| missing("vaxis"))?;
        let vaxis = UvAxis::parse(vaxis_raw).ok_or_else(|| invalid("vaxis", vaxis_raw))?;

        let smoothing = match read_field(block, "smoothing_groups") {
            None => Smoothing::Off,
            Some(raw) => raw
                .trim()
                .parse()
                .map(Smoothing::Group)
                .map_err(|_| invalid("smoothing_groups", raw))?,
        };

        let mut vertices = Vec::new();
        for raw in read_fields(block, "v") {
            vertices.push(parse_vertex(raw).ok_or_else(|| invalid("v", raw))?);
        }
        vertices.reverse();

        Ok(Self {
            id,
            material,
            plane,
            uaxis,
            vaxis,
            smoothing,
            vertices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIDE: &str = r#""id" "12"
        "plane" "(0 0 0) (0 64 0) (64 64 0)"
        "material" "BRICK/BRICKWALL001A"
        "uaxis" "[1 0 0 0] 0.25"
        "vaxis" "[0 -1 0 0] 0.25"
        "smoothing_groups" "3"
        vertices_plus
        {
            "v" "0 0 0"
            "v" "0 64 0"
            "v" "64 64 0"
            "v" "64 0 0"
        }"#;

    #[test]
    fn test_side_parse() {
        let side = Side::parse(SIDE).unwrap();
        assert_eq!(side.id, "12");
        assert_eq!(side.material, "BRICKWALL001A");
        assert_eq!(side.smoothing, Smoothing::Group(3));
        assert_eq!(side.uaxis.dir, Vec3::X);
        assert_eq!(side.vaxis.dir, Vec3::NEG_Y);
        assert!(side.plane.is_some());
    }

    #[test]
    fn test_side_vertices_reversed() {
        // Source order [A, B, C, D] comes out [D, C, B, A].
        let side = Side::parse(SIDE).unwrap();
        assert_eq!(
            side.vertices,
            vec![
                Vec3::new(64.0, 0.0, 0.0),
                Vec3::new(64.0, 64.0, 0.0),
                Vec3::new(0.0, 64.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_side_without_smoothing_is_off() {
        let block = r#""id" "1"
            "material" "DEV/GRID"
            "uaxis" "[1 0 0 0] 0.25"
            "vaxis" "[0 -1 0 0] 0.25""#;
        let side = Side::parse(block).unwrap();
        assert_eq!(side.smoothing, Smoothing::Off);
        assert!(side.vertices.is_empty());
    }

    #[test]
    fn test_side_material_without_path() {
        let block = r#""id" "1"
            "material" "BRICK"
            "uaxis" "[1 0 0 0] 0.25"
            "vaxis" "[0 -1 0 0] 0.25""#;
        assert_eq!(Side::parse(block).unwrap().material, "BRICK");
    }

    #[test]
    fn test_side_missing_material() {
        let block = r#""id" "8"
            "uaxis" "[1 0 0 0] 0.25"
            "vaxis" "[0 -1 0 0] 0.25""#;
        let err = Side::parse(block).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MissingField {
                field: "material",
                ..
            }
        ));
        assert!(err.to_string().contains("side 8"));
    }

    #[test]
    fn test_padded_id() {
        assert_eq!(padded_id("7"), "007");
        assert_eq!(padded_id("42"), "042");
        assert_eq!(padded_id("1234"), "1234");
    }
}
