//! Typed OBJ records and text rendering.
//!
//! The emitter and both post-processing passes exchange a flat record
//! stream instead of raw text. Rendering writes the line-oriented OBJ
//! format: `v`/`vt`/`vn` pools, `usemtl`/`g`/`s` directives, and `f`
//! records with 1-based indices into the three pools.

pub mod regroup;
pub mod weld;

use glam::Vec3;
use std::fmt::{self, Write};

/// Smoothing-group directive value.
///
/// `Off` and group `0` both mean flat shading but render differently
/// (`s off` vs `s 0`); only groups above zero are real smoothing groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Smoothing {
    /// Flat shading (`s off`).
    Off,
    /// Numbered group; `0` is the flat sentinel.
    Group(u32),
}

impl Smoothing {
    /// Whether faces under this directive share normal interpolation.
    pub fn is_smoothed(self) -> bool {
        matches!(self, Smoothing::Group(n) if n != 0)
    }
}

impl fmt::Display for Smoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Smoothing::Off => write!(f, "off"),
            Smoothing::Group(n) => write!(f, "{n}"),
        }
    }
}

/// One vertex reference of a face: 1-based indices into the position,
/// texcoord, and normal pools. The normal index is optional because the
/// weld pass may drop it for smoothed faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: u32,
    pub texcoord: u32,
    pub normal: Option<u32>,
}

impl fmt::Display for FaceVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.normal {
            Some(normal) => write!(f, "{}/{}/{}", self.position, self.texcoord, normal),
            None => write!(f, "{}/{}", self.position, self.texcoord),
        }
    }
}

/// One line of the output mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjRecord {
    /// `v x y z` position record.
    Position(Vec3),
    /// `vt u v` texture-coordinate record.
    Texcoord([f32; 2]),
    /// `vn x y z` normal record.
    Normal(Vec3),
    /// `usemtl name` material directive.
    UseMtl(String),
    /// `g name` group directive.
    Group(String),
    /// `s id|off` smoothing directive.
    Smoothing(Smoothing),
    /// `f i/j/k ...` face record.
    Face(Vec<FaceVertex>),
}

impl fmt::Display for ObjRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjRecord::Position(p) => write!(f, "v {} {} {}", p.x, p.y, p.z),
            ObjRecord::Texcoord([u, v]) => write!(f, "vt {u} {v}"),
            ObjRecord::Normal(n) => write!(f, "vn {} {} {}", n.x, n.y, n.z),
            ObjRecord::UseMtl(name) => write!(f, "usemtl {name}"),
            ObjRecord::Group(name) => write!(f, "g {name}"),
            ObjRecord::Smoothing(s) => write!(f, "s {s}"),
            ObjRecord::Face(vertices) => {
                write!(f, "f")?;
                for vertex in vertices {
                    write!(f, " {vertex}")?;
                }
                Ok(())
            }
        }
    }
}

/// Render a record stream as OBJ text, one record per line.
pub fn render(records: &[ObjRecord]) -> String {
    let mut out = String::with_capacity(records.len() * 32);
    for record in records {
        writeln!(out, "{record}").unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_display() {
        assert_eq!(
            ObjRecord::Position(Vec3::new(1.0, 2.5, -3.0)).to_string(),
            "v 1 2.5 -3"
        );
        assert_eq!(ObjRecord::Texcoord([0.5, -1.0]).to_string(), "vt 0.5 -1");
        assert_eq!(
            ObjRecord::Normal(Vec3::new(0.0, 1.0, 0.0)).to_string(),
            "vn 0 1 0"
        );
        assert_eq!(
            ObjRecord::UseMtl("BRICK".to_string()).to_string(),
            "usemtl BRICK"
        );
        assert_eq!(ObjRecord::Group("BRICK".to_string()).to_string(), "g BRICK");
    }

    #[test]
    fn test_smoothing_display() {
        assert_eq!(ObjRecord::Smoothing(Smoothing::Off).to_string(), "s off");
        assert_eq!(
            ObjRecord::Smoothing(Smoothing::Group(0)).to_string(),
            "s 0"
        );
        assert_eq!(
            ObjRecord::Smoothing(Smoothing::Group(5)).to_string(),
            "s 5"
        );
    }

    #[test]
    fn test_smoothing_flat_sentinels() {
        assert!(!Smoothing::Off.is_smoothed());
        assert!(!Smoothing::Group(0).is_smoothed());
        assert!(Smoothing::Group(1).is_smoothed());
    }

    #[test]
    fn test_face_display() {
        let full = FaceVertex {
            position: 4,
            texcoord: 4,
            normal: Some(4),
        };
        let stripped = FaceVertex {
            position: 2,
            texcoord: 3,
            normal: None,
        };
        assert_eq!(
            ObjRecord::Face(vec![full, stripped]).to_string(),
            "f 4/4/4 2/3"
        );
    }

    #[test]
    fn test_render_lines() {
        let records = vec![
            ObjRecord::Position(Vec3::ZERO),
            ObjRecord::Smoothing(Smoothing::Off),
        ];
        assert_eq!(render(&records), "v 0 0 0\ns off\n");
    }
}
