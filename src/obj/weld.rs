//! Post-processing pass 2: weld duplicate vertex positions.
//!
//! Brush geometry emits every face's corners independently, so shared
//! corners appear once per face. This pass maps positions that quantize to
//! the same 6-decimal key onto a single index and rewrites face references.
//! Texcoord and normal pools are left alone; their indices still point at
//! the original records.

use super::{ObjRecord, Smoothing};
use crate::config::ConvertConfig;
use crate::error::{ConvertError, Result};
use glam::Vec3;
use std::collections::HashMap;

/// Canonical dedup key: each coordinate at fixed 6-decimal precision.
fn position_key(p: Vec3) -> String {
    format!("{:.6} {:.6} {:.6}", p.x, p.y, p.z)
}

/// Weld duplicate positions and rewrite face position indices.
///
/// Deduplicated positions keep first-occurrence order, so welding is
/// idempotent: run on its own output it changes nothing. When
/// `strip_smoothed_normals` is set, faces under a real smoothing group
/// (not `off`, not group `0`) lose their normal index component and the
/// consumer resolves normals itself; flat-shaded faces keep explicit
/// normals.
pub fn weld(records: Vec<ObjRecord>, config: &ConvertConfig) -> Result<Vec<ObjRecord>> {
    let positions: Vec<Vec3> = records
        .iter()
        .filter_map(|record| match record {
            ObjRecord::Position(p) => Some(*p),
            _ => None,
        })
        .collect();

    // First-occurrence index per canonical key. The map is lookup-only;
    // output order comes from the `unique` list.
    let mut index_by_key: HashMap<String, u32> = HashMap::new();
    let mut unique: Vec<Vec3> = Vec::new();
    for &p in &positions {
        let key = position_key(p);
        if !index_by_key.contains_key(&key) {
            unique.push(p);
            index_by_key.insert(key, unique.len() as u32);
        }
    }

    let mut out = Vec::with_capacity(records.len());
    out.extend(unique.iter().map(|&p| ObjRecord::Position(p)));

    let mut current_smoothing = Smoothing::Off;
    for record in records {
        match record {
            ObjRecord::Position(_) => {}
            ObjRecord::Smoothing(s) => {
                current_smoothing = s;
                out.push(ObjRecord::Smoothing(s));
            }
            ObjRecord::Face(mut vertices) => {
                let strip = config.strip_smoothed_normals && current_smoothing.is_smoothed();
                for vertex in &mut vertices {
                    let old = vertex
                        .position
                        .checked_sub(1)
                        .and_then(|i| positions.get(i as usize))
                        .ok_or(ConvertError::BadFaceIndex {
                            index: vertex.position,
                        })?;
                    vertex.position = index_by_key[&position_key(*old)];
                    if strip {
                        vertex.normal = None;
                    }
                }
                out.push(ObjRecord::Face(vertices));
            }
            other => out.push(other),
        }
    }

    Ok(out)
}
