//! Post-processing pass 1: regroup faces by material.
//!
//! The emitter writes faces in document order, switching materials as it
//! goes. This pass buckets faces under their material so each material
//! appears once in the output, drops faces of excluded materials, and
//! re-emits smoothing directives only where the label changes within a
//! bucket. Vertex pools pass through unfiltered so face indices stay valid.

use super::{FaceVertex, ObjRecord, Smoothing};
use crate::config::ConvertConfig;

/// Regroup a record stream by material, filtering excluded materials.
///
/// Bucket order is first-seen order of each material; face order within a
/// bucket is emission order. Both are deterministic by construction (the
/// buckets are Vec-backed, never hashed).
pub fn regroup(records: Vec<ObjRecord>, config: &ConvertConfig) -> Vec<ObjRecord> {
    let mut positions = Vec::new();
    let mut texcoords = Vec::new();
    let mut normals = Vec::new();
    let mut buckets: Vec<(String, Vec<(Vec<FaceVertex>, Smoothing)>)> = Vec::new();

    let mut current_material: Option<String> = None;
    let mut current_smoothing = Smoothing::Off;

    for record in records {
        match record {
            ObjRecord::Position(_) => positions.push(record),
            ObjRecord::Texcoord(_) => texcoords.push(record),
            ObjRecord::Normal(_) => normals.push(record),
            ObjRecord::UseMtl(name) => current_material = Some(name),
            ObjRecord::Smoothing(s) => current_smoothing = s,
            ObjRecord::Group(_) => {}
            ObjRecord::Face(vertices) => {
                // Faces before the first material directive are dropped,
                // as are faces of excluded materials.
                let Some(material) = &current_material else {
                    continue;
                };
                if config.is_excluded(material) {
                    continue;
                }
                match buckets.iter_mut().find(|(name, _)| name == material) {
                    Some((_, faces)) => faces.push((vertices, current_smoothing)),
                    None => buckets.push((material.clone(), vec![(vertices, current_smoothing)])),
                }
            }
        }
    }

    let face_count: usize = buckets.iter().map(|(_, faces)| faces.len()).sum();
    let mut out =
        Vec::with_capacity(positions.len() + texcoords.len() + normals.len() + face_count * 2);

    out.extend(positions);
    out.extend(texcoords);
    out.extend(normals);

    for (material, faces) in buckets {
        out.push(ObjRecord::Group(material.clone()));
        out.push(ObjRecord::UseMtl(material));

        let mut last_smoothing = None;
        for (vertices, smoothing) in faces {
            if last_smoothing != Some(smoothing) {
                out.push(ObjRecord::Smoothing(smoothing));
                last_smoothing = Some(smoothing);
            }
            out.push(ObjRecord::Face(vertices));
        }
    }

    out
}
