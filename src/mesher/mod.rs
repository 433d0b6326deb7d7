//! Mesh emission from parsed brush geometry.
//!
//! This module walks every solid and side of a document in document order
//! and emits the intermediate OBJ record stream that the post-processing
//! passes consume.

pub mod geometry;

use crate::config::ConvertConfig;
use crate::error::{ConvertError, Result};
use crate::obj::{self, FaceVertex, ObjRecord};
use crate::textures::TextureResolver;
use crate::vmf::{self, Side};
use glam::Vec3;
use log::{debug, info};

/// Accumulates output records and hands out indices from the three
/// parallel, 1-based index spaces (position/texcoord/normal).
///
/// The spaces advance in lockstep: one shared counter, one index per
/// emitted vertex. No deduplication happens here; that is the weld pass.
pub struct MeshBuilder {
    records: Vec<ObjRecord>,
    count: u32,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            count: 0,
        }
    }

    /// Append one position/texcoord/normal triple and return the freshly
    /// assigned 1-based index, shared by all three spaces.
    pub fn push_vertex(&mut self, position: Vec3, texcoord: [f32; 2], normal: Vec3) -> u32 {
        self.records.push(ObjRecord::Position(position));
        self.records.push(ObjRecord::Texcoord(texcoord));
        self.records.push(ObjRecord::Normal(normal));
        self.count += 1;
        self.count
    }

    /// Append a directive or face record.
    pub fn push(&mut self, record: ObjRecord) {
        self.records.push(record);
    }

    /// Number of vertices emitted so far.
    pub fn vertex_count(&self) -> u32 {
        self.count
    }

    pub fn finish(self) -> Vec<ObjRecord> {
        self.records
    }
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The main converter.
pub struct Mesher<R> {
    resolver: R,
    config: ConvertConfig,
}

impl<R: TextureResolver> Mesher<R> {
    /// Create a mesher with default configuration.
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            config: ConvertConfig::default(),
        }
    }

    /// Create a mesher with custom configuration.
    pub fn with_config(resolver: R, config: ConvertConfig) -> Self {
        Self { resolver, config }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Run the full pipeline: emit, regroup by material, weld positions.
    pub fn mesh(&self, document: &str) -> Result<Vec<ObjRecord>> {
        let emitted = self.emit(document)?;
        let grouped = obj::regroup::regroup(emitted, &self.config);
        obj::weld::weld(grouped, &self.config)
    }

    /// Emit the intermediate record stream without post-processing.
    ///
    /// Every solid and side is visited in document order. Any malformed
    /// block, missing field, or degenerate face aborts the document: a
    /// partially emitted side would break index-space consistency.
    pub fn emit(&self, document: &str) -> Result<Vec<ObjRecord>> {
        let mut builder = MeshBuilder::new();
        let mut solid_count = 0u32;
        let mut side_count = 0u32;

        for solid in vmf::solids(document) {
            let solid = solid?;
            let solid_id = vmf::block_id(solid).unwrap_or("?");
            debug!("converting Solid_{}", vmf::padded_id(solid_id));
            solid_count += 1;

            for side in vmf::sides(solid) {
                let side = Side::parse(side?)?;
                self.emit_side(&side, &mut builder)?;
                side_count += 1;
            }
        }

        info!(
            "emitted {} vertices from {} solids ({} sides)",
            builder.vertex_count(),
            solid_count,
            side_count
        );
        Ok(builder.finish())
    }

    fn emit_side(&self, side: &Side, builder: &mut MeshBuilder) -> Result<()> {
        debug!(
            "  Side_{}: material {:?}, {} vertices",
            vmf::padded_id(&side.id),
            side.material,
            side.vertices.len()
        );

        if side.vertices.len() < 3 {
            return Err(ConvertError::DegenerateFace {
                side_id: side.id.clone(),
                reason: "fewer than 3 vertices",
            });
        }

        // One flat normal for the whole side, from map space into mesh space.
        let normal = geometry::face_normal(&side.vertices).ok_or_else(|| {
            ConvertError::DegenerateFace {
                side_id: side.id.clone(),
                reason: "zero-length cross product",
            }
        })?;
        let out_normal = geometry::to_target(normal, 1.0);

        let (tex_w, tex_h) = match self.resolver.resolve(&side.material) {
            Some((w, h)) => (w as f32, h as f32),
            None => {
                debug!(
                    "  Side_{}: no texture resolution for {:?}, using default texel density",
                    vmf::padded_id(&side.id),
                    side.material
                );
                (self.config.texel_density_tex, self.config.texel_density_tex)
            }
        };

        let mut last = 0;
        for &vertex in &side.vertices {
            let u = geometry::project(vertex, &side.uaxis, tex_w, &self.config);
            // OBJ texture space is top-down.
            let v = -geometry::project(vertex, &side.vaxis, tex_h, &self.config);
            last = builder.push_vertex(
                geometry::to_target(vertex, self.config.unit_scale),
                [u, v],
                out_normal,
            );
        }

        builder.push(ObjRecord::UseMtl(side.material.clone()));
        builder.push(ObjRecord::Smoothing(side.smoothing));

        // Face references run from the newest index back to the side's
        // first, all three spaces sharing the same running counter value.
        let first = last - side.vertices.len() as u32 + 1;
        let face = (first..=last)
            .rev()
            .map(|i| FaceVertex {
                position: i,
                texcoord: i,
                normal: Some(i),
            })
            .collect();
        builder.push(ObjRecord::Face(face));
        Ok(())
    }
}
