//! UV projection, flat normals, and coordinate conversion.

use crate::config::ConvertConfig;
use crate::vmf::UvAxis;
use glam::Vec3;

/// Cross products shorter than this are treated as zero-length.
const DEGENERATE_EPSILON: f32 = 1e-10;

/// Remap a map-space point (right-handed, Z-up) into mesh space (Y-up):
/// `(x, y, z) -> (x*s, z*s, -y*s)`. Normals convert with scale 1.
pub fn to_target(p: Vec3, scale: f32) -> Vec3 {
    Vec3::new(p.x * scale, p.z * scale, -p.y * scale)
}

/// Project a map-space point onto one texture axis.
///
/// The projection normalizes against the configured texel density
/// (`texel_density_tex` pixels per `texel_density_units` map units) and
/// rescales by the real texture size when one is known. At
/// `tex_size == texel_density_tex` the rescale is the identity, so the
/// resolution-aware and fallback paths agree at the default resolution.
/// The axis `scale` field is intentionally not part of the formula.
pub fn project(p: Vec3, axis: &UvAxis, tex_size: f32, config: &ConvertConfig) -> f32 {
    let raw = p.dot(axis.dir) / config.texel_density_units
        + axis.shift / config.texel_density_tex;
    raw * config.texel_density_tex / tex_size
}

/// Flat face normal from the first three vertices: `cross(B-A, C-A)`,
/// normalized. Valid for any convex planar face with non-collinear leading
/// vertices. Returns `None` when the cross product is near zero, so the
/// caller can fail with a degenerate-face error instead of propagating NaN.
pub fn face_normal(vertices: &[Vec3]) -> Option<Vec3> {
    let [a, b, c] = *vertices.first_chunk::<3>()?;
    let cross = (b - a).cross(c - a);
    if cross.length_squared() < DEGENERATE_EPSILON {
        return None;
    }
    Some(cross.normalize())
}
