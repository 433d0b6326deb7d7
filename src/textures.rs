//! Texture-resolution lookup for UV normalization.
//!
//! UV projection is resolution-independent when the real texture size of a
//! material is known. Sizes come out of VTF container headers found under
//! a game directory, identified by its `gameinfo.txt` marker file. Lookup
//! failure is never an error; the mesher falls back to the configured
//! texel density.

use std::path::{Path, PathBuf};

/// Resolves a material name to its texture dimensions in pixels.
pub trait TextureResolver {
    /// Return `(width, height)` for a material, or `None` if unknown.
    fn resolve(&self, material: &str) -> Option<(u32, u32)>;
}

impl<T: TextureResolver + ?Sized> TextureResolver for &T {
    fn resolve(&self, material: &str) -> Option<(u32, u32)> {
        (**self).resolve(material)
    }
}

impl<T: TextureResolver + ?Sized> TextureResolver for Box<T> {
    fn resolve(&self, material: &str) -> Option<(u32, u32)> {
        (**self).resolve(material)
    }
}

/// Resolver that never finds a texture; every side uses the default
/// texel density.
pub struct NoTextures;

impl TextureResolver for NoTextures {
    fn resolve(&self, _material: &str) -> Option<(u32, u32)> {
        None
    }
}

/// Marker file identifying a game directory root.
const ROOT_MARKER: &str = "gameinfo.txt";

/// VTF header layout: 4-byte signature, then width/height as u16 LE at
/// fixed offsets.
const VTF_SIGNATURE: &[u8; 4] = b"VTF\0";
const VTF_WIDTH_OFFSET: usize = 16;
const VTF_HEIGHT_OFFSET: usize = 18;

/// Resolver reading texture sizes from `.vtf` files under a game
/// directory's `materials/` tree.
pub struct VtfTextureResolver {
    materials_dir: PathBuf,
}

impl VtfTextureResolver {
    /// Use an explicit materials directory.
    pub fn new<P: Into<PathBuf>>(materials_dir: P) -> Self {
        Self {
            materials_dir: materials_dir.into(),
        }
    }

    /// Find the game directory by walking up from `start` (a file or
    /// directory) until a `gameinfo.txt` marker appears. Returns `None`
    /// when no ancestor is a game directory.
    pub fn discover<P: AsRef<Path>>(start: P) -> Option<Self> {
        let start = start.as_ref();
        let mut dir = if start.is_dir() {
            Some(start)
        } else {
            start.parent()
        };
        while let Some(d) = dir {
            if d.join(ROOT_MARKER).is_file() {
                return Some(Self::new(d.join("materials")));
            }
            dir = d.parent();
        }
        None
    }
}

impl TextureResolver for VtfTextureResolver {
    fn resolve(&self, material: &str) -> Option<(u32, u32)> {
        let mut path = self.materials_dir.join(format!("{material}.vtf"));
        if !path.is_file() {
            // Shipped VTF files are conventionally lowercase.
            path = self.materials_dir.join(format!("{}.vtf", material.to_lowercase()));
        }
        let data = std::fs::read(path).ok()?;
        read_vtf_size(&data)
    }
}

/// Read the width/height pair from a VTF header. Returns `None` for
/// anything that is not a plausible VTF.
pub fn read_vtf_size(data: &[u8]) -> Option<(u32, u32)> {
    if data.len() < VTF_HEIGHT_OFFSET + 2 || &data[..4] != VTF_SIGNATURE {
        return None;
    }
    let width = u16::from_le_bytes([data[VTF_WIDTH_OFFSET], data[VTF_WIDTH_OFFSET + 1]]);
    let height = u16::from_le_bytes([data[VTF_HEIGHT_OFFSET], data[VTF_HEIGHT_OFFSET + 1]]);
    if width == 0 || height == 0 {
        return None;
    }
    Some((width as u32, height as u32))
}
