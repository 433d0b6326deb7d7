//! VMF Mesher CLI
//!
//! Convert VMF brush geometry into Wavefront OBJ meshes.

use clap::Parser;
use log::warn;
use std::path::PathBuf;
use vmf_mesher::{
    render, ConvertConfig, Mesher, NoTextures, ObjRecord, TextureResolver, VtfTextureResolver,
};

#[derive(Parser)]
#[command(name = "vmf-mesher")]
#[command(author, version, about = "Convert VMF brush geometry into Wavefront OBJ meshes", long_about = None)]
struct Cli {
    /// Input VMF files; anything without a .vmf extension is skipped
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON config file with conversion settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for output OBJ files (default: next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Material to exclude; repeatable, replaces the config's exclusion set
    #[arg(short = 'x', long = "exclude", value_name = "MATERIAL")]
    exclude: Vec<String>,

    /// Uniform scale applied to output positions
    #[arg(long)]
    unit_scale: Option<f32>,

    /// Game directory (or any path inside one) for texture-resolution lookup
    #[arg(short, long)]
    texture_root: Option<PathBuf>,

    /// Drop normal indices from faces in a real smoothing group
    #[arg(long)]
    strip_smoothed_normals: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ConvertConfig::from_json_file(path)?,
        None => ConvertConfig::default(),
    };
    if !cli.exclude.is_empty() {
        config.excluded_materials = cli.exclude.clone();
    }
    if let Some(scale) = cli.unit_scale {
        config.unit_scale = scale;
    }
    if cli.strip_smoothed_normals {
        config.strip_smoothed_normals = true;
    }

    let resolver: Box<dyn TextureResolver> = match &cli.texture_root {
        Some(root) => {
            let resolver = VtfTextureResolver::discover(root).ok_or_else(|| {
                format!("no gameinfo.txt found at or above {}", root.display())
            })?;
            Box::new(resolver)
        }
        None => Box::new(NoTextures),
    };
    let mesher = Mesher::with_config(&resolver, config);

    let mut converted = 0usize;
    let mut failures = 0usize;
    for input in &cli.inputs {
        let is_vmf = input
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("vmf"));
        if !is_vmf {
            warn!("skipping non-VMF input {}", input.display());
            continue;
        }

        // A failed document aborts only itself; the batch continues.
        match convert_one(&mesher, input, cli.output_dir.as_deref()) {
            Ok(()) => converted += 1,
            Err(e) => {
                eprintln!("error: {}: {}", input.display(), e);
                failures += 1;
            }
        }
    }

    println!("Done: {} converted, {} failed", converted, failures);
    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn convert_one<R: TextureResolver>(
    mesher: &Mesher<R>,
    input: &std::path::Path,
    output_dir: Option<&std::path::Path>,
) -> vmf_mesher::Result<()> {
    let output = match output_dir {
        Some(dir) => dir.join(input.file_name().unwrap_or_default()).with_extension("obj"),
        None => input.with_extension("obj"),
    };

    println!("Converting {}...", input.display());
    let document = std::fs::read_to_string(input)?;
    let records = mesher.mesh(&document)?;

    let positions = records
        .iter()
        .filter(|r| matches!(r, ObjRecord::Position(_)))
        .count();
    let faces = records
        .iter()
        .filter(|r| matches!(r, ObjRecord::Face(_)))
        .count();
    let materials = records
        .iter()
        .filter(|r| matches!(r, ObjRecord::UseMtl(_)))
        .count();
    println!(
        "  {} welded positions, {} faces, {} materials",
        positions, faces, materials
    );

    vmf_mesher::write_atomic(&output, &render(&records))?;
    println!("  Wrote {}", output.display());
    Ok(())
}
