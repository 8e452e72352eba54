//! Unity Asset Parser CLI
//!
//! Command-line interface for decoding Unity assets and exporting them to
//! glTF.

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};

use unity_asset::{DecodeOptions, GlbOptions, decode, merge_decoration, to_glb};

#[derive(Parser)]
#[command(name = "unity_asset")]
#[command(about = "A Rust-based Unity asset decoder and glTF exporter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a bundle/SerializedFile/.unitypackage and summarize its object graph
    Inspect {
        /// Input file path
        input: PathBuf,
    },

    /// Decode a bundle and export it as a glTF 2.0 GLB
    ToGlb {
        /// Input file path
        input: PathBuf,

        /// Output .glb path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Decode a base bundle and a decoration bundle, splice the decoration
    /// onto a named bone, then export the merged scene as GLB
    Merge {
        /// Base bundle file path
        base: PathBuf,

        /// Decoration bundle file path
        decoration: PathBuf,

        /// Name of the GameObject whose Transform the decoration attaches to
        #[arg(short, long)]
        bone: String,

        /// Output .glb path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { input } => inspect_command(input),
        Commands::ToGlb { input, output } => to_glb_command(input, output),
        Commands::Merge {
            base,
            decoration,
            bone,
            output,
        } => merge_command(base, decoration, bone, output),
    }
}

fn inspect_command(input: PathBuf) -> Result<()> {
    let bytes = std::fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
    let context = decode(bytes, &DecodeOptions::default()).with_context(|| format!("decoding {}", input.display()))?;

    println!("unity version: {}", context.unity_version);
    println!("sources: {}", context.sources.join(", "));
    println!("game objects: {}", context.scene.game_objects.len());
    println!("transforms: {}", context.scene.transforms.len());
    println!("mesh filters: {}", context.scene.mesh_filters.len());
    println!("mesh renderers: {}", context.scene.mesh_renderers.len());
    println!("materials: {}", context.scene.materials.len());
    println!("textures: {}", context.scene.textures.len());
    println!("meshes: {}", context.scene.meshes.len());

    if !context.scene.warnings.is_empty() {
        println!("warnings:");
        for w in &context.scene.warnings {
            println!("  path_id {}: {}", w.path_id, w.message);
        }
    }

    Ok(())
}

fn to_glb_command(input: PathBuf, output: PathBuf) -> Result<()> {
    let bytes = std::fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
    let context = decode(bytes, &DecodeOptions::default()).with_context(|| format!("decoding {}", input.display()))?;
    let glb = to_glb(&context, &GlbOptions::default()).context("exporting glTF")?;
    std::fs::write(&output, glb).with_context(|| format!("writing {}", output.display()))?;

    println!("wrote {}", output.display());
    Ok(())
}

fn merge_command(base: PathBuf, decoration: PathBuf, bone: String, output: PathBuf) -> Result<()> {
    let base_bytes = std::fs::read(&base).with_context(|| format!("reading {}", base.display()))?;
    let mut context = decode(base_bytes, &DecodeOptions::default()).with_context(|| format!("decoding {}", base.display()))?;

    let decoration_bytes =
        std::fs::read(&decoration).with_context(|| format!("reading {}", decoration.display()))?;

    if !merge_decoration(&mut context, decoration_bytes, &bone) {
        bail!("failed to merge decoration onto bone '{bone}': bone not found or decoration failed to decode");
    }

    let glb = to_glb(&context, &GlbOptions::default()).context("exporting glTF")?;
    std::fs::write(&output, glb).with_context(|| format!("writing {}", output.display()))?;

    println!("wrote {}", output.display());
    Ok(())
}
