//! segapvr CLI - Command-line tool for decoding Sega PVR textures.
//!
//! This is the main entry point for the segapvr command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::{MatchOptions, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::Level;
use walkdir::WalkDir;

use segapvr::prelude::*;
use segapvr::pvr::{mip_maps_count_from_width, read_header};

/// segapvr - Sega PVR texture decoding tool
#[derive(Parser)]
#[command(name = "segapvr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Diagnostic log level (error, warn, info, debug, trace)
    #[arg(long, env = "SEGAPVR_LOG", default_value = "warn", global = true)]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the headers of a PVR file
    Info {
        /// Input PVR file
        #[arg(short, long, env = "SEGAPVR_INPUT")]
        input: PathBuf,
    },

    /// Convert a PVR file to PNG
    Convert {
        /// Input PVR file
        #[arg(short, long, env = "SEGAPVR_INPUT")]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long, env = "SEGAPVR_OUTPUT")]
        output: PathBuf,
    },

    /// Convert every PVR file under a directory to PNG
    Batch {
        /// Input directory
        #[arg(short, long, env = "SEGAPVR_INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, env = "SEGAPVR_OUTPUT")]
        output: PathBuf,

        /// File name pattern (glob-style, case-insensitive)
        #[arg(short, long, default_value = "*.pvr")]
        pattern: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }
        Commands::Convert { input, output } => {
            cmd_convert(&input, &output)?;
        }
        Commands::Batch { input, output, pattern } => {
            cmd_batch(&input, &output, &pattern)?;
        }
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;

    if !is_pvr(&data) {
        anyhow::bail!("Input file is not a PVR texture");
    }

    let parsed = read_header(&data).context("Failed to parse PVR header")?;
    let header = &parsed.texture;

    println!("File: {}", input.display());
    if let Some(gbix) = &parsed.global_index {
        println!("Global index: {:#x}", gbix.global_index.get());
    }
    println!("Size: {}x{}", header.width(), header.height());
    println!("Data size: {} bytes", header.texture_data_size.get());
    println!("Payload offset: {}", parsed.payload_offset);

    match header.pixel_format() {
        Some(format) => println!("Pixel format: {}", format),
        None => println!("Pixel format: unsupported ({:#04x})", header.format_mask()),
    }

    match header.texture_type() {
        Ok(ty) => {
            println!("Texture type: {} ({:#04x})", ty, ty.mask());
            if ty.has_mip_maps() {
                println!("Mip levels: {}", mip_maps_count_from_width(header.width() as u32));
            }
            if let Some(entries) = ty.codebook_size(header.width()) {
                println!("Codebook entries: {}", entries);
            }
        }
        Err(_) => println!("Texture type: unsupported ({:#04x})", header.type_mask()),
    }

    Ok(())
}

fn cmd_convert(input: &Path, output: &Path) -> Result<()> {
    println!("Converting: {} -> {}", input.display(), output.display());

    let start = Instant::now();
    let texture = load_pvr_file(input).context("Failed to decode PVR file")?;
    save_png(&texture, output)?;

    println!(
        "Decoded {}x{} in {:?}",
        texture.width(),
        texture.height(),
        start.elapsed()
    );

    Ok(())
}

fn cmd_batch(input: &Path, output: &Path, pattern: &str) -> Result<()> {
    let pattern = Pattern::new(pattern).context("Invalid file name pattern")?;
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| pattern.matches_with(name, options))
        })
        .map(|e| e.into_path())
        .collect();

    println!("Converting {} files to {}...", files.len(), output.display());

    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let errors = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        let relative = path.strip_prefix(input).unwrap_or(path);
        let output_path = output.join(relative).with_extension("png");

        if let Err(e) = convert_one(path, &output_path) {
            pb.suspend(|| eprintln!("Error converting {}: {:#}", path.display(), e));
            errors.fetch_add(1, Ordering::Relaxed);
        }

        pb.inc(1);
    });

    pb.finish_with_message("Done");

    let errors = errors.into_inner();
    println!(
        "Converted {} files in {:?} ({} errors)",
        files.len() - errors,
        start.elapsed(),
        errors
    );

    Ok(())
}

fn convert_one(input: &Path, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    let texture = load_pvr_file(input).context("Failed to decode PVR file")?;
    save_png(&texture, output)
}

fn save_png(texture: &DecodedTexture, output: &Path) -> Result<()> {
    image::save_buffer(
        output,
        texture.rgba(),
        texture.width(),
        texture.height(),
        image::ExtendedColorType::Rgba8,
    )
    .with_context(|| format!("Failed to write {}", output.display()))
}
