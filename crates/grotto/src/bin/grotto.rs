//! # GROTTO CLI
//!
//! Builds one cave and prints a summary.
//!
//! ```text
//! grotto --seed "crystal caverns" --width 96 --height 54 --ascii
//! grotto --config cave.toml
//! ```
//!
//! Command line flags override values from the config file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use grotto::procedural::{MapSeed, Tile};
use grotto::{CaveBuilder, CaveConfig, GrottoResult};

/// Procedural cave generator
#[derive(Parser, Debug)]
#[command(name = "grotto")]
#[command(author, version, about = "GROTTO - procedural caves from seed to mesh", long_about = None)]
struct Args {
    /// TOML config file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Seed: integer or any phrase
    #[arg(short = 's', long = "seed")]
    seed: Option<String>,

    /// Map width in cells
    #[arg(short = 'W', long = "width")]
    width: Option<usize>,

    /// Map height in cells
    #[arg(short = 'H', long = "height")]
    height: Option<usize>,

    /// Initial wall percentage (0-100)
    #[arg(short = 'f', long = "fill")]
    fill: Option<u8>,

    /// Print the final grid
    #[arg(short = 'a', long = "ascii")]
    ascii: bool,
}

fn load_config(args: &Args) -> GrottoResult<CaveConfig> {
    let mut config = match &args.config {
        Some(path) => CaveConfig::from_toml_file(path)?,
        None => CaveConfig::default(),
    };

    if let Some(seed) = &args.seed {
        config.seed = MapSeed::from_phrase(seed);
    }
    if let Some(width) = args.width {
        config.generation.width = width;
    }
    if let Some(height) = args.height {
        config.generation.height = height;
    }
    if let Some(fill) = args.fill {
        config.generation.fill_percent = fill;
    }

    Ok(config)
}

fn run(args: &Args) -> GrottoResult<()> {
    let config = load_config(args)?;
    let builder = CaveBuilder::new(config)?;
    let layout = builder.build();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                         GROTTO                               ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("  Seed:          {}", layout.seed);
    println!(
        "  Grid:          {}x{} ({} open, {} wall)",
        layout.grid.width(),
        layout.grid.height(),
        layout.grid.count(Tile::Open),
        layout.grid.count(Tile::Wall)
    );
    println!(
        "  Pruned:        {} wall pockets, {} small rooms",
        layout.prune.wall_regions_removed, layout.prune.room_regions_removed
    );
    println!(
        "  Rooms:         {} ({} passages)",
        layout.rooms.len(),
        layout.rooms.passages().len()
    );
    println!(
        "  Floor mesh:    {} vertices, {} triangles",
        layout.floor.vertex_count(),
        layout.floor.triangle_count()
    );
    println!(
        "  Wall mesh:     {} vertices, {} triangles",
        layout.walls.vertex_count(),
        layout.walls.triangle_count()
    );
    println!("  Outlines:      {}", layout.outlines.len());
    println!(
        "  Connected:     {}",
        if layout.rooms.is_fully_connected() { "yes" } else { "NO" }
    );

    if args.ascii {
        println!();
        print!("{}", layout.grid);
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("grotto: {err}");
            ExitCode::FAILURE
        }
    }
}
