use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use topology_terrain::config::{TerrainFile, MAX_DENSITY};
use topology_terrain::lore::{self, LoreProvider};
use topology_terrain::viewer::{self, ViewerOptions};
use topology_terrain::{ascii, export, terrain};

#[derive(Parser, Debug)]
#[command(name = "topology_terrain")]
#[command(about = "Generate connected maze terrain bitmaps")]
struct Args {
    /// Width of the terrain in pixels (minimum 20)
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the terrain in pixels (minimum 20)
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Wall density 0-100; higher means smaller rooms
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=MAX_DENSITY as i64))]
    density: Option<u32>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file; command-line values take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write topology-terrain-<W>x<H>.png into this directory
    #[arg(short = 'o', long)]
    export: Option<PathBuf>,

    /// Print an ASCII preview
    #[arg(long)]
    ascii: bool,

    /// Maximum preview width in characters
    #[arg(long, default_value = "100")]
    ascii_columns: usize,

    /// Request lore for the terrain from the configured model server
    #[arg(long)]
    lore: bool,

    /// Save requested lore as Markdown (implies --lore)
    #[arg(long)]
    lore_out: Option<PathBuf>,

    /// Open the interactive viewer
    #[arg(long)]
    view: bool,

    /// Viewer magnification (1-16)
    #[arg(short, long)]
    zoom: Option<usize>,
}

impl Args {
    /// Layer command-line values over the file (or defaults).
    fn settings(&self) -> Result<TerrainFile, Box<dyn Error>> {
        let mut file = match &self.config {
            Some(path) => TerrainFile::load(path)?,
            None => TerrainFile::default(),
        };

        if let Some(width) = self.width {
            file.terrain.width = width;
        }
        if let Some(height) = self.height {
            file.terrain.height = height;
        }
        if let Some(density) = self.density {
            file.terrain.density = density;
        }
        if self.seed.is_some() {
            file.seed = self.seed;
        }
        if let Some(zoom) = self.zoom {
            file.zoom = zoom;
        }
        Ok(file)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    let settings = args.settings()?;

    if args.view {
        info!("Launching viewer");
        viewer::run_viewer(ViewerOptions {
            terrain: settings.terrain,
            seed: settings.seed,
            zoom: settings.clamped_zoom(),
            lore: settings.lore,
            export_dir: args.export.unwrap_or_else(|| PathBuf::from(".")),
        })?;
        return Ok(());
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    println!("Generating terrain with seed: {}", seed);
    let result = terrain::generate_seeded(&settings.terrain, seed);

    let report = terrain::analyze(&result);
    println!("{}", report);

    if args.ascii {
        print!("{}", ascii::render_ascii(&result, args.ascii_columns));
    }

    if let Some(ref dir) = args.export {
        match export::export_png(&result, dir) {
            Ok(path) => println!("Exported terrain to: {}", path.display()),
            Err(e) => error!("Failed to export terrain: {}", e),
        }
    }

    if args.lore || args.lore_out.is_some() {
        println!("Requesting lore...");
        let provider = LoreProvider::new(settings.lore);
        let runtime = tokio::runtime::Runtime::new()?;
        let text = runtime.block_on(provider.request_lore(result.width, result.height));
        println!("\n{}\n", text);

        if let Some(ref path) = args.lore_out {
            match lore::export_lore_markdown(&text, result.width, result.height, path) {
                Ok(()) => println!("Saved lore to: {}", path.display()),
                Err(e) => error!("Failed to save lore: {}", e),
            }
        }
    }

    Ok(())
}
