use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use log::{error, info};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use rayon::prelude::*;

use crate::config::{TerrainConfig, MAX_ZOOM, MIN_ZOOM};
use crate::error::ViewerError;
use crate::export;
use crate::lore::{LlmConfig, LoreProvider, LoreSlot, LoreTicket};
use crate::terrain::{self, Cell, GenerationResult};

/// Density change per key press
const DENSITY_STEP: i32 = 5;

fn pack_rgb(color: [u8; 3]) -> u32 {
    ((color[0] as u32) << 16) | ((color[1] as u32) << 8) | color[2] as u32
}

fn cell_pixel(cell: Cell) -> u32 {
    pack_rgb(export::cell_color(cell))
}

/// Scale the terrain into a `0RGB` framebuffer with nearest-neighbour
/// magnification: every cell becomes a solid `scale x scale` square.
pub fn render_buffer(result: &GenerationResult, scale: usize) -> Vec<u32> {
    let scale = scale.clamp(MIN_ZOOM, MAX_ZOOM);
    let out_width = result.width * scale;
    let mut buffer = vec![0u32; out_width * result.height * scale];

    buffer
        .par_chunks_mut(out_width)
        .enumerate()
        .for_each(|(oy, line)| {
            let row = result.grid.row(oy / scale);
            for (cell, block) in row.iter().zip(line.chunks_mut(scale)) {
                block.fill(cell_pixel(*cell));
            }
        });

    buffer
}

/// Everything the viewer needs to launch.
#[derive(Clone, Debug)]
pub struct ViewerOptions {
    pub terrain: TerrainConfig,
    pub seed: Option<u64>,
    pub zoom: usize,
    pub lore: LlmConfig,
    pub export_dir: PathBuf,
}

/// Current terrain plus the lore that belongs to it.
pub struct ViewerState {
    pub config: TerrainConfig,
    pub seed: u64,
    pub result: GenerationResult,
    pub lore: LoreSlot,
}

impl ViewerState {
    pub fn new(config: TerrainConfig, seed: u64) -> Self {
        let result = terrain::generate_seeded(&config, seed);
        let mut lore = LoreSlot::new();
        lore.reset(result.width, result.height);
        Self { config, seed, result, lore }
    }

    /// Replace the terrain. The previous result and its lore are dropped.
    pub fn regenerate(&mut self, seed: u64) {
        self.seed = seed;
        self.result = terrain::generate_seeded(&self.config, seed);
        self.lore.reset(self.result.width, self.result.height);
    }

    /// Move density by `delta` and regenerate with the same seed.
    /// Returns false when density was already at the limit.
    pub fn adjust_density(&mut self, delta: i32) -> bool {
        let next = self.config.with_density_delta(delta);
        if next == self.config {
            return false;
        }
        self.config = next;
        self.regenerate(self.seed);
        true
    }

    fn title(&self, zoom: usize) -> String {
        let lore_state = if self.lore.is_pending() {
            " | lore..."
        } else {
            ""
        };
        format!(
            "Topology Terrain {}x{} | density {} | zoom {}x | seed {}{} - R: new, Up/Down: density, +/-: zoom, S: save, L: lore, Esc: exit",
            self.result.width, self.result.height, self.config.clamped_density(), zoom, self.seed, lore_state
        )
    }
}

fn open_window(state: &ViewerState, zoom: usize) -> Result<Window, ViewerError> {
    let mut window = Window::new(
        &state.title(zoom),
        state.result.width * zoom,
        state.result.height * zoom,
        WindowOptions {
            resize: false,
            scale: minifb::Scale::X1,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(60);
    Ok(window)
}

/// Run the interactive viewer until the window closes or Escape is pressed.
pub fn run_viewer(options: ViewerOptions) -> Result<(), ViewerError> {
    let runtime = tokio::runtime::Runtime::new().map_err(ViewerError::Runtime)?;
    let provider = Arc::new(LoreProvider::new(options.lore.clone()));
    let (lore_tx, lore_rx): (Sender<(LoreTicket, String)>, Receiver<(LoreTicket, String)>) = mpsc::channel();

    let mut zoom = options.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    let mut state = ViewerState::new(options.terrain, options.seed.unwrap_or_else(rand::random));
    let mut window = open_window(&state, zoom)?;
    let mut buffer = render_buffer(&state.result, zoom);

    println!("Viewer started. Controls:");
    println!("  R: Regenerate with a new seed");
    println!("  Up/Down: Density +/-{}", DENSITY_STEP);
    println!("  +/-: Zoom ({}x to {}x)", MIN_ZOOM, MAX_ZOOM);
    println!("  S: Save PNG to {}", options.export_dir.display());
    println!("  L: Request lore");
    println!("  Esc: Exit");

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let mut needs_redraw = false;
        let mut new_zoom = zoom;

        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            state.regenerate(rand::random());
            println!("Regenerated with seed: {}", state.seed);
            needs_redraw = true;
        }
        if window.is_key_pressed(Key::Up, KeyRepeat::Yes) {
            needs_redraw |= state.adjust_density(DENSITY_STEP);
        }
        if window.is_key_pressed(Key::Down, KeyRepeat::Yes) {
            needs_redraw |= state.adjust_density(-DENSITY_STEP);
        }
        if window.is_key_pressed(Key::Equal, KeyRepeat::No) || window.is_key_pressed(Key::NumPadPlus, KeyRepeat::No) {
            new_zoom = (zoom + 1).min(MAX_ZOOM);
        }
        if window.is_key_pressed(Key::Minus, KeyRepeat::No) || window.is_key_pressed(Key::NumPadMinus, KeyRepeat::No) {
            new_zoom = zoom.saturating_sub(1).max(MIN_ZOOM);
        }

        if window.is_key_pressed(Key::S, KeyRepeat::No) {
            match export::export_png(&state.result, &options.export_dir) {
                Ok(path) => println!("Saved {}", path.display()),
                Err(e) => error!("Failed to export terrain: {}", e),
            }
        }

        if window.is_key_pressed(Key::L, KeyRepeat::No) {
            if let Some(ticket) = state.lore.begin_request() {
                let provider = Arc::clone(&provider);
                let tx = lore_tx.clone();
                runtime.spawn(async move {
                    let text = provider.request_lore(ticket.width, ticket.height).await;
                    // The viewer may have exited already; nothing to deliver to.
                    let _ = tx.send((ticket, text));
                });
                needs_redraw = true;
            }
        }

        while let Ok((ticket, text)) = lore_rx.try_recv() {
            if state.lore.accept(ticket, text) {
                println!("\n{}\n", state.lore.text().unwrap_or_default());
                needs_redraw = true;
            } else {
                info!("Discarded superseded lore request {} for {}x{} terrain", ticket.request, ticket.width, ticket.height);
            }
        }

        if new_zoom != zoom {
            zoom = new_zoom;
            window = open_window(&state, zoom)?;
            needs_redraw = true;
        }

        if needs_redraw {
            window.set_title(&state.title(zoom));
            buffer = render_buffer(&state.result, zoom);
        }

        window.update_with_buffer(&buffer, state.result.width * zoom, state.result.height * zoom)?;
    }

    Ok(())
}
