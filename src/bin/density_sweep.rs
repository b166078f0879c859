//! Debug tool for comparing density settings visually
//! Renders the same seed at several densities side by side with labels

use image::{ImageBuffer, Rgb, RgbImage};
use log::info;
use topology_terrain::config::TerrainConfig;
use topology_terrain::export;
use topology_terrain::terrain;

const WIDTH: usize = 160;
const HEIGHT: usize = 160;
const SEED: u64 = 42;
const DENSITIES: [u32; 5] = [0, 25, 50, 75, 100];
const OUTPUT: &str = "density_sweep.png";

fn main() {
    env_logger::init();
    println!("Generating density comparison strip...");

    let mut images: Vec<(String, RgbImage)> = Vec::new();
    for density in DENSITIES {
        let config = TerrainConfig::new(WIDTH, HEIGHT, density);
        let result = terrain::generate_seeded(&config, SEED);
        let report = terrain::analyze(&result);
        println!(
            "  Density {:>3}: room {}px, {} rooms, {:.1}% wall",
            density,
            report.room_size,
            report.rooms,
            report.wall_ratio() * 100.0
        );
        images.push((format!("D {} R {}", density, report.room_size), export::render_image(&result)));
    }

    let strip = create_strip(&images);
    if let Err(e) = strip.save(OUTPUT) {
        eprintln!("Failed to save {}: {}", OUTPUT, e);
        std::process::exit(1);
    }

    info!("Strip is {}x{}", strip.width(), strip.height());
    println!("Saved {}", OUTPUT);
}

fn create_strip(images: &[(String, RgbImage)]) -> RgbImage {
    if images.is_empty() {
        return ImageBuffer::new(1, 1);
    }

    let gap = 4u32;
    let cell_width = images[0].1.width();
    let cell_height = images[0].1.height();
    let label_height = 16u32;

    let strip_width = (cell_width + gap) * images.len() as u32 + gap;
    let strip_height = cell_height + label_height + gap * 2;

    let mut strip: RgbImage = ImageBuffer::from_pixel(strip_width, strip_height, Rgb([60, 60, 70]));

    for (idx, (name, img)) in images.iter().enumerate() {
        let x_offset = gap + idx as u32 * (cell_width + gap);
        let y_offset = gap + label_height;

        for (x, y, pixel) in img.enumerate_pixels() {
            strip.put_pixel(x_offset + x, y_offset + y, *pixel);
        }

        draw_text(&mut strip, x_offset + 2, gap + 4, name);
    }

    strip
}

// 5x7 bitmap glyphs for the label alphabet
fn get_char_bitmap(c: char) -> [u8; 7] {
    match c {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        _ => [0; 7],
    }
}

fn draw_text(img: &mut RgbImage, x: u32, y: u32, text: &str) {
    let color = Rgb([255, 210, 90]);
    let char_width = 6u32;

    for (i, c) in text.chars().enumerate() {
        let cx = x + i as u32 * char_width;
        if cx + 5 >= img.width() {
            break;
        }

        for (row, &bits) in get_char_bitmap(c).iter().enumerate() {
            for col in 0..5 {
                if (bits >> (4 - col)) & 1 == 1 {
                    img.put_pixel(cx + col, y + row as u32, color);
                }
            }
        }
    }
}
