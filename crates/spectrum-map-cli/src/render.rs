//! Raster output: heatmap frames, GIF animation, and the convergence plot.
//!
//! The heatmap frame mirrors the classic survey view: the sparse measured
//! map on the left, the interpolated map on the right with the estimated
//! peak marked. Grid cell `[ix, iy]` is drawn with x growing rightward and
//! y growing upward (origin at the lower-left), matching the real-world
//! axes rather than image row order.

use anyhow::{Context, Result};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};
use ndarray::Array2;
use spectrum_map::PeakEstimate;
use std::fs::File;
use std::path::Path;

const UNSET_CELL: Rgba<u8> = Rgba([40, 40, 40, 255]);
const PANEL_GAP: u32 = 2;

/// Jet-style colormap over `t` in `[0, 1]`.
fn jet(t: f64) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    let r = channel(1.5 - (4.0 * t - 3.0).abs());
    let g = channel(1.5 - (4.0 * t - 2.0).abs());
    let b = channel(1.5 - (4.0 * t - 1.0).abs());
    Rgba([r, g, b, 255])
}

/// Finite value range across the given maps, `None` if nothing is finite.
fn finite_range(maps: &[&Array2<f64>]) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    for map in maps {
        for &v in map.iter().filter(|v| v.is_finite()) {
            range = Some(match range {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
    }
    range
}

fn paint_panel(
    img: &mut RgbaImage,
    map: &Array2<f64>,
    range: (f64, f64),
    origin_px: u32,
    cell_scale: u32,
) {
    let (cells_x, cells_y) = map.dim();
    let (lo, hi) = range;
    let span = (hi - lo).max(f64::MIN_POSITIVE);
    for ix in 0..cells_x {
        for iy in 0..cells_y {
            let value = map[[ix, iy]];
            let color = if value.is_finite() {
                jet((value - lo) / span)
            } else {
                UNSET_CELL
            };
            // y grows upward: cell row iy lands near the image bottom for iy = 0.
            let px0 = origin_px + ix as u32 * cell_scale;
            let py0 = (cells_y - 1 - iy) as u32 * cell_scale;
            for dx in 0..cell_scale {
                for dy in 0..cell_scale {
                    img.put_pixel(px0 + dx, py0 + dy, color);
                }
            }
        }
    }
}

fn mark_peak(img: &mut RgbaImage, peak: &PeakEstimate, cells_y: usize, origin_px: u32, cell_scale: u32) {
    let white = Rgba([255, 255, 255, 255]);
    let px0 = origin_px + peak.index.0 as u32 * cell_scale;
    let py0 = (cells_y - 1 - peak.index.1) as u32 * cell_scale;
    for d in 0..cell_scale {
        img.put_pixel(px0 + d, py0 + d, white);
        img.put_pixel(px0 + d, py0 + cell_scale - 1 - d, white);
    }
}

/// Renders one survey frame: measured map left, interpolated map right.
///
/// `dense` may be absent before the first successful refresh; its panel is
/// then drawn entirely unset.
pub fn render_frame(
    sparse: &Array2<f64>,
    dense: Option<&Array2<f64>>,
    peak: Option<&PeakEstimate>,
    cell_scale: u32,
) -> RgbaImage {
    let (cells_x, cells_y) = sparse.dim();
    let panel_w = cells_x as u32 * cell_scale;
    let height = cells_y as u32 * cell_scale;
    let mut img = RgbaImage::from_pixel(panel_w * 2 + PANEL_GAP, height, UNSET_CELL);

    let mut maps: Vec<&Array2<f64>> = vec![sparse];
    if let Some(dense) = dense {
        maps.push(dense);
    }
    let Some(range) = finite_range(&maps) else {
        return img;
    };

    paint_panel(&mut img, sparse, range, 0, cell_scale);
    if let Some(dense) = dense {
        let origin = panel_w + PANEL_GAP;
        paint_panel(&mut img, dense, range, origin, cell_scale);
        if let Some(peak) = peak {
            mark_peak(&mut img, peak, cells_y, origin, cell_scale);
        }
    }
    img
}

/// Writes a frame as PNG.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Composes the collected frames into a looping GIF.
pub fn compose_gif(frames: Vec<RgbaImage>, path: &Path, delay_ms: u32) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut encoder = GifEncoder::new(file);
    encoder.set_repeat(Repeat::Infinite)?;
    let delay = Delay::from_numer_denom_ms(delay_ms, 1);
    for frame in frames {
        encoder.encode_frame(Frame::from_parts(frame, 0, 0, delay))?;
    }
    Ok(())
}

/// Plots the peak-to-transmitter distance against refresh step.
pub fn plot_distances(distances: &[f64], path: &Path) -> Result<()> {
    const WIDTH: u32 = 800;
    const HEIGHT: u32 = 600;
    const MARGIN: u32 = 60;

    let mut img = RgbaImage::from_pixel(WIDTH, HEIGHT, Rgba([255, 255, 255, 255]));
    let axis = Rgba([0, 0, 0, 255]);
    let line = Rgba([31, 119, 180, 255]);

    let x0 = MARGIN as i64;
    let y0 = (HEIGHT - MARGIN) as i64;
    let x1 = (WIDTH - MARGIN) as i64;
    let y1 = MARGIN as i64;
    draw_line(&mut img, (x0, y0), (x1, y0), axis);
    draw_line(&mut img, (x0, y0), (x0, y1), axis);

    if distances.is_empty() {
        return save_png(&img, path);
    }

    let max_distance = distances.iter().cloned().fold(0.0_f64, f64::max).max(1e-9) * 1.1;
    let steps = distances.len().max(2) - 1;
    let to_px = |step: usize, distance: f64| {
        let fx = step as f64 / steps as f64;
        let fy = (distance / max_distance).clamp(0.0, 1.0);
        (
            x0 + (fx * (x1 - x0) as f64).round() as i64,
            y0 - (fy * (y0 - y1) as f64).round() as i64,
        )
    };

    let mut prev = None;
    for (step, &distance) in distances.iter().enumerate() {
        let point = to_px(step, distance);
        if let Some(prev) = prev {
            draw_line(&mut img, prev, point, line);
        }
        // Small square marker per refresh step.
        for dx in -1..=1_i64 {
            for dy in -1..=1_i64 {
                put_pixel_checked(&mut img, point.0 + dx, point.1 + dy, line);
            }
        }
        prev = Some(point);
    }

    save_png(&img, path)
}

fn put_pixel_checked(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line segment.
fn draw_line(img: &mut RgbaImage, from: (i64, i64), to: (i64, i64), color: Rgba<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - from.0).abs();
    let dy = -(to.1 - from.1).abs();
    let sx = if from.0 < to.0 { 1 } else { -1 };
    let sy = if from.1 < to.1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel_checked(img, x, y, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
