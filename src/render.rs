//! Rasterization
//!
//! Turns the elevation grid into pixels, draws the planned labels on a
//! transparent overlay, composites, and sharpens. Everything here is a thin
//! shell over the image/imageproc stack; all decisions about what to draw
//! were made upstream.

use std::error::Error;
use std::fs;
use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rayon::prelude::*;

use crate::color::ColorGradient;
use crate::grid::Grid;
use crate::labels::LabelPlacement;

/// Sharpening convolution; weights sum to one so flat areas pass through.
const SHARPEN_KERNEL: [f32; 9] = [
    -2.0 / 16.0, -2.0 / 16.0, -2.0 / 16.0,
    -2.0 / 16.0, 32.0 / 16.0, -2.0 / 16.0,
    -2.0 / 16.0, -2.0 / 16.0, -2.0 / 16.0,
];

const OUTLINE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 180]);
const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Load the label font from a TTF file.
pub fn load_font(path: &Path) -> Result<FontVec, Box<dyn Error>> {
    let bytes = fs::read(path)
        .map_err(|e| format!("cannot read font {}: {}", path.display(), e))?;
    let font = FontVec::try_from_vec(bytes)
        .map_err(|e| format!("cannot parse font {}: {}", path.display(), e))?;
    Ok(font)
}

/// Measure a single text line at a given pixel height, for label planning.
pub fn line_measurer(font: &FontVec) -> impl Fn(&str, u32) -> i32 + '_ {
    move |line, px| text_size(PxScale::from(px as f32), font, line).0 as i32
}

/// Map every cell through the gradient into an opaque RGBA raster.
///
/// Rows are independent, so they are colored in parallel.
pub fn colorize(elevation: &Grid<f64>, gradient: &ColorGradient) -> RgbaImage {
    let size = elevation.size();
    let cells = elevation.as_slice();

    let mut buf = vec![0u8; size * size * 4];
    buf.par_chunks_mut(size * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..size {
                let [r, g, b] = gradient.color_for(cells[y * size + x]);
                let px = x * 4;
                row[px] = r;
                row[px + 1] = g;
                row[px + 2] = b;
                row[px + 3] = 255;
            }
        });

    RgbaImage::from_raw(size as u32, size as u32, buf)
        .expect("pixel buffer matches image dimensions")
}

/// Draw every planned label onto a transparent layer.
///
/// Each line is centered within its label box; the outline is laid down as
/// offset white passes before the black text itself.
pub fn draw_labels(
    map_size: usize,
    placements: &[LabelPlacement],
    font: &FontVec,
) -> RgbaImage {
    let mut layer = RgbaImage::from_pixel(
        map_size as u32,
        map_size as u32,
        Rgba([255, 255, 255, 0]),
    );

    for placement in placements {
        let px = placement.tier.font_px(map_size);
        let spacing = placement.tier.line_spacing(map_size);
        let outline = placement.tier.outline_px(map_size);
        let scale = PxScale::from(px as f32);

        let mut line_y = placement.anchor.1;
        for line in placement.name.lines() {
            let line_w = text_size(scale, font, line).0 as i32;
            let line_x = placement.anchor.0 + (placement.text_size.0 - line_w) / 2;

            for i in 1..=outline {
                for (dx, dy) in [(i, 0), (-i, 0), (0, i), (0, -i)] {
                    draw_text_mut(
                        &mut layer,
                        OUTLINE_COLOR,
                        line_x + dx,
                        line_y + dy,
                        scale,
                        font,
                        line,
                    );
                }
            }
            draw_text_mut(&mut layer, TEXT_COLOR, line_x, line_y, scale, font, line);

            line_y += px as i32 + spacing;
        }
    }

    layer
}

/// Composite the label layer over the base map and sharpen the result.
pub fn compose(mut base: RgbaImage, labels: &RgbaImage) -> RgbaImage {
    imageops::overlay(&mut base, labels, 0, 0);
    imageops::filter3x3(&base, &SHARPEN_KERNEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_dimensions_and_alpha() {
        let grid = Grid::new_with(16, 0.5f64);
        let img = colorize(&grid, &ColorGradient::terrain());
        assert_eq!(img.dimensions(), (16, 16));
        for pixel in img.pixels() {
            assert_eq!(pixel.0[3], 255);
        }
    }

    #[test]
    fn test_colorize_uses_the_gradient() {
        let gradient = ColorGradient::terrain();
        let mut grid = Grid::new_with(4, -2.0f64);
        grid.set(1, 2, 0.95);

        let img = colorize(&grid, &gradient);
        let [r, g, b] = gradient.color_for(-2.0);
        assert_eq!(img.get_pixel(0, 0).0, [r, g, b, 255]);
        let [r, g, b] = gradient.color_for(0.95);
        assert_eq!(img.get_pixel(1, 2).0, [r, g, b, 255]);
    }

    #[test]
    fn test_sharpen_kernel_sums_to_one() {
        let total: f32 = SHARPEN_KERNEL.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_compose_preserves_a_flat_image() {
        // With a fully transparent label layer and a uniform base, overlay
        // and the unit-sum kernel both leave pixels untouched.
        let base = RgbaImage::from_pixel(8, 8, Rgba([10, 200, 30, 255]));
        let labels = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 0]));
        let out = compose(base, &labels);
        for pixel in out.pixels() {
            assert_eq!(pixel.0, [10, 200, 30, 255]);
        }
    }
}
