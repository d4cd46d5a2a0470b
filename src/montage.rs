//! Composing frame selections into montage images.

use crate::frame::Frame;
use crate::geometry::{Dimensions, Point};
use crate::{Error, Result};
use image::imageops;
use image::{Rgb, RgbImage};
use tracing::trace;

/// Gap placed around every tile and at the outer edges, in pixels.
const BORDER: u32 = 5;

/// Background fill for the montage canvas.
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Compose frames into a single montage image.
///
/// With `dimensions` given, the frames fill a grid of `dimensions.width`
/// columns by `dimensions.height` rows, row-major. All frames must share the
/// first frame's size, and the frame count must match the grid exactly.
///
/// Without `dimensions`, the frames are laid out in a single row at their
/// own widths, top-aligned, so mixed sizes are fine.
///
/// Either way a 5 pixel border separates the tiles and frames the canvas,
/// and the background is white. The input frames are only read.
///
/// # Errors
/// [`Error::EmptyMontage`] for an empty frame list,
/// [`Error::MontageShapeMismatch`] when the frame count does not fill the
/// grid, and [`Error::HeterogeneousFrames`] when grid tiles differ in size.
pub fn create_montage(frames: &[Frame], dimensions: Option<Dimensions>) -> Result<RgbImage> {
    if frames.is_empty() {
        return Err(Error::EmptyMontage);
    }
    match dimensions {
        Some(grid) => compose_grid(frames, grid),
        None => compose_row(frames),
    }
}

fn compose_grid(frames: &[Frame], grid: Dimensions) -> Result<RgbImage> {
    let expected = grid.width * grid.height;
    if grid.width <= 0 || grid.height <= 0 || expected != frames.len() as i64 {
        return Err(Error::MontageShapeMismatch {
            columns: grid.width,
            rows: grid.height,
            expected,
            got: frames.len(),
        });
    }

    let tile = frames[0].dimensions();
    for (index, frame) in frames.iter().enumerate() {
        if frame.dimensions() != tile {
            return Err(Error::HeterogeneousFrames {
                index,
                expected: tile.to_string(),
                got: frame.dimensions().to_string(),
            });
        }
    }

    let canvas_size = montage_size(&tile, &grid);
    trace!(size = %canvas_size, tiles = frames.len(), "composing grid montage");
    let mut canvas = RgbImage::from_pixel(
        canvas_size.width as u32,
        canvas_size.height as u32,
        BACKGROUND,
    );
    for (index, frame) in frames.iter().enumerate() {
        let location = frame_location(index, &tile, &grid);
        imageops::overlay(&mut canvas, &frame.image, location.x, location.y);
    }
    Ok(canvas)
}

fn compose_row(frames: &[Frame]) -> Result<RgbImage> {
    let total_width: u32 = frames.iter().map(Frame::width).sum::<u32>()
        + (frames.len() as u32 + 1) * BORDER;
    let max_height = frames.iter().map(Frame::height).max().unwrap_or(0);

    trace!(
        width = total_width,
        height = max_height + 2 * BORDER,
        tiles = frames.len(),
        "composing row montage"
    );
    let mut canvas = RgbImage::from_pixel(total_width, max_height + 2 * BORDER, BACKGROUND);
    let mut x = BORDER;
    for frame in frames {
        imageops::overlay(&mut canvas, &frame.image, x as i64, BORDER as i64);
        x += frame.width() + BORDER;
    }
    Ok(canvas)
}

fn montage_size(tile: &Dimensions, grid: &Dimensions) -> Dimensions {
    let border = BORDER as i64;
    Dimensions::new(
        grid.width * (tile.width + border) + border,
        grid.height * (tile.height + border) + border,
    )
}

fn frame_location(index: usize, tile: &Dimensions, grid: &Dimensions) -> Point {
    let border = BORDER as i64;
    let row = index as i64 / grid.width;
    let column = index as i64 % grid.width;
    Point::new(
        column * (tile.width + border) + border,
        row * (tile.height + border) + border,
    )
}
