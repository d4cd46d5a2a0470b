//! Drawing annotations onto frames.
//!
//! Every function here copies the input frame's pixel buffer before drawing
//! and returns a new [`Frame`], so an annotated frame never aliases the
//! frame it was drawn from.

use crate::frame::Frame;
use crate::geometry::BoundingBox;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

/// Outline color for bounding boxes.
const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 128]);

/// Fill color for frame labels.
const LABEL_COLOR: Rgb<u8> = Rgb([255, 204, 0]);

/// Pixel offset of the label from the frame's upper-left corner.
const LABEL_OFFSET: (i64, i64) = (5, 5);

/// Draw a bounding box outline on a copy of the frame's image.
///
/// # Arguments
/// * `frame` - The frame to annotate
/// * `bounding_box` - The box to draw; `frame.ground_truth` when `None`
///
/// A frame with neither an explicit box nor ground truth is returned as an
/// unannotated copy. Boxes with a negative size are not drawn.
pub fn draw_bounding_box(frame: &Frame, bounding_box: Option<&BoundingBox>) -> Frame {
    let mut image = frame.image.clone();

    let target = bounding_box.or(frame.ground_truth.as_ref());
    if let Some(bounding_box) = target {
        let width = bounding_box.dimensions.width;
        let height = bounding_box.dimensions.height;
        if width >= 0 && height >= 0 {
            // The outline runs through both corners, (x, y) and
            // (x + w, y + h) inclusive.
            let rect = Rect::at(
                bounding_box.upper_left.x as i32,
                bounding_box.upper_left.y as i32,
            )
            .of_size(width as u32 + 1, height as u32 + 1);
            draw_hollow_rect_mut(&mut image, rect, BOX_COLOR);
        }
    }

    Frame::new(frame.number, image, frame.ground_truth)
}

/// Draw a text label in the upper-left corner of a copy of the frame.
///
/// # Arguments
/// * `frame` - The frame to annotate
/// * `label` - The text to draw; `#{number:03}` when `None`
pub fn draw_label(frame: &Frame, label: Option<&str>) -> Frame {
    let mut image = frame.image.clone();

    let default_label;
    let text = match label {
        Some(text) => text,
        None => {
            default_label = format!("#{:03}", frame.number);
            &default_label
        }
    };
    blit_text(&mut image, LABEL_OFFSET.0, LABEL_OFFSET.1, text, LABEL_COLOR);

    Frame::new(frame.number, image, frame.ground_truth)
}

/// Draw a rotated bounding box, given as 4 `(x, y)` corner pairs, on a copy
/// of the frame's image.
///
/// The polygon is closed by a final edge from the last corner back to the
/// first. This is drawing support only; the overlap algebra works on
/// axis-aligned boxes.
pub fn draw_quadrilateral(frame: &Frame, corners: &[i64; 8]) -> Frame {
    let mut image = frame.image.clone();

    let points: Vec<(f32, f32)> = corners
        .chunks_exact(2)
        .map(|pair| (pair[0] as f32, pair[1] as f32))
        .collect();
    for i in 0..points.len() {
        let next = (i + 1) % points.len();
        draw_line_segment_mut(&mut image, points[i], points[next], BOX_COLOR);
    }

    Frame::new(frame.number, image, frame.ground_truth)
}

/// Render text with the built-in 8x8 bitmap font. Glyphs outside the image
/// are clipped; characters without a glyph render as blanks.
fn blit_text(image: &mut RgbImage, x: i64, y: i64, text: &str, color: Rgb<u8>) {
    for (index, character) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(character) else {
            continue;
        };
        let glyph_x = x + index as i64 * 8;
        for (row, bits) in glyph.iter().enumerate() {
            for column in 0..8u32 {
                if (bits >> column) & 1 == 0 {
                    continue;
                }
                let px = glyph_x + column as i64;
                let py = y + row as i64;
                if px >= 0 && py >= 0 && px < image.width() as i64 && py < image.height() as i64 {
                    image.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}
