//! A single annotated frame from a video sequence.

use crate::geometry::{scale_and_move, BoundingBox, Dimensions};
use crate::{Error, Result};
use image::imageops::{self, FilterType};
use image::RgbImage;
use std::fmt;

/// One frame from a sequence: its 1-based number, its image, and the
/// ground-truth bounding box from the dataset annotations, if any.
///
/// A `Frame` is a value: transforms such as [`Frame::scale`] return a new
/// frame and leave the original untouched.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The frame's number within the sequence. Numbering starts from 1.
    pub number: u32,

    /// The frame's pixel data.
    pub image: RgbImage,

    /// The ground-truth bounding box, `None` for unannotated frames.
    pub ground_truth: Option<BoundingBox>,
}

impl Frame {
    /// Create a new frame.
    pub fn new(number: u32, image: RgbImage, ground_truth: Option<BoundingBox>) -> Self {
        Self {
            number,
            image,
            ground_truth,
        }
    }

    /// The width of the frame image, measured in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// The height of the frame image, measured in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The dimensions of the frame image, measured in pixels.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width() as i64, self.height() as i64)
    }

    /// Resize the frame by the given scale factor.
    ///
    /// The image is resampled to `(round(w*factor), round(h*factor))` and
    /// the ground-truth box has its origin and size multiplied by the same
    /// factor, so the annotation stays registered with the image content.
    /// Only uniform scaling is supported.
    ///
    /// # Errors
    /// Returns [`Error::InvalidScale`] if `factor` is not positive and finite.
    pub fn scale(&self, factor: f64) -> Result<Frame> {
        if !(factor > 0.0 && factor.is_finite()) {
            return Err(Error::InvalidScale(factor));
        }

        let new_width = ((self.width() as f64 * factor).round() as u32).max(1);
        let new_height = ((self.height() as f64 * factor).round() as u32).max(1);
        let image = imageops::resize(&self.image, new_width, new_height, FilterType::Triangle);

        Ok(Frame::new(
            self.number,
            image,
            self.ground_truth
                .as_ref()
                .map(|gt| scale_and_move(gt, factor)),
        ))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ground_truth {
            Some(gt) => write!(f, "{}: {}", self.number, gt),
            None => write!(f, "{}: none", self.number),
        }
    }
}
