//! # Vistrack - Visual Tracking Sequence Toolkit
//!
//! Support library for visual-object-tracking experiments.
//!
//! Vistrack loads benchmark sequence frames with their ground-truth
//! annotations, computes geometric overlap metrics between bounding boxes,
//! and composes annotated frame selections into montage images for visual
//! inspection.
//!
//! ## Features
//!
//! - Integer box algebra: area, intersection, union, intersection-over-union
//! - Batched IoU matrices over `(N,4)` box lists
//! - Ordered, possibly sparse frame selections from OTB and VOT style datasets
//! - Bounding-box and label annotation that never aliases the input frame
//! - Grid and single-row montage composition
//!
//! ## Example
//!
//! ```rust,ignore
//! use vistrack::{Selection, Dimensions, create_montage, draw_bounding_box, draw_label};
//!
//! // Load six frames, annotate them at half size, tile them 3x2.
//! let selection = Selection::new("DragonBaby", &[1, 2, 3, 4, 5, 6], "~/Videos/otb")?;
//! let halved = selection.resize_to_width(320)?;
//! let annotated: Vec<_> = halved
//!     .iter()
//!     .map(|frame| draw_label(&draw_bounding_box(frame, None), None))
//!     .collect();
//! let montage = create_montage(&annotated, Some(Dimensions::new(3, 2)))?;
//! montage.save("montage.png")?;
//! ```

// Public modules
pub mod geometry;
pub mod frame;
pub mod sequence;
pub mod annotate;
pub mod montage;

// Re-exports for convenience
pub use geometry::{BoundingBox, BoxList, Dimensions, Point};
pub use geometry::{intersection, iou, iou_matrix, scale_and_move, union_area};
pub use frame::Frame;
pub use sequence::{detect_layout, OtbLayout, Selection, SequenceLayout, VotLayout};
pub use annotate::{draw_bounding_box, draw_label, draw_quadrilateral};
pub use montage::create_montage;

// Error types
pub use crate::error::{Error, Result};

mod error {
    use std::path::PathBuf;
    use thiserror::Error;

    /// Errors that can occur in the vistrack library
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("imagery directory '{0}' does not exist")]
        ImageryNotFound(PathBuf),

        #[error("'{0}' exists, but is not a directory")]
        NotADirectory(PathBuf),

        #[error("ground truth file '{0}' does not exist")]
        GroundTruthNotFound(PathBuf),

        #[error("frame image '{0}' does not exist")]
        FrameNotFound(PathBuf),

        #[error("frame {requested} is out of range; the sequence has {available} frames")]
        FrameOutOfRange { requested: u32, available: usize },

        #[error("ground truth line {line}: {reason}")]
        MalformedGroundTruth { line: usize, reason: String },

        #[error("scale factor must be positive and finite, got {0}")]
        InvalidScale(f64),

        #[error("selection contains no frames")]
        EmptySelection,

        #[error("montage grid {columns}x{rows} holds {expected} tiles, but {got} frames were given")]
        MontageShapeMismatch {
            columns: i64,
            rows: i64,
            expected: i64,
            got: usize,
        },

        #[error("montage frames must share one size; frame {index} is {got}, expected {expected}")]
        HeterogeneousFrames {
            index: usize,
            expected: String,
            got: String,
        },

        #[error("cannot compose a montage from zero frames")]
        EmptyMontage,

        #[error("image error: {0}")]
        ImageError(#[from] image::ImageError),

        #[error("IO error: {0}")]
        IoError(#[from] std::io::Error),
    }

    /// Result type for vistrack operations
    pub type Result<T> = std::result::Result<T, Error>;
}
