//! Dataset directory layouts.
//!
//! Tracking benchmarks disagree on where a sequence keeps its imagery and
//! ground truth. Rather than guessing paths at load time, the loader is
//! parameterized by a [`SequenceLayout`] chosen explicitly by the caller or
//! by probing the sequence directory once with [`detect_layout`].

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Describes how one benchmark family lays a sequence out on disk.
pub trait SequenceLayout {
    /// The directory holding the sequence's frame images.
    fn imagery_dir(&self, sequence_path: &Path) -> PathBuf;

    /// The file holding one ground-truth box record per frame.
    fn ground_truth_file(&self, sequence_path: &Path) -> PathBuf;

    /// The image file name for a 1-based frame number.
    fn frame_file_name(&self, frame_number: u32) -> String;

    /// A short name for diagnostics.
    fn name(&self) -> &'static str;
}

/// OTB-style layout: `img/0001.jpg` and `groundtruth_rect.txt`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OtbLayout;

impl SequenceLayout for OtbLayout {
    fn imagery_dir(&self, sequence_path: &Path) -> PathBuf {
        sequence_path.join("img")
    }

    fn ground_truth_file(&self, sequence_path: &Path) -> PathBuf {
        sequence_path.join("groundtruth_rect.txt")
    }

    fn frame_file_name(&self, frame_number: u32) -> String {
        format!("{:04}.jpg", frame_number)
    }

    fn name(&self) -> &'static str {
        "otb"
    }
}

/// VOT-style layout: `color/00000001.jpg` and `groundtruth.txt`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VotLayout;

impl SequenceLayout for VotLayout {
    fn imagery_dir(&self, sequence_path: &Path) -> PathBuf {
        sequence_path.join("color")
    }

    fn ground_truth_file(&self, sequence_path: &Path) -> PathBuf {
        sequence_path.join("groundtruth.txt")
    }

    fn frame_file_name(&self, frame_number: u32) -> String {
        format!("{:08}.jpg", frame_number)
    }

    fn name(&self) -> &'static str {
        "vot"
    }
}

static OTB: OtbLayout = OtbLayout;
static VOT: VotLayout = VotLayout;

/// Probe a sequence directory and return the layout whose imagery directory
/// exists, OTB first.
///
/// # Errors
/// Returns [`Error::ImageryNotFound`] if neither layout matches.
pub fn detect_layout(sequence_path: &Path) -> Result<&'static dyn SequenceLayout> {
    if OTB.imagery_dir(sequence_path).is_dir() {
        return Ok(&OTB);
    }
    if VOT.imagery_dir(sequence_path).is_dir() {
        return Ok(&VOT);
    }
    Err(Error::ImageryNotFound(OTB.imagery_dir(sequence_path)))
}
