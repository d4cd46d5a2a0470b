//! Sequence frame selections.
//!
//! A [`Selection`] is a named, ordered, possibly sparse subset of a
//! sequence's frames, loaded eagerly from a dataset directory together with
//! the per-frame ground-truth boxes. The on-disk layout is described by a
//! [`SequenceLayout`].

mod layout;

pub use layout::{detect_layout, OtbLayout, SequenceLayout, VotLayout};

use crate::frame::Frame;
use crate::geometry::BoundingBox;
use crate::{Error, Result};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::ops::Index;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A selection of frames from an image sequence.
///
/// The frames do not need to be contiguous, nor in order, and repeats are
/// allowed; the loaded list preserves the requested order verbatim. The only
/// constraint is that every requested frame number lies within
/// `1..=sequence_length`, checked at load time.
#[derive(Debug, Clone)]
pub struct Selection {
    name: String,
    root_path: PathBuf,
    frames: Vec<Frame>,
}

impl Selection {
    /// Load a selection using the OTB layout.
    ///
    /// # Arguments
    /// * `name` - The sequence name; resolves to `root_path/name` on disk
    /// * `frame_numbers` - 1-based frame numbers, in the order wanted
    /// * `root_path` - The dataset root directory
    pub fn new<P: AsRef<Path>>(name: &str, frame_numbers: &[u32], root_path: P) -> Result<Self> {
        Self::with_layout(name, frame_numbers, root_path, &OtbLayout)
    }

    /// Load a selection, probing the sequence directory for its layout.
    pub fn probe<P: AsRef<Path>>(name: &str, frame_numbers: &[u32], root_path: P) -> Result<Self> {
        let sequence_path = root_path.as_ref().join(name);
        let layout = detect_layout(&sequence_path)?;
        Self::with_layout(name, frame_numbers, root_path, layout)
    }

    /// Load a selection with an explicit dataset layout.
    pub fn with_layout<P: AsRef<Path>>(
        name: &str,
        frame_numbers: &[u32],
        root_path: P,
        layout: &dyn SequenceLayout,
    ) -> Result<Self> {
        let root_path = root_path.as_ref().to_path_buf();
        let sequence_path = root_path.join(name);
        let frames = load_selected_frames(&sequence_path, frame_numbers, layout)?;
        debug!(
            sequence = name,
            layout = layout.name(),
            frames = frames.len(),
            "loaded selection"
        );
        Ok(Self {
            name: name.to_string(),
            root_path,
            frames,
        })
    }

    /// The name of the sequence.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The dataset root the selection was loaded from.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// The loaded frames, in requested order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The number of loaded frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Get a frame by position in the selection (not by frame number).
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Whether any loaded frame carries the given frame number.
    ///
    /// Frame numbers are neither sorted nor unique, so this is a linear scan.
    pub fn contains_frame(&self, frame_number: u32) -> bool {
        self.frames.iter().any(|frame| frame.number == frame_number)
    }

    /// Iterate over the loaded frames.
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Return a new selection whose frames are uniformly rescaled so the
    /// first frame is `new_width` pixels wide.
    ///
    /// This selection is left untouched.
    ///
    /// # Errors
    /// [`Error::EmptySelection`] if there is no first frame to take the
    /// reference width from, [`Error::InvalidScale`] if `new_width` is 0.
    pub fn resize_to_width(&self, new_width: u32) -> Result<Selection> {
        let first = self.frames.first().ok_or(Error::EmptySelection)?;
        if new_width == 0 {
            return Err(Error::InvalidScale(0.0));
        }

        let factor = new_width as f64 / first.width() as f64;
        let frames = self
            .frames
            .iter()
            .map(|frame| frame.scale(factor))
            .collect::<Result<Vec<_>>>()?;

        Ok(Selection {
            name: self.name.clone(),
            root_path: self.root_path.clone(),
            frames,
        })
    }
}

impl Index<usize> for Selection {
    type Output = Frame;

    fn index(&self, index: usize) -> &Frame {
        &self.frames[index]
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sequence: {}", self.name)?;
        for frame in &self.frames {
            writeln!(f, "  {}", frame)?;
        }
        Ok(())
    }
}

fn load_selected_frames(
    sequence_path: &Path,
    frame_numbers: &[u32],
    layout: &dyn SequenceLayout,
) -> Result<Vec<Frame>> {
    let imagery_path = layout.imagery_dir(sequence_path);
    if !imagery_path.exists() {
        return Err(Error::ImageryNotFound(imagery_path));
    }
    if !imagery_path.is_dir() {
        return Err(Error::NotADirectory(imagery_path));
    }

    let ground_truths = load_ground_truth(sequence_path, frame_numbers, layout)?;

    let mut frames = Vec::with_capacity(frame_numbers.len());
    for (&number, ground_truth) in frame_numbers.iter().zip(ground_truths) {
        let frame_path = imagery_path.join(layout.frame_file_name(number));
        if !frame_path.is_file() {
            return Err(Error::FrameNotFound(frame_path));
        }
        let image = image::open(&frame_path)?.to_rgb8();
        frames.push(Frame::new(number, image, Some(ground_truth)));
    }
    Ok(frames)
}

/// Read the ground-truth file and pick the record for each requested frame.
///
/// Lookup is always per index: line `frame_number - 1` for each request, in
/// request order. A request covering the whole sequence is just the
/// degenerate case of that, never a separate file-order code path, so
/// reordered full-length requests stay correct.
fn load_ground_truth(
    sequence_path: &Path,
    frame_numbers: &[u32],
    layout: &dyn SequenceLayout,
) -> Result<Vec<BoundingBox>> {
    let path = layout.ground_truth_file(sequence_path);
    if !path.is_file() {
        return Err(Error::GroundTruthNotFound(path));
    }

    let reader = BufReader::new(File::open(&path)?);
    let all_lines: Vec<String> = reader.lines().collect::<io::Result<_>>()?;

    frame_numbers
        .iter()
        .map(|&number| {
            if number < 1 || number as usize > all_lines.len() {
                return Err(Error::FrameOutOfRange {
                    requested: number,
                    available: all_lines.len(),
                });
            }
            let line_number = number as usize;
            parse_ground_truth_line(&all_lines[line_number - 1], line_number)
        })
        .collect()
}

fn parse_ground_truth_line(line: &str, line_number: usize) -> Result<BoundingBox> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    if fields.len() != 4 {
        return Err(Error::MalformedGroundTruth {
            line: line_number,
            reason: format!("expected 4 comma-separated fields, got {}", fields.len()),
        });
    }

    let mut values = [0i64; 4];
    for (value, field) in values.iter_mut().zip(&fields) {
        *value = field.trim().parse().map_err(|_| Error::MalformedGroundTruth {
            line: line_number,
            reason: format!("'{}' is not an integer", field.trim()),
        })?;
    }
    Ok(BoundingBox::from_xywh(values[0], values[1], values[2], values[3]))
}
