//! On-disk fixture tests for sequence selections.
//!
//! Each test builds a miniature OTB or VOT style dataset in a temporary
//! directory and loads selections from it.

use image::{Rgb, RgbImage};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use vistrack::{BoundingBox, Error, OtbLayout, Selection, SequenceLayout, VotLayout};

const GROUND_TRUTHS: [[i64; 4]; 4] = [
    [10, 12, 30, 40],
    [11, 13, 30, 40],
    [12, 14, 31, 41],
    [13, 15, 31, 41],
];

fn write_sequence(root: &Path, name: &str, layout: &dyn SequenceLayout, records: &[[i64; 4]]) {
    let sequence_path = root.join(name);
    let imagery_path = layout.imagery_dir(&sequence_path);
    fs::create_dir_all(&imagery_path).unwrap();

    let mut ground_truth = String::new();
    for (index, record) in records.iter().enumerate() {
        ground_truth.push_str(&format!(
            "{},{},{},{}\n",
            record[0], record[1], record[2], record[3]
        ));
        let image = RgbImage::from_pixel(32, 24, Rgb([(index as u8 + 1) * 40, 0, 0]));
        image
            .save(imagery_path.join(layout.frame_file_name(index as u32 + 1)))
            .unwrap();
    }
    fs::write(layout.ground_truth_file(&sequence_path), ground_truth).unwrap();
}

fn otb_fixture() -> TempDir {
    let root = TempDir::new().unwrap();
    write_sequence(root.path(), "Walking", &OtbLayout, &GROUND_TRUTHS);
    root
}

#[test]
fn test_load_full_sequence_in_order() {
    let root = otb_fixture();
    let selection = Selection::new("Walking", &[1, 2, 3, 4], root.path()).unwrap();

    assert_eq!(selection.len(), 4);
    assert_eq!(selection.name(), "Walking");
    assert_eq!(selection.root_path(), root.path());
    for (index, frame) in selection.iter().enumerate() {
        assert_eq!(frame.number, index as u32 + 1);
        let expected = GROUND_TRUTHS[index];
        assert_eq!(
            frame.ground_truth.unwrap(),
            BoundingBox::from_xywh(expected[0], expected[1], expected[2], expected[3])
        );
        assert_eq!(frame.width(), 32);
        assert_eq!(frame.height(), 24);
    }
}

#[test]
fn test_reordered_full_length_request_uses_per_index_lookup() {
    // A request as long as the sequence but in a different order must still
    // pair each frame with its own ground-truth line.
    let root = otb_fixture();
    let selection = Selection::new("Walking", &[4, 3, 2, 1], root.path()).unwrap();

    let numbers: Vec<u32> = selection.iter().map(|frame| frame.number).collect();
    assert_eq!(numbers, [4, 3, 2, 1]);
    assert_eq!(
        selection[0].ground_truth.unwrap(),
        BoundingBox::from_xywh(13, 15, 31, 41)
    );
    assert_eq!(
        selection[3].ground_truth.unwrap(),
        BoundingBox::from_xywh(10, 12, 30, 40)
    );
}

#[test]
fn test_sparse_selection_with_repeats() {
    let root = otb_fixture();
    let selection = Selection::new("Walking", &[3, 1, 3], root.path()).unwrap();

    let numbers: Vec<u32> = selection.iter().map(|frame| frame.number).collect();
    assert_eq!(numbers, [3, 1, 3]);
    assert_eq!(selection[0].ground_truth, selection[2].ground_truth);
    assert!(selection.contains_frame(1));
    assert!(selection.contains_frame(3));
    assert!(!selection.contains_frame(2));
}

#[test]
fn test_empty_request_yields_empty_selection() {
    let root = otb_fixture();
    let selection = Selection::new("Walking", &[], root.path()).unwrap();
    assert!(selection.is_empty());
    assert_eq!(selection.len(), 0);
}

#[test]
fn test_out_of_range_frame_number() {
    let root = otb_fixture();
    let err = Selection::new("Walking", &[1, 5], root.path()).unwrap_err();
    assert!(matches!(
        err,
        Error::FrameOutOfRange {
            requested: 5,
            available: 4
        }
    ));

    // Frame numbers are 1-based, so 0 is out of range too.
    let err = Selection::new("Walking", &[0], root.path()).unwrap_err();
    assert!(matches!(err, Error::FrameOutOfRange { requested: 0, .. }));
}

#[test]
fn test_missing_imagery_directory() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("Walking")).unwrap();
    let err = Selection::new("Walking", &[1], root.path()).unwrap_err();
    assert!(matches!(err, Error::ImageryNotFound(_)));
}

#[test]
fn test_imagery_path_that_is_a_file() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("Walking")).unwrap();
    fs::write(root.path().join("Walking/img"), "not a directory").unwrap();
    let err = Selection::new("Walking", &[1], root.path()).unwrap_err();
    assert!(matches!(err, Error::NotADirectory(_)));
}

#[test]
fn test_missing_ground_truth_file() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("Walking/img")).unwrap();
    let err = Selection::new("Walking", &[1], root.path()).unwrap_err();
    assert!(matches!(err, Error::GroundTruthNotFound(_)));
}

#[test]
fn test_missing_frame_image() {
    let root = otb_fixture();
    fs::remove_file(root.path().join("Walking/img/0002.jpg")).unwrap();
    let err = Selection::new("Walking", &[2], root.path()).unwrap_err();
    assert!(matches!(err, Error::FrameNotFound(_)));
}

#[test]
fn test_malformed_ground_truth_line() {
    let root = otb_fixture();
    fs::write(
        root.path().join("Walking/groundtruth_rect.txt"),
        "10,12,30,40\n11,13,forty\n",
    )
    .unwrap();
    let err = Selection::new("Walking", &[2], root.path()).unwrap_err();
    assert!(matches!(err, Error::MalformedGroundTruth { line: 2, .. }));
}

#[test]
fn test_vot_layout() {
    let root = TempDir::new().unwrap();
    write_sequence(root.path(), "ball1", &VotLayout, &GROUND_TRUTHS[..2]);

    let selection =
        Selection::with_layout("ball1", &[2, 1], root.path(), &VotLayout).unwrap();
    assert_eq!(selection.len(), 2);
    assert_eq!(
        selection[0].ground_truth.unwrap(),
        BoundingBox::from_xywh(11, 13, 30, 40)
    );
    assert!(root.path().join("ball1/color/00000001.jpg").is_file());
}

#[test]
fn test_probe_selects_the_right_layout() {
    let root = TempDir::new().unwrap();
    write_sequence(root.path(), "Walking", &OtbLayout, &GROUND_TRUTHS[..1]);
    write_sequence(root.path(), "ball1", &VotLayout, &GROUND_TRUTHS[..1]);

    assert_eq!(Selection::probe("Walking", &[1], root.path()).unwrap().len(), 1);
    assert_eq!(Selection::probe("ball1", &[1], root.path()).unwrap().len(), 1);

    fs::create_dir_all(root.path().join("empty")).unwrap();
    let err = Selection::probe("empty", &[1], root.path()).unwrap_err();
    assert!(matches!(err, Error::ImageryNotFound(_)));
}

#[test]
fn test_resize_to_width_returns_a_new_selection() {
    let root = otb_fixture();
    let selection = Selection::new("Walking", &[1, 2], root.path()).unwrap();
    let resized = selection.resize_to_width(16).unwrap();

    for frame in &resized {
        assert_eq!(frame.width(), 16);
        assert_eq!(frame.height(), 12);
    }
    assert_eq!(
        resized[0].ground_truth.unwrap(),
        BoundingBox::from_xywh(5, 6, 15, 20)
    );
    // The source selection keeps its original frames.
    assert_eq!(selection[0].width(), 32);
    assert_eq!(
        selection[0].ground_truth.unwrap(),
        BoundingBox::from_xywh(10, 12, 30, 40)
    );
}

#[test]
fn test_resize_to_width_edge_cases() {
    let root = otb_fixture();
    let empty = Selection::new("Walking", &[], root.path()).unwrap();
    assert!(matches!(
        empty.resize_to_width(100),
        Err(Error::EmptySelection)
    ));

    let selection = Selection::new("Walking", &[1], root.path()).unwrap();
    assert!(matches!(
        selection.resize_to_width(0),
        Err(Error::InvalidScale(_))
    ));
}

#[test]
fn test_selection_display() {
    let root = otb_fixture();
    let selection = Selection::new("Walking", &[1, 3], root.path()).unwrap();
    let text = selection.to_string();
    assert!(text.starts_with("Sequence: Walking\n"));
    assert!(text.contains("  1: 10,12,30,40\n"));
    assert!(text.contains("  3: 12,14,31,41\n"));
}
