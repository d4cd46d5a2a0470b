//! Axis-aligned bounding boxes and the overlap algebra built on them.
//!
//! All scalar types here are integer-valued: boxes in tracking benchmarks
//! live on the pixel grid, so area, intersection and union stay exact. Only
//! the final intersection-over-union ratio is floating point.

use nalgebra::DMatrix;
use std::fmt;
use std::ops::Mul;

/// A point location in an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Scale a point by a scalar factor, rounding to the nearest pixel.
impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, factor: f64) -> Point {
        Point::new(
            (self.x as f64 * factor).round() as i64,
            (self.y as f64 * factor).round() as i64,
        )
    }
}

/// Dimensions within an image, measured in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: i64,
    pub height: i64,
}

impl Dimensions {
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// Element-wise ratio `self / other`, for computing scale factors
    /// between two image sizes.
    pub fn ratio(&self, other: &Dimensions) -> (f64, f64) {
        (
            self.width as f64 / other.width as f64,
            self.height as f64 / other.height as f64,
        )
    }
}

/// Scale dimensions by a scalar factor, rounding to the nearest pixel.
impl Mul<f64> for Dimensions {
    type Output = Dimensions;

    fn mul(self, factor: f64) -> Dimensions {
        Dimensions::new(
            (self.width as f64 * factor).round() as i64,
            (self.height as f64 * factor).round() as i64,
        )
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A bounding box around an object in an image.
///
/// The box is axis aligned: an upper-left corner plus a size. Zero or
/// negative sizes are representable and not rejected; [`BoundingBox::area`]
/// follows the arithmetic, so callers that require strictly positive boxes
/// must guard themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub upper_left: Point,
    pub dimensions: Dimensions,
}

impl BoundingBox {
    pub fn new(upper_left: Point, dimensions: Dimensions) -> Self {
        Self {
            upper_left,
            dimensions,
        }
    }

    /// Construct from the external comma-joined `[x, y, width, height]` form.
    pub fn from_xywh(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self::new(Point::new(x, y), Dimensions::new(width, height))
    }

    /// The box's area, `width * height`. Zero for degenerate boxes,
    /// negative if the box was built with a negative size.
    pub fn area(&self) -> i64 {
        self.dimensions.width * self.dimensions.height
    }
}

/// The canonical external form: comma-joined `x,y,width,height`.
impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.upper_left.x, self.upper_left.y, self.dimensions.width, self.dimensions.height
        )
    }
}

/// Calculate the intersection area of two bounding boxes.
///
/// Disjoint boxes return exactly 0, never a negative value. Boxes touching
/// at an edge count as touching but not overlapping: the shared edge has
/// zero area.
pub fn intersection(a: &BoundingBox, b: &BoundingBox) -> i64 {
    let left = a.upper_left.x.max(b.upper_left.x);
    let right = (a.upper_left.x + a.dimensions.width).min(b.upper_left.x + b.dimensions.width);
    let top = a.upper_left.y.max(b.upper_left.y);
    let bottom = (a.upper_left.y + a.dimensions.height).min(b.upper_left.y + b.dimensions.height);
    ((bottom - top) * (right - left)).max(0)
}

/// Calculate the union area of two bounding boxes.
pub fn union_area(a: &BoundingBox, b: &BoundingBox) -> i64 {
    a.area() + b.area() - intersection(a, b)
}

/// Calculate the intersection-over-union of two bounding boxes.
///
/// Returns a value in `[0, 1]`. When the union is not positive (two
/// degenerate boxes, whether disjoint or coincident) the result is defined
/// as 0.0 rather than a division fault.
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let union = union_area(a, b);
    if union <= 0 {
        return 0.0;
    }
    intersection(a, b) as f64 / union as f64
}

/// Resize a bounding box, and move it based on the scale factor.
///
/// The same factor is applied to the origin and the size, so the box keeps
/// its position relative to a uniformly rescaled image. Non-uniform scaling
/// is not supported.
pub fn scale_and_move(bounding_box: &BoundingBox, factor: f64) -> BoundingBox {
    BoundingBox::new(
        bounding_box.upper_left * factor,
        bounding_box.dimensions * factor,
    )
}

/// A list of axis-aligned bounding boxes.
///
/// Wraps an `(N, 4)` matrix where each row is one `[x, y, width, height]`
/// box, for batched analysis of tracker outputs against ground truth.
#[derive(Debug, Clone)]
pub struct BoxList {
    boxes: DMatrix<f64>,
}

impl BoxList {
    /// Create a box list from an `(N, 4)` matrix of `[x, y, w, h]` rows.
    ///
    /// # Panics
    /// Panics if the matrix does not have exactly 4 columns.
    pub fn new(boxes: DMatrix<f64>) -> Self {
        assert_eq!(boxes.ncols(), 4, "a box list needs (N, 4) data");
        Self { boxes }
    }

    /// Create a box list from a flat row-major slice of `[x, y, w, h]` boxes.
    pub fn from_slice(data: &[f64]) -> Self {
        debug_assert_eq!(data.len() % 4, 0);
        Self::new(DMatrix::from_row_slice(data.len() / 4, 4, data))
    }

    /// The number of boxes in the list.
    pub fn len(&self) -> usize {
        self.boxes.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.nrows() == 0
    }

    /// An `(N, 2)` matrix of the `[x, y]` coordinates of the boxes.
    pub fn coordinates(&self) -> DMatrix<f64> {
        self.boxes.columns(0, 2).into_owned()
    }

    /// An `(N, 2)` matrix of the `[width, height]` dimensions of the boxes.
    pub fn dimensions(&self) -> DMatrix<f64> {
        self.boxes.columns(2, 2).into_owned()
    }

    /// The raw `(N, 4)` box data.
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.boxes
    }
}

/// Compute the IoU matrix between two box lists.
///
/// # Arguments
/// * `boxes_a` - First list, n boxes
/// * `boxes_b` - Second list, m boxes
///
/// # Returns
/// Matrix of shape (n, m) where entry (i, j) is `iou(a[i], b[j])`.
/// Pairs with a non-positive union yield 0.0.
pub fn iou_matrix(boxes_a: &BoxList, boxes_b: &BoxList) -> DMatrix<f64> {
    let n = boxes_a.len();
    let m = boxes_b.len();

    if n == 0 || m == 0 {
        return DMatrix::zeros(n, m);
    }

    let a = boxes_a.as_matrix();
    let b = boxes_b.as_matrix();
    let mut result = DMatrix::zeros(n, m);

    for i in 0..n {
        let (a_x, a_y, a_w, a_h) = (a[(i, 0)], a[(i, 1)], a[(i, 2)], a[(i, 3)]);
        let a_area = a_w * a_h;

        for j in 0..m {
            let (b_x, b_y, b_w, b_h) = (b[(j, 0)], b[(j, 1)], b[(j, 2)], b[(j, 3)]);
            let b_area = b_w * b_h;

            let left = a_x.max(b_x);
            let right = (a_x + a_w).min(b_x + b_w);
            let top = a_y.max(b_y);
            let bottom = (a_y + a_h).min(b_y + b_h);
            let inter = ((right - left) * (bottom - top)).max(0.0);

            let union = a_area + b_area - inter;
            result[(i, j)] = if union > 0.0 { inter / union } else { 0.0 };
        }
    }

    result
}
