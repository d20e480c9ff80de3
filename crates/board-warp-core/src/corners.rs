//! Canonical ordering of four board corners.

use nalgebra::Point2;

/// Index of a corner inside an ordered corner set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerPosition {
    TopLeft = 0,
    TopRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
}

/// Order 4 points as `[top-left, top-right, bottom-right, bottom-left]`.
///
/// - smallest `x + y` is top-left, largest is bottom-right;
/// - smallest `y - x` is top-right, largest is bottom-left.
///
/// Ties go to the first point in input order. The rule assumes a roughly
/// upright board: near 45° rotations the same input point can fill two slots.
pub fn order_corners(pts: &[Point2<f32>; 4]) -> [Point2<f32>; 4] {
    let sums = pts.map(|p| p.x + p.y);
    let diffs = pts.map(|p| p.y - p.x);

    let mut out = [Point2::origin(); 4];
    out[CornerPosition::TopLeft as usize] = pts[argmin(&sums)];
    out[CornerPosition::BottomRight as usize] = pts[argmax(&sums)];
    out[CornerPosition::TopRight as usize] = pts[argmin(&diffs)];
    out[CornerPosition::BottomLeft as usize] = pts[argmax(&diffs)];
    out
}

fn argmin(values: &[f32; 4]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v < values[best] {
            best = i;
        }
    }
    best
}

fn argmax(values: &[f32; 4]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}
