//! Closed-contour geometry: area, perimeter, chain compression and
//! Douglas-Peucker simplification.
//!
//! All functions treat the input as a closed ring; the last point connects
//! back to the first and should not be repeated.

use nalgebra::Point2;

/// Rounds of "farthest point from the current start" used to seed the split.
const INIT_SPLIT_ITERS: usize = 3;

/// Unsigned enclosed area (shoelace formula).
pub fn polygon_area(pts: &[Point2<f32>]) -> f64 {
    let n = pts.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0_f64;
    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        acc += a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64;
    }
    (acc * 0.5).abs()
}

/// Perimeter length; `closed` adds the segment from the last point back to the first.
pub fn arc_length(pts: &[Point2<f32>], closed: bool) -> f64 {
    let mut len: f64 = pts
        .windows(2)
        .map(|w| (w[1] - w[0]).cast::<f64>().norm())
        .sum();
    if closed && pts.len() > 1 {
        len += (pts[0] - pts[pts.len() - 1]).cast::<f64>().norm();
    }
    len
}

/// Drop every vertex that continues a straight run in the same direction.
///
/// On a pixel chain this keeps only the end points of horizontal, vertical
/// and diagonal segments.
pub fn compress_chain(pts: &[Point2<f32>]) -> Vec<Point2<f32>> {
    let n = pts.len();
    if n < 3 {
        return pts.to_vec();
    }
    let out: Vec<Point2<f32>> = (0..n)
        .filter(|&i| {
            let prev = pts[(i + n - 1) % n];
            let cur = pts[i];
            let next = pts[(i + 1) % n];
            let d0 = cur - prev;
            let d1 = next - cur;
            let cross = d0.x * d1.y - d0.y * d1.x;
            let dot = d0.dot(&d1);
            !(cross == 0.0 && dot > 0.0)
        })
        .map(|i| pts[i])
        .collect();
    if out.is_empty() {
        vec![pts[0]]
    } else {
        out
    }
}

// Offset (1..n, walking forward from `start`) and squared distance of the
// point farthest from `pts[start]`; the first one wins on ties.
fn farthest_from(pts: &[Point2<f32>], start: usize) -> Option<(usize, f64)> {
    let n = pts.len();
    let s = pts[start].cast::<f64>();
    let mut best = None;
    let mut best_d2 = 0.0_f64;
    for k in 1..n {
        let d2 = (pts[(start + k) % n].cast::<f64>() - s).norm_squared();
        if d2 > best_d2 {
            best_d2 = d2;
            best = Some((k, d2));
        }
    }
    best
}

/// Approximate a closed contour by a polygon whose vertices are a subset of
/// the input, such that no dropped point is farther than `epsilon` from the
/// simplified outline.
pub fn approx_poly_dp(pts: &[Point2<f32>], epsilon: f64) -> Vec<Point2<f32>> {
    let n = pts.len();
    if n == 0 {
        return Vec::new();
    }
    let eps2 = epsilon * epsilon;

    // Every round runs; the last one decides the seed pair. An all-coincident
    // round keeps the previous offset.
    let mut start = 0usize;
    let mut offset = 0usize;
    let mut max_d2 = 0.0_f64;
    for _ in 0..INIT_SPLIT_ITERS {
        start = (start + offset) % n;
        max_d2 = 0.0;
        if let Some((k, d2)) = farthest_from(pts, start) {
            offset = k;
            max_d2 = d2;
        }
    }
    if max_d2 <= eps2 {
        return vec![pts[start]];
    }
    let far = (start + offset) % n;

    let mut out = Vec::new();
    // (from, to) spans, walked forward cyclically; `to` is emitted by the next span.
    let mut stack = vec![(far, start), (start, far)];
    while let Some((s, e)) = stack.pop() {
        let steps = (e + n - s) % n;
        if steps > 1 {
            let a = pts[s].cast::<f64>();
            let b = pts[e].cast::<f64>();
            let d = b - a;
            let mut max_dist = -1.0_f64;
            let mut split = s;
            for k in 1..steps {
                let i = (s + k) % n;
                let p = pts[i].cast::<f64>() - a;
                let dist = (p.y * d.x - p.x * d.y).abs();
                if dist > max_dist {
                    max_dist = dist;
                    split = i;
                }
            }
            if max_dist * max_dist > eps2 * d.norm_squared() {
                stack.push((split, e));
                stack.push((s, split));
                continue;
            }
        }
        out.push(pts[s]);
    }

    drop_near_collinear(out, eps2)
}

// Second pass: remove vertices lying within eps/sqrt(2) of the chord joining
// their neighbours, when that chord is oblique and the vertex sits between them.
fn drop_near_collinear(poly: Vec<Point2<f32>>, eps2: f64) -> Vec<Point2<f32>> {
    let n = poly.len();
    if n <= 2 {
        return poly;
    }
    let mut removed = vec![false; n];
    let mut remaining = n;
    let next_kept = |removed: &[bool], i: usize| -> usize {
        let mut j = (i + 1) % n;
        while removed[j] {
            j = (j + 1) % n;
        }
        j
    };

    let mut start = poly[n - 1].cast::<f64>();
    let mut i = 0;
    while i < n && remaining > 2 {
        let pt = poly[i].cast::<f64>();
        let j = next_kept(&removed, i);
        let end = poly[j].cast::<f64>();

        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let dist = ((pt.x - start.x) * dy - (pt.y - start.y) * dx).abs();
        let inner = (pt.x - start.x) * (end.x - pt.x) + (pt.y - start.y) * (end.y - pt.y);

        let near_chord = dist * dist <= 0.5 * eps2 * (dx * dx + dy * dy);
        if near_chord && dx != 0.0 && dy != 0.0 && inner >= 0.0 {
            removed[i] = true;
            remaining -= 1;
            start = end;
            i += 2;
            continue;
        }
        start = pt;
        i += 1;
    }

    poly.into_iter()
        .zip(removed)
        .filter_map(|(p, r)| (!r).then_some(p))
        .collect()
}
