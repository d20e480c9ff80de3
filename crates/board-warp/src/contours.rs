//! Contour search and quadrilateral selection on a binary edge map.

use board_warp_core::{approx_poly_dp, arc_length, compress_chain, polygon_area};
use image::GrayImage;
use imageproc::contours::find_contours;
use nalgebra::Point2;

/// A closed contour with its enclosed area.
#[derive(Clone, Debug)]
pub struct RankedContour {
    pub points: Vec<Point2<f32>>,
    pub area: f64,
}

/// Every border in the edge map, outer and hole borders alike, each reduced
/// to the end points of its straight runs.
pub fn trace_contours(edges: &GrayImage) -> Vec<Vec<Point2<f32>>> {
    find_contours::<i32>(edges)
        .into_iter()
        .filter(|c| !c.points.is_empty())
        .map(|c| {
            let chain: Vec<Point2<f32>> = c
                .points
                .iter()
                .map(|p| Point2::new(p.x as f32, p.y as f32))
                .collect();
            compress_chain(&chain)
        })
        .collect()
}

/// Sort by enclosed area, largest first. Equal areas keep discovery order.
pub fn rank_by_area(contours: Vec<Vec<Point2<f32>>>) -> Vec<RankedContour> {
    let mut ranked: Vec<RankedContour> = contours
        .into_iter()
        .map(|points| {
            let area = polygon_area(&points);
            RankedContour { points, area }
        })
        .collect();
    ranked.sort_by(|a, b| b.area.total_cmp(&a.area));
    ranked
}

/// First ranked contour whose polygon approximation has exactly 4 vertices.
///
/// The tolerance is `epsilon_rel` times the contour's closed perimeter.
pub fn select_quadrilateral(
    ranked: &[RankedContour],
    epsilon_rel: f64,
) -> Option<[Point2<f32>; 4]> {
    ranked.iter().find_map(|c| {
        let eps = epsilon_rel * arc_length(&c.points, true);
        let approx = approx_poly_dp(&c.points, eps);
        <[Point2<f32>; 4]>::try_from(approx).ok()
    })
}
