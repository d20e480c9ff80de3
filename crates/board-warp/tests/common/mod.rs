#![allow(dead_code)]

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use nalgebra::Point2;

pub const BACKGROUND: Rgb<u8> = Rgb([235, 235, 235]);
pub const BOARD: Rgb<u8> = Rgb([30, 60, 120]);

/// Board outline used by the perspective tests, TL, TR, BR, BL.
pub const SKEWED_QUAD: [(i32, i32); 4] = [(120, 60), (520, 90), (560, 420), (80, 400)];

pub fn skewed_board() -> RgbImage {
    let mut img = RgbImage::from_pixel(640, 480, BACKGROUND);
    let poly: Vec<Point<i32>> = SKEWED_QUAD.iter().map(|&(x, y)| Point::new(x, y)).collect();
    draw_polygon_mut(&mut img, &poly, BOARD);
    img
}

pub const QUADRANT_COLORS: [Rgb<u8>; 4] = [
    Rgb([200, 30, 30]),  // top-left
    Rgb([30, 170, 30]),  // top-right
    Rgb([30, 30, 200]),  // bottom-right
    Rgb([160, 140, 20]), // bottom-left
];

/// 240x240 light canvas with an upright 160x160 board at (40, 40) split into
/// four colored quadrants.
pub fn quadrant_board() -> RgbImage {
    let mut img = RgbImage::from_pixel(240, 240, BACKGROUND);
    let cells = [(40, 40), (120, 40), (120, 120), (40, 120)];
    for (&(x, y), &color) in cells.iter().zip(QUADRANT_COLORS.iter()) {
        draw_filled_rect_mut(&mut img, Rect::at(x, y).of_size(80, 80), color);
    }
    img
}

pub fn assert_near(actual: Point2<f32>, expected: (i32, i32), tol: f32) {
    let dx = (actual.x - expected.0 as f32).abs();
    let dy = (actual.y - expected.1 as f32).abs();
    assert!(
        dx <= tol && dy <= tol,
        "corner ({:.1}, {:.1}) not within {} px of {:?}",
        actual.x,
        actual.y,
        tol,
        expected
    );
}

pub fn color_close(a: &Rgb<u8>, b: &Rgb<u8>, tol: u8) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= tol)
}
