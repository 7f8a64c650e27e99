#![allow(dead_code)]

use minutiae::{Grid, Minutia, Template};
use std::f64::consts::PI;

pub const PRINT_SIZE: usize = 200;

const GAP_DIRECTIONS: [(i64, i64); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Concentric dark rings on a light background, each ring broken by a narrow
/// gap at a different angle, plus one diagonal spoke crossing them.
pub fn synthetic_print(width: usize, height: usize, cx: i64, cy: i64) -> Grid<u8> {
    let period = 8;
    let thick = 4;
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let (dx, dy) = (x - cx, y - cy);
            let d = ((dx * dx + dy * dy) as f64).sqrt().floor() as i64;
            let ring = d / period;
            let (gx, gy) = GAP_DIRECTIONS[((ring * 3) % 8) as usize];
            let dot = dx * gx + dy * gy;
            let cross = dx * gy - dy * gx;
            let gap = dot > 0 && cross * cross * 25 < dot * dot;
            let spoke = dx < -10 && (-2..=1).contains(&(dx + dy));
            let dark = (d % period < thick && !gap) || spoke;
            data.push(if dark { 40 } else { 235 });
        }
    }
    Grid::new(data, width, height).unwrap()
}

/// The standard 200x200 test print.
pub fn standard_print() -> Grid<u8> {
    synthetic_print(PRINT_SIZE, PRINT_SIZE, 100, 90)
}

/// Rotates every minutia about the origin by `deg` degrees, snapping the
/// cartesian position to the nearest pixel.
pub fn rotated(template: &Template, deg: i32) -> Template {
    let minutiae = template
        .minutiae()
        .iter()
        .map(|m| {
            let angle = m.angle + f64::from(deg) * PI / 180.0;
            Minutia {
                x: (m.radius * angle.cos()).round() as i32,
                y: (m.radius * angle.sin()).round() as i32,
                angle,
                ..*m
            }
        })
        .collect();
    Template::new(template.origin(), minutiae)
}

/// Bifurcation-only template from relative positions.
pub fn forks(points: &[(i32, i32)]) -> Template {
    let minutiae = points
        .iter()
        .map(|&(x, y)| Minutia::bifurcation(x, y))
        .collect();
    Template::new(Default::default(), minutiae)
}
