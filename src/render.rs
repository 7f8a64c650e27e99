//! Labelled skeleton images for visual inspection.

use crate::image::{Grid, Rgb};
use crate::minutiae::{MinutiaKind, Template};
use crate::trace::trace_span;

/// Side length of the box drawn around each minutia, in pixels.
pub const BOX_SIZE: i64 = 6;
/// Half-length of each arm of the core cross.
pub const CROSS_ARM: i64 = 10;

/// Draws `skeleton` in blue on white, a box per minutia (red bifurcations,
/// green endings) and a red cross at the template origin.
///
/// Boxes are outlines anchored at `(x + ox - 3, y + oy - 2)`. Anything that
/// falls outside the image is clipped.
pub fn render_labelled(skeleton: &Grid<bool>, template: &Template) -> Grid<Rgb> {
    let _span = trace_span!("render_labelled", minutiae = template.len()).entered();

    let mut canvas = skeleton.map(|&ridge| if ridge { Rgb::BLUE } else { Rgb::WHITE });
    let origin = template.origin();
    let (ox, oy) = (i64::from(origin.x), i64::from(origin.y));

    for m in template.minutiae() {
        let colour = match m.kind {
            MinutiaKind::Bifurcation => Rgb::RED,
            MinutiaKind::RidgeEnding => Rgb::GREEN,
        };
        let left = i64::from(m.x) + ox - 3;
        let top = i64::from(m.y) + oy - 2;
        draw_box(&mut canvas, left, top, colour);
    }

    for d in -CROSS_ARM..=CROSS_ARM {
        plot(&mut canvas, ox + d, oy, Rgb::RED);
        plot(&mut canvas, ox, oy + d, Rgb::RED);
    }
    canvas
}

fn draw_box(canvas: &mut Grid<Rgb>, left: i64, top: i64, colour: Rgb) {
    let (right, bottom) = (left + BOX_SIZE - 1, top + BOX_SIZE - 1);
    for x in left..=right {
        plot(canvas, x, top, colour);
        plot(canvas, x, bottom, colour);
    }
    for y in top..=bottom {
        plot(canvas, left, y, colour);
        plot(canvas, right, y, colour);
    }
}

fn plot(canvas: &mut Grid<Rgb>, x: i64, y: i64, colour: Rgb) {
    let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
        return;
    };
    if let Some(px) = canvas.get_mut(x, y) {
        *px = colour;
    }
}

#[cfg(test)]
mod tests {
    use super::render_labelled;
    use crate::image::{Grid, Rgb};
    use crate::minutiae::{Direction, Minutia, Template};
    use crate::origin::Point;

    #[test]
    fn draws_boxes_and_cross() {
        let mut skeleton = Grid::filled(40, 40, false).unwrap();
        skeleton.put(30, 30, true);
        let template = Template::new(
            Point::new(15, 15),
            vec![
                Minutia::bifurcation(10, 10),
                Minutia::ending(-10, 12, Direction::North),
            ],
        );
        let img = render_labelled(&skeleton, &template);

        assert_eq!(img.get(30, 30), Some(&Rgb::BLUE));
        assert_eq!(img.get(1, 1), Some(&Rgb::WHITE));
        // Bifurcation box spans x 22..=27, y 23..=28.
        assert_eq!(img.get(22, 23), Some(&Rgb::RED));
        assert_eq!(img.get(27, 28), Some(&Rgb::RED));
        assert_eq!(img.get(24, 25), Some(&Rgb::WHITE));
        // Ending box spans x 2..=7, y 25..=30.
        assert_eq!(img.get(2, 27), Some(&Rgb::GREEN));
        assert_eq!(img.get(15, 5), Some(&Rgb::RED));
        assert_eq!(img.get(25, 15), Some(&Rgb::RED));
    }

    #[test]
    fn clips_at_border() {
        let skeleton = Grid::filled(8, 8, false).unwrap();
        let template = Template::new(Point::new(1, 1), vec![Minutia::bifurcation(-1, 5)]);
        let img = render_labelled(&skeleton, &template);
        assert_eq!(img.get(1, 1), Some(&Rgb::RED));
        assert_eq!(img.width(), 8);
    }
}
