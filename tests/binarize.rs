use minutiae::{binarize, binarize_with_threshold, Grid, Rgb};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn dark_pixels_become_ridge_except_on_border() {
    let image = Grid::filled(6, 5, 0u8).unwrap();
    let binary = binarize(&image);
    for y in 0..5 {
        for x in 0..6 {
            let border = x == 0 || y == 0 || x == 5 || y == 4;
            assert_eq!(binary.get(x, y), Some(&!border), "({x}, {y})");
        }
    }
    assert_eq!(binary.count_foreground(), 4 * 3);
}

#[test]
fn threshold_is_exclusive() {
    let data = vec![255, 255, 255, 255, 127, 128, 255, 255, 255, 255, 255, 255];
    let image = Grid::new(data, 4, 3).unwrap();
    let binary = binarize(&image);
    assert_eq!(binary.get(1, 1), Some(&true));
    assert_eq!(binary.get(2, 1), Some(&false));

    let strict = binarize_with_threshold(&image, 127);
    assert_eq!(strict.get(1, 1), Some(&false));
}

#[test]
fn every_channel_must_be_dark() {
    let mut image = Grid::filled(3, 3, Rgb::WHITE).unwrap();
    *image.get_mut(1, 1).unwrap() = Rgb([10, 10, 200]);
    assert_eq!(binarize(&image).count_foreground(), 0);

    *image.get_mut(1, 1).unwrap() = Rgb([10, 127, 0]);
    assert_eq!(binarize(&image).get(1, 1), Some(&true));
}

#[test]
fn tiny_images_are_all_background() {
    let image = Grid::filled(1, 1, 0u8).unwrap();
    assert_eq!(binarize(&image).count_foreground(), 0);
    let image = Grid::filled(2, 7, 0u8).unwrap();
    assert_eq!(binarize(&image).count_foreground(), 0);
}

#[test]
fn darkening_never_removes_ridge_pixels() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let (width, height) = (40, 30);

    for _ in 0..20 {
        let base: Vec<u8> = (0..width * height).map(|_| rng.random()).collect();
        let darker: Vec<u8> = base
            .iter()
            .map(|&v| v.saturating_sub(rng.random_range(0..=80)))
            .collect();

        let before = binarize(&Grid::new(base, width, height).unwrap());
        let after = binarize(&Grid::new(darker, width, height).unwrap());
        for (b, a) in before.as_slice().iter().zip(after.as_slice()) {
            assert!(!b || *a);
        }
        assert!(after.count_foreground() >= before.count_foreground());
    }
}
