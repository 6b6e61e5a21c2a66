mod common;

use bitmap_lab::{Bitmap, Pixel, RemoveBorderOptions, RotateOptions};
use common::synthetic_image::{checkerboard, gradient};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn four_quarter_turns_are_the_identity() {
    init_logger();
    let original = gradient(13, 7);
    let mut img = original.clone();
    img.rotate_quarter(4);
    assert_eq!(img, original);
    for _ in 0..4 {
        img.rotate_quarter(1);
    }
    assert_eq!(img, original);
    img.rotate_quarter(-1);
    img.rotate_quarter(3);
    assert_eq!((img.width(), img.height()), (13, 7));
}

#[test]
fn right_angle_rotation_matches_quarter_turn() {
    init_logger();
    let mut a = gradient(9, 5);
    let mut b = a.clone();
    a.rotate(90.0, RotateOptions::default()).unwrap();
    b.rotate_quarter(1);
    assert_eq!(a, b);
}

#[test]
fn arbitrary_rotation_grows_the_canvas() {
    init_logger();
    let mut img = Bitmap::blank(40, 20, Pixel::WHITE).unwrap();
    img.rotate(27.0, RotateOptions::default()).unwrap();
    assert_eq!((img.width(), img.height()), (45, 36));
    assert_eq!(img.pixel(0, 0), Some(Pixel::BLACK));
    assert_eq!(img.pixel(22, 18), Some(Pixel::WHITE));
}

#[test]
fn resize_there_and_back_restores_dimensions() {
    init_logger();
    for factor in [2.0, 3.0, 4.0] {
        let original = checkerboard(12, 8, 2);
        let mut img = original.clone();
        img.resize(factor).unwrap();
        assert_eq!(img.width(), 12 * factor as u32);
        img.resize(1.0 / factor).unwrap();
        assert_eq!(img, original, "factor {factor}");
    }
    let mut img = gradient(5, 5);
    img.resize(1.0).unwrap();
    assert_eq!(img, gradient(5, 5));
}

#[test]
fn full_crop_of_parsed_700_square_is_the_identity() {
    init_logger();
    let bytes = gradient(700, 700).to_bytes().unwrap();
    let original = Bitmap::from_bytes(&bytes).unwrap();
    let mut img = original.clone();
    img.crop(0, 0, 700, 700).unwrap();
    assert_eq!(img, original);
    assert_eq!(img.to_bytes().unwrap(), bytes);
}

#[test]
fn rotate_there_and_back_then_strip_the_black_padding() {
    init_logger();
    // no black pixels, so only the rotation padding matches the border colour
    let original = Bitmap::from_dimensions(40, 30, 24, |x, y| {
        Pixel::new((40 + x * 4) as u8, (40 + y * 5) as u8, 128)
    })
    .unwrap();
    let options = RotateOptions::default().with_resize_factor(2.0);

    let mut img = original.clone();
    img.rotate(27.0, options).unwrap();
    assert_eq!((img.width(), img.height()), (49, 45));
    img.rotate(-27.0, options).unwrap();
    assert_eq!((img.width(), img.height()), (64, 62));

    let removed = img.remove_border(RemoveBorderOptions::default()).unwrap();
    assert_eq!(removed, 9);
    assert_eq!((img.width(), img.height()), (46, 44));
    assert_ne!(img.pixel(23, 22), Some(Pixel::BLACK));
}

#[test]
fn crop_then_add_border_restores_dimensions() {
    init_logger();
    let mut img = gradient(30, 20);
    img.crop(4, 4, 22, 12).unwrap();
    img.add_border(4, Pixel::BLACK).unwrap();
    assert_eq!((img.width(), img.height()), (30, 20));
}

#[test]
fn remove_border_undoes_add_border() {
    init_logger();
    let original = checkerboard(16, 10, 4);
    let mut img = original.clone();
    let color = Pixel::new(255, 0, 255);
    img.add_border(5, color).unwrap();
    assert_eq!(img.border_length(color), 5);
    let removed = img
        .remove_border(RemoveBorderOptions::default().with_color(color))
        .unwrap();
    assert_eq!(removed, 5);
    assert_eq!(img, original);
}
