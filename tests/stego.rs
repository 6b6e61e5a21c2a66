mod common;

use bitmap_lab::{Bitmap, BitmapError, Pixel};
use common::synthetic_image::{checkerboard, gradient};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn hidden_image_survives_an_encode_decode_cycle() {
    init_logger();
    let payload = gradient(20, 12);
    let mut carrier = checkerboard(64, 48, 8);
    carrier.hide_image(&payload, 10, 5, 4).unwrap();

    let mut received = Bitmap::from_bytes(&carrier.to_bytes().unwrap()).unwrap();
    received.extract_image(10, 5, 20, 12, 4).unwrap();
    for y in 0..12 {
        for x in 0..20 {
            let expected = payload.pixel(x, y).unwrap();
            let got = received.pixel(10 + x, 5 + y).unwrap();
            let mask = 0xF0;
            assert_eq!(
                got,
                Pixel::new(expected.red & mask, expected.green & mask, expected.blue & mask)
            );
        }
    }
}

#[test]
fn payload_must_fit_the_carrier() {
    init_logger();
    let mut carrier = gradient(10, 10);
    let before = carrier.clone();
    let err = carrier.hide_image(&gradient(8, 8), 4, 0, 4).unwrap_err();
    assert!(matches!(err, BitmapError::Dimension { .. }));
    assert_eq!(carrier, before);
}

#[test]
fn hidden_text_survives_an_encode_decode_cycle() {
    init_logger();
    let mut carrier = gradient(32, 32);
    carrier.hide_text("meet at the usual place, 21:00").unwrap();
    let received = Bitmap::from_bytes(&carrier.to_bytes().unwrap()).unwrap();
    assert_eq!(received.extract_text().unwrap(), "meet at the usual place, 21:00");
}
