// tests/test_background.rs — Background source: the fallback gradient,
// file loading with resize-to-frame, and the keep-previous-on-failure rule.

use std::path::PathBuf;

use chromacam::background::Background;

/// Write a small solid-color PNG fixture and return its path.
/// Each test uses its own file name so parallel runs don't collide.
fn solid_png(name: &str, color: [u8; 3]) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    let img = image::RgbImage::from_pixel(10, 10, image::Rgb(color));
    img.save(&path).expect("write PNG fixture");
    path
}

#[test]
fn fallback_fills_the_whole_frame() {
    let bg = Background::fallback(8, 6);
    let frame = bg.frame();
    assert_eq!(frame.width, 8);
    assert_eq!(frame.height, 6);
    assert_eq!(frame.pixels.len(), 48);
    // Top-left corner of the gradient: r = 40, g = 40, b = 150.
    assert_eq!(frame.pixels[0], 0x00282896);
}

#[test]
fn load_resizes_to_the_requested_grid() {
    let path = solid_png("chromacam_test_load.png", [255, 0, 0]);

    let bg = Background::load(&path, 4, 3).unwrap();
    let frame = bg.frame();
    assert_eq!((frame.width, frame.height), (4, 3));
    // Resampling a solid image keeps it solid.
    assert!(frame.pixels.iter().all(|&p| p == 0x00FF0000));

    let _ = std::fs::remove_file(path);
}

#[test]
fn replace_swaps_pixels_but_keeps_the_grid() {
    let path = solid_png("chromacam_test_replace.png", [0, 255, 0]);

    let mut bg = Background::fallback(5, 5);
    bg.replace_from(&path).unwrap();
    let frame = bg.frame();
    assert_eq!((frame.width, frame.height), (5, 5));
    assert!(frame.pixels.iter().all(|&p| p == 0x0000FF00));

    let _ = std::fs::remove_file(path);
}

#[test]
fn failed_replace_leaves_previous_background_intact() {
    let mut bg = Background::fallback(4, 4);
    let before = bg.frame().pixels.clone();

    let missing = std::env::temp_dir().join("chromacam_test_does_not_exist.png");
    assert!(bg.replace_from(&missing).is_err());

    assert_eq!(bg.frame().pixels, before);
}

#[test]
fn reset_returns_to_the_fallback_gradient() {
    let path = solid_png("chromacam_test_reset.png", [0, 0, 255]);

    let mut bg = Background::fallback(6, 6);
    let gradient = bg.frame().pixels.clone();

    bg.replace_from(&path).unwrap();
    assert_ne!(bg.frame().pixels, gradient);

    bg.reset();
    assert_eq!(bg.frame().pixels, gradient);

    let _ = std::fs::remove_file(path);
}
