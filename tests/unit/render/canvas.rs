use super::*;
use crate::config::RenderConfig;
use crate::render::text::{FontRole, TextEngine};

const RED: Rgb8 = Rgb8::new(0xe8, 0x18, 0x28);

#[test]
fn new_canvas_is_filled_with_background() {
    let frame = Canvas::new(8, 4, RED).unwrap().finish();
    assert_eq!((frame.width, frame.height), (8, 4));
    assert_eq!(frame.data.len(), 8 * 4 * 4);
    for px in frame.data.chunks_exact(4) {
        assert_eq!(px, [0xe8, 0x18, 0x28, 255]);
    }
}

#[test]
fn rejects_empty_and_oversized_canvases() {
    assert!(Canvas::new(0, 10, RED).is_err());
    assert!(Canvas::new(70_000, 10, RED).is_err());
}

#[test]
fn integer_aligned_rect_is_crisp() {
    let mut canvas = Canvas::new(10, 10, Rgb8::WHITE).unwrap();
    canvas.fill_rect(Rect::new(2.0, 2.0, 5.0, 5.0), Rgb8::BLACK);
    let frame = canvas.finish();
    assert_eq!(frame.pixel(2, 2), Some(Rgb8::BLACK));
    assert_eq!(frame.pixel(4, 4), Some(Rgb8::BLACK));
    assert_eq!(frame.pixel(5, 5), Some(Rgb8::WHITE));
    assert_eq!(frame.pixel(1, 2), Some(Rgb8::WHITE));
    assert_eq!(frame.pixel(10, 0), None);
}

#[test]
fn centered_text_inks_around_center() {
    let font_bytes = std::fs::read("tests/data/fonts/DejaVuSans-Bold.ttf").unwrap();
    let cfg = RenderConfig::with_font(font_bytes).unwrap();
    let mut engine = TextEngine::new(&cfg).unwrap();
    let layout = engine
        .layout("HHHH", FontRole::Body, 40.0, Rgb8::BLACK)
        .unwrap();

    let mut canvas = Canvas::new(200, 100, Rgb8::WHITE).unwrap();
    canvas.draw_text_centered(&layout, Point::new(100.0, 50.0));
    let frame = canvas.finish();

    let dark_columns: Vec<u32> = (0..200)
        .filter(|&x| (0..100).any(|y| frame.pixel(x, y).is_some_and(|c| c.r < 128)))
        .collect();
    let left = *dark_columns.first().unwrap();
    let right = *dark_columns.last().unwrap();
    let mid = (left + right) / 2;
    assert!((95..=105).contains(&mid), "ink spans {left}..{right}");
    assert_eq!(frame.pixel(0, 0), Some(Rgb8::WHITE));
}

#[test]
fn png_encoding_is_stable() {
    let mut canvas = Canvas::new(16, 16, RED).unwrap();
    canvas.fill_rect(Rect::new(4.0, 4.0, 12.0, 12.0), Rgb8::WHITE);
    let frame = canvas.finish();
    let a = frame.encode_png().unwrap();
    let b = frame.encode_png().unwrap();
    assert_eq!(a, b);

    let decoded = image::load_from_memory(&a).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (16, 16));
    assert_eq!(decoded.get_pixel(8, 8).0, [255, 255, 255]);
    assert_eq!(decoded.get_pixel(0, 0).0, [0xe8, 0x18, 0x28]);
}
