use super::*;
use crate::foundation::color::Rgb8;

fn config() -> RenderConfig {
    let font_bytes = std::fs::read("tests/data/fonts/DejaVuSans-Bold.ttf").unwrap();
    RenderConfig::with_font(font_bytes).unwrap()
}

#[test]
fn step_is_one_and_a_half_font_sizes() {
    assert_eq!(tile_step(32.0), 48);
    assert_eq!(tile_step(10.0), 15);
    assert_eq!(tile_step(0.1), 1);
}

#[test]
fn origins_cover_three_canvas_extents_with_shear() {
    let origins = tile_origins(100, 50, 100);
    // y in -100..200 step 50 -> 6 rows; x in -100..200 step 150 -> 2 per row.
    assert_eq!(origins.len(), 12);
    assert_eq!(origins[0], (-200, -100));
    assert_eq!(origins[1], (-50, -100));
    assert_eq!(origins[2], (-150, -50));
    assert_eq!(*origins.last().unwrap(), (200, 150));

    for &(x, y) in &origins {
        let unsheared = x - y;
        assert_eq!((unsheared + 100) % 150, 0);
        assert_eq!((y + 100) % 50, 0);
    }
}

#[test]
fn empty_label_still_steps_forward() {
    let origins = tile_origins(0, 48, 96);
    // 288 / 48 = 6 positions per axis.
    assert_eq!(origins.len(), 36);
}

#[test]
fn box_is_deterministic() {
    let cfg = config();
    let mut engine = TextEngine::new(&cfg).unwrap();
    let a = render_box("Summer Hits", &cfg, &mut engine)
        .unwrap()
        .encode_png()
        .unwrap();
    let mut engine = TextEngine::new(&cfg).unwrap();
    let b = render_box("Summer Hits", &cfg, &mut engine)
        .unwrap()
        .encode_png()
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn box_covers_every_corner() {
    let cfg = config();
    let mut engine = TextEngine::new(&cfg).unwrap();
    let frame = render_box("Summer Hits", &cfg, &mut engine).unwrap();
    assert_eq!((frame.width, frame.height), (1000, 1000));

    let has_ink = |x0: u32, y0: u32| {
        (x0..x0 + 150).any(|x| (y0..y0 + 150).any(|y| frame.pixel(x, y) == Some(Rgb8::WHITE)))
    };
    assert!(has_ink(0, 0));
    assert!(has_ink(850, 0));
    assert!(has_ink(0, 850));
    assert!(has_ink(850, 850));
}

#[test]
fn different_names_render_differently() {
    let cfg = config();
    let mut engine = TextEngine::new(&cfg).unwrap();
    let a = render_box("Summer Hits", &cfg, &mut engine).unwrap();
    let b = render_box("Winter Hits", &cfg, &mut engine).unwrap();
    assert_ne!(a, b);
}
