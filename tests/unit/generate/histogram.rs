use super::*;
use crate::playlist::model::Track;

fn playlist(years: &[&str]) -> Playlist {
    let tracks = years
        .iter()
        .enumerate()
        .map(|(i, y)| {
            Track::new(
                format!("song {i}"),
                format!("https://x/{i}"),
                *y,
                "Artist",
            )
            .unwrap()
        })
        .collect();
    Playlist::new("Test", tracks)
}

#[test]
fn bins_cover_range_without_gaps() {
    let hist = YearHistogram::from_playlist(&playlist(&["1999", "2001", "1999"])).unwrap();
    assert_eq!(hist.min_year(), 1999);
    assert_eq!(hist.max_year(), 2001);
    assert_eq!(hist.counts(), [2, 0, 1]);
    assert_eq!(hist.labels().collect::<Vec<_>>(), [1999, 2000, 2001]);
}

#[test]
fn bin_count_and_total_follow_track_list() {
    let years = ["1965", "1972", "1972", "1990", "1968", "2003", "1990"];
    let hist = YearHistogram::from_playlist(&playlist(&years)).unwrap();
    assert_eq!(hist.counts().len(), (2003 - 1965 + 1) as usize);
    assert_eq!(hist.total() as usize, years.len());
    assert_eq!(hist.counts()[(1972 - 1965) as usize], 2);
}

#[test]
fn single_track_gets_one_bin() {
    let hist = YearHistogram::from_playlist(&playlist(&["1984"])).unwrap();
    assert_eq!(hist.counts(), [1]);
}

#[test]
fn empty_playlist_is_a_precondition_violation() {
    let err = YearHistogram::from_playlist(&Playlist::new("Empty", vec![])).unwrap_err();
    assert!(matches!(err, PlaycardsError::Precondition(_)), "{err}");
}

#[test]
fn count_axis_uses_integer_steps() {
    assert_eq!(count_axis(0), (1, 1));
    assert_eq!(count_axis(3), (1, 3));
    assert_eq!(count_axis(5), (1, 5));
    assert_eq!(count_axis(7), (2, 8));
    assert_eq!(count_axis(23), (5, 25));
}

#[test]
fn label_stride_avoids_overlap() {
    assert_eq!(label_stride(40.0, 30.0), 1);
    assert_eq!(label_stride(10.0, 30.0), 3);
    assert_eq!(label_stride(9.0, 30.0), 4);
    assert_eq!(label_stride(0.0, 30.0), 1);
}

#[test]
fn empty_playlist_writes_no_file() {
    let font_bytes = std::fs::read("tests/data/fonts/DejaVuSans-Bold.ttf").unwrap();
    let cfg = RenderConfig::with_font(font_bytes).unwrap();
    let path = std::env::temp_dir().join(format!(
        "playcards_hist_empty_{}_{}.png",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));

    let err = generate_histogram(&Playlist::new("Empty", vec![]), &cfg, &path).unwrap_err();
    assert!(matches!(err, PlaycardsError::Precondition(_)));
    assert!(!path.exists());
}

#[test]
fn chart_uses_configured_canvas_and_draws_bars() {
    let font_bytes = std::fs::read("tests/data/fonts/DejaVuSans-Bold.ttf").unwrap();
    let cfg = RenderConfig::with_font(font_bytes).unwrap();
    let mut engine = TextEngine::new(&cfg).unwrap();
    let hist = YearHistogram::from_playlist(&playlist(&["1999", "2001", "1999"])).unwrap();

    let frame = render_histogram(&hist, "Test", &cfg, &mut engine).unwrap();
    assert_eq!((frame.width, frame.height), (640, 480));
    assert_eq!(frame.pixel(1, 1), Some(cfg.histogram.background));

    // Tallest bar (1999) sits in the first third of the plot, just above the x axis.
    let plot_w = 640.0 - MARGIN_LEFT - MARGIN_RIGHT;
    let x = (MARGIN_LEFT + plot_w / 6.0) as u32;
    let y = (480.0 - MARGIN_BOTTOM - 10.0) as u32;
    assert_eq!(frame.pixel(x, y), Some(cfg.histogram.bar));

    // The empty 2000 bin leaves the middle slot blank.
    let x = (MARGIN_LEFT + plot_w / 2.0) as u32;
    assert_eq!(frame.pixel(x, y), Some(cfg.histogram.background));
}
