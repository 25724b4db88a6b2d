use super::*;

const FONT: &str = "tests/data/fonts/DejaVuSans-Bold.ttf";

#[test]
fn defaults_match_card_layout() {
    let cfg = RenderConfig::with_font(vec![1, 2, 3]).unwrap();
    assert_eq!(cfg.canvas_px, 1000);
    assert_eq!(cfg.background, Rgb8::new(0xe8, 0x18, 0x28));
    assert_eq!(cfg.foreground, Rgb8::WHITE);
    assert_eq!(cfg.body_font.size_px, 32.0);
    assert_eq!(cfg.year_font.size_px, 112.0);
    assert_eq!(cfg.code_fraction, 0.7);
    assert_eq!(cfg.text_fit_limit_px(), 900.0);
    assert!(Arc::ptr_eq(&cfg.body_font.data, &cfg.year_font.data));
}

#[test]
fn partial_json_fills_defaults() {
    let def = RenderConfigDef::from_reader(
        r##"{ "canvas_px": 600, "foreground": "#000", "histogram": { "width": 800 } }"##.as_bytes(),
    )
    .unwrap();
    assert_eq!(def.canvas_px, 600);
    assert_eq!(def.foreground, Rgb8::BLACK);
    assert_eq!(def.year_font_px, 112.0);
    assert_eq!(def.histogram.width, 800);
    assert_eq!(def.histogram.height, 480);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = RenderConfigDef::from_reader(r#"{ "canvas": 600 }"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("unknown field"));
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        RenderConfigDef {
            canvas_px: 0,
            ..RenderConfigDef::default()
        },
        RenderConfigDef {
            canvas_px: 70_000,
            ..RenderConfigDef::default()
        },
        RenderConfigDef {
            body_font_px: f32::NAN,
            ..RenderConfigDef::default()
        },
        RenderConfigDef {
            code_fraction: 1.5,
            ..RenderConfigDef::default()
        },
        RenderConfigDef {
            text_margin_px: 1000,
            ..RenderConfigDef::default()
        },
    ];
    for def in cases {
        let data = Arc::new(vec![0u8; 4]);
        let err = RenderConfig::build(def.clone(), data.clone(), data).unwrap_err();
        assert!(
            matches!(err, PlaycardsError::Validation(_)),
            "{def:?} gave {err}"
        );
    }
}

#[test]
fn from_def_requires_font_source() {
    let err = RenderConfig::from_def(RenderConfigDef::default()).unwrap_err();
    assert!(err.to_string().contains("font_source"));
}

#[test]
fn from_def_loads_font_files() {
    let def = RenderConfigDef {
        font_source: Some(PathBuf::from(FONT)),
        ..RenderConfigDef::default()
    };
    let cfg = RenderConfig::from_def(def).unwrap();
    assert!(cfg.body_font.data.len() > 1000);
}

#[test]
fn from_def_rejects_non_font_extension() {
    let def = RenderConfigDef {
        font_source: Some(PathBuf::from("Cargo.toml")),
        ..RenderConfigDef::default()
    };
    let err = RenderConfig::from_def(def).unwrap_err();
    assert!(err.to_string().contains(".ttf"));
}

#[test]
fn from_path_resolves_fonts_relative_to_config() {
    let tmp = std::env::temp_dir().join(format!(
        "playcards_config_test_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&tmp).unwrap();
    let cfg_path = tmp.join("render.json");
    std::fs::write(&cfg_path, r#"{ "font_source": "fonts/face.ttf" }"#).unwrap();

    let def = RenderConfigDef::from_path(&cfg_path).unwrap();
    assert_eq!(def.font_source, Some(tmp.join("fonts/face.ttf")));

    std::fs::remove_dir_all(&tmp).ok();
}
