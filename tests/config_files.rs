//! Config files and headless output on disk.

use std::fs;

use motes::{
    render_headless, ConfigError, FieldConfig, HeadlessOptions, ParticleField, PixelSurface,
    Timing, Vec2,
};
use tempfile::tempdir;

#[test]
fn test_config_save_load_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("motes.json");

    let config = FieldConfig::default()
        .with_particle_count(80)
        .with_seed(3)
        .with_color([120, 200, 255])
        .with_repel_radius(140.0)
        .with_timing(Timing::Scaled {
            reference_hz: 60.0,
            max_ticks: 4.0,
        });
    config.save(&path).unwrap();

    let loaded = FieldConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_load_partial_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(&path, r#"{ "particle_count": 7, "timing": { "mode": "per_tick" } }"#).unwrap();

    let loaded = FieldConfig::load(&path).unwrap();
    assert_eq!(loaded.particle_count, 7);
    assert_eq!(loaded.repel_radius, 100.0);
    assert_eq!(loaded.drag, 0.97);
    assert_eq!(loaded.timing, Timing::PerTick);
}

#[test]
fn test_config_load_rejects_invalid_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "alpha_bounds": [0.8, 0.2] }"#).unwrap();

    assert!(matches!(
        FieldConfig::load(&path),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_config_rejects_non_positive_alpha_step() {
    for step in [0.0, -0.004, f32::NAN] {
        let config = FieldConfig {
            alpha_step: step,
            ..FieldConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    let dir = tempdir().unwrap();
    let path = dir.path().join("frozen.json");
    fs::write(&path, r#"{ "alpha_step": -0.004 }"#).unwrap();
    assert!(matches!(
        FieldConfig::load(&path),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_config_rejects_bad_margin_and_strength() {
    let negative_margin = FieldConfig {
        wrap_margin: -1.0,
        ..FieldConfig::default()
    };
    assert!(matches!(
        negative_margin.validate(),
        Err(ConfigError::Invalid(_))
    ));

    for strength in [f32::NAN, f32::INFINITY] {
        let config = FieldConfig {
            repel_strength: strength,
            ..FieldConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}

#[test]
fn test_config_load_rejects_malformed_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ particle_count: ").unwrap();

    assert!(matches!(
        FieldConfig::load(&path),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_config_load_missing_file() {
    let dir = tempdir().unwrap();

    assert!(matches!(
        FieldConfig::load(dir.path().join("nope.json")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_headless_render_writes_png() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("frame.png");

    let options = HeadlessOptions {
        width: 160,
        height: 90,
        frames: 30,
        pointer: Some(Vec2::new(80.0, 45.0)),
        ..Default::default()
    };
    let surface = render_headless(FieldConfig::default().with_seed(1), &options).unwrap();
    assert_eq!(surface.frames(), 31);
    surface.save_png(&path).unwrap();

    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (160, 90));
    assert_eq!(image.as_raw().as_slice(), surface.as_bytes());
}

#[test]
fn test_rendered_motes_are_visible() {
    let config = FieldConfig::default().with_particle_count(300).with_seed(9);
    let field = ParticleField::new(config, 200, 200);
    let mut surface = PixelSurface::new(200, 200);

    field.render(&mut surface);

    let lit = surface
        .image()
        .pixels()
        .filter(|px| px.0[3] > 0)
        .count();
    assert!(lit > 0);
}
