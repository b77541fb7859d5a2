use std::fs;
use std::path::PathBuf;

use qrstyle::grid::BitGrid;
use qrstyle::{
    render, EyeShape, FrameStyle, GradientKind, LabelPosition, LabelShape, LogoImage, LogoShape,
    Rgba, StyleConfig,
};
use sha2::{Digest, Sha256};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

fn styled_config() -> StyleConfig {
    let logo = image::RgbaImage::from_fn(12, 12, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgba([250, 120, 0, 255])
        } else {
            image::Rgba([20, 20, 20, 255])
        }
    });
    StyleConfig {
        use_gradient: true,
        gradient_kind: GradientKind::Linear,
        gradient_start: Rgba::rgb(0x11, 0x22, 0x33),
        gradient_end: Rgba::rgb(0x99, 0x33, 0xcc),
        eye_shape: EyeShape::Rounded,
        eye_color: Rgba::rgb(0x22, 0x55, 0x88),
        frame_style: FrameStyle::Rounded,
        border_color: Rgba::rgb(0x33, 0x33, 0x33),
        label: "GOLDEN".into(),
        label_position: LabelPosition::Bottom,
        label_shape: LabelShape::Pill,
        label_bg_color: Rgba::rgb(0xee, 0xee, 0x00),
        logo_shape: LogoShape::Circle,
        ..Default::default()
    }
    .with_logo(LogoImage::from_image(logo))
}

fn grid() -> BitGrid {
    BitGrid::from_fn(29, |row, col| (row * 31 + col * 17 + row * col) % 7 < 3)
}

/// Digest of the raw pixels, so the golden does not depend on the PNG encoder.
fn digest(transparent: bool) -> String {
    let raster = render(&styled_config(), &grid(), 1.0, transparent).expect("render");
    let mut hasher = Sha256::new();
    hasher.update(raster.width().to_be_bytes());
    hasher.update(raster.height().to_be_bytes());
    hasher.update(raster.as_raw());
    hex::encode(hasher.finalize())
}

fn check_golden(name: &str, actual: &str) {
    let expected_path = golden_path(name);
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, actual).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    assert_eq!(actual, read_golden(name), "render of {name} changed");
}

/// The stored digest. A missing fixture is a failure, never a skip.
fn read_golden(name: &str) -> String {
    let expected_path = golden_path(name);
    assert!(
        expected_path.exists(),
        "No golden at {:?}; run `UPDATE_GOLDENS=1 cargo test --test golden_rendering` to create it",
        expected_path
    );
    let exp = fs::read_to_string(&expected_path).expect("unable to read golden");
    exp.trim().to_string()
}

#[test]
fn golden_opaque_render_matches_fixture() {
    check_golden("styled_opaque.sha256", &digest(false));
}

#[test]
fn golden_transparent_render_matches_fixture() {
    check_golden("styled_transparent.sha256", &digest(true));
}

#[test]
#[should_panic(expected = "No golden")]
fn missing_golden_fails() {
    read_golden("no_such_fixture.sha256");
}

#[test]
fn digest_is_stable_within_a_run() {
    assert_eq!(digest(false), digest(false));
    assert_ne!(digest(false), digest(true));
}
