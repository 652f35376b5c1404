use std::io::Cursor;

use agro_leaf_rust_lib::catalog::is_known_class;
use agro_leaf_rust_lib::disease_info::is_default_info;
use agro_leaf_rust_lib::{
    classify_heuristic, extract_features, format_disease_name, get_disease_info, identify_plant,
    Classification, ClassifierContext, PlantType, DEGRADED_CONFIDENCE, UNKNOWN_DISEASE,
};
use assert_approx_eq::assert_approx_eq;
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};

const SIDE: u32 = 224;

fn uniform(color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(SIDE, SIDE, Rgb(color))
}

/// Small linear congruential generator so the test rasters are reproducible
fn noise_image(seed: u64, width: u32, height: u32) -> RgbImage {
    let mut state = seed;
    RgbImage::from_fn(width, height, |_, _| {
        let mut channel = || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 56) as u8
        };
        Rgb([channel(), channel(), channel()])
    })
}

fn two_tone(left: [u8; 3], right: [u8; 3]) -> RgbImage {
    RgbImage::from_fn(SIDE, SIDE, |x, _| if x < SIDE / 2 { Rgb(left) } else { Rgb(right) })
}

fn sample_rasters() -> Vec<RgbImage> {
    let mut rasters = vec![
        uniform([0, 0, 0]),
        uniform([255, 255, 255]),
        uniform([0, 255, 0]),
        uniform([34, 139, 34]),
        uniform([139, 90, 43]),
        uniform([230, 200, 60]),
        uniform([200, 120, 40]),
        two_tone([200, 30, 30], [30, 200, 30]),
        two_tone([20, 20, 20], [120, 100, 50]),
        RgbImage::from_fn(300, 180, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])),
    ];
    rasters.extend((0..12).map(|seed| noise_image(seed, 64 + seed as u32 * 7, 48)));
    rasters
}

#[test]
fn every_raster_gets_a_catalog_label_and_bounded_confidence() {
    for raster in sample_rasters() {
        let diagnosis = classify_heuristic(&raster, [SIDE, SIDE]).unwrap();
        assert!(is_known_class(&diagnosis.class_name), "{}", diagnosis.class_name);
        assert!(
            (50.0..=92.0).contains(&diagnosis.confidence),
            "{} at {}",
            diagnosis.class_name,
            diagnosis.confidence
        );
    }
}

#[test]
fn classification_is_deterministic() {
    let ctx = ClassifierContext::default();
    for raster in sample_rasters() {
        let first = ctx.classify(&raster);
        for _ in 0..3 {
            assert_eq!(ctx.classify(&raster), first);
        }
    }
}

#[test]
fn tomato_is_checked_before_apple() {
    let raster = two_tone([200, 30, 30], [30, 200, 30]);
    let features = extract_features(&raster).unwrap();

    // Both the tomato and the apple guards hold for this raster
    assert!(features.red_ratio > 0.15);
    assert!(features.red_ratio > 0.1 && features.green_ratio > 0.3);
    assert_eq!(identify_plant(&features), PlantType::Tomato);
}

#[test]
fn dark_raster_leans_towards_blight() {
    let raster = uniform([0, 0, 0]);
    let features = extract_features(&raster).unwrap();
    assert_approx_eq!(features.dark_ratio, 1.0);

    let diagnosis = classify_heuristic(&raster, [SIDE, SIDE]).unwrap();
    assert!(!diagnosis.class_name.contains("healthy"));
    assert!(diagnosis.class_name.contains("blight"), "{}", diagnosis.class_name);
}

#[test]
fn white_raster_is_powdery_mildew() {
    let raster = uniform([255, 255, 255]);
    let features = extract_features(&raster).unwrap();
    assert_approx_eq!(features.bright_ratio, 1.0);
    assert_eq!(identify_plant(&features), PlantType::General);

    let diagnosis = classify_heuristic(&raster, [SIDE, SIDE]).unwrap();
    assert!(diagnosis.class_name.ends_with("Powdery_mildew"), "{}", diagnosis.class_name);
}

#[test]
fn pure_green_raster_is_healthy() {
    let raster = uniform([0, 255, 0]);
    let features = extract_features(&raster).unwrap();
    assert_approx_eq!(features.green_ratio, 1.0);
    assert_approx_eq!(features.dark_ratio, 0.0);
    assert_approx_eq!(features.brown_ratio, 0.0);
    assert_approx_eq!(features.bright_ratio, 0.0);

    let diagnosis = classify_heuristic(&raster, [SIDE, SIDE]).unwrap();
    assert!(diagnosis.class_name.ends_with("healthy"), "{}", diagnosis.class_name);
}

#[test]
fn malformed_bytes_give_the_degraded_result() {
    let ctx = ClassifierContext::default();
    for bytes in [&b""[..], &b"\x89PNG\r\n\x1a\n truncated"[..], &[0u8; 64][..]] {
        let result = ctx.classify_bytes(bytes);
        assert!(result.is_degraded());
        let (label, confidence) = result.into_pair();
        assert_eq!(label, UNKNOWN_DISEASE);
        assert_approx_eq!(confidence, DEGRADED_CONFIDENCE);
    }
}

#[test]
fn encoded_png_classifies_like_the_raster() {
    let raster = uniform([0, 255, 0]);
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(raster.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .unwrap();

    let ctx = ClassifierContext::default();
    let from_bytes = ctx.classify_bytes(&bytes);
    assert!(matches!(from_bytes, Classification::Diagnosed(_)));
    assert_eq!(from_bytes, ctx.classify(&raster));
}

#[test]
fn label_formatting() {
    assert_eq!(format_disease_name("Tomato___Late_blight"), "Tomato - Late blight");
    assert_eq!(format_disease_name("Pepper,_bell___healthy"), "Pepper bell - healthy");
}

#[test]
fn disease_info_lookup_is_total() {
    for class in agro_leaf_rust_lib::catalog::all_classes() {
        let info = get_disease_info(class);
        assert!(!is_default_info(info), "{} fell through to the default", class);
        assert!(!info.severity.is_empty() && !info.treatment.is_empty() && !info.prevention.is_empty());
    }

    for unmatched in ["", "zzz", "Quantum flux", UNKNOWN_DISEASE] {
        assert!(is_default_info(get_disease_info(unmatched)), "{}", unmatched);
    }
}
