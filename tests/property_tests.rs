use image::{DynamicImage, GenericImageView};
use proptest::prelude::*;
use std::path::Path;
use web_image_optimizer::utils::has_marker;
use web_image_optimizer::{fit_within, is_image_file, resize_image, OptimizeOptions};

proptest! {
    #[test]
    fn optimize_options_quality_range(quality in 0u8..=255u8) {
        let result = OptimizeOptions::new(Some(quality), None, None);
        if (1..=100).contains(&quality) {
            prop_assert_eq!(result.unwrap().quality, quality);
        } else {
            prop_assert!(result.is_err());
        }
    }

    #[test]
    fn fit_within_respects_bounds(
        width in 1u32..=12_000u32,
        height in 1u32..=12_000u32,
        max_width in 1u32..=4_000u32,
        max_height in 1u32..=4_000u32
    ) {
        let (new_w, new_h) = fit_within(width, height, max_width, max_height);

        prop_assert!(new_w >= 1 && new_h >= 1);
        prop_assert!(new_w <= max_width && new_h <= max_height);
        // Never enlarges
        prop_assert!(new_w <= width && new_h <= height);
    }

    #[test]
    fn fit_within_is_noop_inside_box(
        width in 1u32..=1920u32,
        height in 1u32..=1920u32
    ) {
        prop_assert_eq!(fit_within(width, height, 1920, 1920), (width, height));
    }

    #[test]
    fn fit_within_preserves_aspect_ratio(
        width in 100u32..=10_000u32,
        height in 100u32..=10_000u32
    ) {
        prop_assume!(width > 1920 || height > 1920);
        let (new_w, new_h) = fit_within(width, height, 1920, 1920);

        // One side hits the bound exactly
        prop_assert!(new_w == 1920 || new_h == 1920);

        // The other side is within one pixel of the exact proportional value
        if new_w == 1920 {
            let exact = 1920.0 * height as f64 / width as f64;
            prop_assert!((new_h as f64 - exact).abs() <= 1.0);
        } else {
            let exact = 1920.0 * width as f64 / height as f64;
            prop_assert!((new_w as f64 - exact).abs() <= 1.0);
        }
    }

    #[test]
    fn is_image_file_recognizes_extensions(
        extension in prop::sample::select(vec!["jpg", "JPG", "jpeg", "JpEg", "png", "PNG", "webp", "WEBP", "gif", "bmp", "tiff", "txt"])
    ) {
        let filename = format!("test.{}", extension);
        let expected = matches!(extension.to_lowercase().as_str(), "jpg" | "jpeg" | "png" | "webp");
        prop_assert_eq!(is_image_file(Path::new(&filename)), expected);
    }

    #[test]
    fn marker_in_stem_is_excluded(
        prefix in "[a-z0-9]{0,8}",
        rest in "[a-z0-9]{0,8}",
        extension in prop::sample::select(vec!["jpg", "png"])
    ) {
        let marked = format!("{}_optimized{}.{}", prefix, rest, extension);
        prop_assert!(has_marker(Path::new(&marked), "_optimized"));

        let plain = format!("{}{}.{}", prefix, rest, extension);
        prop_assert!(!has_marker(Path::new(&plain), "_optimized"));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn resize_image_matches_fit_within(
        width in 1u32..=400u32,
        height in 1u32..=400u32,
        bound in 1u32..=200u32
    ) {
        let mut img = DynamicImage::new_rgb8(width, height);
        let options = OptimizeOptions::new(None, Some(bound), Some(bound)).unwrap();

        let resized = resize_image(&mut img, &options);

        prop_assert_eq!(img.dimensions(), fit_within(width, height, bound, bound));
        prop_assert_eq!(resized, width > bound || height > bound);
    }
}
