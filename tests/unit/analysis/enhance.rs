//! Tests for contrast enhancement around the mean luma

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use tilemosaic::analysis::enhance::{contrast, mean_luma};

    fn split_image() -> RgbaImage {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        image
    }

    // Tests the pivot is the rounded mean luma
    // Verified by truncating instead of rounding the mean
    #[test]
    fn test_mean_luma_rounds() {
        assert_eq!(mean_luma(&split_image()), 128);
        assert_eq!(mean_luma(&RgbaImage::from_pixel(3, 3, Rgba([255, 0, 0, 255]))), 76);
        assert_eq!(mean_luma(&RgbaImage::new(0, 0)), 0);
    }

    // Tests a factor of one leaves every pixel unchanged
    // Verified by adding an offset to the scaled value
    #[test]
    fn test_unit_factor_is_identity() {
        let mut image = RgbaImage::from_pixel(4, 4, Rgba([30, 60, 90, 200]));
        image.put_pixel(2, 3, Rgba([250, 5, 128, 17]));

        assert_eq!(contrast(&image, 1.0), image);
    }

    // Tests a zero factor collapses colors to the gray pivot
    // Verified by pivoting on zero instead of the mean luma
    #[test]
    fn test_zero_factor_is_flat_gray() {
        let flat = contrast(&split_image(), 0.0);
        assert!(flat.pixels().all(|p| *p == Rgba([128, 128, 128, 255])));
    }

    // Tests channels are pushed away from the pivot and clamped
    // Verified by removing the clamp on overflow
    #[test]
    fn test_enhancement_clamps() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        let enhanced = contrast(&image, 1.5);
        assert!(enhanced.pixels().all(|p| *p == Rgba([255, 0, 0, 255])));
    }

    // Tests intermediate values are scaled and truncated
    // Verified by rounding the scaled value
    #[test]
    fn test_enhancement_truncates() {
        // Luma of both pixels averages to 100
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([90, 90, 90, 255]));
        image.put_pixel(1, 0, Rgba([110, 110, 110, 255]));

        let enhanced = contrast(&image, 1.5);
        assert_eq!(*enhanced.get_pixel(0, 0), Rgba([85, 85, 85, 255]));
        assert_eq!(*enhanced.get_pixel(1, 0), Rgba([115, 115, 115, 255]));

        let softened = contrast(&image, 0.25);
        // 100 + (90 - 100) * 0.25 = 97.5
        assert_eq!(*softened.get_pixel(0, 0), Rgba([97, 97, 97, 255]));
    }

    // Tests alpha passes through untouched
    // Verified by scaling the alpha channel as well
    #[test]
    fn test_alpha_preserved() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([10, 10, 10, 0]));
        image.put_pixel(1, 0, Rgba([240, 240, 240, 77]));

        let enhanced = contrast(&image, 2.0);
        assert_eq!(enhanced.get_pixel(0, 0)[3], 0);
        assert_eq!(enhanced.get_pixel(1, 0)[3], 77);
    }
}
