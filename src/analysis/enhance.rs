//! Contrast enhancement applied to source images before reduction

use crate::math::Rgb;
use image::{Rgba, RgbaImage};

/// Rounded mean luma of all pixels, the pivot that contrast scales around
pub fn mean_luma(image: &RgbaImage) -> u8 {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return 0;
    }

    let total: u64 = image
        .pixels()
        .map(|&Rgba([r, g, b, _])| u64::from(Rgb::new(r, g, b).luma()))
        .sum();

    (total as f64 / count as f64 + 0.5) as u8
}

/// Scale every color channel away from the mean luma by `factor`
///
/// A factor of 1.0 returns the image unchanged and 0.0 returns a flat gray
/// image. Results are clamped to the channel range and truncated. Alpha is
/// carried over untouched.
pub fn contrast(image: &RgbaImage, factor: f32) -> RgbaImage {
    let pivot = f32::from(mean_luma(image));
    let scale = |value: u8| {
        let scaled = (f32::from(value) - pivot).mul_add(factor, pivot);
        if scaled <= 0.0 {
            0
        } else if scaled >= 255.0 {
            255
        } else {
            scaled as u8
        }
    };

    let mut enhanced = image.clone();
    for pixel in enhanced.pixels_mut() {
        let Rgba([r, g, b, a]) = *pixel;
        *pixel = Rgba([scale(r), scale(g), scale(b), a]);
    }
    enhanced
}
