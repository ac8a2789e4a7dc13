//! Output canvas with alpha-over tile painting

use crate::io::image::{open_rgba, resize_exact};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Square RGBA bitmap that tiles are painted onto
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Opaque white canvas of `size` x `size` pixels
    pub fn blank(size: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(size, size, WHITE),
        }
    }

    /// Canvas initialized from an existing image, stretched to `size` square
    pub fn from_image(image: &RgbaImage, size: u32) -> Self {
        Self {
            image: resize_exact(image, size, size),
        }
    }

    /// Canvas initialized from a background asset, or white if none is usable
    ///
    /// A missing path and an undecodable file both fall back to the blank
    /// canvas; only the latter is worth a warning.
    pub fn from_background(path: Option<&Path>, size: u32) -> Self {
        let Some(path) = path.filter(|path| path.is_file()) else {
            log::debug!("No background asset, starting from a blank canvas");
            return Self::blank(size);
        };

        match open_rgba(path) {
            Ok(image) => {
                log::debug!("Using background '{}'", path.display());
                Self::from_image(&image, size)
            }
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable background '{}': {e}",
                    path.display()
                );
                Self::blank(size)
            }
        }
    }

    /// Paint `tile` with its top-left corner at (`x`, `y`)
    ///
    /// Pixels falling outside the canvas are clipped.
    pub fn blit(&mut self, tile: &RgbaImage, x: u32, y: u32) {
        for (tx, ty, &src) in tile.enumerate_pixels() {
            let (Some(cx), Some(cy)) = (x.checked_add(tx), y.checked_add(ty)) else {
                continue;
            };
            if let Some(dst) = self.image.get_pixel_mut_checked(cx, cy) {
                *dst = blend_over(src, *dst);
            }
        }
    }

    /// Drop the alpha channel without blending against any backdrop
    pub fn flatten(&self) -> RgbImage {
        RgbImage::from_fn(self.image.width(), self.image.height(), |x, y| {
            let Rgba([r, g, b, _]) = *self.image.get_pixel(x, y);
            Rgb([r, g, b])
        })
    }

    /// Current RGBA contents
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Mutable access, used to pre-paint a canvas
    pub const fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Edge length in pixels
    pub fn size(&self) -> u32 {
        self.image.width()
    }
}

/// Composite `src` over `dst` with straight (non-premultiplied) alpha
///
/// An opaque source replaces the destination exactly and a fully transparent
/// source leaves it untouched.
pub fn blend_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    match src.0[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let Rgba([sr, sg, sb, sa]) = src;
    let Rgba([dr, dg, db, da]) = dst;
    let src_alpha = f32::from(sa) / 255.0;
    let dst_alpha = f32::from(da) / 255.0 * (1.0 - src_alpha);
    let out_alpha = src_alpha + dst_alpha;

    let channel = |s: u8, d: u8| {
        let value = f32::from(s).mul_add(src_alpha, f32::from(d) * dst_alpha) / out_alpha;
        value.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(sr, dr),
        channel(sg, dg),
        channel(sb, db),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
