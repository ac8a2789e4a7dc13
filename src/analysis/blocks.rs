//! Block averaging that downsamples an image onto the mosaic grid

use crate::io::error::{Result, invalid_parameter};
use crate::math::Block;
use image::RgbaImage;
use ndarray::{Array2, Array3};

/// Average every `grid` x `grid` cell of the image into one block
///
/// The result is indexed `[row, col]`, iterating row-major in the same order
/// the compositor paints. Each channel mean is floored, never rounded.
///
/// # Errors
///
/// Returns an error if `grid` is zero, or if either image dimension is not a
/// positive multiple of `grid`
pub fn reduce(image: &RgbaImage, grid: u32) -> Result<Array2<Block>> {
    let (width, height) = image.dimensions();
    if grid == 0 {
        return Err(invalid_parameter("grid", &grid, &"must be positive"));
    }
    if width < grid || height < grid || width % grid != 0 || height % grid != 0 {
        return Err(invalid_parameter(
            "grid",
            &grid,
            &format!("does not evenly divide a {width}x{height} image"),
        ));
    }

    let block_width = width / grid;
    let block_height = height / grid;
    let cells = grid as usize;

    // Per-cell channel sums; a 10x10 block of 255s stays far below u64 range
    let mut sums = Array3::<u64>::zeros((cells, cells, 4));
    for (x, y, pixel) in image.enumerate_pixels() {
        let row = (y / block_height) as usize;
        let col = (x / block_width) as usize;
        for (channel, &value) in pixel.0.iter().enumerate() {
            if let Some(sum) = sums.get_mut((row, col, channel)) {
                *sum += u64::from(value);
            }
        }
    }

    let count = u64::from(block_width) * u64::from(block_height);
    Ok(Array2::from_shape_fn((cells, cells), |(row, col)| {
        let mean = |channel: usize| {
            sums.get((row, col, channel))
                .map_or(0, |&sum| (sum / count) as u8)
        };
        Block::new(mean(0), mean(1), mean(2), mean(3))
    }))
}

/// Alpha-weighted mean color of the whole image
///
/// Each pixel's color counts in proportion to its alpha, so transparent
/// margins add no color. Color channels are `floor(sum(c * a) / sum(a))`,
/// or 0 when the image is fully transparent; alpha is the floored plain mean.
/// An empty image averages to a fully transparent black block.
pub fn average_color(image: &RgbaImage) -> Block {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return Block::default();
    }

    let mut weighted = [0u64; 3];
    let mut alpha_sum = 0u64;
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = u64::from(a);
        for (sum, value) in weighted.iter_mut().zip([r, g, b]) {
            *sum += u64::from(value) * alpha;
        }
        alpha_sum += alpha;
    }

    let [r, g, b] = weighted.map(|sum| sum.checked_div(alpha_sum).unwrap_or(0) as u8);
    Block::new(r, g, b, (alpha_sum / count) as u8)
}
