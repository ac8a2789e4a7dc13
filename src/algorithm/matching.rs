//! Nearest-color lookup over a tile color table

use crate::math::Rgb;

/// Index of the table entry with the smallest squared distance to `color`
///
/// Ties go to the lowest index. Returns `None` only for an empty table.
pub fn closest_index(color: Rgb, table: &[Rgb]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (index, &candidate) in table.iter().enumerate() {
        let distance = color.squared_distance(candidate);
        // Strict comparison keeps the first minimum
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}
