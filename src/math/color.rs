//! Color value types and the distance metrics used for tile selection

/// Opaque color used for matching; alpha is never part of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Pure white, the anchor of the near-white rule
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Sum of squared per-channel differences
    ///
    /// Ranks candidates without a square root; the result is only meaningful
    /// relative to other squared distances.
    pub const fn squared_distance(self, other: Self) -> u32 {
        let dr = self.r.abs_diff(other.r) as u32;
        let dg = self.g.abs_diff(other.g) as u32;
        let db = self.b.abs_diff(other.b) as u32;
        dr * dr + dg * dg + db * db
    }

    /// True Euclidean distance in RGB space
    pub fn distance(self, other: Self) -> f64 {
        f64::from(self.squared_distance(other)).sqrt()
    }

    /// ITU-R 601-2 luma in fixed point, rounded to the nearest integer
    pub const fn luma(self) -> u8 {
        let weighted = self.r as u32 * 19_595 + self.g as u32 * 38_470 + self.b as u32 * 7_471;
        ((weighted + 0x8000) >> 16) as u8
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Averaged RGBA sample of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Block {
    /// Red channel average
    pub r: u8,
    /// Green channel average
    pub g: u8,
    /// Blue channel average
    pub b: u8,
    /// Alpha channel average
    pub a: u8,
}

impl Block {
    /// Build a block from its channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Color part of the block with alpha dropped
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl From<[u8; 4]> for Block {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}
