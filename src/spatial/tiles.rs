//! Theme tiles, their representative colors and directory loading

use crate::analysis::blocks::average_color;
use crate::io::configuration::IMAGE_EXTENSIONS;
use crate::io::error::{MosaicError, Result, file_system_error, invalid_parameter};
use crate::io::image::{has_extension, open_rgba, resize_exact};
use crate::math::Rgb;
use image::RgbaImage;
use std::path::Path;

/// One theme asset normalized to the tile size
#[derive(Debug, Clone)]
pub struct Tile {
    name: String,
    image: RgbaImage,
    color: Rgb,
}

impl Tile {
    /// Build a tile from a decoded image
    ///
    /// The representative color is the alpha-weighted mean of the image as
    /// given, so transparent pixels contribute nothing. The bitmap is then
    /// resized to `tile_size` square for painting; the resize does not feed
    /// back into the color.
    pub fn from_image(name: impl Into<String>, image: &RgbaImage, tile_size: u32) -> Self {
        let color = average_color(image).rgb();
        Self {
            name: name.into(),
            image: resize_exact(image, tile_size, tile_size),
            color,
        }
    }

    /// File name the tile was loaded from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized RGBA bitmap
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Representative color used for matching
    pub const fn color(&self) -> Rgb {
        self.color
    }
}

/// Ordered, non-empty set of tiles for one theme
///
/// Tiles are sorted by name, which fixes the tie-break order of matching.
#[derive(Debug, Clone)]
pub struct TileSet {
    tiles: Vec<Tile>,
    colors: Vec<Rgb>,
    special: Option<usize>,
    tile_size: u32,
}

impl TileSet {
    /// Load every image in a theme directory
    ///
    /// Files ending in .png, .jpg or .jpeg (any case) are loaded in name
    /// order. A tile whose name equals `special_name` becomes the special
    /// tile.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory does not exist (`ThemeNotFound`)
    /// - The directory cannot be listed
    /// - No file has an image extension (`EmptyTheme`)
    /// - A tile file cannot be decoded (`TileLoad`)
    pub fn load(theme_dir: &Path, tile_size: u32, special_name: Option<&str>) -> Result<Self> {
        if !theme_dir.is_dir() {
            return Err(MosaicError::ThemeNotFound {
                path: theme_dir.to_path_buf(),
            });
        }

        let mut names = Vec::new();
        let entries =
            std::fs::read_dir(theme_dir).map_err(file_system_error(theme_dir, "list theme"))?;
        for entry in entries {
            let path = entry
                .map_err(file_system_error(theme_dir, "list theme"))?
                .path();
            if path.is_file() && has_extension(&path, &IMAGE_EXTENSIONS) {
                if let Some(name) = path.file_name() {
                    names.push(name.to_string_lossy().into_owned());
                }
            }
        }
        names.sort();

        if names.is_empty() {
            return Err(MosaicError::EmptyTheme {
                path: theme_dir.to_path_buf(),
            });
        }

        let mut tiles = Vec::with_capacity(names.len());
        for name in names {
            let path = theme_dir.join(&name);
            let image = open_rgba(&path).map_err(|e| MosaicError::TileLoad { path, source: e })?;
            tiles.push(Tile::from_image(name, &image, tile_size));
        }

        log::debug!(
            "Loaded {} tiles from '{}'",
            tiles.len(),
            theme_dir.display()
        );

        Self::from_tiles(tiles, tile_size, special_name)
    }

    /// Assemble a set from tiles already in memory
    ///
    /// Tiles are re-sorted by name regardless of input order.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, names repeat, or a tile is not
    /// `tile_size` square
    pub fn from_tiles(
        mut tiles: Vec<Tile>,
        tile_size: u32,
        special_name: Option<&str>,
    ) -> Result<Self> {
        if tiles.is_empty() {
            return Err(invalid_parameter("tiles", &0, &"a theme needs at least one tile"));
        }

        tiles.sort_by(|a, b| a.name.cmp(&b.name));
        if let Some(pair) = tiles.windows(2).find(|pair| match pair {
            [a, b] => a.name == b.name,
            _ => false,
        }) {
            let name = pair.first().map(Tile::name).unwrap_or_default();
            return Err(invalid_parameter("tiles", &name, &"tile names must be unique"));
        }
        if let Some(tile) = tiles
            .iter()
            .find(|tile| tile.image.dimensions() != (tile_size, tile_size))
        {
            let (width, height) = tile.image.dimensions();
            return Err(invalid_parameter(
                "tiles",
                &tile.name,
                &format!("is {width}x{height}, expected {tile_size}x{tile_size}"),
            ));
        }

        let colors = tiles.iter().map(Tile::color).collect();
        let special =
            special_name.and_then(|wanted| tiles.iter().position(|tile| tile.name == wanted));

        Ok(Self {
            tiles,
            colors,
            special,
            tile_size,
        })
    }

    /// Tiles in name order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Representative colors, index-aligned with [`Self::tiles`]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Number of tiles, always at least one
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the set has no tiles, never true for a constructed set
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile at `index` in name order
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Look a tile up by file name
    pub fn by_name(&self, name: &str) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.name == name)
    }

    /// Index of the special tile, if the theme provides one
    pub const fn special_index(&self) -> Option<usize> {
        self.special
    }

    /// Edge length in pixels of every tile
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }
}
