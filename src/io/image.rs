//! Image decoding, resizing and atomic PNG export

#[cfg(unix)]
use crate::io::configuration::OUTPUT_FILE_MODE;
use crate::io::error::{MosaicError, Result, file_system_error};
use image::imageops::{self, FilterType};
use image::{ImageFormat, ImageReader, ImageResult, RgbImage, Rgba, RgbaImage};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Decode any supported image file into 8-bit RGBA
///
/// The format is sniffed from the file contents, so a mislabeled extension
/// still decodes.
///
/// # Errors
///
/// Returns the decoder's error if the file cannot be read or decoded
pub fn open_rgba(path: &Path) -> ImageResult<RgbaImage> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(image.to_rgba8())
}

/// Resize to exactly `width` x `height`, ignoring aspect ratio
///
/// Uses bicubic (Catmull-Rom) filtering on premultiplied alpha, so the color
/// of transparent pixels never bleeds into their neighbours. An image already
/// at the target size is copied unchanged.
pub fn resize_exact(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }

    let mut premultiplied = image.clone();
    premultiplied.pixels_mut().for_each(premultiply);
    let mut resized = imageops::resize(&premultiplied, width, height, FilterType::CatmullRom);
    resized.pixels_mut().for_each(unpremultiply);
    resized
}

fn premultiply(pixel: &mut Rgba<u8>) {
    let Rgba([r, g, b, a]) = *pixel;
    let scale = |c: u8| ((u32::from(c) * u32::from(a) + 127) / 255) as u8;
    *pixel = Rgba([scale(r), scale(g), scale(b), a]);
}

fn unpremultiply(pixel: &mut Rgba<u8>) {
    let Rgba([r, g, b, a]) = *pixel;
    if a == 0 {
        *pixel = Rgba([0, 0, 0, 0]);
        return;
    }
    let scale = |c: u8| (u32::from(c) * 255 / u32::from(a)).min(255) as u8;
    *pixel = Rgba([scale(r), scale(g), scale(b), a]);
}

/// Whether the file name ends in `.` plus one of the given extensions,
/// ignoring case
///
/// A bare dot-name such as `.png` counts.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    let Some(lowered) = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_ascii_lowercase)
    else {
        return false;
    };
    extensions.iter().any(|ext| {
        lowered
            .strip_suffix(ext.to_ascii_lowercase().as_str())
            .is_some_and(|stem| stem.ends_with('.'))
    })
}

/// Encode the image as PNG and move it into place in one step
///
/// The PNG is written to a temporary file beside the destination and renamed
/// over it only once encoding succeeded, so a failed export leaves nothing at
/// `output_path`. Missing parent directories are created. On Unix the file
/// ends up readable by everyone (`0o644`).
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The temporary file cannot be created or written
/// - The PNG encoder fails
/// - The finished file cannot be renamed to `output_path`
pub fn write_png_atomic(image: &RgbImage, output_path: &Path) -> Result<()> {
    let parent = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(file_system_error(parent, "create directory"))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".mosaic-")
        .suffix(".png.tmp")
        .tempfile_in(parent)
        .map_err(file_system_error(parent, "create temporary file"))?;
    // Temporary files start owner-only; the finished mosaic must not
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(OUTPUT_FILE_MODE))
            .map_err(file_system_error(output_path, "set permissions"))?;
    }

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        image
            .write_to(&mut writer, ImageFormat::Png)
            .map_err(|e| MosaicError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;
        writer
            .flush()
            .map_err(file_system_error(output_path, "write"))?;
    }

    temp.persist(output_path)
        .map_err(|e| MosaicError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "rename",
            source: e.error,
        })?;

    Ok(())
}
