use std::path::{Path, PathBuf};
use std::fs;
use image::RgbImage;

use crate::errors::{AgroLeafError, Result};

/// Check whether a path carries one of the allowed (lowercase) extensions
pub fn has_allowed_extension<P: AsRef<Path>>(path: P, extensions: &[String]) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|allowed| *allowed == ext)
        })
        .unwrap_or(false)
}

/// Get all image files with an allowed extension from a directory (recursively)
pub fn get_image_files_in_dir<P: AsRef<Path>>(
    dir_path: P,
    extensions: &[String],
) -> Result<Vec<PathBuf>> {
    let dir_path = dir_path.as_ref();

    if !dir_path.exists() {
        return Err(AgroLeafError::InvalidPath(dir_path.to_path_buf()));
    }

    if !dir_path.is_dir() {
        return Err(AgroLeafError::Config(format!(
            "{} is not a directory", dir_path.display()
        )));
    }

    let mut image_files = Vec::new();
    find_image_files_recursive(dir_path, extensions, &mut image_files)?;

    // read_dir order is platform dependent
    image_files.sort();

    Ok(image_files)
}

/// Helper function to recursively search for image files
fn find_image_files_recursive(
    dir_path: &Path,
    extensions: &[String],
    result: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in fs::read_dir(dir_path)? {
        let path = entry?.path();

        if path.is_dir() {
            find_image_files_recursive(&path, extensions, result)?;
        } else if path.is_file() && has_allowed_extension(&path, extensions) {
            result.push(path);
        }
    }

    Ok(())
}

/// Output name for an image, unique within one input tree
///
/// The path relative to `input_root` with separators turned into `__` and
/// the extension kept, so `field_a/leaf.png` and `field_b/leaf.png` (or
/// `leaf.png` and `leaf.jpg`) never share a report. A path outside the root,
/// or the root itself when a single file is processed, uses its file name.
pub fn report_name<P: AsRef<Path>, R: AsRef<Path>>(path: P, input_root: R) -> Result<String> {
    let path = path.as_ref();
    let relative = match path.strip_prefix(input_root.as_ref()) {
        Ok(rel) if rel.components().next().is_some() => rel,
        _ => path
            .file_name()
            .map(Path::new)
            .ok_or_else(|| AgroLeafError::InvalidPath(path.to_path_buf()))?,
    };

    let parts = relative
        .iter()
        .map(|part| part.to_str().ok_or_else(|| AgroLeafError::InvalidPath(path.to_path_buf())))
        .collect::<Result<Vec<_>>>()?;

    Ok(parts.join("__"))
}

/// Decode encoded image bytes (PNG, JPEG, ...) into an RGB raster
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage> {
    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgb8())
}
