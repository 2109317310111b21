use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};

use crate::error::AssetError;

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>, AssetError> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir_path).map_err(|source| AssetError::ReadDir {
        path: dir_path.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| AssetError::ReadDir {
            path: dir_path.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && is_supported_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        Err(AssetError::NoImages(dir_path.to_path_buf()))
    } else {
        Ok(paths)
    }
}

fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg" | "bmp" | "gif"),
        None => false,
    }
}

// Reads the EXIF orientation tag; 1 (upright) when absent or unreadable.
fn exif_orientation(image_path: &Path, file_bytes: &[u8]) -> u32 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().map(|v| *v as u32),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            tracing::warn!("Could not read EXIF data for {}: {}", image_path.display(), e);
            1
        }
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D, AssetError> {
    let file_bytes = fs::read(image_path).map_err(|source| AssetError::ReadFile {
        path: image_path.to_path_buf(),
        source,
    })?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();

    // EXIF is only reliable for JPEG
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(image_path, &file_bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&(".".to_string() + &extension), &file_bytes)
        .map_err(|e| AssetError::Decode { path: image_path.to_path_buf(), reason: e.to_string() })?;

    // 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW. Flipped variants are ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        tracing::debug!("Applied EXIF orientation {} to {}", orientation, image_path.display());
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| AssetError::Decode { path: image_path.to_path_buf(), reason: e.to_string() })?;

    Ok(texture)
}

/// Load an optional image, logging and skipping it on failure.
pub fn load_optional_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: Option<&Path>,
) -> Option<Texture2D> {
    let path = image_path?;
    match load_texture_with_exif_rotation(rl, thread, path) {
        Ok(texture) => Some(texture),
        Err(e) => {
            tracing::warn!("Skipping optional image: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_extension_case_insensitively() {
        assert!(is_supported_image(Path::new("a/b/photo.JPG")));
        assert!(is_supported_image(Path::new("cake.png")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("README")));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let err = load_sorted_image_paths(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, AssetError::ReadDir { .. }));
    }

    #[test]
    fn orientation_defaults_to_upright_without_exif() {
        assert_eq!(exif_orientation(Path::new("x.jpg"), b"not a jpeg"), 1);
    }
}
