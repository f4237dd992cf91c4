//! Input path validation and image dimension probing

use std::path::{Path, PathBuf};
use crate::error::{Error, Result};
use crate::frames::frame_dimensions;

/// Check a single path: it must exist and be a regular file
pub fn check_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }
    Ok(())
}

/// Keep the paths that exist and are regular files, in input order
///
/// Anything else is reported with a warning and skipped.
pub fn validate_paths<P: AsRef<Path>>(paths: &[P]) -> Vec<PathBuf> {
    let mut valid = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        match check_path(path) {
            Ok(()) => valid.push(path.to_path_buf()),
            Err(e) => log::warn!("Warning: {}", e),
        }
    }

    valid
}

/// Read an image's pixel dimensions (width, height) from its header
///
/// The format is detected from the file contents. For multi-page files this
/// is the largest width and largest height over all pages.
pub fn image_dimensions(path: &Path) -> Result<(u32, u32)> {
    let pages = frame_dimensions(path)?;
    if pages.len() > 1 {
        log::debug!("{}: {} frames", path.display(), pages.len());
    }

    Ok(pages.into_iter().fold((0, 0), |(w, h), (pw, ph)| (w.max(pw), h.max(ph))))
}

/// Maximum width and maximum height across all readable images
///
/// Unreadable images are logged and ignored. Returns `(0, 0)` when no
/// image could be read.
pub fn max_dimensions<P: AsRef<Path>>(paths: &[P]) -> (u32, u32) {
    let mut max_width = 0;
    let mut max_height = 0;

    for path in paths {
        let path = path.as_ref();
        match image_dimensions(path) {
            Ok((width, height)) => {
                log::debug!("{}: {} x {}", path.display(), width, height);
                max_width = max_width.max(width);
                max_height = max_height.max(height);
            }
            Err(e) => log::error!("Error reading image {}: {}", path.display(), e),
        }
    }

    (max_width, max_height)
}
