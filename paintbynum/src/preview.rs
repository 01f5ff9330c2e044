//! Intermediate image previews
//!
//! The pipeline offers each stage's output to a [`Preview`] when
//! `display_intermediate` is set. Previews are diagnostic only and never
//! change the result.

use crate::error::{PaintError, PaintResult};
use paintbynum_core::Pix;
use paintbynum_io::{ImageFormat, write_image};
use std::path::{Path, PathBuf};

/// Receiver for intermediate images
pub trait Preview {
    /// Show `pix` under a short `label` such as `"scaled"`.
    fn show(&mut self, pix: &Pix, label: &str) -> PaintResult<()>;
}

/// Discards every preview.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPreview;

impl Preview for NoPreview {
    fn show(&mut self, _pix: &Pix, _label: &str) -> PaintResult<()> {
        Ok(())
    }
}

/// Writes each preview as a numbered PNG, `NN-label.png`, into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryPreview {
    dir: PathBuf,
    count: usize,
}

impl DirectoryPreview {
    /// Create a preview writer for `dir`. The directory is created on the first write.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            count: 0,
        }
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of previews written so far
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Preview for DirectoryPreview {
    fn show(&mut self, pix: &Pix, label: &str) -> PaintResult<()> {
        self.count += 1;
        let path = self.dir.join(format!("{:02}-{}.png", self.count, label));
        write_image(pix, &path, ImageFormat::Png).map_err(|source| PaintError::Output {
            path: path.clone(),
            source,
        })?;
        log::debug!("preview {} written to {}", label, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintbynum_core::PixelDepth;

    #[test]
    fn test_directory_preview_numbers_files() {
        let dir = std::env::temp_dir().join(format!("paintbynum-preview-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let mut preview = DirectoryPreview::new(&dir);
        let pix = Pix::new(4, 3, PixelDepth::Bit8).unwrap();

        preview.show(&pix, "scaled").unwrap();
        preview.show(&pix, "mask").unwrap();
        assert_eq!(preview.count(), 2);
        assert!(dir.join("01-scaled.png").exists());
        assert!(dir.join("02-mask.png").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
