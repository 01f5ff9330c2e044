//! paintbynum-io - Image reading and writing
//!
//! Supported formats:
//!
//! - PNG (feature `png-format`)
//! - JPEG (feature `jpeg`)
//!
//! Images are always read as 32-bit RGB. Writers accept 1-, 8- and
//! 32-bit images.

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use paintbynum_core::{Pix, PixelDepth, color};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file, sniffing the format from its header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path)?;
    let pix = read_image_format(BufReader::new(file), format)?;
    log::debug!(
        "read {} ({:?}, {}x{})",
        path.display(),
        format,
        pix.width(),
        pix.height()
    );
    Ok(pix)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

fn read_image_format<R>(reader: R, format: ImageFormat) -> IoResult<Pix>
where
    R: std::io::BufRead + std::io::Seek,
{
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        _ => {
            let _ = reader;
            Err(IoError::UnsupportedFormat(format!("{:?}", format)))
        }
    }
}

/// Write an image to a file in the given format.
///
/// Missing parent directories are created.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_format(pix, &mut writer, format)?;
    writer.flush()?;
    log::debug!("wrote {} ({:?})", path.display(), format);
    Ok(())
}

/// Write an image to a file, choosing the format from its extension.
pub fn write_image_auto<P: AsRef<Path>>(pix: &Pix, path: P) -> IoResult<()> {
    let path = path.as_ref();
    match ImageFormat::from_path(path) {
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(format!(
            "cannot infer format from {}",
            path.display()
        ))),
        format => write_image(pix, path, format),
    }
}

/// Encode an image into memory.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_format(pix, &mut buf, format)?;
    Ok(buf)
}

fn write_image_format<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(pix, writer, jpeg::DEFAULT_JPEG_QUALITY),
        _ => {
            let _ = writer;
            Err(IoError::UnsupportedFormat(format!("{:?}", format)))
        }
    }
}

/// Flatten a `Pix` into 8-bit samples (1 per pixel for gray, 3 for RGB).
#[cfg(any(feature = "png-format", feature = "jpeg"))]
pub(crate) fn raster_bytes(pix: &Pix, samples: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(pix.data().len() * samples);
    for &val in pix.data() {
        match pix.depth() {
            PixelDepth::Bit1 => data.push(if val != 0 { 255 } else { 0 }),
            PixelDepth::Bit8 => data.push(val as u8),
            PixelDepth::Bit32 => data.extend_from_slice(&color::channels(val)),
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_roundtrip_png() {
        let pix = Pix::from_fn(6, 4, PixelDepth::Bit32, |x, y| {
            color::compose_rgb((x * 40) as u8, (y * 60) as u8, 7)
        })
        .unwrap();
        let bytes = write_image_mem(&pix, ImageFormat::Png).unwrap();
        let back = read_image_mem(&bytes).unwrap();
        assert_eq!(back.data(), pix.data());
    }

    #[test]
    fn test_write_auto_rejects_unknown_extension() {
        let pix = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        let err = write_image_auto(&pix, "/tmp/paintbynum-io-test.xyz").unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_image("/nonexistent/paintbynum/none.png").unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = std::env::temp_dir().join("paintbynum-io-test-nested/a/b");
        let _ = fs::remove_dir_all(std::env::temp_dir().join("paintbynum-io-test-nested"));
        let path = dir.join("out.png");
        let pix = Pix::new(3, 3, PixelDepth::Bit8).unwrap();
        write_image_auto(&pix, &path).unwrap();
        let back = read_image(&path).unwrap();
        assert_eq!(back.dimensions(), (3, 3));
    }
}
