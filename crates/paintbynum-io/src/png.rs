//! PNG image format support
//!
//! Every PNG variant is decoded to a 32-bit RGB `Pix`: palettes are
//! expanded, 16-bit samples are stripped to 8 bits, gray is replicated
//! into all three channels and alpha is dropped.

use crate::{IoError, IoResult, raster_bytes};
use paintbynum_core::{Pix, PixMut, PixelDepth, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image into a 32-bit RGB `Pix`
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }

    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut pix = PixMut::new(width, height, PixelDepth::Bit32)?;
    for y in 0..height {
        let row_start = y as usize * bytes_per_row;
        for x in 0..width {
            let idx = row_start + x as usize * samples;
            let pixel = if samples < 3 {
                let g = data[idx];
                color::compose_rgb(g, g, g)
            } else {
                color::compose_rgb(data[idx], data[idx + 1], data[idx + 2])
            };
            pix.set_pixel_unchecked(x, y, pixel);
        }
    }

    Ok(pix.into())
}

/// Write a PNG image
///
/// 32-bit images are written as 8-bit RGB, 8-bit images as 8-bit gray,
/// and 1-bit masks as 8-bit gray with foreground 255.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, samples) = match pix.depth() {
        PixelDepth::Bit1 | PixelDepth::Bit8 => (ColorType::Grayscale, 1usize),
        PixelDepth::Bit32 => (ColorType::Rgb, 3usize),
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let data = raster_bytes(pix, samples);

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale_reads_as_rgb() {
        let pix = Pix::from_fn(10, 10, PixelDepth::Bit8, |x, y| (x + y) * 10).unwrap();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();

        let pix2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2.depth(), PixelDepth::Bit32);
        assert_eq!(pix2.dimensions(), (10, 10));
        assert_eq!(pix2.get_rgb(3, 4), Some((70, 70, 70)));
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut pix = PixMut::new(5, 5, PixelDepth::Bit32).unwrap();
        pix.set_rgb(0, 0, 255, 0, 0).unwrap();
        pix.set_rgb(1, 1, 0, 255, 0).unwrap();
        pix.set_rgb(2, 2, 0, 0, 255).unwrap();
        let pix: Pix = pix.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();

        let pix2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(pix2.get_rgb(1, 1), Some((0, 255, 0)));
        assert_eq!(pix2.get_rgb(2, 2), Some((0, 0, 255)));
        assert_eq!(pix2.get_rgb(4, 4), Some((0, 0, 0)));
    }

    #[test]
    fn test_png_mask_written_as_255() {
        let mask = Pix::from_fn(4, 1, PixelDepth::Bit1, |x, _| x % 2).unwrap();
        let mut buffer = Vec::new();
        write_png(&mask, &mut buffer).unwrap();
        let pix = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix.get_rgb(0, 0), Some((0, 0, 0)));
        assert_eq!(pix.get_rgb(1, 0), Some((255, 255, 255)));
    }
}
