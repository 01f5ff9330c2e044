//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Decoded images are always 32-bit RGB.

use crate::{IoError, IoResult, raster_bytes};
use jpeg_decoder::PixelFormat;
use paintbynum_core::{Pix, PixMut, PixelDepth, color};
use std::io::{Read, Write};

/// Default JPEG quality used for written results
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let npix = (width as usize) * (height as usize);

    let samples = match info.pixel_format {
        PixelFormat::L8 => 1,
        PixelFormat::L16 => 2,
        PixelFormat::RGB24 => 3,
        PixelFormat::CMYK32 => 4,
    };
    if data.len() < npix * samples {
        return Err(IoError::InvalidData(format!(
            "JPEG data too short: {} bytes for {}x{}",
            data.len(),
            width,
            height
        )));
    }

    let mut pix = PixMut::new(width, height, PixelDepth::Bit32)?;
    for (i, dst) in pix.data_mut().iter_mut().enumerate() {
        let s = &data[i * samples..(i + 1) * samples];
        *dst = match info.pixel_format {
            PixelFormat::L8 => color::compose_rgb(s[0], s[0], s[0]),
            // big-endian samples, keep the high byte
            PixelFormat::L16 => color::compose_rgb(s[0], s[0], s[0]),
            PixelFormat::RGB24 => color::compose_rgb(s[0], s[1], s[2]),
            // the decoder hands back plain ink coverage, 0 = no ink
            PixelFormat::CMYK32 => {
                let conv = |c: u8| ((255 - c as u32) * (255 - s[3] as u32) / 255) as u8;
                color::compose_rgb(conv(s[0]), conv(s[1]), conv(s[2]))
            }
        };
    }

    Ok(pix.into())
}

/// Write a JPEG image with the given quality (1-100).
///
/// 1-bit and 8-bit images are written as grayscale JPEGs.
pub fn write_jpeg<W: Write>(pix: &Pix, writer: W, quality: u8) -> IoResult<()> {
    let (width, height) = pix.dimensions();
    let (w16, h16) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "JPEG dimensions limited to 65535: got {}x{}",
                width, height
            )));
        }
    };

    let (color_type, samples) = match pix.depth() {
        PixelDepth::Bit1 | PixelDepth::Bit8 => (jpeg_encoder::ColorType::Luma, 1),
        PixelDepth::Bit32 => (jpeg_encoder::ColorType::Rgb, 3),
    };
    let data = raster_bytes(pix, samples);

    let encoder = jpeg_encoder::Encoder::new(writer, quality.clamp(1, 100));
    encoder
        .encode(&data, w16, h16, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_jpeg_roundtrip_flat_color() {
        let pix = Pix::from_fn(16, 16, PixelDepth::Bit32, |_, _| {
            color::compose_rgb(200, 100, 50)
        })
        .unwrap();

        let mut buffer = Vec::new();
        write_jpeg(&pix, &mut buffer, 95).unwrap();
        let pix2 = read_jpeg(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.dimensions(), (16, 16));
        let (r, g, b) = pix2.get_rgb(8, 8).unwrap();
        assert!((r as i32 - 200).abs() <= 4);
        assert!((g as i32 - 100).abs() <= 4);
        assert!((b as i32 - 50).abs() <= 4);
    }

    #[test]
    fn test_read_jpeg_cmyk() {
        // top half no ink, bottom half full black
        let (w, h) = (8u16, 16u16);
        let mut data = Vec::with_capacity(w as usize * h as usize * 4);
        for y in 0..h {
            let k = if y < h / 2 { 0 } else { 255 };
            for _ in 0..w {
                data.extend_from_slice(&[0, 0, 0, k]);
            }
        }
        let mut buffer = Vec::new();
        jpeg_encoder::Encoder::new(&mut buffer, 100)
            .encode(&data, w, h, jpeg_encoder::ColorType::Cmyk)
            .unwrap();

        let pix = read_jpeg(Cursor::new(buffer)).unwrap();
        assert_eq!(pix.dimensions(), (8, 16));
        let (r, g, b) = pix.get_rgb(4, 3).unwrap();
        assert!(r >= 248 && g >= 248 && b >= 248, "white read as {:?}", (r, g, b));
        let (r, g, b) = pix.get_rgb(4, 12).unwrap();
        assert!(r <= 8 && g <= 8 && b <= 8, "black read as {:?}", (r, g, b));
    }

    #[test]
    fn test_read_jpeg_garbage() {
        assert!(read_jpeg(Cursor::new(vec![0xFF, 0xD8, 0xFF, 0x00])).is_err());
    }
}
