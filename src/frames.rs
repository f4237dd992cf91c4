//! Frame-level access to image files
//!
//! Multi-page TIFFs and animated GIFs hold several frames, and each frame
//! becomes its own page. Formats are detected from the file contents, never
//! from the extension.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use image::codecs::gif::GifDecoder;
use image::{
    AnimationDecoder, DynamicImage, GrayAlphaImage, GrayImage, ImageBuffer, ImageFormat,
    ImageReader, Luma, LumaA, Rgb, RgbImage, Rgba, RgbaImage,
};
use tiff::decoder::{Decoder as TiffDecoder, DecodingResult};
use tiff::ColorType as TiffColor;
use crate::error::{Error, Result};

/// Pixel dimensions of every frame in the file, in frame order
pub fn frame_dimensions(path: &Path) -> Result<Vec<(u32, u32)>> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;

    if reader.format() == Some(ImageFormat::Tiff) {
        let file = BufReader::new(File::open(path)?);
        return tiff_page_dimensions(file);
    }

    // GIF frames are composited onto the logical screen, so they all share its size
    Ok(vec![reader.into_dimensions()?])
}

/// Decode every frame of an image held in memory
pub fn decode_frames(path: &Path, data: &[u8]) -> Result<Vec<DynamicImage>> {
    let frames = match image::guess_format(data)? {
        ImageFormat::Tiff => decode_tiff_pages(path, Cursor::new(data))?,
        ImageFormat::Gif => {
            let decoder = GifDecoder::new(Cursor::new(data))?;
            decoder
                .into_frames()
                .collect_frames()?
                .into_iter()
                .map(|frame| DynamicImage::ImageRgba8(frame.into_buffer()))
                .collect()
        }
        _ => vec![image::load_from_memory(data)?],
    };

    if frames.is_empty() {
        return Err(Error::InvalidImage {
            path: path.to_path_buf(),
            reason: "no frames".to_string(),
        });
    }

    Ok(frames)
}

/// Walk the TIFF directory chain without decoding any pixels
fn tiff_page_dimensions<R: Read + Seek>(reader: R) -> Result<Vec<(u32, u32)>> {
    let mut decoder = TiffDecoder::new(reader)?;
    let mut pages = vec![decoder.dimensions()?];

    while decoder.more_images() {
        decoder.next_image()?;
        pages.push(decoder.dimensions()?);
    }

    Ok(pages)
}

fn decode_tiff_pages<R: Read + Seek>(path: &Path, reader: R) -> Result<Vec<DynamicImage>> {
    let mut decoder = TiffDecoder::new(reader)?;
    let mut pages = Vec::new();

    loop {
        let (width, height) = decoder.dimensions()?;
        let color = decoder.colortype()?;
        let samples = decoder.read_image()?;

        let page = tiff_page_image(width, height, color, samples).ok_or_else(|| {
            Error::InvalidImage {
                path: path.to_path_buf(),
                reason: format!("unsupported TIFF color type {:?} on page {}", color, pages.len() + 1),
            }
        })?;
        pages.push(page);

        if !decoder.more_images() {
            break;
        }
        decoder.next_image()?;
    }

    Ok(pages)
}

/// Wrap decoded TIFF samples in an image buffer of the matching layout
fn tiff_page_image(
    width: u32,
    height: u32,
    color: TiffColor,
    samples: DecodingResult,
) -> Option<DynamicImage> {
    match (color, samples) {
        (TiffColor::Gray(8), DecodingResult::U8(buf)) => {
            GrayImage::from_raw(width, height, buf).map(DynamicImage::ImageLuma8)
        }
        (TiffColor::Gray(16), DecodingResult::U16(buf)) => {
            ImageBuffer::<Luma<u16>, _>::from_raw(width, height, buf).map(DynamicImage::ImageLuma16)
        }
        (TiffColor::GrayA(8), DecodingResult::U8(buf)) => {
            GrayAlphaImage::from_raw(width, height, buf).map(DynamicImage::ImageLumaA8)
        }
        (TiffColor::GrayA(16), DecodingResult::U16(buf)) => {
            ImageBuffer::<LumaA<u16>, _>::from_raw(width, height, buf).map(DynamicImage::ImageLumaA16)
        }
        (TiffColor::RGB(8), DecodingResult::U8(buf)) => {
            RgbImage::from_raw(width, height, buf).map(DynamicImage::ImageRgb8)
        }
        (TiffColor::RGB(16), DecodingResult::U16(buf)) => {
            ImageBuffer::<Rgb<u16>, _>::from_raw(width, height, buf).map(DynamicImage::ImageRgb16)
        }
        (TiffColor::RGBA(8), DecodingResult::U8(buf)) => {
            RgbaImage::from_raw(width, height, buf).map(DynamicImage::ImageRgba8)
        }
        (TiffColor::RGBA(16), DecodingResult::U16(buf)) => {
            ImageBuffer::<Rgba<u16>, _>::from_raw(width, height, buf).map(DynamicImage::ImageRgba16)
        }
        (TiffColor::CMYK(8), DecodingResult::U8(buf)) => {
            let rgb: Vec<u8> = buf.chunks_exact(4).flat_map(cmyk_to_rgb).collect();
            RgbImage::from_raw(width, height, rgb).map(DynamicImage::ImageRgb8)
        }
        _ => None,
    }
}

/// Naive CMYK → RGB, good enough for scanned pages
fn cmyk_to_rgb(cmyk: &[u8]) -> [u8; 3] {
    let k = 255 - cmyk[3] as u16;
    let channel = |c: u8| ((255 - c as u16) * k / 255) as u8;
    [channel(cmyk[0]), channel(cmyk[1]), channel(cmyk[2])]
}
