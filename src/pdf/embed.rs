//! Image XObject creation
//!
//! JPEG files are embedded as-is with the `DCTDecode` filter. Every other
//! format is decoded to 8-bit gray or RGB samples, which lopdf Flate-compresses
//! when the document is compressed. Alpha channels become a soft mask.

use std::path::Path;
use image::{DynamicImage, ColorType};
use lopdf::{Document, Object, ObjectId, Dictionary, Stream};
use crate::error::{Error, Result};
use crate::frames::decode_frames;

/// PDF device color space of an embedded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceGray,
    DeviceRGB,
    DeviceCMYK,
}

impl ColorSpace {
    /// Color space for a JPEG frame with the given component count
    fn from_components(components: u8) -> Option<Self> {
        match components {
            1 => Some(ColorSpace::DeviceGray),
            3 => Some(ColorSpace::DeviceRGB),
            4 => Some(ColorSpace::DeviceCMYK),
            _ => None,
        }
    }

    /// Number of color components
    pub fn components(&self) -> usize {
        match self {
            ColorSpace::DeviceGray => 1,
            ColorSpace::DeviceRGB => 3,
            ColorSpace::DeviceCMYK => 4,
        }
    }

    /// PDF name of this color space
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceCMYK => "DeviceCMYK",
        }
    }
}

/// How the image samples are stored in the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    /// Original JPEG bytes, decoded by the viewer with DCTDecode
    Jpeg,
    /// Raw 8-bit samples, compressed along with the rest of the document
    Samples,
}

/// An image ready to be written as a PDF image XObject
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    pub color_space: ColorSpace,
    pub encoding: ImageEncoding,
    /// Adobe CMYK JPEGs store inverted samples
    pub inverted: bool,
    /// Stream content
    pub data: Vec<u8>,
    /// 8-bit alpha samples, if the image has a meaningful alpha channel
    pub soft_mask: Option<Vec<u8>>,
}

/// Frame information read from a JPEG header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct JpegInfo {
    width: u32,
    height: u32,
    components: u8,
    adobe: bool,
}

impl EmbeddedImage {
    /// Load every frame of an image file, picking the encoding from its contents
    ///
    /// JPEGs always yield one image. Multi-page TIFFs and animated GIFs
    /// yield one image per frame.
    pub fn load_frames(path: &Path) -> Result<Vec<Self>> {
        let data = std::fs::read(path)?;

        if is_jpeg(&data) {
            return Ok(vec![Self::from_jpeg(path, data)?]);
        }

        let frames = decode_frames(path, &data)?;
        Ok(frames.iter().map(Self::from_decoded).collect())
    }

    /// Wrap raw JPEG bytes without re-encoding them
    fn from_jpeg(path: &Path, data: Vec<u8>) -> Result<Self> {
        let info = parse_jpeg_header(&data).ok_or_else(|| Error::InvalidImage {
            path: path.to_path_buf(),
            reason: "could not find a JPEG frame header".to_string(),
        })?;

        let color_space = ColorSpace::from_components(info.components).ok_or_else(|| {
            Error::InvalidImage {
                path: path.to_path_buf(),
                reason: format!("unsupported JPEG component count {}", info.components),
            }
        })?;

        if info.width == 0 || info.height == 0 {
            return Err(Error::InvalidImage {
                path: path.to_path_buf(),
                reason: "JPEG frame has zero size".to_string(),
            });
        }

        Ok(Self {
            width: info.width,
            height: info.height,
            color_space,
            encoding: ImageEncoding::Jpeg,
            inverted: color_space == ColorSpace::DeviceCMYK && info.adobe,
            data,
            soft_mask: None,
        })
    }

    /// Convert a decoded image into 8-bit samples
    pub fn from_decoded(image: &DynamicImage) -> Self {
        let (color_space, data, alpha) = match image.color() {
            ColorType::L8 | ColorType::L16 => {
                (ColorSpace::DeviceGray, image.to_luma8().into_raw(), None)
            }
            ColorType::La8 | ColorType::La16 => {
                let luma_alpha = image.to_luma_alpha8();
                let (gray, alpha) = split_alpha(luma_alpha.as_raw(), 1);
                (ColorSpace::DeviceGray, gray, Some(alpha))
            }
            color if color.has_alpha() => {
                let rgba = image.to_rgba8();
                let (rgb, alpha) = split_alpha(rgba.as_raw(), 3);
                (ColorSpace::DeviceRGB, rgb, Some(alpha))
            }
            _ => (ColorSpace::DeviceRGB, image.to_rgb8().into_raw(), None),
        };

        // A fully opaque alpha channel adds nothing
        let soft_mask = alpha.filter(|a| a.iter().any(|&v| v != u8::MAX));

        Self {
            width: image.width(),
            height: image.height(),
            color_space,
            encoding: ImageEncoding::Samples,
            inverted: false,
            data,
            soft_mask,
        }
    }

    /// Add the image (and its soft mask) to the document, returning the XObject id
    pub fn add_to_document(&self, doc: &mut Document) -> ObjectId {
        let mut dict = image_dictionary(self.width, self.height, self.color_space);

        if self.inverted {
            let decode = (0..self.color_space.components())
                .flat_map(|_| [Object::Integer(1), Object::Integer(0)])
                .collect();
            dict.set("Decode", Object::Array(decode));
        }

        if let Some(ref alpha) = self.soft_mask {
            let mask_dict = image_dictionary(self.width, self.height, ColorSpace::DeviceGray);
            let mask_id = doc.add_object(Stream::new(mask_dict, alpha.clone()));
            dict.set("SMask", Object::Reference(mask_id));
        }

        if self.encoding == ImageEncoding::Jpeg {
            dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
        }

        let mut stream = Stream::new(dict, self.data.clone());
        // JPEG data is already compressed
        stream.allows_compression = self.encoding == ImageEncoding::Samples;

        doc.add_object(Object::Stream(stream))
    }
}

/// Base dictionary shared by image and soft mask XObjects
fn image_dictionary(width: u32, height: u32, color_space: ColorSpace) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width as i64));
    dict.set("Height", Object::Integer(height as i64));
    dict.set("ColorSpace", Object::Name(color_space.pdf_name().as_bytes().to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict
}

/// Split interleaved samples into color samples and alpha samples
fn split_alpha(raw: &[u8], color_components: usize) -> (Vec<u8>, Vec<u8>) {
    let stride = color_components + 1;
    let pixels = raw.len() / stride;
    let mut color = Vec::with_capacity(pixels * color_components);
    let mut alpha = Vec::with_capacity(pixels);

    for pixel in raw.chunks_exact(stride) {
        color.extend_from_slice(&pixel[..color_components]);
        alpha.push(pixel[color_components]);
    }

    (color, alpha)
}

/// JPEG files start with an SOI marker followed by another marker
fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 3 && data[0] == 0xFF && data[1] == 0xD8 && data[2] == 0xFF
}

/// Walk the JPEG marker segments up to the first start-of-frame
fn parse_jpeg_header(data: &[u8]) -> Option<JpegInfo> {
    if !is_jpeg(data) {
        return None;
    }

    let mut adobe = false;
    let mut pos = 2;

    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }

        let marker = data[pos + 1];
        pos += 2;

        // Fill bytes and standalone markers carry no length
        if marker == 0xFF {
            pos -= 1;
            continue;
        }
        if marker == 0x00 || marker == 0x01 || (0xD0..=0xD8).contains(&marker) {
            continue;
        }
        if marker == 0xD9 || marker == 0xDA {
            return None;
        }

        if pos + 2 > data.len() {
            return None;
        }
        let length = u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;
        if length < 2 || pos + length > data.len() {
            return None;
        }
        let segment = &data[pos + 2..pos + length];

        match marker {
            // APP14 "Adobe"
            0xEE if segment.starts_with(b"Adobe") => adobe = true,
            // SOF0..SOF15, except DHT (C4), JPG (C8) and DAC (CC)
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                if segment.len() < 6 {
                    return None;
                }
                let height = u16::from_be_bytes([segment[1], segment[2]]) as u32;
                let width = u16::from_be_bytes([segment[3], segment[4]]) as u32;
                let components = segment[5];
                return Some(JpegInfo { width, height, components, adobe });
            }
            _ => {}
        }

        pos += length;
    }

    None
}
