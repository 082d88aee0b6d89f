use crate::refs::{ObjectRefs, RefType};
use crate::CardError;
use image::{ColorType, DynamicImage, GenericImageView};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

/// Raster data that is either passed through untouched (JPEG) or re-encoded
#[derive(Clone)]
pub enum RasterImage {
    DirectlyEmbeddableJpeg(Vec<u8>),
    Decoded(DynamicImage),
}

/// A raster image (the card logo) that is embedded once per document and
/// referenced from every card that shows it
#[derive(Clone)]
pub struct Image {
    pub raster: RasterImage,
    pub width: u32,
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, CardError> {
        let data = std::fs::read(path.as_ref())?;
        Self::new_from_bytes(data)
    }

    pub fn new_from_bytes(data: Vec<u8>) -> Result<Image, CardError> {
        let format = image::guess_format(&data)?;
        let image = image::load_from_memory_with_format(&data, format)?;

        match (format, image.color()) {
            (image::ImageFormat::Jpeg, ColorType::Rgb8) => {
                // we can embed it directly!
                Ok(Image {
                    width: image.width(),
                    height: image.height(),
                    raster: RasterImage::DirectlyEmbeddableJpeg(data),
                })
            }
            _ => Ok(Self::new_raster(image)),
        }
    }

    pub fn new_raster(image: DynamicImage) -> Image {
        Image {
            width: image.width(),
            height: image.height(),
            raster: RasterImage::Decoded(image),
        }
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    fn encode(&self) -> EncodeOutput {
        match &self.raster {
            RasterImage::DirectlyEmbeddableJpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            RasterImage::Decoded(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<_> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectRefs, image_index: usize, writer: &mut Pdf) {
        let id = refs.alloc(RefType::Image(image_index));
        let encoded = self.encode();

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.alloc(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        // add a transparency mask if we have one
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn png_with_alpha_round_trips_through_decoder() {
        let mut buffer = RgbaImage::new(4, 2);
        buffer.put_pixel(0, 0, Rgba([255, 0, 0, 128]));
        let mut png = std::io::Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(buffer)
            .write_to(&mut png, image::ImageOutputFormat::Png)
            .unwrap();

        let image = Image::new_from_bytes(png.into_inner()).unwrap();
        assert_eq!((image.width, image.height), (4, 2));
        assert_eq!(image.aspect_ratio(), 2.0);
        assert!(image.encode().mask.is_some());
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(Image::new_from_bytes(b"definitely not an image".to_vec()).is_err());
    }
}
