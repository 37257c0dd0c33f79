use crate::refs::{ObjectReferences, RefType};
use crate::GuideError;
use image::DynamicImage;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

/// A raster image that can be placed on any number of pages. The pixels are
/// embedded once, Flate-compressed, with a soft mask when the image has alpha.
#[derive(Debug)]
pub struct Image {
    pub image: DynamicImage,
}

struct EncodeOutput {
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    pub fn new_raster(image: DynamicImage) -> Image {
        Image { image }
    }

    /// Decode an image from memory, guessing the format from its contents
    pub fn from_bytes(data: &[u8]) -> Result<Image, GuideError> {
        Ok(Image::new_raster(image::load_from_memory(data)?))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Image, GuideError> {
        let data = std::fs::read(path)?;
        Image::from_bytes(&data)
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    fn encode(&self) -> EncodeOutput {
        let level = CompressionLevel::DefaultLevel as u8;

        let mask = self.image.color().has_alpha().then(|| {
            let alphas: Vec<u8> = self.image.to_rgba8().pixels().map(|p| p.0[3]).collect();
            compress_to_vec_zlib(&alphas, level)
        });
        let bytes = compress_to_vec_zlib(self.image.to_rgb8().as_raw(), level);

        EncodeOutput { bytes, mask }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.get_or_gen(RefType::Image(image_index));
        let encoded = self.encode();
        let width = self.width() as i32;
        let height = self.height() as i32;

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(Filter::FlateDecode);
        image.width(width);
        image.height(height);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(width);
            s_mask.height(height);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba, RgbaImage};

    #[test]
    fn opaque_images_have_no_mask() {
        let image = Image::new_raster(DynamicImage::ImageLuma8(GrayImage::from_pixel(
            3,
            2,
            Luma([128]),
        )));
        assert_eq!((image.width(), image.height()), (3, 2));
        assert!(image.encode().mask.is_none());
    }

    #[test]
    fn alpha_becomes_a_soft_mask() {
        let image = Image::new_raster(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            2,
            2,
            Rgba([255, 0, 0, 64]),
        )));
        assert!(image.encode().mask.is_some());
    }

    #[test]
    fn undecodable_bytes_are_an_image_error() {
        assert!(matches!(
            Image::from_bytes(b"not an image"),
            Err(GuideError::Image(_))
        ));
    }
}
