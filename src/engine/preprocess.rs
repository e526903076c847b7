//! Image decoding and preprocessing for the classifier

use anyhow::Result;
use image::DynamicImage;
use tract_onnx::prelude::tract_ndarray::Array4;

use crate::config::Normalization;

/// Decode image bytes with EXIF orientation handling.
///
/// Phone cameras often store a rotation tag instead of rotating pixels, so the
/// raw decode can come out sideways without this step.
pub fn decode_image(data: &[u8]) -> Result<DynamicImage> {
    let image = image::load_from_memory(data)?;
    Ok(apply_exif_orientation(data, image))
}

fn apply_exif_orientation(data: &[u8], image: DynamicImage) -> DynamicImage {
    use std::io::Cursor;

    let orientation = match exif::Reader::new().read_from_container(&mut Cursor::new(data)) {
        Ok(exif_data) => exif_data
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .unwrap_or(1) as u8,
        Err(_) => 1, // no EXIF, assume normal orientation
    };

    // Orientation values per the EXIF spec (1 = normal, 2-8 = flips/rotations)
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}

/// Convert a decoded image into the model input tensor.
///
/// The model expects NHWC layout: a [1, size, size, 3] batch of RGB pixels,
/// resized without aspect-ratio preservation and normalized per `norm`.
pub fn to_model_input(image: &DynamicImage, size: u32, norm: Normalization) -> Array4<f32> {
    let resized = image.resize_exact(size, size, image::imageops::FilterType::Lanczos3);
    let rgb = resized.to_rgb8();
    let side = size as usize;

    let mut tensor = Array4::<f32>::zeros((1, side, side, 3));
    for y in 0..size {
        for x in 0..size {
            let pixel = rgb.get_pixel(x, y);
            for c in 0..3 {
                let value = pixel[c] as f32;
                tensor[[0, y as usize, x as usize, c]] = match norm {
                    Normalization::Scale => value / 255.0,
                    Normalization::Signed => value / 127.5 - 1.0,
                };
            }
        }
    }

    tensor
}
