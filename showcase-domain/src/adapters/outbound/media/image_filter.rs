use std::io::Cursor;

use async_trait::async_trait;
use image::{imageops, ImageFormat, Rgba, RgbaImage};

use crate::domain::{
    models::{FilterSpec, Image},
    ports::outbound::ImageFilterService,
    ServiceError,
};

/// Applies filter chains with the `image` crate and encodes the result as
/// PNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateFilterService;

#[async_trait]
impl ImageFilterService for ImageCrateFilterService {
    async fn apply_filters(
        &self,
        image: &Image,
        filters: &[FilterSpec],
    ) -> Result<Image, ServiceError> {
        let bytes = image.bytes.clone();
        let filters = filters.to_vec();

        tokio::task::spawn_blocking(move || render(&bytes, &filters))
            .await
            .map_err(|err| ServiceError::unknown(format!("image filter task failed: {err}")))?
    }
}

fn render(input: &[u8], filters: &[FilterSpec]) -> Result<Image, ServiceError> {
    let decoded =
        image::load_from_memory(input).map_err(|err| ServiceError::InvalidImage(err.to_string()))?;

    let mut rgba = decoded.to_rgba8();
    for filter in filters {
        rgba = match *filter {
            FilterSpec::Circle => circle(&rgba),
            FilterSpec::Pixellate { scale } => pixellate(&rgba, scale),
        };
    }

    encode_png(&rgba)
}

fn encode_png(rgba: &RgbaImage) -> Result<Image, ServiceError> {
    let mut bytes = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|err| ServiceError::unknown(format!("png encoding failed: {err}")))?;

    Ok(Image::new(bytes, ImageFormat::Png.to_mime_type()))
}

/// Crops to the centred square and makes everything outside the inscribed
/// circle transparent.
fn circle(source: &RgbaImage) -> RgbaImage {
    let (width, height) = source.dimensions();
    let side = width.min(height);
    let mut cropped =
        imageops::crop_imm(source, (width - side) / 2, (height - side) / 2, side, side).to_image();

    let radius = side as f32 / 2.0;
    for (x, y, pixel) in cropped.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - radius;
        let dy = y as f32 + 0.5 - radius;
        if dx * dx + dy * dy > radius * radius {
            pixel.0[3] = 0;
        }
    }

    cropped
}

/// Replaces every `scale` x `scale` block with its average colour. Blocks on
/// the right and bottom edges may be smaller.
fn pixellate(source: &RgbaImage, scale: u32) -> RgbaImage {
    if scale <= 1 {
        return source.clone();
    }

    let (width, height) = source.dimensions();
    let mut output = RgbaImage::new(width, height);

    for block_y in (0..height).step_by(scale as usize) {
        for block_x in (0..width).step_by(scale as usize) {
            let block_width = scale.min(width - block_x);
            let block_height = scale.min(height - block_y);
            let pixels = || {
                (block_y..block_y + block_height)
                    .flat_map(move |y| (block_x..block_x + block_width).map(move |x| (x, y)))
            };

            let mut sum = [0u64; 4];
            for (x, y) in pixels() {
                for (total, channel) in sum.iter_mut().zip(source.get_pixel(x, y).0) {
                    *total += u64::from(channel);
                }
            }

            let count = u64::from(block_width * block_height);
            let average = Rgba(sum.map(|total| (total / count) as u8));
            for (x, y) in pixels() {
                output.put_pixel(x, y, average);
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([(x * 10) as u8, (y * 10) as u8, 0, 255]))
    }

    fn png(rgba: &RgbaImage) -> Image {
        encode_png(rgba).unwrap()
    }

    #[test]
    fn pixellate_fills_blocks_with_their_average() {
        let output = pixellate(&gradient(4, 4), 2);

        // Top-left block holds x in {0, 10}, y in {0, 10}.
        assert_eq!(output.get_pixel(0, 0), &Rgba([5, 5, 0, 255]));
        assert_eq!(output.get_pixel(1, 1), &Rgba([5, 5, 0, 255]));
        assert_eq!(output.get_pixel(3, 0), &Rgba([25, 5, 0, 255]));
        assert_eq!(output.get_pixel(2, 3), &Rgba([25, 25, 0, 255]));
    }

    #[test]
    fn pixellate_handles_partial_edge_blocks() {
        let output = pixellate(&gradient(3, 1), 2);

        assert_eq!(output.get_pixel(0, 0), &Rgba([5, 0, 0, 255]));
        assert_eq!(output.get_pixel(2, 0), &Rgba([20, 0, 0, 255]));
    }

    #[test]
    fn pixellate_at_scale_one_is_identity() {
        let source = gradient(5, 3);

        assert_eq!(pixellate(&source, 1), source);
    }

    #[test]
    fn circle_crops_to_square_and_clears_corners() {
        let output = circle(&gradient(6, 4));

        assert_eq!(output.dimensions(), (4, 4));
        assert_eq!(output.get_pixel(0, 0).0[3], 0);
        assert_eq!(output.get_pixel(3, 3).0[3], 0);
        assert_eq!(output.get_pixel(1, 1).0[3], 255);
        // Centred horizontally: column 0 of the crop is column 1 of the source.
        assert_eq!(output.get_pixel(1, 1).0[0], 20);
    }

    #[tokio::test]
    async fn applies_chain_and_encodes_png() {
        let service = ImageCrateFilterService;
        let input = png(&gradient(8, 6));

        let output = service
            .apply_filters(
                &input,
                &[FilterSpec::Circle, FilterSpec::Pixellate { scale: 3 }],
            )
            .await
            .unwrap();

        assert_eq!(output.mime_type, "image/png");
        let decoded = image::load_from_memory(&output.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (6, 6));
        assert_eq!(decoded.get_pixel(0, 0), decoded.get_pixel(2, 2));
    }

    #[tokio::test]
    async fn rejects_undecodable_input() {
        let service = ImageCrateFilterService::default();
        let input = Image::new(b"not an image".to_vec(), "image/png");

        let result = service.apply_filters(&input, &[FilterSpec::Circle]).await;

        assert!(matches!(result, Err(ServiceError::InvalidImage(_))));
    }
}
