mod file_image;
mod image_filter;

pub use file_image::FileImageService;
pub use image_filter::ImageCrateFilterService;
