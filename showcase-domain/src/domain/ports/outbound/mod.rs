mod bio;
mod image;
mod template;

pub use bio::*;
pub use image::*;
pub use template::*;
