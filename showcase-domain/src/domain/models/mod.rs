mod avatar;
mod bio;
mod template;

pub use avatar::*;
pub use bio::*;
pub use template::*;
