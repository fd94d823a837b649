mod avatar;
mod bio;
mod use_case;

pub use avatar::*;
pub use bio::*;
pub use use_case::*;
