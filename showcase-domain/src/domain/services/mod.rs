mod avatar;
mod bio;

pub use avatar::{AvatarUseCaseImpl, PixellateConfig};
pub use bio::BioUseCaseImpl;
