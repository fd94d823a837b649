use url::Url;

use super::UseCase;
use crate::domain::{models::AvatarOutput, Action, ServiceError};

pub type AvatarAction = Action<AvatarOutput, ServiceError>;

/// Fetches an avatar and its pixellated variants.
pub trait AvatarUseCase: UseCase<Input = Url, Output = AvatarAction> {}

impl<T> AvatarUseCase for T where T: UseCase<Input = Url, Output = AvatarAction> {}
