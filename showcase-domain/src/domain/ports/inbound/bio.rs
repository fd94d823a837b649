use super::UseCase;
use crate::domain::{models::BioOutput, Action, BioError};

pub type BioAction = Action<BioOutput, BioError>;

/// Renders the biography and its social links.
pub trait BioUseCase: UseCase<Input = (), Output = BioAction> {}

impl<T> BioUseCase for T where T: UseCase<Input = (), Output = BioAction> {}
