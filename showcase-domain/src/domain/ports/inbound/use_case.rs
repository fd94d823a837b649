/// A single application operation: one input, one output.
///
/// Every use-case in this crate returns an [`Action`](crate::domain::Action)
/// as its output, giving callers one invocation pattern regardless of which
/// use-case they hold.
pub trait UseCase: Send + Sync + 'static {
    type Input;
    type Output;

    fn execute(&self, input: Self::Input) -> Self::Output;
}
