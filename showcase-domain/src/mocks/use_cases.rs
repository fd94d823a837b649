//! Mocked use-cases for exercising UI callers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use url::Url;

use super::{avatar_output, bio_output};
use crate::domain::{
    models::{AvatarOutput, BioOutput},
    ports::inbound::{AvatarAction, BioAction, UseCase},
    Action, BioError, ServiceError,
};

/// What a mocked use-case's action resolves to.
#[derive(Debug, Clone)]
pub enum ExecuteResult<T, E> {
    /// The fixture output for the use-case.
    Valid,
    Failure(E),
    Output(T),
    /// Resolves once the test calls [`PendingResult::resolve`].
    Pending(PendingResult<T, E>),
}

/// A result the test hands to a mocked action at a moment of its choosing.
///
/// Every execution started before or after [`resolve`](Self::resolve) sees the
/// same value. Until then the action stays in flight, which makes loading and
/// cancellation states reachable.
#[derive(Debug, Clone)]
pub struct PendingResult<T, E> {
    sender: Arc<watch::Sender<Option<Result<T, E>>>>,
}

impl<T: Clone, E: Clone> PendingResult<T, E> {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn resolve(&self, result: Result<T, E>) {
        self.sender.send_replace(Some(result));
    }

    pub fn is_resolved(&self) -> bool {
        self.sender.borrow().is_some()
    }

    async fn wait(&self) -> Result<T, E> {
        let mut receiver = self.sender.subscribe();
        loop {
            let current = receiver.borrow_and_update().clone();
            if let Some(result) = current {
                return result;
            }
            // `self` keeps the sender alive, so the channel never closes here.
            let _ = receiver.changed().await;
        }
    }
}

impl<T: Clone, E: Clone> Default for PendingResult<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Default for ExecuteResult<T, E> {
    fn default() -> Self {
        Self::Valid
    }
}

fn action_for<T, E>(result: ExecuteResult<T, E>, valid: fn() -> T) -> Action<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    match result {
        ExecuteResult::Valid => Action::ok(valid()),
        ExecuteResult::Failure(error) => Action::err(error),
        ExecuteResult::Output(output) => Action::ok(output),
        ExecuteResult::Pending(pending) => Action::new(move || {
            let pending = pending.clone();
            async move { pending.wait().await }
        }),
    }
}

#[derive(Clone, Default)]
pub struct MockAvatarUseCase {
    result: Arc<RwLock<ExecuteResult<AvatarOutput, ServiceError>>>,
    executed: Arc<AtomicBool>,
}

impl MockAvatarUseCase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(self, result: ExecuteResult<AvatarOutput, ServiceError>) -> Self {
        self.set_result(result);
        self
    }

    /// Replace the result of actions created by later `execute` calls.
    pub fn set_result(&self, result: ExecuteResult<AvatarOutput, ServiceError>) {
        *self.result.write().unwrap() = result;
    }

    /// Whether `execute` has been called.
    pub fn executed(&self) -> bool {
        self.executed.load(Ordering::SeqCst)
    }
}

impl UseCase for MockAvatarUseCase {
    type Input = Url;
    type Output = AvatarAction;

    fn execute(&self, _input: Url) -> AvatarAction {
        self.executed.store(true, Ordering::SeqCst);
        action_for(self.result.read().unwrap().clone(), avatar_output)
    }
}

#[derive(Clone, Default)]
pub struct MockBioUseCase {
    result: Arc<RwLock<ExecuteResult<BioOutput, BioError>>>,
    executed: Arc<AtomicBool>,
}

impl MockBioUseCase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(self, result: ExecuteResult<BioOutput, BioError>) -> Self {
        self.set_result(result);
        self
    }

    pub fn set_result(&self, result: ExecuteResult<BioOutput, BioError>) {
        *self.result.write().unwrap() = result;
    }

    pub fn executed(&self) -> bool {
        self.executed.load(Ordering::SeqCst)
    }
}

impl UseCase for MockBioUseCase {
    type Input = ();
    type Output = BioAction;

    fn execute(&self, _input: ()) -> BioAction {
        self.executed.store(true, Ordering::SeqCst);
        action_for(self.result.read().unwrap().clone(), bio_output)
    }
}
