use std::{future::Future, sync::Arc};

use futures::{future::BoxFuture, FutureExt};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

type Factory<T, E> = dyn Fn() -> BoxFuture<'static, Result<T, E>> + Send + Sync;

/// A cold, re-triggerable asynchronous operation.
///
/// Building an action does no work. Every call to [`Action::execute`] asks the
/// factory for a fresh future and drives it to a single success value or a
/// single error, so re-executing re-runs the whole pipeline.
///
/// # Examples
///
/// ```ignore
/// let action = use_case.execute(url);
/// let output = action.execute().await?;
/// // Runs the pipeline again, nothing is cached.
/// let output = action.execute().await?;
/// ```
pub struct Action<T, E> {
    factory: Arc<Factory<T, E>>,
}

impl<T, E> Clone for Action<T, E> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T, E> Action<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    pub fn new<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            factory: Arc::new(move || factory().boxed()),
        }
    }

    /// An action that always succeeds with a clone of `value`.
    pub fn ok(value: T) -> Self
    where
        T: Clone + Sync,
    {
        Self::new(move || {
            let value = value.clone();
            async move { Ok(value) }
        })
    }

    /// An action that always fails with a clone of `error`.
    pub fn err(error: E) -> Self
    where
        E: Clone + Sync,
    {
        Self::new(move || {
            let error = error.clone();
            async move { Err(error) }
        })
    }

    pub async fn execute(&self) -> Result<T, E> {
        (self.factory)().await
    }

    /// Runs the action unless `token` fires first.
    ///
    /// Returns `None` when cancelled; the in-flight pipeline is dropped and
    /// its result is never observed.
    pub async fn execute_until_cancelled(&self, token: &CancellationToken) -> Option<Result<T, E>> {
        tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = self.execute() => Some(result),
        }
    }

    /// Runs the action on the tokio runtime and hands the result to
    /// `on_complete`.
    ///
    /// `on_complete` is called at most once and never after `token` has been
    /// cancelled.
    pub fn spawn<F>(&self, token: CancellationToken, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<T, E>) + Send + 'static,
    {
        let action = self.clone();
        tokio::spawn(async move {
            match action.execute_until_cancelled(&token).await {
                Some(result) if !token.is_cancelled() => on_complete(result),
                _ => tracing::debug!("action cancelled before completion"),
            }
        })
    }
}
