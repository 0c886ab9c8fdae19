use std::future::Future;
use tokio::sync::OnceCell;

///
/// One-shot gate around lazy initialization of a store.
///
/// Concurrent callers that arrive before initialization completes wait,
/// only one of them runs the initializer at a time. Failed initialization
/// leaves the gate open, so the next caller retries it.
///
pub struct InitGuard {
    initialized: OnceCell<()>,
}

impl InitGuard {
    pub fn new() -> Self {
        Self {
            initialized: OnceCell::new(),
        }
    }

    pub async fn get_or_init<F, Fut, E>(&self, init: F) -> Result<(), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        self.initialized.get_or_try_init(init).await?;

        Ok(())
    }
}
