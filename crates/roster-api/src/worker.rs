use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::error::ApiError;

/// Bounded pool for blocking store calls.
///
/// At most `size` calls run at once; further callers wait for a permit
/// without blocking the async runtime. Dropping the awaiting future does not
/// stop a call that already started, its result is discarded.
#[derive(Clone)]
pub struct Worker {
    permits: Arc<Semaphore>,
    size: usize,
}

impl Worker {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub async fn run<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| ApiError::Store(anyhow::anyhow!("worker pool closed")))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            f()
        })
        .await?
        .map_err(ApiError::Store)
    }
}
