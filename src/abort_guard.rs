/// Guard that aborts a task when dropped.
///
/// Wraps a `JoinHandle` and aborts the task if the guard is dropped before
/// the handle is taken. Used by the orchestrator, dispatcher, and
/// scheduler to make sure a worker's task cannot outlive its owner.
pub struct AbortGuard {
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl AbortGuard {
    pub fn new(handle: tokio::task::JoinHandle<()>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// Remove and return the inner handle without aborting.
    #[allow(dead_code)]
    pub fn into_inner(mut self) -> Option<tokio::task::JoinHandle<()>> {
        self.handle.take()
    }
}

impl Drop for AbortGuard {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn aborts_task_on_drop() {
        let (tx, rx) = oneshot::channel::<()>();
        {
            let _guard = AbortGuard::new(tokio::spawn(async move {
                let _ = rx.await;
            }));
        }
        tokio::task::yield_now().await;
        assert!(tx.send(()).is_err());
    }
}
