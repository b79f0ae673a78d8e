use std::sync::{Mutex, PoisonError};

use tokio::task::JoinHandle;

use crate::prelude::*;

/// Postpones the call until `wait` has elapsed since the last invocation.
/// Only the latest argument gets through.
pub struct Debounce<A> {
    wait: StdDuration,
    func: Arc<dyn Fn(A) + Send + Sync>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debounce<A> {
    pub fn new(wait: StdDuration, func: impl Fn(A) + Send + Sync + 'static) -> Self {
        Self {
            wait,
            func: Arc::new(func),
            pending: Mutex::new(None),
        }
    }

    /// Must be called from within a Tokio runtime.
    pub fn call(&self, argument: A) {
        let func = Arc::clone(&self.func);
        let wait = self.wait;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            func(argument);
        });
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }
}
