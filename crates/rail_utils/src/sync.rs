use anyhow::{Result, anyhow};
use std::future::Future;
use std::panic::resume_unwind;
use std::sync::Arc;
use std::thread;
use tokio::runtime::Builder;
use tracing::dispatcher;

pub trait IntoArc {
    fn into_arc(self) -> Arc<Self>
    where
        Self: Sized,
    {
        Arc::new(self)
    }
}

impl<T> IntoArc for T {}

/// Runs an async task to completion and hands its outcome back to a caller
/// that cannot await.
///
/// The future is built and driven on a scoped worker thread that owns a
/// current-thread runtime, while the calling thread blocks on the join. This
/// works from plain threads as well as from inside another runtime, since the
/// caller's executor is never re-entered. The worker always finishes, so the
/// caller always observes completion: errors returned by the task come back
/// as `Err` and a panic on the worker is resumed on the calling thread.
///
/// The caller's tracing dispatcher is installed on the worker so events
/// emitted by the task land in the same subscriber.
///
/// There is no timeout. A task that never resolves blocks the caller forever.
pub fn block_on<F, Fut, T>(task: F) -> Result<T>
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = Result<T>>,
    T: Send,
{
    let dispatch = dispatcher::get_default(|d| d.clone());

    thread::scope(|scope| {
        let worker = scope.spawn(move || -> Result<T> {
            dispatcher::with_default(&dispatch, || {
                let runtime = Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(|e| anyhow!("unable to start runtime for request: {e}"))?;
                runtime.block_on(task())
            })
        });

        match worker.join() {
            Ok(result) => result,
            Err(panic) => resume_unwind(panic),
        }
    })
}
