//! Tokio Runtime Bridge
//!
//! GPUI runs its own executor, but reqwest needs a tokio reactor.
//! This module runs tokio futures on a shared runtime and hands the
//! result back to the awaiting GPUI task.
//!
//! ```text
//! GPUI task ──► run_in_tokio(async { fetch }) ──► tokio worker ──► result
//! ```

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::{Builder, Runtime};

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| {
        Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("select-kit-io")
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime")
    })
}

/// Execute a future in the tokio runtime and wait for the result
///
/// # Example
///
/// ```ignore
/// let photos = run_in_tokio(fetch_photos(url)).await;
/// ```
pub async fn run_in_tokio<F, T>(future: F) -> T
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handle = get_runtime().spawn(future);
    match handle.await {
        Ok(result) => result,
        Err(e) => std::panic::resume_unwind(e.into_panic()),
    }
}

/// Block on a future synchronously (use sparingly, mainly for tests)
pub fn block_on<F, T>(future: F) -> T
where
    F: Future<Output = T>,
{
    get_runtime().block_on(future)
}
