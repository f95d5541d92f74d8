//! Fire-and-forget futures on the browser event loop.

#[cfg(test)]
#[path = "task_test.rs"]
mod task_test;

use std::future::Future;

/// Run `future` to completion on the current thread's event loop.
///
/// During SSR there is no event loop to resume on, so the future is dropped
/// without being polled.
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(future);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        drop(future);
    }
}
