//! Worker pool owned by a single engine instance.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

type Handles = Arc<Mutex<Vec<JoinHandle<()>>>>;

/// Fixed-size pool for evaluating root moves in parallel.
///
/// Each engine builds its own pool; nothing uses rayon's global pool. The
/// worker threads are spawned here and joined when the pool is dropped or
/// [`WorkerPool::shutdown`] is called, so no worker outlives its pool.
pub struct WorkerPool {
    /// Only `None` while dropping.
    pool: Option<ThreadPool>,
    handles: Handles,
    threads: usize,
}

impl WorkerPool {
    /// `threads = None` sizes the pool to the available hardware parallelism.
    pub fn new(threads: Option<usize>) -> Result<Self, ThreadPoolBuildError> {
        Self::named(threads, "isola-search")
    }

    /// Like [`WorkerPool::new`], naming the workers `{prefix}-{i}`.
    pub fn named(threads: Option<usize>, prefix: &str) -> Result<Self, ThreadPoolBuildError> {
        let threads = threads
            .filter(|&n| n > 0)
            .or_else(|| std::thread::available_parallelism().ok().map(|n| n.get()))
            .unwrap_or(1);

        let handles: Handles = Arc::new(Mutex::new(Vec::with_capacity(threads)));
        let spawned = Arc::clone(&handles);
        let prefix = prefix.to_owned();
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(move |i| format!("{prefix}-{i}"))
            .spawn_handler(move |worker| {
                let mut builder = std::thread::Builder::new();
                if let Some(name) = worker.name() {
                    builder = builder.name(name.to_owned());
                }
                if let Some(size) = worker.stack_size() {
                    builder = builder.stack_size(size);
                }
                let handle = builder.spawn(move || worker.run())?;
                lock(&spawned).push(handle);
                Ok(())
            })
            .build()?;

        Ok(Self {
            pool: Some(pool),
            handles,
            threads,
        })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Runs `f` on every item in parallel and waits for all of them.
    ///
    /// Output positions match input positions. A task that panics yields `None`
    /// in its slot instead of tearing down the caller.
    pub fn map_ordered<T, R, F>(&self, items: &[T], f: F) -> Vec<Option<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        let Some(pool) = &self.pool else {
            return items.iter().map(|_| None).collect();
        };
        pool.install(|| {
            items
                .par_iter()
                .map(|item| panic::catch_unwind(AssertUnwindSafe(|| f(item))).ok())
                .collect()
        })
    }

    /// Stops the workers and waits until every worker thread has exited.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Dropping the rayon pool only asks the workers to terminate
        drop(self.pool.take());
        let handles = std::mem::take(&mut *lock(&self.handles));
        for handle in handles {
            let _ = handle.join();
        }
    }
}

fn lock(handles: &Handles) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
    handles
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("threads", &self.threads)
            .finish()
    }
}
