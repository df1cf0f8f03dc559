use std::sync::{Arc, Condvar, Mutex, PoisonError};

use crate::foundation::error::{PigmentError, PigmentResult};

#[derive(Default)]
struct InFlight {
    count: Mutex<usize>,
    idle: Condvar,
}

impl InFlight {
    fn begin(&self) {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner) += 1;
    }

    fn end(&self) {
        let mut n = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        *n = n.saturating_sub(1);
        if *n == 0 {
            self.idle.notify_all();
        }
    }
}

/// Decrements the in-flight counter even when the job unwinds.
struct JobGuard(Arc<InFlight>);

impl Drop for JobGuard {
    fn drop(&mut self) {
        self.0.end();
    }
}

fn build_thread_pool(threads: Option<usize>) -> PigmentResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PigmentError::validation(
            "worker pool size must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new()
        .thread_name(|i| format!("pigment-worker-{i}"))
        .panic_handler(|_| tracing::error!("pigment worker job panicked"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PigmentError::pool(format!("failed to build rayon thread pool: {e}")))
}

/// Fixed-size worker pool with a FIFO job queue and a fork-join barrier.
///
/// Construct once and hand it to every operation through [`crate::Context`]. Completion
/// tracking is pool-wide: [`WorkerPool::wait_for_completion`] waits for every job scheduled
/// through [`WorkerPool::schedule_job`], whichever caller queued it.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    in_flight: Arc<InFlight>,
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.worker_count())
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

impl WorkerPool {
    /// Pool with `workers` threads; `None` uses the hardware concurrency.
    pub fn new(workers: Option<usize>) -> PigmentResult<Self> {
        Ok(Self {
            pool: build_thread_pool(workers)?,
            in_flight: Arc::new(InFlight::default()),
        })
    }

    /// Number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Jobs queued or running through [`WorkerPool::schedule_job`].
    pub fn in_flight(&self) -> usize {
        *self
            .in_flight
            .count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a detached job. Jobs start in FIFO order.
    pub fn schedule_job<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.in_flight.begin();
        let guard = JobGuard(Arc::clone(&self.in_flight));
        self.pool.spawn_fifo(move || {
            let _guard = guard;
            job();
        });
    }

    /// Block until every scheduled job has finished.
    pub fn wait_for_completion(&self) {
        let mut n = self
            .in_flight
            .count
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while *n > 0 {
            n = self
                .in_flight
                .idle
                .wait(n)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Resize the pool. Drains scheduled jobs first; `&mut self` keeps borrowed batches out.
    pub fn set_worker_count(&mut self, workers: usize) -> PigmentResult<()> {
        let pool = build_thread_pool(Some(workers))?;
        self.wait_for_completion();
        self.pool = pool;
        tracing::debug!(workers, "worker pool resized");
        Ok(())
    }

    /// Run `f` once per job on the pool and return when all of them are done.
    ///
    /// Jobs may borrow from the caller, which is how scanline batches hand out disjoint
    /// `&mut` rows of a destination block.
    pub fn run_jobs<T, F>(&self, jobs: Vec<T>, f: F)
    where
        T: Send,
        F: Fn(T) + Sync,
    {
        let f = &f;
        self.pool.scope_fifo(|s| {
            for job in jobs {
                s.spawn_fifo(move |_| f(job));
            }
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pool/worker.rs"]
mod tests;
