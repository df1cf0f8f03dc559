use crate::color::profile::ProfileRegistry;
use crate::foundation::error::PigmentResult;
use crate::pool::worker::WorkerPool;

/// Shared state every pixel operation runs against: the worker pool and the profile registry.
///
/// There are no process-wide singletons; hosts build one `Context` and pass it by reference.
#[derive(Debug)]
pub struct Context {
    pool: WorkerPool,
    profiles: ProfileRegistry,
}

impl Context {
    /// Context with `workers` pool threads (`None` = hardware concurrency) and built-in profiles.
    pub fn new(workers: Option<usize>) -> PigmentResult<Self> {
        Ok(Self {
            pool: WorkerPool::new(workers)?,
            profiles: ProfileRegistry::new(),
        })
    }

    /// Worker pool used by parallel operations.
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Mutable pool access, e.g. to resize it.
    pub fn pool_mut(&mut self) -> &mut WorkerPool {
        &mut self.pool
    }

    /// Profile registry used to resolve blocks without an explicit profile.
    pub fn profiles(&self) -> &ProfileRegistry {
        &self.profiles
    }

    /// Mutable registry access, e.g. to register a profile or change a default.
    pub fn profiles_mut(&mut self) -> &mut ProfileRegistry {
        &mut self.profiles
    }
}

#[cfg(test)]
#[path = "../tests/unit/context.rs"]
mod tests;
