use std::sync::Arc;

use graphar_error::GarResult;
use rayon::prelude::*;

/// The [`ExecutionMode`] describes how the independent chunk loads of one logical read run.
/// Typically, there is one task per chunk file.
///
/// Whatever the mode, results are handed back in chunk order, so tables are always assembled in
/// ascending chunk index.
#[derive(Debug, Clone, Default)]
pub enum ExecutionMode {
    /// Loads chunks one after the other on the calling thread.
    #[default]
    Inline,
    /// Spawns the loads onto a provided Rayon thread pool. At most as many chunks as the pool has
    /// threads are in flight at once.
    RayonThreadPool(Arc<rayon::ThreadPool>),
}

impl ExecutionMode {
    /// A [`ExecutionMode::RayonThreadPool`] backed by a new pool of `num_threads` threads.
    pub fn rayon(num_threads: usize) -> GarResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|idx| format!("graphar-load-{idx}"))
            .build()?;
        Ok(Self::RayonThreadPool(Arc::new(pool)))
    }

    /// Apply `task` to every item, returning the results in item order. The first error wins.
    pub(crate) fn run<T, R, F>(&self, items: Vec<T>, task: F) -> GarResult<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> GarResult<R> + Send + Sync,
    {
        match self {
            ExecutionMode::Inline => items.into_iter().map(task).collect(),
            ExecutionMode::RayonThreadPool(pool) => {
                pool.install(|| items.into_par_iter().map(&task).collect())
            }
        }
    }
}
