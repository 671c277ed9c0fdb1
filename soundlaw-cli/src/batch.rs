//! Word-level fan-out over a rayon pool

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::config::PerformanceConfig;

/// Map `f` over `words`, in parallel once the list reaches the threshold
///
/// Output order always follows input order.
pub fn map_words<T, F>(words: &[String], performance: &PerformanceConfig, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&str) -> T + Send + Sync,
{
    if words.len() < performance.parallel_threshold.max(1) {
        log::debug!("processing {} words sequentially", words.len());
        return Ok(words.iter().map(|word| f(word)).collect());
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if performance.worker_threads > 0 {
        builder = builder.num_threads(performance.worker_threads);
    }
    let pool = builder
        .build()
        .context("Failed to build worker thread pool")?;

    log::debug!(
        "processing {} words on {} threads",
        words.len(),
        pool.current_num_threads()
    );
    Ok(pool.install(|| words.par_iter().map(|word| f(word)).collect()))
}
