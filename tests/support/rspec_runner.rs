//! Serial runner and shared-state locking for `rspec` suites.

use rspec::{block::Suite, report::Report, ConfigurationBuilder, Logger, Runner};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Runs a suite on the current thread so non-send resources stay put.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + std::fmt::Debug,
{
    let logger = Arc::new(Logger::new(std::io::stdout()));
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(false)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    let report = Runner::new(config, vec![logger]).run(suite);
    assert!(report.is_success(), "rspec suite reported failures");
}

/// Locks shared fixture state, recovering from a poisoned mutex.
pub fn lock<T>(shared: &Arc<Mutex<T>>) -> MutexGuard<'_, T> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
