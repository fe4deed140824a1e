//! Mutex-shared `App` for `rspec` fixtures.

use bevy::prelude::App;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Runner app shared between `rspec` steps.
#[derive(Debug)]
pub struct ThreadSafeApp(pub App);

impl ThreadSafeApp {
    /// Wraps `app` for sharing across scenario steps.
    pub fn shared(app: App) -> SharedApp {
        Arc::new(Mutex::new(Self(app)))
    }
}

impl Deref for ThreadSafeApp {
    type Target = App;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ThreadSafeApp {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// SAFETY: suites run through `run_serial`, so the app never leaves the test
// thread, and every access goes through the mutex. The pose feed is a
// non-send resource and stays on that thread too.
unsafe impl Send for ThreadSafeApp {}
unsafe impl Sync for ThreadSafeApp {}

/// Shared handle handed to each scenario step.
pub type SharedApp = Arc<Mutex<ThreadSafeApp>>;

/// Locks the shared app, recovering from a poisoned mutex.
pub fn lock_app(app: &SharedApp) -> MutexGuard<'_, ThreadSafeApp> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}
