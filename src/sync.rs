//! Task execution and condition-variable signaling.
//!
//! [`Executor`] abstracts over where a task runs, so code that schedules
//! background work stays testable with an inline executor. [`Monitor`] pairs
//! a mutex-guarded state value with a condition variable for the classic
//! wait/signal pattern.
//!
//! ## Examples
//!
//! ```rust
//! use coffer::{Executor, Monitor, ThreadExecutor};
//! use std::sync::Arc;
//!
//! let done = Arc::new(Monitor::new(false));
//! let done_bg = Arc::clone(&done);
//!
//! ThreadExecutor.execute(Box::new(move || {
//!     done_bg.update(|flag| *flag = true);
//! }));
//!
//! done.wait_until(|flag| *flag);
//! ```

use std::sync::{Condvar, Mutex, MutexGuard};
use std::thread;

/// A boxed task ready to run on some executor.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs submitted tasks.
pub trait Executor {
    /// Runs `task`, possibly on another thread.
    fn execute(&self, task: Task);
}

/// An [`Executor`] that spawns a fresh thread per task.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadExecutor;

impl Executor for ThreadExecutor {
    fn execute(&self, task: Task) {
        thread::spawn(task);
    }
}

/// Mutex-guarded state paired with a condition variable.
///
/// Lock poisoning is treated as unrecoverable: if a thread panics while
/// holding the lock the shared state is suspect, so waiters panic too
/// rather than observe it.
#[derive(Debug, Default)]
pub struct Monitor<T> {
    state: Mutex<T>,
    signal: Condvar,
}

impl<T> Monitor<T> {
    /// Creates a monitor around `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Monitor {
            state: Mutex::new(initial),
            signal: Condvar::new(),
        }
    }

    /// Mutates the state under the lock and wakes all waiters.
    pub fn update(&self, mutate: impl FnOnce(&mut T)) {
        let mut guard = self.lock();
        mutate(&mut guard);
        self.signal.notify_all();
    }

    /// Reads the state under the lock.
    pub fn read<R>(&self, inspect: impl FnOnce(&T) -> R) -> R {
        inspect(&self.lock())
    }

    /// Blocks until `condition` holds, rechecking after every wakeup.
    pub fn wait_until(&self, condition: impl Fn(&T) -> bool) {
        let mut guard = self.lock();
        while !condition(&guard) {
            guard = match self.signal.wait(guard) {
                Ok(guard) => guard,
                Err(_) => panic!("monitor lock poisoned"),
            };
        }
    }

    fn lock(&self) -> MutexGuard<'_, T> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("monitor lock poisoned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Runs tasks immediately on the calling thread.
    struct InlineExecutor;

    impl Executor for InlineExecutor {
        fn execute(&self, task: Task) {
            task();
        }
    }

    #[test]
    fn inline_executor_runs_synchronously() {
        let monitor = Arc::new(Monitor::new(0));
        let inner = Arc::clone(&monitor);
        InlineExecutor.execute(Box::new(move || inner.update(|n| *n += 1)));
        assert_eq!(monitor.read(|n| *n), 1);
    }

    #[test]
    fn thread_executor_signals_completion() {
        let monitor = Arc::new(Monitor::new(false));
        let inner = Arc::clone(&monitor);
        ThreadExecutor.execute(Box::new(move || inner.update(|flag| *flag = true)));
        monitor.wait_until(|flag| *flag);
        assert!(monitor.read(|flag| *flag));
    }

    #[test]
    fn wait_until_sees_updates_from_many_tasks() {
        let monitor = Arc::new(Monitor::new(0));
        for _ in 0..4 {
            let inner = Arc::clone(&monitor);
            ThreadExecutor.execute(Box::new(move || inner.update(|n| *n += 1)));
        }
        monitor.wait_until(|n| *n == 4);
        assert_eq!(monitor.read(|n| *n), 4);
    }
}
