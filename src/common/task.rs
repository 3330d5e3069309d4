use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Callback used by background tasks to ask the UI for a repaint.
pub type Notify = Arc<dyn Fn() + Send + Sync>;

pub fn noop_notify() -> Notify {
    Arc::new(|| {})
}

/// State shared between a background task and its owner.
///
/// Once [`RuntimeCell::retire`] has run, every later [`RuntimeCell::apply`]
/// is rejected, so a result that arrives after cancellation is dropped.
pub struct RuntimeCell<T> {
    inner: Mutex<CellState<T>>,
}

struct CellState<T> {
    value: T,
    alive: bool,
}

impl<T: Clone> RuntimeCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(CellState { value, alive: true }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CellState<T>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn snapshot(&self) -> T {
        self.lock().value.clone()
    }

    pub fn is_alive(&self) -> bool {
        self.lock().alive
    }

    /// Mutate the value if the cell is still alive. Returns whether the
    /// update was applied.
    pub fn apply(&self, update: impl FnOnce(&mut T)) -> bool {
        let mut state = self.lock();
        if !state.alive {
            return false;
        }
        update(&mut state.value);
        true
    }

    pub fn retire(&self) {
        self.lock().alive = false;
    }
}

/// A job that runs immediately and then every `interval` on its own thread
/// until cancelled or dropped.
pub struct RepeatingTask {
    name: String,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RepeatingTask {
    pub fn spawn<F>(name: &str, interval: Duration, mut job: F) -> io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<()>();
        let thread_name = name.to_string();
        let handle = thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || loop {
                job();
                match rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        tracing::debug!(task = %thread_name, "repeating task stopped");
                        break;
                    }
                }
            })?;
        Ok(Self {
            name: name.to_string(),
            stop: Some(tx),
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wake the worker and let it exit after its current job. Does not
    /// wait for an in-flight job to finish.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        self.handle.take();
    }

    pub fn is_cancelled(&self) -> bool {
        self.stop.is_none()
    }

    /// Cancel and block until the worker thread has exited.
    pub fn join(mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Run `job` once on a named background thread.
pub fn spawn_once<F>(name: &str, job: F) -> io::Result<()>
where
    F: FnOnce() + Send + 'static,
{
    thread::Builder::new()
        .name(name.to_string())
        .spawn(job)
        .map(|_| ())
}
