//! Single-writer hand-off to the thread that owns visible state.
//!
//! Widgets own a `Dispatcher<Self>`. Background workers (or the widget
//! itself, when it needs to retry something a cycle later) post jobs through
//! a cloneable [`DispatcherHandle`]; the owning thread applies them in order
//! when it calls [`Dispatcher::drain`] or [`Dispatcher::pump`].

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

pub type Job<T> = Box<dyn FnOnce(&mut T) + Send + 'static>;

pub struct Dispatcher<T> {
    queue: Arc<Mutex<VecDeque<Job<T>>>>,
}

pub struct DispatcherHandle<T> {
    queue: Arc<Mutex<VecDeque<Job<T>>>>,
}

impl<T> Clone for DispatcherHandle<T> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
        }
    }
}

impl<T> Default for Dispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Dispatcher<T> {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn handle(&self) -> DispatcherHandle<T> {
        DispatcherHandle {
            queue: Arc::clone(&self.queue),
        }
    }

    /// Queue a job from the owning thread.
    pub fn post(&self, job: impl FnOnce(&mut T) + Send + 'static) {
        self.queue.lock().push_back(Box::new(job));
    }

    /// Take every job queued so far. Jobs posted while these run land in the
    /// next cycle.
    pub fn drain(&self) -> Vec<Job<T>> {
        self.queue.lock().drain(..).collect()
    }

    /// Apply the current cycle's jobs to `target`. Returns how many ran.
    pub fn pump(&self, target: &mut T) -> usize {
        let jobs = self.drain();
        let n = jobs.len();
        for job in jobs {
            job(target);
        }
        if n > 0 {
            log::trace!("dispatcher: ran {n} job(s)");
        }
        n
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

impl<T> DispatcherHandle<T> {
    pub fn post(&self, job: impl FnOnce(&mut T) + Send + 'static) {
        self.queue.lock().push_back(Box::new(job));
    }
}
