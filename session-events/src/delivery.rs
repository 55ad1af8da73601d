//! Delivery contexts
//!
//! A controller marshals every notification for an observer onto the
//! [`DeliveryContext`] the observer was registered with. Tasks posted to one
//! context run one at a time, in posting order, which is what lets the
//! notification processor skip any synchronization of its own.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};

use crate::error::Result;

/// A unit of work posted to a delivery context
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Something that can run tasks sequentially
///
/// Implementations must run tasks one at a time and in the order they were
/// posted.
pub trait Executor: Send + Sync {
    fn execute(&self, task: Task);
}

/// Runs each task on the posting thread before `execute` returns
struct InlineExecutor;

impl Executor for InlineExecutor {
    fn execute(&self, task: Task) {
        task();
    }
}

/// The execution context notifications are delivered on
#[derive(Clone)]
pub struct DeliveryContext {
    name: Arc<str>,
    executor: Arc<dyn Executor>,
}

impl DeliveryContext {
    /// Wrap a host-provided executor
    pub fn new(name: impl Into<String>, executor: Arc<dyn Executor>) -> Self {
        Self {
            name: Arc::from(name.into()),
            executor,
        }
    }

    /// Deliver on whichever thread the controller notifies from
    pub fn inline() -> Self {
        Self::new("inline", Arc::new(InlineExecutor))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Post a task to run on this context
    pub fn post<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.executor.execute(Box::new(task));
    }
}

impl Default for DeliveryContext {
    fn default() -> Self {
        Self::inline()
    }
}

impl fmt::Debug for DeliveryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliveryContext")
            .field("name", &self.name)
            .finish()
    }
}

enum Message {
    Run(Task),
    Quit,
}

struct LooperExecutor {
    name: Arc<str>,
    sender: Sender<Message>,
    quitting: Arc<AtomicBool>,
}

impl Executor for LooperExecutor {
    fn execute(&self, task: Task) {
        // Anything queued behind Quit would never run.
        let quitting = self.quitting.load(Ordering::Acquire);
        if quitting || self.sender.send(Message::Run(task)).is_err() {
            tracing::warn!(looper = %self.name, "Looper has quit, dropping posted task");
        }
    }
}

/// A dedicated thread that drains a FIFO task queue
///
/// This is the "main loop" a host can hand to controllers so that every
/// notification lands on one known thread.
///
/// # Example
///
/// ```rust
/// use session_events::Looper;
/// use std::sync::mpsc;
///
/// let looper = Looper::spawn("media-main").unwrap();
/// let (tx, rx) = mpsc::channel();
///
/// looper.context().post(move || {
///     tx.send(std::thread::current().name().map(str::to_owned)).unwrap();
/// });
///
/// assert_eq!(rx.recv().unwrap().as_deref(), Some("media-main"));
/// looper.quit();
/// ```
pub struct Looper {
    context: DeliveryContext,
    sender: Sender<Message>,
    quitting: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Looper {
    /// Spawn a looper thread with the given name
    pub fn spawn(name: impl Into<String>) -> Result<Self> {
        let name: Arc<str> = Arc::from(name.into());
        let (sender, receiver) = mpsc::channel::<Message>();

        let thread_name = Arc::clone(&name);
        let thread = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                tracing::info!(looper = %thread_name, "Looper started");
                for message in receiver {
                    match message {
                        Message::Run(task) => task(),
                        Message::Quit => break,
                    }
                }
                tracing::info!(looper = %thread_name, "Looper stopped");
            })?;

        let quitting = Arc::new(AtomicBool::new(false));
        let executor = LooperExecutor {
            name: Arc::clone(&name),
            sender: sender.clone(),
            quitting: Arc::clone(&quitting),
        };

        Ok(Self {
            context: DeliveryContext {
                name,
                executor: Arc::new(executor),
            },
            sender,
            quitting,
            thread: Some(thread),
        })
    }

    /// Context that posts onto this looper
    pub fn context(&self) -> DeliveryContext {
        self.context.clone()
    }

    pub fn name(&self) -> &str {
        self.context.name()
    }

    /// Id of the looper thread
    pub fn thread_id(&self) -> Option<ThreadId> {
        self.thread.as_ref().map(|handle| handle.thread().id())
    }

    /// Stop after the tasks already queued have run
    ///
    /// Tasks posted afterwards are dropped.
    pub fn quit(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };

        // The receiving loop ends on Quit, so the thread exits even while
        // contexts still hold senders.
        self.quitting.store(true, Ordering::Release);
        let _ = self.sender.send(Message::Quit);

        if thread.thread().id() == thread::current().id() {
            // Quitting from inside a task: the loop exits on its own.
            return;
        }
        if thread.join().is_err() {
            tracing::warn!(looper = %self.context.name, "Looper thread panicked");
        }
    }
}

impl Drop for Looper {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for Looper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Looper")
            .field("name", &self.context.name)
            .field("running", &self.thread.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::time::Duration;

    #[test]
    fn test_inline_runs_before_post_returns() {
        let ran = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&ran);

        DeliveryContext::inline().post(move || *flag.lock() = true);

        assert!(*ran.lock());
    }

    #[test]
    fn test_looper_preserves_order() {
        let looper = Looper::spawn("order-test").unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (done_tx, done_rx) = mpsc::channel();

        for i in 0..50 {
            let seen = Arc::clone(&seen);
            looper.context().post(move || seen.lock().push(i));
        }
        looper.context().post(move || done_tx.send(()).unwrap());

        done_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(*seen.lock(), (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_looper_runs_on_its_own_thread() {
        let looper = Looper::spawn("thread-test").unwrap();
        let expected = looper.thread_id();
        let (tx, rx) = mpsc::channel();

        looper.context().post(move || tx.send(thread::current().id()).unwrap());

        assert_eq!(Some(rx.recv_timeout(Duration::from_secs(2)).unwrap()), expected);
    }

    #[test]
    fn test_quit_drains_queued_tasks_then_drops_new_ones() {
        let looper = Looper::spawn("quit-test").unwrap();
        let context = looper.context();
        let count = Arc::new(Mutex::new(0));

        for _ in 0..10 {
            let count = Arc::clone(&count);
            context.post(move || *count.lock() += 1);
        }
        looper.quit();
        assert_eq!(*count.lock(), 10);

        let late = Arc::clone(&count);
        context.post(move || *late.lock() += 1);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(*count.lock(), 10);
    }

    #[test]
    fn test_quit_from_inside_a_task_drops_later_posts() {
        let looper = Looper::spawn("self-quit-test").unwrap();
        let context = looper.context();
        let slot = Arc::new(Mutex::new(Some(looper)));
        let count = Arc::new(Mutex::new(0));
        let (done_tx, done_rx) = mpsc::channel();

        let own = Arc::clone(&slot);
        let late_context = context.clone();
        let late = Arc::clone(&count);
        context.post(move || {
            let looper = own.lock().take().unwrap();
            looper.quit();
            // Still on the looper thread, ahead of Quit in the queue
            late_context.post(move || *late.lock() += 1);
            done_tx.send(()).unwrap();
        });

        done_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        let after = Arc::clone(&count);
        context.post(move || *after.lock() += 1);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(*count.lock(), 0);
    }

    #[test]
    fn test_context_debug_shows_name() {
        let debug = format!("{:?}", DeliveryContext::inline());
        assert!(debug.contains("inline"));
    }
}
