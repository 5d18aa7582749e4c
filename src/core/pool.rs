use crate::utils::error::{FetchError, Result};
use crate::utils::validation::validate_positive_number;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::thread;
use tokio::sync::{mpsc, oneshot, Mutex};

/// 同時執行的解碼工作上限
pub const DEFAULT_POOL_SIZE: usize = 250;

type Task = Box<dyn FnOnce() + Send + 'static>;

static SHARED_POOL: OnceCell<Arc<WorkerPool>> = OnceCell::new();

/// Fixed-size pool of detached OS threads pulling from one FIFO queue.
///
/// Workers are never joined: once `main` returns the process exits no matter
/// what is still queued. Dropping the pool closes the queue; workers drain
/// what was already submitted and then exit.
pub struct WorkerPool {
    sender: mpsc::UnboundedSender<Task>,
    capacity: usize,
    queued: Arc<AtomicUsize>,
}

impl WorkerPool {
    pub fn new(capacity: usize) -> Result<Self> {
        validate_positive_number("pool.size", capacity, 1)?;

        let (sender, receiver) = mpsc::unbounded_channel::<Task>();
        let receiver = Arc::new(Mutex::new(receiver));
        let queued = Arc::new(AtomicUsize::new(0));

        for index in 0..capacity {
            let receiver = Arc::clone(&receiver);
            let queued = Arc::clone(&queued);
            thread::Builder::new()
                .name(format!("decode-worker-{}", index))
                .spawn(move || loop {
                    // 只在取工作時持有鎖，執行時釋放
                    let next = receiver.blocking_lock().blocking_recv();
                    match next {
                        Some(task) => {
                            queued.fetch_sub(1, Ordering::SeqCst);
                            task();
                        }
                        None => break,
                    }
                })?;
        }

        tracing::debug!("Started worker pool with {} threads", capacity);

        Ok(Self {
            sender,
            capacity,
            queued,
        })
    }

    /// Process-wide pool with [`DEFAULT_POOL_SIZE`] slots, started on first use.
    pub fn shared() -> Result<Arc<WorkerPool>> {
        Self::shared_with_capacity(DEFAULT_POOL_SIZE)
    }

    /// Like [`WorkerPool::shared`], but sizes the pool if it does not exist yet.
    pub fn shared_with_capacity(capacity: usize) -> Result<Arc<WorkerPool>> {
        let pool = SHARED_POOL.get_or_try_init(|| WorkerPool::new(capacity).map(Arc::new))?;
        if pool.capacity() != capacity {
            tracing::warn!(
                "Shared worker pool already running with {} threads, ignoring requested size {}",
                pool.capacity(),
                capacity
            );
        }
        Ok(Arc::clone(pool))
    }

    /// Queue `task` and return a handle resolving to its output.
    ///
    /// Never blocks. The task runs even if the handle is dropped; a panic
    /// inside the task is reported through the handle only.
    pub fn submit<F, T>(&self, task: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let job: Task = Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(task)).map_err(panic_message);
            // 呼叫端已放棄結果時忽略
            let _ = tx.send(outcome);
        });

        self.queued.fetch_add(1, Ordering::SeqCst);
        if self.sender.send(job).is_err() {
            // job 連同 tx 一起被丟棄，handle 會回報 PoolShutdown
            self.queued.fetch_sub(1, Ordering::SeqCst);
        }

        TaskHandle { receiver: rx }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of submitted tasks no worker has picked up yet.
    pub fn queued(&self) -> usize {
        self.queued.load(Ordering::SeqCst)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Result of a task submitted to a [`WorkerPool`].
pub struct TaskHandle<T> {
    receiver: oneshot::Receiver<std::result::Result<T, String>>,
}

impl<T> Future for TaskHandle<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.receiver).poll(cx).map(|received| match received {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => Err(FetchError::TaskPanicked { message }),
            Err(_) => Err(FetchError::PoolShutdown),
        })
    }
}
