//! Caller-supplied cancellation for store I/O.
//!
//! A [`CancellationSignal`] fires when its [`CancellationSource`] is
//! triggered or when its deadline passes, whichever comes first. Store calls
//! run through [`CancellationSignal::run`], which drops the in-flight future
//! as soon as the signal fires.

use std::future::{Future, pending};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

/// The signal fired before the guarded operation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation cancelled before completion")]
pub struct Cancelled;

/// Observes cancellation; cheap to clone and share across tasks.
///
/// # Examples
/// ```
/// use shelter::domain::{CancellationSource, Cancelled};
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let source = CancellationSource::new();
/// let signal = source.signal();
/// assert_eq!(signal.run(async { 7 }).await, Ok(7));
///
/// source.cancel();
/// assert_eq!(signal.run(async { 7 }).await, Err(Cancelled));
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationSignal {
    trigger: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

impl CancellationSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        Self::default()
    }

    /// Fires once `deadline` is reached.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            trigger: None,
            deadline: Some(deadline),
        }
    }

    /// Fires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Add or tighten a deadline on an existing signal.
    pub fn and_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(self.deadline.map_or(deadline, |current| current.min(deadline)));
        self
    }

    /// Instant after which the operation is abandoned, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the signal has already fired.
    pub fn is_cancelled(&self) -> bool {
        let triggered = self.trigger.as_ref().is_some_and(|rx| *rx.borrow());
        let expired = self.deadline.is_some_and(|deadline| Instant::now() >= deadline);
        triggered || expired
    }

    /// Resolves when the signal fires; pends forever for [`Self::never`].
    pub async fn cancelled(&self) {
        let triggered = async {
            match self.trigger.clone() {
                Some(mut rx) => {
                    let source_dropped = rx.wait_for(|fired| *fired).await.is_err();
                    if source_dropped {
                        pending::<()>().await;
                    }
                }
                None => pending::<()>().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };
        tokio::select! {
            () = triggered => {}
            () = expired => {}
        }
    }

    /// Drive `operation` to completion unless the signal fires first.
    ///
    /// An already-fired signal returns [`Cancelled`] without polling
    /// `operation` at all.
    pub async fn run<F>(&self, operation: F) -> Result<F::Output, Cancelled>
    where
        F: Future,
    {
        if self.is_cancelled() {
            return Err(Cancelled);
        }
        tokio::select! {
            biased;
            () = self.cancelled() => Err(Cancelled),
            output = operation => Ok(output),
        }
    }
}

/// Owner side of a cancellable operation.
#[derive(Debug)]
pub struct CancellationSource {
    sender: watch::Sender<bool>,
}

impl CancellationSource {
    /// A source whose signals have not fired.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    /// A signal observing this source.
    pub fn signal(&self) -> CancellationSignal {
        CancellationSignal {
            trigger: Some(self.sender.subscribe()),
            deadline: None,
        }
    }

    /// Fire every signal handed out by this source.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Whether [`CancellationSource::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn never_lets_operations_finish() {
        let signal = CancellationSignal::never();
        assert!(!signal.is_cancelled());
        assert_eq!(signal.run(async { "done" }).await, Ok("done"));
    }

    #[tokio::test]
    async fn fired_source_skips_the_operation() {
        let source = CancellationSource::new();
        source.cancel();
        let polled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&polled);

        let result = source
            .signal()
            .run(async move { flag.store(true, Ordering::SeqCst) })
            .await;

        assert_eq!(result, Err(Cancelled));
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn cancel_aborts_an_in_flight_operation() {
        let source = CancellationSource::new();
        let signal = source.signal();
        let task = tokio::spawn(async move { signal.run(pending::<()>()).await });

        tokio::task::yield_now().await;
        source.cancel();

        let result = task.await.expect("task joins");
        assert_eq!(result, Err(Cancelled));
    }

    #[tokio::test]
    async fn deadline_aborts_a_slow_operation() {
        let signal = CancellationSignal::with_timeout(Duration::from_millis(10));
        let result = signal.run(pending::<()>()).await;
        assert_eq!(result, Err(Cancelled));
        assert!(signal.is_cancelled());
    }

    #[tokio::test]
    async fn dropped_source_never_fires() {
        let signal = CancellationSource::new().signal();
        let result = signal.run(async { 1 }).await;
        assert_eq!(result, Ok(1));
    }

    #[test]
    fn and_deadline_keeps_the_earlier_instant() {
        let now = Instant::now();
        let early = now + Duration::from_secs(1);
        let late = now + Duration::from_secs(5);

        let signal = CancellationSignal::with_deadline(early).and_deadline(late);
        assert_eq!(signal.deadline(), Some(early));

        let signal = CancellationSignal::never().and_deadline(late);
        assert_eq!(signal.deadline(), Some(late));
    }
}
