//! Cooperative cancellation for folder and file operations.
//!
//! Cancellation is signalled by closing a channel, so waiting operations wake
//! up without polling a flag.

use std::future::Future;
use std::pin::pin;

use async_channel::{Receiver, Sender};
use futures::future::{self, Either};

use crate::{FsError, Result};

/// The owning side of a cancellation signal.
///
/// Calling [`cancel()`](Self::cancel) or dropping the source fires every
/// [`CancellationToken`] obtained from it.
///
/// # Example
///
/// ```
/// use folderkit_fs::CancellationSource;
///
/// let source = CancellationSource::new();
/// let token = source.token();
/// assert!(!token.is_cancelled());
///
/// source.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug)]
pub struct CancellationSource {
    sender: Sender<()>,
    receiver: Receiver<()>,
}

impl CancellationSource {
    /// Create a new, not yet fired, cancellation source.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = async_channel::bounded(1);
        Self { sender, receiver }
    }

    /// A token observing this source.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            receiver: Some(self.receiver.clone()),
        }
    }

    /// Fire the signal. Idempotent.
    pub fn cancel(&self) {
        self.sender.close();
    }

    /// Whether the signal has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.sender.is_closed()
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CancellationSource {
    fn drop(&mut self) {
        self.sender.close();
    }
}

/// Handle passed to operations so they can observe cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    receiver: Option<Receiver<()>>,
}

impl CancellationToken {
    /// A token that never fires.
    #[must_use]
    pub const fn none() -> Self {
        Self { receiver: None }
    }

    /// Check if cancellation was requested (non-blocking).
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.receiver.as_ref().is_some_and(Receiver::is_closed)
    }

    /// Wait until cancellation is requested.
    ///
    /// Never completes for [`CancellationToken::none()`].
    pub async fn cancelled(&self) {
        match &self.receiver {
            // Nothing is ever sent, recv only returns once the channel closes.
            Some(receiver) => {
                let _ = receiver.recv().await;
            }
            None => future::pending::<()>().await,
        }
    }

    /// Fail fast with [`FsError::Cancelled`] if the token already fired.
    pub(crate) fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(FsError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Drive `operation` until it completes or the token fires.
    ///
    /// The operation is not started at all if the token has already fired.
    pub(crate) async fn run<T, F>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;
        let operation = pin!(operation);
        let cancelled = pin!(self.cancelled());
        match future::select(operation, cancelled).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(FsError::Cancelled),
        }
    }
}
