//! Contact inbox: hands accepted submissions to a background logger.
//!
//! DESIGN
//! ======
//! Request handlers never log submissions inline. They push onto a bounded
//! queue with `try_send` and return; a single task drains the queue, writes
//! one structured `tracing` event per submission, and drops it. Nothing is
//! stored.
//!
//! ERROR HANDLING
//! ==============
//! A full queue or a stopped drain task is reported to the caller as
//! [`InboxError`] so the handler can answer 500 instead of blocking.

use site::contact::ContactSubmission;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::task::JoinHandle;
use tracing::info;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InboxError {
    #[error("contact inbox is full")]
    Full,
    #[error("contact inbox is closed")]
    Closed,
}

/// Cloneable handle for enqueueing submissions.
#[derive(Clone, Debug)]
pub struct Inbox {
    tx: Sender<ContactSubmission>,
}

impl Inbox {
    /// Create an inbox and the receiving end of its queue. Capacity is at least 1.
    pub(crate) fn channel(capacity: usize) -> (Self, Receiver<ContactSubmission>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Enqueue without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Full`] when the queue is at capacity and
    /// [`InboxError::Closed`] when the drain task has stopped.
    pub fn submit(&self, submission: ContactSubmission) -> Result<(), InboxError> {
        self.tx.try_send(submission).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => InboxError::Full,
            mpsc::error::TrySendError::Closed(_) => InboxError::Closed,
        })
    }
}

/// Spawn the drain task. It exits once every [`Inbox`] clone is dropped.
#[must_use]
pub fn spawn_inbox(capacity: usize) -> (Inbox, JoinHandle<usize>) {
    let (inbox, mut rx) = Inbox::channel(capacity);
    info!(queue_capacity = capacity.max(1), "contact inbox configured");

    let handle = tokio::spawn(async move {
        let mut received = 0usize;
        while let Some(submission) = rx.recv().await {
            received += 1;
            log_submission(&submission);
        }
        info!(received, "contact inbox drained");
        received
    });

    (inbox, handle)
}

fn log_submission(submission: &ContactSubmission) {
    info!(
        name = %submission.name,
        email = %submission.email,
        topic = submission.topic().unwrap_or("-"),
        phone = submission.phone.as_deref().unwrap_or("-"),
        company = submission.company.as_deref().unwrap_or("-"),
        message_chars = submission.message.chars().count(),
        "contact form submission"
    );
}

#[cfg(test)]
#[path = "inbox_test.rs"]
mod inbox_test;
