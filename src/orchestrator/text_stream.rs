use tokio::sync::watch;

use crate::error::ConciergeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamStatus {
    Streaming,
    Complete,
    Failed(String),
}

#[derive(Debug, Clone)]
struct Snapshot {
    text: String,
    status: StreamStatus,
}

/// Write side of a [`TextStream`]. Consumed on completion, so a finished
/// stream can never be resumed.
pub(crate) struct StreamableText {
    tx: watch::Sender<Snapshot>,
}

impl StreamableText {
    pub(crate) fn new() -> (Self, TextStream) {
        let (tx, rx) = watch::channel(Snapshot {
            text: String::new(),
            status: StreamStatus::Streaming,
        });
        (Self { tx }, TextStream { rx })
    }

    pub(crate) fn append(&self, delta: &str) {
        self.tx.send_modify(|snapshot| snapshot.text.push_str(delta));
    }

    pub(crate) fn text(&self) -> String {
        self.tx.borrow().text.clone()
    }

    pub(crate) fn done(self) {
        self.tx
            .send_modify(|snapshot| snapshot.status = StreamStatus::Complete);
    }

    pub(crate) fn fail(self, reason: String) {
        self.tx
            .send_modify(|snapshot| snapshot.status = StreamStatus::Failed(reason));
    }
}

/// Live view of a growing assistant reply.
#[derive(Debug, Clone)]
pub struct TextStream {
    rx: watch::Receiver<Snapshot>,
}

impl TextStream {
    /// A stream that is already complete.
    pub fn completed(text: impl Into<String>) -> Self {
        let (_tx, rx) = watch::channel(Snapshot {
            text: text.into(),
            status: StreamStatus::Complete,
        });
        Self { rx }
    }

    /// Text accumulated so far.
    pub fn current(&self) -> String {
        self.rx.borrow().text.clone()
    }

    pub fn status(&self) -> StreamStatus {
        self.rx.borrow().status.clone()
    }

    pub fn is_complete(&self) -> bool {
        self.status() == StreamStatus::Complete
    }

    /// Waits for the next change and returns the full buffer. Returns `None`
    /// once the writer is gone and every change has been seen.
    pub async fn next_update(&mut self) -> Option<String> {
        self.rx.changed().await.ok()?;
        let text = self.rx.borrow_and_update().text.clone();
        Some(text)
    }

    /// Waits for the stream to end. The assistant message is committed
    /// before completion is signalled.
    pub async fn finished(&self) -> Result<String, ConciergeError> {
        let mut rx = self.rx.clone();
        let (text, status) = {
            let snapshot = rx
                .wait_for(|snapshot| snapshot.status != StreamStatus::Streaming)
                .await
                .map_err(|_| {
                    ConciergeError::StreamClosed("writer dropped before completion".to_string())
                })?;
            (snapshot.text.clone(), snapshot.status.clone())
        };
        match status {
            StreamStatus::Failed(reason) => Err(ConciergeError::StreamClosed(reason)),
            _ => Ok(text),
        }
    }
}
