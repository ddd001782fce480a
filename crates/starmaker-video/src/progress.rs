//! Progress notifications.

use starmaker_models::{PipelineStage, ProgressEvent, VideoJob};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// Sender half for progress events.
///
/// Publishing never blocks or fails: a disabled channel or a dropped
/// receiver just discards the event.
#[derive(Debug, Clone)]
pub struct ProgressChannel {
    tx: Option<UnboundedSender<ProgressEvent>>,
}

impl ProgressChannel {
    /// Create a channel and the receiver its events go to.
    pub fn new() -> (Self, UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A channel that drops every event.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn publish(&self, event: ProgressEvent) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(event).is_err() {
            debug!("Progress receiver dropped, discarding event");
        }
    }

    /// Publish a job snapshot.
    pub fn video(&self, job: &VideoJob) {
        self.publish(ProgressEvent::video(job));
    }

    /// Publish a pipeline stage change.
    pub fn stage(&self, stage: PipelineStage) {
        self.publish(ProgressEvent::stage(stage));
    }
}
