//! In-flight job registry.
//!
//! Holds a snapshot of every running job so other tasks can read status or
//! request cancellation. Cancellation is a flag the generation loop checks
//! at its next checkpoint. Once a job is sealed it is past its last
//! checkpoint and can no longer be cancelled.

use std::collections::{HashMap, HashSet};

use starmaker_models::{JobId, VideoJob};
use tokio::sync::Mutex;
use tracing::debug;

/// Result of a cancellation checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Active,
    Cancelled,
}

#[derive(Default)]
struct Inner {
    active: HashMap<JobId, VideoJob>,
    cancelled: HashSet<JobId>,
    sealed: HashSet<JobId>,
}

/// Shared registry of running video jobs.
#[derive(Default)]
pub struct JobRegistry {
    inner: Mutex<Inner>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a job.
    pub async fn register(&self, job: &VideoJob) {
        let mut inner = self.inner.lock().await;
        inner.cancelled.remove(&job.id);
        inner.sealed.remove(&job.id);
        inner.active.insert(job.id.clone(), job.clone());
        debug!(job_id = %job.id, "Registered video job");
    }

    /// Replace the stored snapshot. Ignored once the job is cancelled or released.
    pub async fn update(&self, job: &VideoJob) {
        let mut inner = self.inner.lock().await;
        if let Some(slot) = inner.active.get_mut(&job.id) {
            *slot = job.clone();
        }
    }

    /// Report whether cancellation was requested.
    pub async fn checkpoint(&self, id: &JobId) -> SyncOutcome {
        if self.inner.lock().await.cancelled.contains(id) {
            SyncOutcome::Cancelled
        } else {
            SyncOutcome::Active
        }
    }

    /// Final checkpoint. After an `Active` result, `cancel` returns false
    /// for this job until it is released.
    pub async fn seal(&self, id: &JobId) -> SyncOutcome {
        let mut inner = self.inner.lock().await;
        if inner.cancelled.contains(id) {
            return SyncOutcome::Cancelled;
        }
        inner.sealed.insert(id.clone());
        SyncOutcome::Active
    }

    /// Snapshot of an active job.
    pub async fn get(&self, id: &JobId) -> Option<VideoJob> {
        self.inner.lock().await.active.get(id).cloned()
    }

    /// Request cancellation. Returns false if the job is not active or is
    /// already finishing.
    pub async fn cancel(&self, id: &JobId) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.sealed.contains(id) || inner.active.remove(id).is_none() {
            return false;
        }
        inner.cancelled.insert(id.clone());
        debug!(job_id = %id, "Cancellation requested");
        true
    }

    /// Stop tracking a job, whatever its state.
    pub async fn release(&self, id: &JobId) {
        let mut inner = self.inner.lock().await;
        inner.active.remove(id);
        inner.cancelled.remove(id);
        inner.sealed.remove(id);
    }

    pub async fn active_count(&self) -> usize {
        self.inner.lock().await.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_update_release() {
        let registry = JobRegistry::new();
        let mut job = VideoJob::new("Test", 60);

        registry.register(&job).await;
        assert_eq!(registry.active_count().await, 1);

        job.set_progress(40);
        registry.update(&job).await;
        assert_eq!(registry.get(&job.id).await.map(|j| j.progress), Some(40));
        assert_eq!(registry.checkpoint(&job.id).await, SyncOutcome::Active);

        registry.release(&job.id).await;
        assert!(registry.get(&job.id).await.is_none());
        assert_eq!(registry.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_cancel_flags_job() {
        let registry = JobRegistry::new();
        let mut job = VideoJob::new("Test", 60);
        registry.register(&job).await;

        assert!(registry.cancel(&job.id).await);
        assert!(registry.get(&job.id).await.is_none());
        assert_eq!(registry.checkpoint(&job.id).await, SyncOutcome::Cancelled);
        assert_eq!(registry.seal(&job.id).await, SyncOutcome::Cancelled);

        // A late snapshot must not bring the job back.
        job.set_progress(80);
        registry.update(&job).await;
        assert!(registry.get(&job.id).await.is_none());

        // Second cancel finds nothing active.
        assert!(!registry.cancel(&job.id).await);

        registry.release(&job.id).await;
        assert_eq!(registry.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_sealed_job_cannot_be_cancelled() {
        let registry = JobRegistry::new();
        let job = VideoJob::new("Test", 60);
        registry.register(&job).await;

        assert_eq!(registry.seal(&job.id).await, SyncOutcome::Active);
        assert!(!registry.cancel(&job.id).await);
        assert!(registry.get(&job.id).await.is_some());

        registry.release(&job.id).await;
        assert!(!registry.cancel(&job.id).await);
    }

    #[tokio::test]
    async fn test_cancel_unknown_job() {
        let registry = JobRegistry::new();
        assert!(!registry.cancel(&JobId::from_string("missing")).await);
    }
}
