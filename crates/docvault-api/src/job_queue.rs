//! Upload notification job queue.
//!
//! Document creation must not block on notification fan-out. Creation
//! enqueues a job on a bounded channel and returns; a worker pool drains
//! the channel under a concurrency bound.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

use docvault_core::models::NewFileUpload;
use docvault_services::UploadNotifier;

#[derive(Debug, Clone)]
pub enum NotificationJob {
    NewFile(NewFileUpload),
}

pub struct NotificationJobQueue {
    tx: mpsc::Sender<NotificationJob>,
}

impl NotificationJobQueue {
    /// Create the queue and spawn its worker pool. If the queue is full,
    /// `submit()` returns an error rather than blocking the request.
    pub fn new(notifier: UploadNotifier, queue_size: usize, max_concurrent: usize) -> Self {
        let (tx, rx) = mpsc::channel(queue_size.max(1));

        tokio::spawn(async move {
            Self::worker_pool(rx, notifier, max_concurrent.max(1)).await;
        });

        tracing::info!(
            queue_size = queue_size,
            max_concurrent = max_concurrent,
            "Notification job queue initialized with bounded channel"
        );

        Self { tx }
    }

    #[tracing::instrument(skip(self, job), fields(job.type = "new_file"))]
    pub fn submit(&self, job: NotificationJob) -> Result<()> {
        let NotificationJob::NewFile(upload) = &job;
        tracing::info!(document_id = %upload.document_id, "Enqueuing new-file notification job");

        self.tx.try_send(job).map_err(|e| match &e {
            mpsc::error::TrySendError::Full(_) => {
                tracing::warn!("Notification job queue is full, rejecting job");
                anyhow::anyhow!("Notification job queue is full, please try again later")
            }
            _ => anyhow::anyhow!("Failed to submit notification job: {}", e),
        })?;
        Ok(())
    }

    async fn worker_pool(
        mut rx: mpsc::Receiver<NotificationJob>,
        notifier: UploadNotifier,
        max_concurrent: usize,
    ) {
        let semaphore = Arc::new(Semaphore::new(max_concurrent));

        while let Some(job) = rx.recv().await {
            let permit = semaphore.clone().acquire_owned().await;
            let notifier = notifier.clone();

            tokio::spawn(async move {
                let _permit = permit;
                if let Err(e) = Self::process_job(job, notifier).await {
                    tracing::error!(error = %e, "Notification job failed");
                }
            });
        }
    }

    #[tracing::instrument(skip(notifier, job), fields(job.type = "new_file"))]
    async fn process_job(job: NotificationJob, notifier: UploadNotifier) -> Result<()> {
        match job {
            NotificationJob::NewFile(upload) => {
                let document_id = upload.document_id;
                let outcome = notifier.notify(upload).await?;
                tracing::info!(document_id = %document_id, ?outcome, "New-file notification job complete");
                Ok(())
            }
        }
    }
}
