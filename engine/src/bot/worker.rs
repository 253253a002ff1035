use tokio::sync::{mpsc, oneshot};

use super::protocol::{BotRequest, BotResponse, handle_request};
use crate::config::EngineConfig;

struct Job {
    request: BotRequest,
    reply_tx: oneshot::Sender<BotResponse>,
}

/// Handle to a background search task. Requests are served one at a time
/// in arrival order; each search runs on the blocking pool. The task ends
/// when the last handle is dropped.
#[derive(Clone)]
pub struct BotWorker {
    job_tx: mpsc::UnboundedSender<Job>,
}

impl BotWorker {
    /// Must be called inside a tokio runtime.
    pub fn spawn(config: EngineConfig) -> Self {
        let (job_tx, job_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(config, job_rx));
        Self { job_tx }
    }

    pub async fn find(&self, request: BotRequest) -> Result<BotResponse, String> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.job_tx
            .send(Job { request, reply_tx })
            .map_err(|_| "Bot worker is not running".to_string())?;

        reply_rx
            .await
            .map_err(|_| "Bot worker dropped the request".to_string())
    }
}

async fn run_worker(config: EngineConfig, mut job_rx: mpsc::UnboundedReceiver<Job>) {
    while let Some(job) = job_rx.recv().await {
        let config = config.clone();
        let request = job.request;
        let response = tokio::task::spawn_blocking(move || handle_request(&config, request)).await;

        match response {
            Ok(response) => {
                // the requester may have stopped waiting
                let _ = job.reply_tx.send(response);
            }
            Err(e) => {
                crate::log!("Bot search failed: {}", e);
            }
        }
    }
    crate::log!("Bot worker stopped");
}
