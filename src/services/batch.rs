//! Concurrent calculation of several independent routes.
//!
//! Each request runs on tokio's blocking pool. Calculations share only the
//! read-only orchestrator, so no synchronization is needed between them.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{error, info};

use crate::services::orchestrator::ScheduleOrchestrator;
use crate::types::{CalculationResults, ScheduleRequest};

/// Outcome of one request in a batch
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<CalculationResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Calculate every request concurrently. Outcomes keep the input order.
pub async fn calculate_batch(
    orchestrator: Arc<ScheduleOrchestrator>,
    requests: Vec<(String, ScheduleRequest)>,
) -> Vec<BatchOutcome> {
    let total = requests.len();

    let tasks = requests.into_iter().map(|(name, request)| {
        let orchestrator = Arc::clone(&orchestrator);
        async move {
            let task_name = name.clone();
            let joined = tokio::task::spawn_blocking(move || orchestrator.calculate_request(&request)).await;

            match joined {
                Ok(Ok(results)) => BatchOutcome {
                    name: task_name,
                    results: Some(results),
                    error: None,
                },
                Ok(Err(e)) => BatchOutcome {
                    name: task_name,
                    results: None,
                    error: Some(e.to_string()),
                },
                Err(e) => {
                    error!("Calculation task for {} failed: {}", name, e);
                    BatchOutcome {
                        name: task_name,
                        results: None,
                        error: Some(format!("calculation task failed: {}", e)),
                    }
                }
            }
        }
    });

    let outcomes = join_all(tasks).await;
    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    info!("Batch completed: {}/{} routes calculated", succeeded, total);

    outcomes
}
