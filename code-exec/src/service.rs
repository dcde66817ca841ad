use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{
    error::Error,
    executor::RemoteExecutor,
    types::{ExecutionRequest, ExecutionResult},
};

/// Entry point used by the HTTP layer.
///
/// Built either around a configured [`RemoteExecutor`] or, when the judge
/// credential is missing, in an unconfigured state that rejects every
/// execution with [`Error::Configuration`] before touching the network.
#[derive(Clone)]
pub struct CodeExecutionService {
    executor: Result<Arc<RemoteExecutor>, String>,
    semaphore: Arc<Semaphore>,
}

/// A zero-permit semaphore would park every caller forever
fn execution_permits(max_concurrent_executions: usize) -> Arc<Semaphore> {
    if max_concurrent_executions == 0 {
        warn!("max_concurrent_executions of 0 raised to 1");
    }
    Arc::new(Semaphore::new(max_concurrent_executions.max(1)))
}

impl CodeExecutionService {
    /// `max_concurrent_executions` is at least 1
    pub fn new(executor: RemoteExecutor, max_concurrent_executions: usize) -> Self {
        Self {
            executor: Ok(Arc::new(executor)),
            semaphore: execution_permits(max_concurrent_executions),
        }
    }

    pub fn unconfigured(reason: impl Into<String>, max_concurrent_executions: usize) -> Self {
        Self {
            executor: Err(reason.into()),
            semaphore: execution_permits(max_concurrent_executions),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.executor.is_ok()
    }

    pub async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResult, Error> {
        self.execute_with_cancel(request, &CancellationToken::new())
            .await
    }

    pub async fn execute_with_cancel(
        &self,
        request: ExecutionRequest,
        cancel: &CancellationToken,
    ) -> Result<ExecutionResult, Error> {
        let language = request.validate()?;

        let executor = self
            .executor
            .as_ref()
            .map_err(|reason| Error::Configuration(reason.clone()))?;

        // Acquire execution permit
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| Error::Configuration(format!("Execution service closed: {}", e)))?;

        debug!("Starting code execution for language: {}", language);

        let result = executor.run(&request.code, language, cancel).await;

        match &result {
            Ok(r) => info!("Code execution completed: {}", r.status_description),
            Err(e) => error!("Code execution failed: {}", e),
        }

        result
    }

    pub fn get_available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_service_validates_first() {
        let service = CodeExecutionService::unconfigured("Judge0 API key not configured", 2);
        assert!(!service.is_configured());

        let result = service
            .execute(ExecutionRequest::new("print(1)", "brainfuck"))
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));

        let result = service
            .execute(ExecutionRequest::new("print(1)", "python"))
            .await;
        match result {
            Err(Error::Configuration(msg)) => assert_eq!(msg, "Judge0 API key not configured"),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execution_limit() {
        let max_executions = 2;
        let service = CodeExecutionService::unconfigured("missing", max_executions);

        assert_eq!(service.get_available_slots(), max_executions);
    }
}
