//! Query runner - candidate binary selection and fallback
//!
//! Each query is tried against the configured binaries in priority order.
//! Every attempt is classified into an [`Attempt`] and the loop matches on
//! it:
//!
//! ```text
//!   xpumcli ──Success──▶ return stdout
//!      │
//!   Skip / Fail
//!      ▼
//!   xpu-smi ──Success──▶ return stdout
//!      │
//!   Skip / Fail
//!      ▼
//!   None (one error line naming every candidate)
//! ```

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use crate::command::CommandSpec;
use crate::config::{self, SmiConfig};
use crate::error::ExecError;
use crate::executor::{CommandExecutor, SystemExecutor};

/// Outcome of running one candidate binary
#[derive(Debug)]
pub enum Attempt {
    /// Zero exit status; trimmed stdout
    Success(String),
    /// Candidate unavailable, not an error
    Skip(SkipReason),
    /// Candidate ran (or tried to) and failed
    Fail(FailReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Binary absent from the execution path
    NotFound,
}

#[derive(Debug)]
pub enum FailReason {
    /// Process exited with a non-zero status or was killed by a signal
    NonZeroExit {
        exit_code: Option<i32>,
        stderr: String,
    },
    /// Spawn, wait, permission or timeout fault
    Fault(ExecError),
}

/// Runs vendor CLI queries with fallback across candidate binaries.
///
/// Stateless apart from its configuration, so one runner may serve any
/// number of concurrent queries.
#[derive(Clone)]
pub struct QueryRunner {
    binaries: Vec<String>,
    timeout: Duration,
    executor: Arc<dyn CommandExecutor>,
}

impl QueryRunner {
    pub fn new(
        binaries: Vec<String>,
        timeout: Duration,
        executor: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self {
            binaries,
            timeout,
            executor,
        }
    }

    /// Runner using real child processes
    pub fn from_config(config: &SmiConfig) -> Self {
        Self::with_executor(config, Arc::new(SystemExecutor))
    }

    pub fn with_executor(config: &SmiConfig, executor: Arc<dyn CommandExecutor>) -> Self {
        Self::new(config.binaries.clone(), config.timeout(), executor)
    }

    /// Longest a single query can take: every candidate timing out
    pub fn worst_case(&self) -> Duration {
        config::worst_case(self.timeout, self.binaries.len()).unwrap_or(Duration::MAX)
    }

    /// Run a query, returning trimmed stdout of the first candidate that
    /// succeeds, or `None` when no candidate does.
    pub async fn run_query(&self, spec: &CommandSpec) -> Option<String> {
        let mut any_ran = false;

        for binary in &self.binaries {
            match self.attempt(binary, spec).await {
                Attempt::Success(text) => return Some(text),
                Attempt::Skip(SkipReason::NotFound) => {
                    debug!(binary = %binary, "Binary not found, trying next candidate");
                }
                Attempt::Fail(FailReason::NonZeroExit { exit_code, stderr }) => {
                    any_ran = true;
                    error!(
                        binary = %binary,
                        args = %spec,
                        exit_code = ?exit_code,
                        stderr = %stderr.trim(),
                        "Command failed"
                    );
                }
                Attempt::Fail(FailReason::Fault(e)) => {
                    any_ran = true;
                    error!(binary = %binary, args = %spec, error = %e, "Failed to run command");
                }
            }
        }

        let candidates = self.binaries.join(", ");
        if any_ran {
            error!(binaries = %candidates, args = %spec, "All candidate binaries failed");
        } else {
            error!(binaries = %candidates, args = %spec, "No candidate binary found");
        }
        None
    }

    /// Run one candidate and classify the outcome
    pub async fn attempt(&self, binary: &str, spec: &CommandSpec) -> Attempt {
        match self
            .executor
            .execute(binary, spec.args(), self.timeout)
            .await
        {
            Ok(output) if output.success() => Attempt::Success(output.stdout.trim().to_string()),
            Ok(output) => Attempt::Fail(FailReason::NonZeroExit {
                exit_code: output.exit_code,
                stderr: output.stderr,
            }),
            Err(e) if e.is_not_found() => Attempt::Skip(SkipReason::NotFound),
            Err(e) => Attempt::Fail(FailReason::Fault(e)),
        }
    }
}

impl std::fmt::Debug for QueryRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryRunner")
            .field("binaries", &self.binaries)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockExecutor, MockReply};

    fn runner(executor: &Arc<MockExecutor>) -> QueryRunner {
        QueryRunner::with_executor(&SmiConfig::default(), executor.clone())
    }

    #[tokio::test]
    async fn primary_success_skips_fallback() {
        let executor = Arc::new(
            MockExecutor::new()
                .with_reply("xpumcli", MockReply::stdout("  {\"ok\":true}\n"))
                .with_reply("xpu-smi", MockReply::stdout("{}")),
        );

        let out = runner(&executor).run_query(&CommandSpec::discovery()).await;

        assert_eq!(out.as_deref(), Some("{\"ok\":true}"));
        assert_eq!(executor.call_count("xpumcli"), 1);
        assert_eq!(executor.call_count("xpu-smi"), 0);
    }

    #[tokio::test]
    async fn missing_primary_falls_back_with_same_args() {
        let executor =
            Arc::new(MockExecutor::new().with_reply("xpu-smi", MockReply::stdout("{}")));
        let spec = CommandSpec::health("3");

        let out = runner(&executor).run_query(&spec).await;

        assert_eq!(out.as_deref(), Some("{}"));
        let calls = executor.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].binary, "xpumcli");
        assert_eq!(calls[1].binary, "xpu-smi");
        assert_eq!(calls[0].args, calls[1].args);
        assert_eq!(calls[1].args, spec.args());
    }

    #[tokio::test]
    async fn non_zero_primary_falls_back() {
        let executor = Arc::new(
            MockExecutor::new()
                .with_reply("xpumcli", MockReply::exit(1, "device busy"))
                .with_reply("xpu-smi", MockReply::stdout("\n{\"temperature\":45}  ")),
        );

        let out = runner(&executor).run_query(&CommandSpec::stats("0")).await;

        assert_eq!(out.as_deref(), Some("{\"temperature\":45}"));
    }

    #[tokio::test]
    async fn fault_on_primary_falls_back() {
        let executor = Arc::new(
            MockExecutor::new()
                .with_reply("xpumcli", MockReply::Fault("permission denied".to_string()))
                .with_reply("xpu-smi", MockReply::stdout("{}")),
        );

        let out = runner(&executor).run_query(&CommandSpec::discovery()).await;

        assert_eq!(out.as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn last_candidate_failure_is_terminal() {
        let executor = Arc::new(
            MockExecutor::new()
                .with_reply("xpumcli", MockReply::exit(2, ""))
                .with_reply("xpu-smi", MockReply::exit(1, "no such device")),
        );

        let out = runner(&executor).run_query(&CommandSpec::stats("9")).await;

        assert!(out.is_none());
        assert_eq!(executor.call_count("xpumcli"), 1);
        assert_eq!(executor.call_count("xpu-smi"), 1);
    }

    #[tokio::test]
    async fn classify_attempts() {
        let executor = Arc::new(
            MockExecutor::new()
                .with_reply("ok", MockReply::stdout(" x "))
                .with_reply("bad", MockReply::exit(3, "boom")),
        );
        let runner = QueryRunner::new(vec![], Duration::from_secs(1), executor);
        let spec = CommandSpec::discovery();

        assert!(matches!(runner.attempt("ok", &spec).await, Attempt::Success(s) if s == "x"));
        assert!(matches!(
            runner.attempt("missing", &spec).await,
            Attempt::Skip(SkipReason::NotFound)
        ));
        assert!(matches!(
            runner.attempt("bad", &spec).await,
            Attempt::Fail(FailReason::NonZeroExit { exit_code: Some(3), .. })
        ));
    }

    #[tokio::test]
    async fn empty_candidate_list_yields_none() {
        let executor = Arc::new(MockExecutor::new());
        let runner = QueryRunner::new(vec![], Duration::from_secs(1), executor.clone());

        assert!(runner.run_query(&CommandSpec::discovery()).await.is_none());
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn worst_case_scales_with_candidates() {
        let runner = QueryRunner::new(
            vec!["a".into(), "b".into(), "c".into()],
            Duration::from_millis(250),
            Arc::new(MockExecutor::new()),
        );
        assert_eq!(runner.worst_case(), Duration::from_millis(750));
    }

    #[test]
    fn worst_case_saturates() {
        let runner = QueryRunner::new(
            vec!["a".into(), "b".into()],
            Duration::MAX,
            Arc::new(MockExecutor::new()),
        );
        assert_eq!(runner.worst_case(), Duration::MAX);
    }
}
