//! Scripted executor for testing
//!
//! Replies are matched on binary name and an argument prefix; the longest
//! matching prefix wins. Binaries with no reply behave as if absent from the
//! execution path. Every invocation is recorded for call-count assertions.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use crate::error::ExecError;
use crate::executor::{CommandExecutor, ProcessOutput};

/// Scripted behaviour for one binary
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Process runs to completion
    Output(ProcessOutput),
    /// Binary absent from the execution path
    NotFound,
    /// Spawn or wait fault with the given message
    Fault(String),
    /// Process never finishes; the attempt times out
    Hang,
}

impl MockReply {
    /// Zero exit with the given stdout
    pub fn stdout(stdout: impl Into<String>) -> Self {
        MockReply::Output(ProcessOutput {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        })
    }

    /// Non-zero exit with the given stderr
    pub fn exit(code: i32, stderr: impl Into<String>) -> Self {
        MockReply::Output(ProcessOutput {
            exit_code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        })
    }
}

/// A recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub binary: String,
    pub args: Vec<String>,
}

struct Rule {
    binary: String,
    args_prefix: Vec<String>,
    reply: MockReply,
}

#[derive(Default)]
pub struct MockExecutor {
    rules: RwLock<Vec<Rule>>,
    calls: Mutex<Vec<Invocation>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to every invocation of `binary`
    pub fn with_reply(self, binary: &str, reply: MockReply) -> Self {
        self.add_reply(binary, &[], reply);
        self
    }

    /// Reply to invocations of `binary` whose arguments start with `args_prefix`
    pub fn with_reply_for(self, binary: &str, args_prefix: &[&str], reply: MockReply) -> Self {
        self.add_reply(binary, args_prefix, reply);
        self
    }

    pub fn add_reply(&self, binary: &str, args_prefix: &[&str], reply: MockReply) {
        self.rules.write().push(Rule {
            binary: binary.to_string(),
            args_prefix: args_prefix.iter().map(|a| a.to_string()).collect(),
            reply,
        });
    }

    /// All invocations so far, in order
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, binary: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.binary == binary).count()
    }

    fn find_reply(&self, binary: &str, args: &[String]) -> Option<MockReply> {
        self.rules
            .read()
            .iter()
            .filter(|r| r.binary == binary && args.starts_with(&r.args_prefix))
            .max_by_key(|r| r.args_prefix.len())
            .map(|r| r.reply.clone())
    }
}

#[async_trait]
impl CommandExecutor for MockExecutor {
    async fn execute(
        &self,
        binary: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<ProcessOutput, ExecError> {
        self.calls.lock().push(Invocation {
            binary: binary.to_string(),
            args: args.to_vec(),
        });

        match self.find_reply(binary, args) {
            Some(MockReply::Output(output)) => Ok(output),
            Some(MockReply::Fault(message)) => Err(ExecError::Spawn {
                binary: binary.to_string(),
                source: std::io::Error::other(message),
            }),
            Some(MockReply::Hang) => {
                tokio::time::sleep(timeout).await;
                Err(ExecError::TimedOut {
                    binary: binary.to_string(),
                    timeout,
                })
            }
            Some(MockReply::NotFound) | None => Err(ExecError::NotFound(binary.to_string())),
        }
    }
}
