//! Subprocess-backed handler
//!
//! Runs an external command and replies with its captured stdout.
//!
//! The response body does not exist until the child process exits, so the
//! sink must not be finalized anywhere before `output().await` resolves.
//! Finalizing from the handler's own synchronous flow would reply with an
//! empty body while the child is still running; keeping the completion
//! point as the only place that touches the sink rules that out.

use super::Handler;
use crate::http::{self, RawRequest, ResponseSink};
use async_trait::async_trait;
use tokio::process::Command;

pub struct CommandHandler {
    name: &'static str,
    program: String,
    args: Vec<String>,
}

impl CommandHandler {
    pub fn new(name: &'static str, program: &str, args: &[&str]) -> Self {
        Self {
            name,
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
        }
    }

    /// Directory listing handler, bound by callers that want `ls -lah`
    /// output served over HTTP.
    pub fn ls() -> Self {
        Self::new("ls", "ls", &["-lah"])
    }
}

#[async_trait]
impl Handler for CommandHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn handle(&self, sink: ResponseSink, _request: RawRequest) {
        let output = Command::new(&self.program).args(&self.args).output().await;

        // Completion point: the child has exited and stdout is fully
        // captured. This is the first place the sink may legally be touched.
        match output {
            Ok(out) if out.status.success() => {
                sink.finalize(http::build_text_response(
                    String::from_utf8_lossy(&out.stdout).into_owned(),
                ));
            }
            Ok(out) => {
                let detail = format!(
                    "command '{}' failed ({}): {}",
                    self.program,
                    out.status,
                    String::from_utf8_lossy(&out.stderr).trim()
                );
                sink.finalize(http::build_500_response(&detail));
            }
            Err(e) => {
                let detail = format!("command '{}' could not be started: {e}", self.program);
                sink.finalize(http::build_500_response(&detail));
            }
        }
    }
}
