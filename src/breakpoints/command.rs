//! Runs an external optimizer process and reads breakpoints from its output.
//! 运行外部优化器进程并从其输出中读取断点。

use super::format::OutputFormat;
use super::{BreakpointSource, Breakpoints};
use crate::config::NearestConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// A breakpoint source backed by an external program.
///
/// The program runs once per `fetch`, with a hard timeout. The child is
/// killed if the timeout fires or the `fetch` future is dropped.
///
/// 由外部程序支持的断点来源。每次 `fetch` 运行一次程序，并带有严格超时。
/// 超时或 `fetch` future 被丢弃时，子进程会被终止。
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    format: OutputFormat,
}

impl CommandSource {
    /// Creates a source from an argv list (program first).
    ///
    /// 从 argv 列表（程序在前）创建来源。
    pub fn new(command: &[String], timeout: Duration, format: OutputFormat) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| Error::InvalidConfig("optimizer command is empty".into()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout,
            format,
        })
    }

    pub fn from_config(config: &NearestConfig) -> Result<Self> {
        Self::new(&config.command, config.timeout, config.format)
    }
}

#[async_trait]
impl BreakpointSource for CommandSource {
    async fn fetch(&self) -> Result<Breakpoints> {
        debug!(
            program = %self.program,
            args = ?self.args,
            timeout = ?self.timeout,
            "running external optimizer"
        );

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                warn!(program = %self.program, error = %source, "failed to spawn optimizer");
                return Err(Error::ExternalSpawn {
                    program: self.program.clone(),
                    source,
                });
            }
            Err(_) => {
                warn!(program = %self.program, timeout = ?self.timeout, "optimizer timed out, killed");
                return Err(Error::ExternalTimeout {
                    program: self.program.clone(),
                    timeout: self.timeout,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(
                program = %self.program,
                code = ?output.status.code(),
                %stderr,
                "optimizer exited unsuccessfully"
            );
            return Err(Error::ExternalExit {
                program: self.program.clone(),
                code: output.status.code(),
                stderr,
            });
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| Error::MalformedOutput("optimizer output is not valid UTF-8".into()))?;
        let values = self.format.parse(&stdout).inspect_err(|err| {
            warn!(program = %self.program, error = %err, "could not parse optimizer output");
        })?;
        let breakpoints = Breakpoints::new(values)?;

        debug!(
            program = %self.program,
            count = breakpoints.len(),
            "optimizer returned breakpoints"
        );
        Ok(breakpoints)
    }
}
