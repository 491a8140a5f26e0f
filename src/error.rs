//! 定义了库中所有可能的错误类型。
//! Defines all possible error types in the library.

use std::time::Duration;
use thiserror::Error;

/// The primary error type for the padding engine.
/// 填充引擎的主要错误类型。
#[derive(Debug, Error)]
pub enum Error {
    /// A length outside the valid domain (negative, or wider than a `u32`)
    /// was handed to a strategy.
    ///
    /// 传给策略的长度超出有效范围（负数或超过 `u32`）。
    #[error("invalid length {value}: lengths must be non-negative and fit in 32 bits")]
    InvalidInput { value: i64 },

    /// A registry lookup used a name that is not registered.
    /// 注册表查找使用了未注册的名称。
    #[error("unknown padding strategy: {0:?}")]
    UnknownStrategy(String),

    /// A configuration value is inconsistent or out of range.
    /// 配置值不一致或超出范围。
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The external breakpoint optimizer could not be started.
    /// 无法启动外部断点优化器。
    #[error("failed to spawn external optimizer `{program}`: {source}")]
    ExternalSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external breakpoint optimizer exited unsuccessfully.
    /// 外部断点优化器以非零状态退出。
    #[error("external optimizer `{program}` exited with {}: {stderr}", display_code(.code))]
    ExternalExit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The external breakpoint optimizer did not finish in time and was killed.
    /// 外部断点优化器未能及时完成，已被终止。
    #[error("external optimizer `{program}` timed out after {timeout:?}")]
    ExternalTimeout { program: String, timeout: Duration },

    /// The optimizer's output could not be parsed into a breakpoint list.
    /// 优化器的输出无法解析为断点列表。
    #[error("malformed optimizer output: {0}")]
    MalformedOutput(String),

    /// A strategy reached an input its band logic does not cover.
    /// 策略遇到了其分段逻辑未覆盖的输入。
    #[error("strategy `{strategy}` has no band for length {length}")]
    InternalInvariant { strategy: String, length: u32 },
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl Error {
    /// Returns `true` if the error came from running the external optimizer,
    /// including unparsable output.
    ///
    /// 如果错误来自外部优化器（包括无法解析的输出），返回 `true`。
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            Error::ExternalSpawn { .. }
                | Error::ExternalExit { .. }
                | Error::ExternalTimeout { .. }
                | Error::MalformedOutput(_)
        )
    }
}

/// A specialized `Result` type for this library.
/// 本库专用的 `Result` 类型。
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        use std::io::ErrorKind;
        match err {
            Error::ExternalSpawn { source, .. } => source,
            Error::ExternalTimeout { .. } => ErrorKind::TimedOut.into(),
            Error::InvalidInput { .. } | Error::InvalidConfig(_) => {
                std::io::Error::new(ErrorKind::InvalidInput, err)
            }
            Error::UnknownStrategy(_) => std::io::Error::new(ErrorKind::NotFound, err),
            Error::MalformedOutput(_) => std::io::Error::new(ErrorKind::InvalidData, err),
            Error::ExternalExit { .. } | Error::InternalInvariant { .. } => {
                std::io::Error::other(err)
            }
        }
    }
}
