//! 错误上报端口。核心组件只返回错误，由调用方决定通过哪种渠道呈现给用户。

use tracing::error;

pub trait ErrorReporter {
    fn report(&self, message: &str);
}

/// 通过 `tracing` 输出错误日志。
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, message: &str) {
        error!("{message}");
    }
}

/// 直接写到标准错误。
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ErrorReporter for ConsoleReporter {
    fn report(&self, message: &str) {
        eprintln!("错误: {message}");
    }
}
