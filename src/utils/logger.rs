use crate::domain::model::LogFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Default)]
pub struct LoggerOptions {
    pub verbose: bool,
    pub format: LogFormat,
    /// 設定檔中的 `[logging].level`，例如 "debug" 或 "file_toolbox=trace"
    pub level: Option<String>,
}

fn build_filter(options: &LoggerOptions) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if options.verbose {
            return EnvFilter::new("file_toolbox=debug,info");
        }
        match options.level.as_deref() {
            Some(level) if level.contains('=') => EnvFilter::new(level),
            Some(level) => EnvFilter::new(format!("file_toolbox={}", level)),
            None => EnvFilter::new("file_toolbox=info"),
        }
    })
}

pub fn init_logger(options: &LoggerOptions) {
    match options.format {
        LogFormat::Compact => init_cli_logger(options),
        LogFormat::Json => init_json_logger(options),
    }
}

// 日誌一律寫到 stderr，stdout 留給報表輸出
pub fn init_cli_logger(options: &LoggerOptions) {
    tracing_subscriber::registry()
        .with(build_filter(options))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(options: &LoggerOptions) {
    tracing_subscriber::registry()
        .with(build_filter(options))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
