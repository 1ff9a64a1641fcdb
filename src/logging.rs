// src/logging.rs

use crate::config::ChatConfig;
use crate::errors::{ChatError, ChatResult};
use crate::models::ApiCallLog;
use flexi_logger::{detailed_format, FileSpec, Logger, LoggerHandle};
use log::info;

/// Starts file logging under `config.log_dir`. The terminal belongs to the
/// UI, so nothing is written to stderr. `RUST_LOG` wins over
/// `config.log_level`.
///
/// The returned handle must be kept alive for as long as logging is needed.
pub fn init_logging(config: &ChatConfig) -> ChatResult<LoggerHandle> {
    Logger::try_with_env_or_str(&config.log_level)
        .map_err(|e| ChatError::config_error(format!("Invalid log level: {}", e)))?
        .log_to_file(
            FileSpec::default()
                .directory(&config.log_dir)
                .basename("course-chat"),
        )
        .format(detailed_format)
        .start()
        .map_err(|e| ChatError::config_error(format!("Failed to start logger: {}", e)))
}

/// Formats one endpoint call as a single log line.
pub fn format_api_call(log: &ApiCallLog) -> String {
    let status = log
        .response_status
        .map(|code| code.to_string())
        .unwrap_or_else(|| "none".to_string());

    format!(
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        status,
        log.response_time_ms
    )
}

/// Logs an API call under the `api_calls` target.
pub fn log_api_call(log: &ApiCallLog) {
    info!(target: "api_calls", "{}", format_api_call(log));
}
