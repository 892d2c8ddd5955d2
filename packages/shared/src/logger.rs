//! Logging setup utilities for the relay binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the workspace library crates and the binary itself.
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "relay_server", "relay_client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use relay_shared::logger::setup_logger;
///
/// setup_logger("relay_server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Workspace library crates, as tracing targets.
const WORKSPACE_CRATES: [&str; 3] = ["relay_shared", "relay_server", "relay_client"];

/// Build the filter directive used when `RUST_LOG` is not set.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut targets: Vec<&str> = WORKSPACE_CRATES.to_vec();
    if !targets.contains(&binary_target.as_str()) {
        targets.push(&binary_target);
    }

    targets
        .iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_skips_binary_already_listed() {
        // テスト項目: ワークスペースのクレートと同名のバイナリは二重に指定されない
        // given (前提条件):
        let binary = "relay-server";

        // when (操作):
        let filter = default_filter(binary, "debug");

        // then (期待する結果):
        assert_eq!(filter, "relay_shared=debug,relay_server=debug,relay_client=debug");
    }

    #[test]
    fn test_default_filter_normalizes_binary_name() {
        // テスト項目: バイナリ名のハイフンはアンダースコアに変換される（tracing のターゲット形式）
        // given (前提条件) / when (操作):
        let filter = default_filter("my-tool", "warn");

        // then (期待する結果):
        assert!(filter.ends_with(",my_tool=warn"));
    }
}
