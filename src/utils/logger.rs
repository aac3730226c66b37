use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "address_access";

/// 日誌輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    /// 結構化輸出，給需要收集日誌的環境使用
    Json,
}

impl LogFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

/// 未設定 `RUST_LOG` 時的預設過濾規則
///
/// 設定檔的 level 優先；`--verbose` 會把本 crate 提到 debug，其他 crate 維持 info。
pub fn default_directive(verbose: bool, level: Option<&str>) -> String {
    match (level.map(str::trim).filter(|l| !l.is_empty()), verbose) {
        (Some(level), _) => format!("{}={}", CRATE_TARGET, level),
        (None, true) => format!("{}=debug,info", CRATE_TARGET),
        (None, false) => format!("{}=info", CRATE_TARGET),
    }
}

/// 日誌一律寫到 stderr，stdout 只留給指令輸出的 JSON
pub fn init_logger(format: LogFormat, verbose: bool, level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, level)));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init(),
    }
}
