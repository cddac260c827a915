use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// 日誌輸出格式：終端機用 compact，收集系統用 JSON lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
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

/// 沒有設定 RUST_LOG 時使用的過濾規則
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "reseller_catalog=debug,info"
    } else {
        "reseller_catalog=info,warn"
    }
}

/// 安裝全域 subscriber，整個行程只能呼叫一次
pub fn init_logger(verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let output: Box<dyn Layer<Registry> + Send + Sync> = match format {
        LogFormat::Compact => fmt::layer()
            .with_target(verbose)
            .without_time()
            .compact()
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_target(true)
            .json()
            .flatten_event(true)
            .boxed(),
    };

    tracing_subscriber::registry().with(output).with(filter).init();
}
