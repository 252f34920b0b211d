//! tracing 기반 로그 출력 설정.
//!
//! 콘솔 출력 형식은 `pretty`, `json`, `compact` 중에서 고르고,
//! 디렉토리를 지정하면 `<dir>/tradebot.log.YYYY-MM-DD` 파일에도 함께 남깁니다.

use crate::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// 파일 로그 이름 접두사. rolling 어펜더가 날짜 접미사를 붙입니다.
const LOG_FILE_PREFIX: &str = "tradebot.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// 콘솔 로그 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 여러 줄, 색상 포함
    #[default]
    Pretty,
    /// 한 줄 JSON 객체
    Json,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        [Self::Pretty, Self::Json, Self::Compact]
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| format!("Unsupported log format '{}' (expected pretty|json|compact)", raw))
    }
}

impl LogFormat {
    pub fn name(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
            Self::Compact => "compact",
        }
    }
}

/// 로그 초기화 옵션.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// EnvFilter 지시문 (예: "info", "tradebot_exchange=debug,info")
    pub level: String,
    pub format: LogFormat,
    /// span 생성/종료 이벤트 출력
    pub span_events: bool,
    /// 소스 파일과 줄 번호 출력
    pub source_location: bool,
    pub show_target: bool,
    /// 일별 로그 파일 디렉토리. `None`이면 콘솔만 사용
    pub directory: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: LogFormat::default(),
            span_events: false,
            source_location: false,
            show_target: true,
            directory: None,
        }
    }

    pub fn with_format(self, format: LogFormat) -> Self {
        Self { format, ..self }
    }

    pub fn with_file_dir(self, dir: impl Into<String>) -> Self {
        Self {
            directory: Some(dir.into()),
            ..self
        }
    }

    pub fn with_span_events(self, span_events: bool) -> Self {
        Self {
            span_events,
            ..self
        }
    }
}

impl From<&LoggingConfig> for LogConfig {
    /// `LOG_FORMAT` 환경 변수가 있으면 설정 파일의 형식보다 우선합니다.
    /// 알 수 없는 형식은 `pretty`로 처리합니다.
    fn from(settings: &LoggingConfig) -> Self {
        let requested = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.format.clone());
        let mut config = Self::new(settings.level.clone())
            .with_format(requested.parse().unwrap_or_default());
        config.directory = settings.file_dir.clone();
        config
    }
}

/// 비동기 파일 기록 워커를 붙잡아 두는 가드.
///
/// drop 시점에 남은 버퍼를 비우므로 프로세스 종료 직전까지 살려 두어야 합니다.
#[must_use]
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
}

fn console_layer(config: &LogConfig) -> BoxedLayer {
    let spans = match config.span_events {
        true => FmtSpan::NEW | FmtSpan::CLOSE,
        false => FmtSpan::NONE,
    };
    let base = fmt::layer()
        .with_target(config.show_target)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_span_events(spans);

    match config.format {
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Json => base.json().boxed(),
        LogFormat::Compact => base.compact().boxed(),
    }
}

fn file_layer(dir: &str, show_target: bool) -> (BoxedLayer, WorkerGuard) {
    let (writer, worker) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX));
    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(show_target)
        .with_writer(writer)
        .boxed();
    (layer, worker)
}

/// 전역 tracing subscriber를 설치합니다.
///
/// `RUST_LOG`가 설정되어 있으면 `level`보다 우선합니다. 이미 설치된
/// subscriber가 있으면 에러를 돌려줍니다.
///
/// ```no_run
/// use tradebot_core::logging::{init_logging, LogConfig, LogFormat};
///
/// let _guard = init_logging(&LogConfig::new("debug").with_format(LogFormat::Json)).unwrap();
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard, Box<dyn std::error::Error>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };

    let mut layers = vec![console_layer(config)];
    let worker = config.directory.as_deref().map(|dir| {
        let (layer, worker) = file_layer(dir, config.show_target);
        layers.push(layer);
        worker
    });

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;

    tracing::info!(
        level = %config.level,
        format = config.format.name(),
        directory = ?config.directory,
        "Logging initialized"
    );

    Ok(LogGuard { _worker: worker })
}
