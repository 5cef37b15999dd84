use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    BackendConfig, Clock, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, HttpBackend, QuizBackend,
};
use storage::repository::{ActivityLogStore, Storage};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    InvalidDbUrl { raw: String },
    InvalidBackendUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidBackendUrl { raw } => {
                write!(f, "invalid --backend-url value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

/// Desktop client for the adaptive quiz backend.
#[derive(Parser, Debug)]
#[command(name = "saphron-quore", version, about)]
struct Args {
    /// Base URL of the quiz backend.
    #[arg(long, env = "QUIZ_BACKEND_URL", default_value = DEFAULT_BASE_URL)]
    backend_url: String,

    /// SQLite database holding the local answer history.
    #[arg(long = "db", env = "QUIZ_DB_URL", default_value = "sqlite://quiz.sqlite3")]
    db_url: String,

    /// Per-request timeout for backend calls, in seconds.
    #[arg(long, env = "QUIZ_BACKEND_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

impl Args {
    fn backend_config(&self) -> Result<BackendConfig, ArgsError> {
        let trimmed = self.backend_url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ArgsError::InvalidBackendUrl {
                raw: self.backend_url.clone(),
            });
        }
        Ok(BackendConfig::new(trimmed).with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

struct DesktopApp {
    clock: Clock,
    backend: Arc<dyn QuizBackend>,
    activity: Arc<dyn ActivityLogStore>,
    backend_label: String,
}

impl UiApp for DesktopApp {
    fn clock(&self) -> Clock {
        self.clock
    }

    fn backend(&self) -> Arc<dyn QuizBackend> {
        Arc::clone(&self.backend)
    }

    fn activity_log(&self) -> Arc<dyn ActivityLogStore> {
        Arc::clone(&self.activity)
    }

    fn backend_label(&self) -> String {
        self.backend_label.clone()
    }
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn sqlite_path(db_url: &str) -> Result<Option<&str>, ArgsError> {
    if db_url == "sqlite::memory:" {
        return Ok(None);
    }
    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        });
    }
    Ok(Some(path))
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = sqlite_path(db_url)? else {
        return Ok(());
    };

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let backend_config = args.backend_config()?;
    let db_url = normalize_sqlite_url(&args.db_url);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&db_url)?;
    let storage = Storage::sqlite(&db_url).await?;
    tracing::info!(db = %db_url, backend = %backend_config.base_url, "starting quiz client");

    let backend_label = backend_config.base_url.clone();
    let backend: Arc<dyn QuizBackend> = Arc::new(HttpBackend::new(backend_config)?);
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        clock: Clock::default_clock(),
        backend,
        activity: Arc::clone(&storage.activity),
        backend_label,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Saphron Quore")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        tracing::error!(error = %err, "startup failed");
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let args = Args::try_parse_from(["saphron-quore"]).unwrap();
        assert_eq!(args.db_url, "sqlite://quiz.sqlite3");
        let config = args.backend_config().unwrap();
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "saphron-quore",
            "--backend-url",
            "https://quiz.example.test/",
            "--db",
            "sqlite://tmp/q.sqlite3",
            "--timeout-secs",
            "3",
        ])
        .unwrap();
        let config = args.backend_config().unwrap();
        assert_eq!(config.base_url, "https://quiz.example.test/");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(args.db_url, "sqlite://tmp/q.sqlite3");
    }

    #[test]
    fn backend_url_without_scheme_is_rejected() {
        let args =
            Args::try_parse_from(["saphron-quore", "--backend-url", "localhost:5001"]).unwrap();
        assert!(matches!(
            args.backend_config(),
            Err(ArgsError::InvalidBackendUrl { .. })
        ));
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:quiz.sqlite3");
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("quiz.sqlite3"));
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
    }

    #[test]
    fn sqlite_path_strips_query_and_rejects_other_schemes() {
        assert_eq!(
            sqlite_path("sqlite:///tmp/q.sqlite3?mode=rwc").unwrap(),
            Some("/tmp/q.sqlite3")
        );
        assert_eq!(sqlite_path("sqlite::memory:").unwrap(), None);
        assert!(sqlite_path("postgres://db").is_err());
    }
}
