use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use curriculum_core::model::{CourseDescriptor, CourseSet};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    CurriculumService, DEFAULT_PROGRESS_KEY, ProgressService, load_catalog_file, load_catalog_str,
};
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const BUNDLED_CATALOG: &str = include_str!("../assets/curriculum.json");

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidStorageKey { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidStorageKey { raw } => {
                write!(f, "invalid --storage-key value: {raw:?}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    descriptors: Vec<CourseDescriptor>,
    curriculum: Arc<CurriculumService>,
}

impl UiApp for DesktopApp {
    fn title(&self) -> String {
        "Curriculum Map".to_owned()
    }

    fn descriptors(&self) -> Vec<CourseDescriptor> {
        self.descriptors.clone()
    }

    fn curriculum(&self) -> Arc<CurriculumService> {
        Arc::clone(&self.curriculum)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    catalog: Option<PathBuf>,
    storage_key: String,
    verbose: bool,
    help: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--catalog <path>]");
    eprintln!("                      [--storage-key <key>] [--verbose]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:curriculum.sqlite3");
    eprintln!("  --catalog <bundled sample curriculum>");
    eprintln!("  --storage-key {DEFAULT_PROGRESS_KEY}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CURRICULUM_DB_URL, CURRICULUM_CATALOG, CURRICULUM_STORAGE_KEY, RUST_LOG");
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = normalize_sqlite_url(
            env("CURRICULUM_DB_URL").unwrap_or_else(|| "sqlite:curriculum.sqlite3".into()),
        );
        let mut catalog = env("CURRICULUM_CATALOG")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut storage_key =
            env("CURRICULUM_STORAGE_KEY").unwrap_or_else(|| DEFAULT_PROGRESS_KEY.to_owned());
        let mut verbose = false;
        let mut help = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--catalog" => {
                    catalog = Some(PathBuf::from(require_value(args, "--catalog")?));
                }
                "--storage-key" => {
                    storage_key = require_value(args, "--storage-key")?;
                }
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if storage_key.trim().is_empty() {
            return Err(ArgsError::InvalidStorageKey { raw: storage_key });
        }

        Ok(Self {
            db_url,
            catalog,
            storage_key,
            verbose,
            help,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing(verbose: bool) {
    // RUST_LOG wins over --verbose.
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_descriptors(
    catalog: Option<&PathBuf>,
) -> Result<Vec<CourseDescriptor>, Box<dyn std::error::Error>> {
    let descriptors = match catalog {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading catalog");
            load_catalog_file(path)?
        }
        None => {
            tracing::info!("Loading bundled catalog");
            load_catalog_str(BUNDLED_CATALOG)?
        }
    };

    // Reject duplicate names before the UI starts.
    CourseSet::build(descriptors.iter().cloned())?;
    Ok(descriptors)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    if parsed.help {
        print_usage();
        return Ok(());
    }

    init_tracing(parsed.verbose);
    tracing::info!(db = %parsed.db_url, key = %parsed.storage_key, "Curriculum map starting");

    let descriptors = load_descriptors(parsed.catalog.as_ref())?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;

    let progress = ProgressService::with_key(Arc::clone(&storage.kv), parsed.storage_key);
    let app = DesktopApp {
        descriptors,
        curriculum: Arc::new(CurriculumService::new(progress)),
    };
    let app: Arc<dyn UiApp> = Arc::new(app);
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Curriculum Map")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
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
        }
        .into());
    }

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

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
