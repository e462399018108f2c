//! Per-invocation setup shared by every subcommand

use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use recipebook_core::logging_facility;
use recipebook_core_types::{RequestContext, TraceId, UserId};
use recipebook_engine::AppConfig;
use recipebook_store::{db, migrations, FsImageStore};
use rusqlite::Connection;

pub type CliResult<T = ()> = Result<T, Box<dyn Error>>;

/// Fallback for `--user`
pub const ENV_USER: &str = "RECIPEBOOK_USER";

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database path, overrides configuration and environment
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Image directory, overrides configuration and environment
    #[arg(long, global = true)]
    pub media: Option<PathBuf>,

    /// Acting user (defaults to $RECIPEBOOK_USER)
    #[arg(long, global = true)]
    pub user: Option<String>,
}

/// Open database and image store for one command
pub struct Session {
    pub config: AppConfig,
    pub conn: Connection,
    pub images: FsImageStore,
}

impl Session {
    /// Load configuration, open the database and bring its schema up to date
    pub fn open(globals: &GlobalArgs) -> CliResult<Self> {
        let config = load_config(globals)?;

        if let Some(parent) = config
            .database_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent)?;
        }
        let mut conn = db::open(&config.database_path)?;
        migrations::apply_migrations(&mut conn)?;
        let images = FsImageStore::new(&config.media_dir);

        Ok(Self {
            config,
            conn,
            images,
        })
    }
}

/// Configuration with command-line overrides applied; also starts logging
pub fn load_config(globals: &GlobalArgs) -> CliResult<AppConfig> {
    let mut config = AppConfig::load(globals.config.as_deref())?;
    if let Some(db) = &globals.db {
        config.database_path = db.clone();
    }
    if let Some(media) = &globals.media {
        config.media_dir = media.clone();
    }

    logging_facility::init(config.profile()?);
    Ok(config)
}

/// Context for this invocation; every operation it runs shares one trace id
pub fn request_context(globals: &GlobalArgs) -> CliResult<RequestContext> {
    let user = globals
        .user
        .clone()
        .or_else(|| std::env::var(ENV_USER).ok())
        .filter(|user| !user.trim().is_empty())
        .ok_or("no user given; pass --user or set RECIPEBOOK_USER")?;

    Ok(RequestContext::for_user(UserId::new(user)).with_trace_id(TraceId::new()))
}
