//! `yapress` command-line entry point.
//!
//! Loads configuration, initializes logging and dispatches to one of the
//! maintenance commands or the HTTP server.

mod config;

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use config::Config;
use log::info;
use std::path::PathBuf;
use yapress_core::db::{migrations, open_db};
use yapress_core::{
    default_log_level, init_logging, NewNews, NewsService, SqliteNewsRepository,
    SqliteUserRepository, UserService,
};
use yapress_web::{router, AppState, Site};

#[derive(Parser)]
#[command(name = "yapress")]
#[command(about = "YaNews and YaNote sites", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve one site over HTTP
    Serve {
        #[arg(long)]
        site: Option<Site>,

        /// Listen address, e.g. 127.0.0.1:8000
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,

        /// SQLite database file
        #[arg(long, value_name = "PATH")]
        db: Option<PathBuf>,
    },

    /// Apply pending schema migrations and exit
    Migrate {
        #[arg(long, value_name = "PATH")]
        db: Option<PathBuf>,
    },

    /// Create an account with a password
    CreateUser {
        username: String,
        password: String,

        #[arg(long, value_name = "PATH")]
        db: Option<PathBuf>,
    },

    /// Publish a news item
    AddNews {
        title: String,
        text: String,

        /// Publication date as YYYY-MM-DD; defaults to today
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,

        #[arg(long, value_name = "PATH")]
        db: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    let level = config
        .logging
        .level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    let log_dir = config
        .logging
        .dir
        .as_ref()
        .map(|dir| dir.to_string_lossy().into_owned());
    init_logging(&level, log_dir.as_deref()).map_err(|err| anyhow!(err))?;

    match cli.command {
        Command::Serve { site, bind, db } => {
            if let Some(site) = site {
                config.server.site = site;
            }
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            override_db(&mut config, db);
            serve(config)
        }
        Command::Migrate { db } => {
            override_db(&mut config, db);
            let conn = open_db(&config.database.path)?;
            let version = migrations::current_user_version(&conn)?;
            println!(
                "database {} at schema version {version}",
                config.database.path.display()
            );
            Ok(())
        }
        Command::CreateUser {
            username,
            password,
            db,
        } => {
            override_db(&mut config, db);
            let conn = open_db(&config.database.path)?;
            let user = UserService::new(SqliteUserRepository::new(&conn))
                .create_user(&username, &password)
                .with_context(|| format!("failed to create user `{username}`"))?;
            println!("created user {} (id {})", user.username, user.id);
            Ok(())
        }
        Command::AddNews {
            title,
            text,
            date,
            db,
        } => {
            override_db(&mut config, db);
            let conn = open_db(&config.database.path)?;
            let mut news = NewNews::new(title, text);
            if let Some(date) = date {
                news = news.with_date(date);
            }
            let news = NewsService::new(SqliteNewsRepository::new(&conn)).publish(&news)?;
            println!("published news {} dated {}", news.id, news.date);
            Ok(())
        }
    }
}

fn override_db(config: &mut Config, db: Option<PathBuf>) {
    if let Some(path) = db {
        config.database.path = path;
    }
}

fn serve(config: Config) -> anyhow::Result<()> {
    let conn = open_db(&config.database.path)?;
    let state = AppState::new(conn, config.web_settings())?;
    let app = router(state);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&config.server.bind)
            .await
            .with_context(|| format!("failed to bind {}", config.server.bind))?;
        info!(
            "event=server_start module=cli status=ok site={} bind={}",
            config.server.site, config.server.bind
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("event=server_stop module=cli status=ok");
        Ok(())
    })
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
