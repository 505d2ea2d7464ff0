//! postexp: command-line harness around postexp-core.
//!
//! `validate` and `check` run the policy against a value; `demo` installs the
//! plugin into in-memory host ports and prints the REST bodies it produces.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use postexp_core::app::Plugin;
use postexp_core::domain::{ExpiryResult, HostTimeZone, Post};
use postexp_core::impls::{InMemoryMetaStore, RoleAuthorizer};
use postexp_core::ports::{Actor, Clock, FixedClock, SystemClock};
use postexp_core::{Config, ExpirationPolicy};

#[derive(Debug, Parser)]
#[command(name = "postexp", version, about = "Post expiration-date policy")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Host time zone override (UTC, Z, +HH:MM or -HH:MM).
    #[arg(long, global = true)]
    timezone: Option<HostTimeZone>,

    /// Reference instant (RFC 3339) instead of the system clock.
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Would this value be accepted for storage?
    Validate { value: String },

    /// Is this stored value expired?
    Check { value: String },

    /// Save a few posts through the plugin and print their REST bodies.
    Demo,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(zone) = cli.timezone {
        config.timezone = zone;
    }
    init_tracing(&config);

    let clock: Arc<dyn Clock> = match cli.now {
        Some(now) => Arc::new(FixedClock::new(now)),
        None => Arc::new(SystemClock),
    };
    let policy = ExpirationPolicy::new(config.timezone);

    match &cli.command {
        Command::Validate { value } => {
            match policy.check_future_timestamp(value, clock.now()) {
                Ok(_) => {
                    println!("valid");
                    Ok(ExitCode::SUCCESS)
                }
                Err(reason) => {
                    println!("invalid: {reason}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Check { value } => {
            let result = policy.is_expired(value, clock.now());
            println!("{}", result.as_str());
            Ok(match result {
                ExpiryResult::NotExpired => ExitCode::SUCCESS,
                ExpiryResult::Expired | ExpiryResult::Indeterminate => ExitCode::FAILURE,
            })
        }
        Command::Demo => {
            demo(&config, clock)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// `RUST_LOG` wins over the configured filter.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn demo(config: &Config, clock: Arc<dyn Clock>) -> Result<()> {
    let store = Arc::new(InMemoryMetaStore::new());
    let plugin = Plugin::install(config, store, Arc::new(RoleAuthorizer::default()), clock.clone())
        .context("failed to install plugin")?;

    let editor = Actor::new("erin", "editor");
    let subscriber = Actor::new("sam", "subscriber");
    let key = config.meta_key.as_str();

    let in_a_week = one_week_after(clock.now())?;
    let future = postexp_core::domain::format_canonical(in_a_week, config.timezone);

    let posts = [
        (Post::new(1, "Next week's sale"), editor.clone(), future.as_str()),
        (Post::new(2, "Yesterday's news"), editor.clone(), "2000-01-01 00:00:00"),
        (Post::new(3, "Typo"), editor.clone(), "2099/01/01 00:00:00"),
        (Post::new(4, "Evergreen"), editor, ""),
        (Post::new(5, "Drive-by edit"), subscriber, "2099-01-01 00:00:00"),
    ];

    for (post, actor, raw) in &posts {
        match plugin.meta.write_meta(actor, post, key, raw) {
            Ok(report) => match &report.rejection {
                Some(reason) => println!("{}: {raw:?} rejected ({reason}), stored \"\"", post.id),
                None => println!("{}: stored {:?}", post.id, report.stored),
            },
            Err(err) => println!("{}: write refused: {err}", post.id),
        }
    }

    for (post, _, _) in &posts {
        let body = plugin.rest.serialize(post);
        println!("{}", serde_json::to_string_pretty(&body)?);
    }
    Ok(())
}

fn one_week_after(now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    now.checked_add_signed(chrono::Duration::days(7))
        .context("reference instant is too close to the latest representable date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_week_after_adds_seven_days() {
        let now = DateTime::from_timestamp(1_704_067_200, 0).unwrap();
        assert_eq!(
            one_week_after(now).unwrap(),
            DateTime::from_timestamp(1_704_067_200 + 7 * 86_400, 0).unwrap()
        );
    }

    #[test]
    fn one_week_after_max_date_is_an_error() {
        let err = one_week_after(DateTime::<Utc>::MAX_UTC).unwrap_err();
        assert!(err.to_string().contains("latest representable date"));
    }
}
