//! `muster` — team contact directory with remote sheet sync.
//!
//! # Usage
//!
//! ```
//! muster login
//! muster sync
//! muster list --search samer --filter whatsapp --sort name
//! muster whatsapp alice
//! muster watch
//! ```
//!
//! Reads `muster.toml` (or the path given with `--config`); every setting
//! can be overridden with a `MUSTER_*` environment variable.

mod output;
mod settings;

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use muster_core::{
  Contact, links,
  query::{ChannelFilter, ContactQuery, SortKey, run_query},
};
use muster_store_sqlite::{ActionEntry, ActionKind, CacheStore};
use muster_sync::{HttpFetcher, Outcome, Syncer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "muster", about = "Team contact directory with remote sync")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "muster.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Enter the shared team password to open the directory.
  Login,
  /// Close the session.
  Logout,
  /// Fetch the sheet and replace the cached contact set.
  Sync {
    /// Sync even if another sync is already in flight.
    #[arg(long)]
    force: bool,
  },
  /// List contacts, with search, channel filter, and sort.
  List {
    /// Case-insensitive substring over every contact field.
    #[arg(short, long, default_value = "")]
    search: String,
    /// all | phone | whatsapp | telegram
    #[arg(short, long, default_value = "all")]
    filter: ChannelFilter,
    /// name | name-desc | category | date | unsorted
    #[arg(long, default_value = "name")]
    sort: SortKey,
  },
  /// Stay running and re-sync on the configured interval.
  Watch,
  /// Show the quick-action history, newest first.
  Log {
    #[arg(short, long, default_value_t = 50)]
    limit: usize,
  },
  /// Print a tel: link for a contact and log the call.
  Call(ActionArgs),
  /// Print a WhatsApp link for a contact and log it.
  Whatsapp(ActionArgs),
  /// Print a Telegram link for a contact and log it.
  Telegram(ActionArgs),
}

#[derive(Args)]
struct ActionArgs {
  /// Search text selecting the contact; the first match wins.
  query: String,

  /// Skip the confirmation prompt.
  #[arg(short, long)]
  yes: bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  let store = CacheStore::open(&settings.store_path).await.with_context(|| {
    format!("failed to open cache at {:?}", settings.store_path)
  })?;

  match cli.command {
    Command::Login => login(&settings, &store).await,
    Command::Logout => {
      store.clear_auth().await.context("clearing session")?;
      println!("logged out");
      Ok(())
    }
    Command::Sync { force } => {
      require_auth(&settings, &store).await?;
      let syncer = build_syncer(&settings, store)?;
      report_outcome(syncer.sync(force).await?);
      Ok(())
    }
    Command::List { search, filter, sort } => {
      require_auth(&settings, &store).await?;
      let syncer = build_syncer(&settings, store)?;
      if let Err(e) = syncer.bootstrap().await {
        tracing::warn!(error = %e, "could not refresh; showing resident data");
      }
      let query = ContactQuery { search, filter, sort };
      output::print_contacts(&run_query(&syncer.contacts().await, &query));
      Ok(())
    }
    Command::Watch => {
      require_auth(&settings, &store).await?;
      let syncer = build_syncer(&settings, store)?;
      match syncer.bootstrap().await {
        Ok(outcome) => report_outcome(outcome),
        Err(e) => tracing::warn!(error = %e, "bootstrap sync failed"),
      }
      syncer.run().await;
      Ok(())
    }
    Command::Log { limit } => {
      require_auth(&settings, &store).await?;
      let actions = store
        .recent_actions(limit)
        .await
        .context("reading action log")?;
      output::print_actions(&actions);
      Ok(())
    }
    Command::Call(args) => {
      quick_action(ActionKind::Call, args, &settings, store).await
    }
    Command::Whatsapp(args) => {
      quick_action(ActionKind::Whatsapp, args, &settings, store).await
    }
    Command::Telegram(args) => {
      quick_action(ActionKind::Telegram, args, &settings, store).await
    }
  }
}

// ─── Auth gate ────────────────────────────────────────────────────────────────

async fn login(settings: &Settings, store: &CacheStore) -> anyhow::Result<()> {
  let password = prompt_line("Password: ")?;
  if password.is_empty() {
    bail!("a password is required");
  }
  if password != settings.password {
    bail!("wrong password");
  }

  store.set_authenticated().await.context("recording session")?;
  println!(
    "welcome to {}; session valid for {} hours",
    settings.team_name, settings.auth_ttl_hours,
  );
  Ok(())
}

/// Refuse to proceed unless a session exists and is within its TTL.
async fn require_auth(settings: &Settings, store: &CacheStore) -> anyhow::Result<()> {
  if store.is_authenticated(settings.auth_ttl()).await {
    Ok(())
  } else {
    bail!("no session or session expired; run `muster login`")
  }
}

// ─── Sync helpers ─────────────────────────────────────────────────────────────

fn build_syncer(
  settings: &Settings,
  store: CacheStore,
) -> anyhow::Result<Syncer<HttpFetcher>> {
  let fetcher = HttpFetcher::new(&settings.data_source)
    .context("failed to build HTTP client")?;
  Ok(Syncer::new(fetcher, store, settings.sync_config()))
}

fn report_outcome(outcome: Outcome) {
  match outcome {
    Outcome::Synced(count) => println!("synced {count} contacts"),
    Outcome::NoNewData => println!("no new data; previous contacts kept"),
    Outcome::InFlight => println!("a sync is already in flight"),
    Outcome::FromCache(count) => println!("{count} contacts loaded from cache"),
  }
}

// ─── Quick actions ────────────────────────────────────────────────────────────

async fn quick_action(
  kind: ActionKind,
  args: ActionArgs,
  settings: &Settings,
  store: CacheStore,
) -> anyhow::Result<()> {
  require_auth(settings, &store).await?;

  let syncer = build_syncer(settings, store.clone())?;
  if let Err(e) = syncer.bootstrap().await {
    tracing::warn!(error = %e, "could not refresh; using resident data");
  }

  let query = ContactQuery {
    search: args.query.clone(),
    filter: channel_for(kind),
    sort:   SortKey::Name,
  };
  let matches = run_query(&syncer.contacts().await, &query);
  let Some(contact) = matches.first() else {
    bail!(
      "no contact matching {:?} is reachable over {}",
      args.query,
      kind.as_str(),
    );
  };

  let (target, link) = match kind {
    ActionKind::Call => (contact.phone.clone(), links::tel_link(&contact.phone)),
    ActionKind::Whatsapp => (
      contact.whatsapp.clone(),
      links::whatsapp_link(&contact.whatsapp),
    ),
    ActionKind::Telegram => (
      contact.telegram.clone(),
      links::telegram_link(&contact.telegram),
    ),
  };

  if !args.yes && !confirm(contact, kind, &target)? {
    println!("cancelled");
    return Ok(());
  }

  println!("{link}");

  // Best effort: the action already happened from the user's point of view.
  let entry = ActionEntry {
    kind,
    target,
    name: contact.full_name(),
    logged_at: Utc::now(),
  };
  if let Err(e) = store.log_action(&entry).await {
    tracing::warn!(error = %e, "could not record action");
  }
  Ok(())
}

fn channel_for(kind: ActionKind) -> ChannelFilter {
  match kind {
    ActionKind::Call => ChannelFilter::Phone,
    ActionKind::Whatsapp => ChannelFilter::Whatsapp,
    ActionKind::Telegram => ChannelFilter::Telegram,
  }
}

fn confirm(contact: &Contact, kind: ActionKind, target: &str) -> anyhow::Result<bool> {
  let answer = prompt_line(&format!(
    "{} {} ({})? [y/N] ",
    kind.as_str(),
    contact.full_name(),
    target,
  ))?;
  Ok(matches!(answer.as_str(), "y" | "Y" | "yes"))
}

// ─── Stdin helper ─────────────────────────────────────────────────────────────

/// Print `prompt` and read one trimmed line from stdin.
fn prompt_line(prompt: &str) -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("{prompt}");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim().to_string())
}
