//! `foodshare`: command-line front end for the food donation dashboard.
//!
//! Each subcommand maps onto one dashboard view or form. `serve` exposes the
//! same views as a JSON API.
//!
//! # Usage
//!
//! ```
//! foodshare --db database.db dashboard
//! foodshare listings --city Springfield --food-type Vegan
//! foodshare claim 3 7
//! foodshare reports claim-status-distribution
//! foodshare serve
//! ```

mod render;
mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use foodshare_core::{
  entity::{NewClaim, NewProvider, NewReceiver},
  filter::{ListingFilter, Selection},
  report::{CATALOG, ReportStatus},
  session::Session,
  table::TableName,
};
use foodshare_store_sqlite::SqliteStore;
use serde::Serialize;
use settings::Settings;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "foodshare", version, about = "Food donation dashboard")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, global = true, default_value = "foodshare.toml")]
  config: PathBuf,

  /// SQLite database path; overrides `db_path` from the config.
  #[arg(long, global = true, value_name = "FILE")]
  db: Option<PathBuf>,

  /// Print JSON instead of text tables.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Aggregate charts over the listings.
  Dashboard,
  /// Food listings, optionally filtered.
  Listings(ListingArgs),
  /// The providers table.
  Providers,
  /// The receivers table.
  Receivers,
  /// Run one report by key, or every report when no key is given.
  Reports {
    key: Option<String>,
    /// List the catalog instead of running it.
    #[arg(long)]
    list: bool,
  },
  /// Every table with its load status.
  Tables,
  /// Add a provider.
  AddProvider {
    #[arg(long)]
    name:    String,
    #[arg(long = "type")]
    kind:    String,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long)]
    city:    String,
    #[arg(long, default_value = "")]
    contact: String,
  },
  /// Add a receiver.
  AddReceiver {
    #[arg(long)]
    name:    String,
    #[arg(long = "type")]
    kind:    String,
    #[arg(long)]
    city:    String,
    #[arg(long, default_value = "")]
    contact: String,
  },
  /// Claim a listing for a receiver.
  Claim {
    food_id:     i64,
    receiver_id: i64,
  },
  /// Create any missing tables in the database.
  Init,
  /// Serve the JSON API.
  Serve,
}

#[derive(Args)]
struct ListingArgs {
  #[arg(long, default_value = "All")]
  city:          String,
  #[arg(long, default_value = "All")]
  provider_type: String,
  #[arg(long, default_value = "All")]
  food_type:     String,
  #[arg(long, default_value = "All")]
  meal_type:     String,
  /// Print the available filter values instead of listings.
  #[arg(long)]
  options:       bool,
}

impl ListingArgs {
  fn to_filter(&self) -> ListingFilter {
    ListingFilter {
      city:          Selection::parse(&self.city),
      provider_type: Selection::parse(&self.provider_type),
      food_type:     Selection::parse(&self.food_type),
      meal_type:     Selection::parse(&self.meal_type),
    }
  }
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
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config, cli.db.as_deref())?;

  let store = SqliteStore::open(&settings.db_path)
    .await
    .with_context(|| format!("failed to open database at {:?}", settings.db_path))?;
  let session = Session::new(store, settings.cache_ttl());

  run(cli.command, cli.json, session, &settings).await
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(value)?);
  } else {
    print!("{}", text(value));
  }
  Ok(())
}

async fn run(
  command:  Command,
  json:     bool,
  session:  Session<SqliteStore>,
  settings: &Settings,
) -> anyhow::Result<()> {
  match command {
    Command::Dashboard => {
      let view = session.dashboard().await;
      emit(json, &view, render::dashboard)
    }

    Command::Listings(args) if args.options => {
      let opts = session.filter_options().await;
      emit(json, &opts, render::filter_options)
    }
    Command::Listings(args) => {
      let view = session.listings(&args.to_filter()).await;
      emit(json, &view, |v| {
        format!("Total listings: {}\n{}", v.total, render::table(&v.filtered))
      })
    }

    Command::Providers => {
      let snapshot = session.snapshot().await;
      emit(json, snapshot.table(TableName::Providers), render::table)
    }
    Command::Receivers => {
      let snapshot = session.snapshot().await;
      emit(json, snapshot.table(TableName::Receivers), render::table)
    }

    Command::Reports { list: true, .. } => emit(json, &CATALOG, |catalog| {
      catalog
        .iter()
        .map(|r| format!("{:<30} {}\n", r.key, r.title))
        .collect()
    }),
    Command::Reports { key: Some(key), .. } => {
      match session.run_report(&key).await {
        Ok(table) => emit(json, &table, render::table),
        Err(e) => anyhow::bail!("Query failed: {e}"),
      }
    }
    Command::Reports { key: None, .. } => {
      let outcomes = session.run_all_reports().await;
      emit(json, &outcomes, |outcomes| {
        outcomes
          .iter()
          .map(|o| match &o.status {
            ReportStatus::Ok { table } => format!("== {}\n{}\n", o.title, render::table(table)),
            ReportStatus::Failed { message } => {
              format!("== {}\nQuery failed: {message}\n\n", o.title)
            }
          })
          .collect()
      })
    }

    Command::Tables => {
      let snapshot = session.snapshot().await;
      emit(json, &*snapshot, |snap| {
        snap
          .tables
          .iter()
          .map(|(name, outcome)| {
            let note = if outcome.is_failed() { " (load failed)" } else { "" };
            format!("== {name}{note}\n{}\n", render::table(outcome.table()))
          })
          .collect()
      })
    }

    Command::AddProvider { name, kind, address, city, contact } => {
      let provider = session
        .add_provider(NewProvider { name, kind, address, city, contact })
        .await
        .context("failed to add provider")?;
      emit(json, &provider, |p| format!("Provider added with id {}.\n", p.provider_id))
    }
    Command::AddReceiver { name, kind, city, contact } => {
      let receiver = session
        .add_receiver(NewReceiver { name, kind, city, contact })
        .await
        .context("failed to add receiver")?;
      emit(json, &receiver, |r| format!("Receiver added with id {}.\n", r.receiver_id))
    }
    Command::Claim { food_id, receiver_id } => {
      let claim = session
        .submit_claim(NewClaim::new(food_id, receiver_id)?)
        .await
        .context("failed to submit claim")?;
      emit(json, &claim, |c| format!("Claim {} submitted ({}).\n", c.claim_id, c.status))
    }

    Command::Init => {
      session.store().bootstrap().await.context("failed to create tables")?;
      tracing::info!(db = ?settings.db_path, "tables created");
      Ok(())
    }

    Command::Serve => {
      let app = foodshare_api::api_router(Arc::new(session));
      let address = settings.address();

      tracing::info!("Listening on http://{address}");
      let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

      axum::serve(listener, app).await.context("server error")?;
      Ok(())
    }
  }
}
