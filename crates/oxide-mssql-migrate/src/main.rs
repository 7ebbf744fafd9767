//! oxide-mssql-migrate CLI
//!
//! Command-line tool generating SQL Server DDL from table diffs.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use oxide_sql_mssql::driver::{DsnParams, PortSeparator, build_dsn};
use oxide_sql_mssql::prelude::*;

/// SQL Server ALTER TABLE generation.
#[derive(Parser)]
#[command(name = "oxide-mssql-migrate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Platform configuration file (JSON).
    #[arg(short, long, env = "OXIDE_MSSQL_CONFIG")]
    config: Option<PathBuf>,

    /// Server version string (e.g. 10.50.1600.1). Overrides the config file.
    #[arg(short, long)]
    server_version: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ALTER TABLE statements for a JSON table diff.
    Alter {
        /// Path to the table diff.
        diff: PathBuf,
    },

    /// Print the default constraint name of a column.
    ConstraintName {
        /// Table name.
        table: String,

        /// Column name.
        column: String,
    },

    /// Append a lock hint to a FROM clause.
    LockHint {
        /// FROM clause fragment (e.g. "FROM users u").
        from_clause: String,

        /// Lock mode.
        #[arg(short, long, value_enum, default_value = "none")]
        mode: LockModeArg,
    },

    /// Print the dblib DSN.
    Dsn {
        /// Server host name.
        #[arg(long)]
        host: Option<String>,

        /// Server port.
        #[arg(long)]
        port: Option<u16>,

        /// Database name.
        #[arg(long)]
        dbname: Option<String>,

        /// Client character set.
        #[arg(long)]
        charset: Option<String>,
    },

    /// Print the platform selected for a server version.
    Platform {
        /// Server version string.
        version: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LockModeArg {
    None,
    PessimisticRead,
    PessimisticWrite,
    Optimistic,
}

impl From<LockModeArg> for LockMode {
    fn from(mode: LockModeArg) -> Self {
        match mode {
            LockModeArg::None => Self::None,
            LockModeArg::PessimisticRead => Self::PessimisticRead,
            LockModeArg::PessimisticWrite => Self::PessimisticWrite,
            LockModeArg::Optimistic => Self::Optimistic,
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<PlatformConfig> {
    let mut config = match &cli.config {
        Some(path) => PlatformConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PlatformConfig::default(),
    };

    if let Some(version) = &cli.server_version {
        config.server_version = Some(version.clone());
    }

    Ok(config)
}

/// Runs a command and returns the lines to print.
fn run(cli: &Cli) -> anyhow::Result<Vec<String>> {
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Alter { diff: path } => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read diff {}", path.display()))?;
            let diff: TableDiff = serde_json::from_str(&json)
                .with_context(|| format!("Invalid table diff {}", path.display()))?;

            let platform = config.build_platform()?;
            let sql = platform.alter_table_sql(&diff)?;
            debug!(table = %diff.name, statements = sql.len(), "Compiled table diff");
            Ok(sql)
        }

        Commands::ConstraintName { table, column } => {
            Ok(vec![default_constraint_name(table, column)])
        }

        Commands::LockHint { from_clause, mode } => {
            let platform = config.build_platform()?;
            Ok(vec![platform.append_lock_hint(from_clause, (*mode).into())])
        }

        Commands::Dsn {
            host,
            port,
            dbname,
            charset,
        } => {
            let base = config.connection.unwrap_or_default();
            let params = DsnParams {
                host: host.clone().or(base.host),
                port: port.or(base.port),
                dbname: dbname.clone().or(base.dbname),
                charset: charset.clone().or(base.charset),
            };
            Ok(vec![build_dsn(&params, PortSeparator::native())])
        }

        Commands::Platform { version } => {
            let version = PlatformVersion::from_version_string(version)?;
            Ok(vec![version.name().to_string()])
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    for line in run(&cli)? {
        println!("{line}");
    }

    Ok(())
}
