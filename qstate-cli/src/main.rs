//! qstate - quantum state registry
//! Command-line front end over `qstate_core::StateRepository`
//!
//! Each invocation loads the store, runs one command and, for add/apply,
//! saves the store again.
//!
//! ## Exit status
//! - `0`: command completed
//! - `1`: hard error (invalid input, dimension mismatch, zero-norm state, bad config)
//! - `3`: command declined (duplicate id, unknown state, save failure)

mod config;
mod operators;

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use qstate_core::{parse_complex, Complex64, LoadStatus, Notice, NoticeLevel, StateRepository};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use operators::OperatorTable;

const EXIT_DECLINED: i32 = 3;

#[derive(Parser)]
#[command(name = "qstate")]
#[command(author = "qstate contributors")]
#[command(version = "2026.1.16")]
#[command(about = "qstate - quantum state registry", long_about = None)]
struct Cli {
    /// Persisted collection file (overrides [store].path)
    #[arg(long, global = true, env = "QSTATE_STORE", value_name = "PATH")]
    store: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true, env = "QSTATE_CONFIG", default_value = "qstate.toml", value_name = "PATH")]
    config: PathBuf,

    /// Do not save after add/apply
    #[arg(long, global = true)]
    no_save: bool,

    /// Log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every registered state
    List,

    /// Show a single state
    Show {
        /// State id
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Register a new state
    Add {
        /// State id
        #[arg(value_name = "ID")]
        id: String,

        /// Comma-separated amplitudes (e.g. "1,0" or "0.6,0.8j")
        #[arg(value_name = "AMPLITUDES", allow_hyphen_values = true)]
        amplitudes: String,

        /// Basis label
        #[arg(short, long, default_value = "computational")]
        basis: String,
    },

    /// Apply an operator to a state and register the result
    Apply {
        /// Source state id
        #[arg(value_name = "ID")]
        id: String,

        /// Operator name (see `qstate operators`)
        #[arg(value_name = "OPERATOR")]
        operator: String,

        /// Id for the new state (default: <ID>_<OPERATOR>)
        #[arg(long = "as", value_name = "NEW_ID")]
        new_id: Option<String>,
    },

    /// Print the measurement probabilities of a state
    Measure {
        /// State id
        #[arg(value_name = "ID")]
        id: String,
    },

    /// List the configured operators
    Operators,

    /// Save the store explicitly
    Save,

    /// Reload the store and report its contents
    Load,

    /// Print the effective configuration as TOML
    Config,
}

/// Outcome of a command that did not fail hard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Done,
    Declined,
}

impl From<bool> for Status {
    fn from(ok: bool) -> Self {
        if ok { Status::Done } else { Status::Declined }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(Status::Done) => {}
        Ok(Status::Declined) => std::process::exit(EXIT_DECLINED),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "off",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// ============================================================================
// Session
// ============================================================================

/// Repository plus what it was loaded from
struct Session {
    config: Config,
    repo: StateRepository,
    operators: OperatorTable,
    store: PathBuf,
    autosave: bool,
}

impl Session {
    fn open(cli: &Cli, config: Config) -> Result<Self> {
        let operators = OperatorTable::from_specs(&config.operators)
            .with_context(|| format!("Invalid operator table in {}", cli.config.display()))?;
        if operators.is_empty() {
            bail!("No operators configured in {}", cli.config.display());
        }
        let store = cli.store.clone().unwrap_or_else(|| config.store.path.clone());

        let mut repo = StateRepository::new();
        let status = repo.load_all(&store);
        let notices = repo.take_notices();

        if status == LoadStatus::Failed {
            print_notices(notices);
            bail!("Refusing to continue with an unreadable store '{}'", store.display());
        }
        print_notices(notices.into_iter().filter(|n| n.level != NoticeLevel::Info));

        tracing::debug!(
            store = %store.display(),
            states = repo.len(),
            operators = operators.len(),
            "session opened"
        );

        Ok(Self {
            autosave: config.store.autosave && !cli.no_save,
            config,
            repo,
            operators,
            store,
        })
    }

    /// Save after a mutating command
    fn commit(&mut self, status: Status) -> Status {
        if status == Status::Done && self.autosave {
            tracing::info!(store = %self.store.display(), "autosave");
            let saved = self.repo.save_all(&self.store);
            let notices = self.repo.take_notices();
            print_notices(notices.into_iter().filter(|n| n.level != NoticeLevel::Info));
            return saved.into();
        }
        status
    }

    fn flush_notices(&mut self) {
        print_notices(self.repo.take_notices());
    }
}

fn run(cli: Cli) -> Result<Status> {
    let config = Config::load(&cli.config)?;
    let mut session = Session::open(&cli, config)?;
    let result = execute(&mut session, cli.command);
    session.flush_notices();
    result
}

fn execute(session: &mut Session, command: Commands) -> Result<Status> {
    match command {
        Commands::List => {
            for line in session.repo.list_states() {
                println!("{}", line);
            }
            Ok(Status::Done)
        }

        Commands::Show { id } => match session.repo.get_state(&id) {
            Some(state) => {
                println!("{}", state);
                Ok(Status::Done)
            }
            None => {
                print_notice(&Notice::error(format!("No state with id '{}' exists.", id)));
                Ok(Status::Declined)
            }
        },

        Commands::Add { id, amplitudes, basis } => {
            let vector = parse_amplitudes(&amplitudes)?;
            let added = session.repo.add_state(id.as_str(), vector, basis)?;
            session.flush_notices();
            if added {
                println!("{} state '{}'", "Added".green().bold(), id.cyan());
            }
            Ok(session.commit(added.into()))
        }

        Commands::Apply { id, operator, new_id } => {
            let op = session.operators.get(&operator).ok_or_else(|| {
                anyhow!(
                    "Unknown operator '{}'. Available: {}",
                    operator,
                    session.operators.names().join(", ")
                )
            })?;
            let applied = session.repo.apply_operator(&id, op, new_id.as_deref())?;
            session.flush_notices();
            if applied {
                let target = new_id
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| format!("{}_{}", id, operator));
                println!(
                    "{} {} to '{}' as '{}'",
                    "Applied".green().bold(),
                    operator.cyan(),
                    id,
                    target.cyan()
                );
            }
            Ok(session.commit(applied.into()))
        }

        Commands::Measure { id } => {
            let probabilities = session.repo.measure_state(&id)?;
            Ok(probabilities.is_some().into())
        }

        Commands::Operators => {
            for op in session.operators.iter() {
                println!("{}", op);
            }
            Ok(Status::Done)
        }

        Commands::Save => Ok(session.repo.save_all(&session.store).into()),

        Commands::Load => {
            let status = session.repo.load_all(&session.store);
            Ok((status != LoadStatus::Failed).into())
        }

        Commands::Config => {
            print!("{}", session.config.to_string()?);
            Ok(Status::Done)
        }
    }
}

/// Parse a comma-separated amplitude list such as `1,0` or `(0.6+0j), 0.8j`
fn parse_amplitudes(text: &str) -> Result<Vec<Complex64>> {
    text.split(',')
        .map(|part| parse_complex(part).with_context(|| format!("Invalid amplitude list '{}'", text)))
        .collect()
}

// ============================================================================
// Output
// ============================================================================

fn print_notices(notices: impl IntoIterator<Item = Notice>) {
    for notice in notices {
        print_notice(&notice);
    }
}

fn print_notice(notice: &Notice) {
    let tag = format!("[{}]", notice.level);
    match notice.level {
        NoticeLevel::Info => println!("{} {}", tag.cyan(), notice.message),
        NoticeLevel::Warning => eprintln!("{} {}", tag.yellow().bold(), notice.message),
        NoticeLevel::Error => eprintln!("{} {}", tag.red().bold(), notice.message),
    }
}
