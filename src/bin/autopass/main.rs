use std::path::PathBuf;
use std::process;

use clap::Parser;

mod generate;
mod history_operations;
mod select;
mod settings;
mod table;

#[derive(Parser)]
struct Args {
    /// Configuration file to read defaults from. [default: ~/.autopass/config.yaml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// File the password history is kept in. Overrides the configuration file.
    #[arg(long, global = true)]
    history: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a fully random password.
    Random(GenerateArgs),
    /// Generate a password that starts with a memorable hint, padded with random characters.
    Hint {
        /// Whitespace is removed before use.
        hint: String,
        #[command(flatten)]
        args: GenerateArgs,
    },
    /// Score the strength of a password.
    Score {
        /// Prompted for (without echo) if not given.
        password: Option<String>,
    },
    /// Commands for dealing with previously generated passwords.
    #[command(subcommand)]
    History(HistoryCommand),
}

#[derive(clap::Args)]
pub(crate) struct GenerateArgs {
    /// Length of the password. [default: from the configuration, or 16]
    #[arg(long, short)]
    length: Option<usize>,
    /// Leave out uppercase letters.
    #[arg(long)]
    no_uppercase: bool,
    /// Leave out digits.
    #[arg(long)]
    no_numbers: bool,
    /// Leave out symbols.
    #[arg(long)]
    no_symbols: bool,
    /// Copy the password to the clipboard.
    #[arg(long)]
    copy: bool,
    /// Don't record the password in the history.
    #[arg(long)]
    no_save: bool,
}

#[derive(clap::Subcommand)]
enum HistoryCommand {
    /// List previously generated passwords, newest first.
    List,
    /// Copy a password from the history to the clipboard.
    Copy,
    /// Remove a password from the history.
    Remove,
    /// Remove every password from the history.
    Clear,
    /// Write the history to a plain-text file.
    Export {
        /// [default: passwords_<timestamp>.txt]
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Everything a command works with, loaded once per invocation.
pub(crate) struct Session {
    pub settings: settings::Settings,
    pub history_path: PathBuf,
    pub history: autopass::History,
}

impl Session {
    fn load(config: Option<PathBuf>, history: Option<PathBuf>) -> Result<Session, ProgError> {
        let settings = settings::load_settings(config)?;
        let history_path = match history.or_else(|| settings.history.clone()) {
            Some(p) => p,
            None => settings::app_dir()?.join("history.json"),
        };
        let history = match autopass::History::load(&history_path) {
            Ok(h) => h,
            Err(err) => {
                log::warn!(
                    "failed to load the history from {}, starting empty: {}",
                    history_path.display(),
                    err
                );
                autopass::History::new()
            }
        };
        Ok(Session {
            settings,
            history_path,
            history,
        })
    }

    pub(crate) fn save_history(&self) -> Result<(), ProgError> {
        Ok(self.history.save(&self.history_path)?)
    }
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();
    let mut session = Session::load(args.config, args.history)?;

    match args.command {
        Command::Random(gen_args) => generate::generate_password(&mut session, gen_args, None)?,
        Command::Hint { hint, args } => {
            generate::generate_password(&mut session, args, Some(hint))?
        }
        Command::Score { password } => generate::score_password(password)?,
        Command::History(HistoryCommand::List) => history_operations::list_history(&session)?,
        Command::History(HistoryCommand::Copy) => history_operations::copy_entry(&session)?,
        Command::History(HistoryCommand::Remove) => {
            history_operations::remove_entry(&mut session)?
        }
        Command::History(HistoryCommand::Clear) => history_operations::clear_history(&mut session)?,
        Command::History(HistoryCommand::Export { output }) => {
            history_operations::export_history(&session, output)?
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => (),
        Err(ProgError::Other(err)) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ProgError {
    #[error("Please enter a hint.")]
    EmptyHint,
    #[error("No passwords generated yet.")]
    HistoryEmpty,
    #[error("No passwords to export.")]
    NothingToExport,
    #[error("Selection cancelled; exiting.")]
    SelectionCancelled,
    #[error("Delete aborted; exiting.")]
    DeleteAborted,
    #[error("Clear aborted; exiting.")]
    ClearAborted,
    #[error("Cannot generate a password: {0}")]
    Generation(autopass::GenerationError),
    #[error("History error: {0}")]
    History(autopass::HistoryError),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

impl From<autopass::GenerationError> for ProgError {
    fn from(err: autopass::GenerationError) -> ProgError {
        ProgError::Generation(err)
    }
}

impl From<autopass::HistoryError> for ProgError {
    fn from(err: autopass::HistoryError) -> ProgError {
        ProgError::History(err)
    }
}
