//! Command dispatch for the tracker shell.

use std::path::PathBuf;

use colored::Colorize;
use thiserror::Error;

use crate::config::{Config, ConfigManager};
use crate::core::{Outcome, Tracker};
use crate::errors::{TrackerError, ValidationError};
use crate::ledger::{SearchOutcome, Transaction, TransactionDraft, TransactionKind};

use super::io::{CliConfirm, CliFileDialog};
use super::output;
use super::shell::CliMode;

/// Command table: name, one-line usage shown by `help` and offered to the
/// completer.
const COMMANDS: &[(&str, &str)] = &[
    ("add", "add <description> <amount> [income|expense]: record a transaction"),
    ("list", "list: show all transactions"),
    ("search", "search <query>: filter transactions by any field"),
    ("totals", "totals: show income, expenses, and net balance"),
    ("clear", "clear: delete all transactions"),
    ("save", "save [path]: write a JSON snapshot"),
    ("load", "load [path]: replace the ledger from a JSON snapshot"),
    ("export", "export [path]: write transactions as CSV"),
    ("import", "import [path]: replace the ledger from a CSV file"),
    ("help", "help: show this overview"),
    ("version", "version: show version information"),
    ("exit", "exit: leave the shell"),
];

const SUGGESTION_DISTANCE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub(crate) type CommandResult = Result<LoopControl, CommandError>;

/// Failure of a single command; reported and the shell keeps running.
#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Usage(String),
}

pub(crate) struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) running: bool,
    tracker: Tracker,
    config: Config,
    config_manager: ConfigManager,
}

impl ShellContext {
    pub(crate) fn new(mode: CliMode) -> Result<Self, TrackerError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        Ok(Self {
            mode,
            running: true,
            tracker: Tracker::new(),
            config,
            config_manager,
        })
    }

    pub(crate) fn command_names() -> Vec<&'static str> {
        COMMANDS.iter().map(|(name, _)| *name).collect()
    }

    pub(crate) fn dispatch(&mut self, command: &str, args: &[&str]) -> CommandResult {
        match command {
            "add" => self.cmd_add(args),
            "list" => self.cmd_list(),
            "search" => self.cmd_search(args),
            "totals" => self.cmd_totals(),
            "clear" => self.cmd_clear(),
            "save" => self.cmd_save(args),
            "load" => self.cmd_load(args),
            "export" => self.cmd_export(args),
            "import" => self.cmd_import(args),
            "help" => self.cmd_help(),
            "version" => self.cmd_version(),
            "exit" | "quit" => Ok(LoopControl::Exit),
            unknown => self.unknown_command(unknown),
        }
    }

    fn cmd_add(&mut self, args: &[&str]) -> CommandResult {
        let (description, amount, kind) = match args {
            [description, amount] => (*description, *amount, TransactionKind::default()),
            [description, amount, kind] => (
                *description,
                *amount,
                kind.parse().map_err(CommandError::Usage)?,
            ),
            _ => {
                return Err(CommandError::Usage(
                    "Usage: add <description> <amount> [income|expense]".into(),
                ))
            }
        };

        let draft = TransactionDraft::new(description, amount, kind);
        let transaction = self.tracker.add_transaction(&draft)?;
        output::success(format!(
            "Added {} `{}` for {}.",
            transaction.kind,
            transaction.description,
            format_amount(transaction.amount)
        ));
        Ok(LoopControl::Continue)
    }

    fn cmd_list(&self) -> CommandResult {
        if self.tracker.transactions().is_empty() {
            output::info("No transactions yet. Add a new transaction to get started.");
            return Ok(LoopControl::Continue);
        }
        let rows: Vec<&Transaction> = self.tracker.transactions().iter().collect();
        print_rows(&rows);
        Ok(LoopControl::Continue)
    }

    fn cmd_search(&self, args: &[&str]) -> CommandResult {
        let query = args.join(" ");
        match self.tracker.search(&query) {
            SearchOutcome::Matches(rows) => print_rows(&rows),
            SearchOutcome::NoMatches { query } => {
                output::info(format!("No transactions matching `{query}`."));
            }
            SearchOutcome::LedgerEmpty => {
                output::info("No transactions yet. Add a new transaction to get started.");
            }
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_totals(&self) -> CommandResult {
        let totals = self.tracker.totals();
        let net = format_amount(totals.net);
        println!("Total Income:   {}", format_amount(totals.income).green());
        println!("Total Expenses: {}", format_amount(totals.expenses).red());
        println!(
            "Net Balance:    {}",
            if totals.net < 0.0 { net.red() } else { net.green() }
        );
        Ok(LoopControl::Continue)
    }

    fn cmd_clear(&mut self) -> CommandResult {
        let mut confirm = CliConfirm::new(self.mode);
        match self.tracker.clear(&mut confirm) {
            Outcome::Completed => output::success("All transactions cleared."),
            Outcome::Cancelled => output::info("Clear cancelled."),
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_save(&mut self, args: &[&str]) -> CommandResult {
        let preset = path_arg(args, "save [path]")?;
        let mut dialog =
            CliFileDialog::new(self.mode, preset, self.config.last_snapshot_path.clone());
        match self.tracker.save_snapshot(&mut dialog)? {
            Outcome::Completed => {
                if let Some(path) = dialog.chosen() {
                    output::success(format!("Snapshot saved to {}.", path.display()));
                    self.remember_snapshot_path(path.to_path_buf());
                }
            }
            Outcome::Cancelled => output::info("Save cancelled."),
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_load(&mut self, args: &[&str]) -> CommandResult {
        let preset = path_arg(args, "load [path]")?;
        let mut dialog =
            CliFileDialog::new(self.mode, preset, self.config.last_snapshot_path.clone());
        let mut confirm = CliConfirm::new(self.mode);
        match self.tracker.load_snapshot(&mut dialog, &mut confirm)? {
            Outcome::Completed => {
                if let Some(path) = dialog.chosen() {
                    output::success(format!(
                        "Loaded {} transactions from {}.",
                        self.tracker.transactions().len(),
                        path.display()
                    ));
                    self.remember_snapshot_path(path.to_path_buf());
                }
            }
            Outcome::Cancelled => output::info("Load cancelled."),
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_export(&mut self, args: &[&str]) -> CommandResult {
        let preset = path_arg(args, "export [path]")?;
        let mut dialog = CliFileDialog::new(self.mode, preset, self.config.last_csv_path.clone());
        match self.tracker.export_csv(&mut dialog)? {
            Outcome::Completed => {
                if let Some(path) = dialog.chosen() {
                    output::success(format!("Exported CSV to {}.", path.display()));
                    self.remember_csv_path(path.to_path_buf());
                }
            }
            Outcome::Cancelled => output::info("Export cancelled."),
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_import(&mut self, args: &[&str]) -> CommandResult {
        let preset = path_arg(args, "import [path]")?;
        let mut dialog = CliFileDialog::new(self.mode, preset, self.config.last_csv_path.clone());
        let mut confirm = CliConfirm::new(self.mode);
        match self.tracker.import_csv(&mut dialog, &mut confirm)? {
            Outcome::Completed => {
                if let Some(path) = dialog.chosen() {
                    output::success(format!(
                        "Imported {} transactions from {}.",
                        self.tracker.transactions().len(),
                        path.display()
                    ));
                    self.remember_csv_path(path.to_path_buf());
                }
            }
            Outcome::Cancelled => output::info("Import cancelled."),
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_help(&self) -> CommandResult {
        output::section("Available commands");
        for (_, usage) in COMMANDS {
            println!("  {usage}");
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_version(&self) -> CommandResult {
        output::info(format!("Finance Core v{}", env!("CARGO_PKG_VERSION")));
        Ok(LoopControl::Continue)
    }

    fn unknown_command(&self, raw: &str) -> CommandResult {
        let nearest = COMMANDS
            .iter()
            .map(|(name, _)| *name)
            .min_by_key(|name| strsim::levenshtein(raw, name))
            .filter(|name| strsim::levenshtein(raw, name) <= SUGGESTION_DISTANCE);
        match nearest {
            Some(name) => {
                output::warning(format!("Unknown command `{raw}`. Did you mean `{name}`?"))
            }
            None => output::warning(format!("Unknown command `{raw}`. Type `help` for commands.")),
        }
        Ok(LoopControl::Continue)
    }

    fn remember_snapshot_path(&mut self, path: PathBuf) {
        self.config.last_snapshot_path = Some(path);
        self.persist_config();
    }

    fn remember_csv_path(&mut self, path: PathBuf) {
        self.config.last_csv_path = Some(path);
        self.persist_config();
    }

    fn persist_config(&self) {
        if let Err(err) = self.config_manager.save(&self.config) {
            output::warning(format!("Could not persist preferences: {err}"));
        }
    }
}

fn path_arg(args: &[&str], usage: &str) -> Result<Option<PathBuf>, CommandError> {
    match args {
        [] => Ok(None),
        [path] => Ok(Some(PathBuf::from(path))),
        _ => Err(CommandError::Usage(format!("Usage: {usage}"))),
    }
}

fn format_amount(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${value:.2}")
    }
}

fn print_rows(rows: &[&Transaction]) {
    println!(
        "{}",
        format!(
            "{:<12} {:<8} {:>12}  {}",
            "Date", "Type", "Amount", "Description"
        )
        .bold()
    );
    for txn in rows {
        let amount = format!("{:>12}", format_amount(txn.amount));
        let amount = match txn.kind {
            TransactionKind::Income => amount.green(),
            TransactionKind::Expense => amount.red(),
        };
        println!(
            "{:<12} {:<8} {}  {}",
            txn.date, txn.kind, amount, txn.description
        );
    }
}
