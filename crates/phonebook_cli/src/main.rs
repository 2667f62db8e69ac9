//! Terminal front-end for the phonebook.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open local storage.
//! - Map one-shot subcommands and the interactive session onto core APIs.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::warn;
use phonebook_core::db::open_db;
use phonebook_core::{
    filter_contacts, init_logging, resolve_config, validate_new_contact, AppConfig,
    ConfigOverrides, ContactBook, ContactId, ContactSource, KeyValueStore, Notifier,
    PhonebookShell, ShellEvent, ShellOutcome, SqliteKeyValueStore, ToggleTarget,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phonebook", version)]
#[command(about = "Add, filter and delete contacts kept in local storage")]
#[command(
    after_help = "Environment:\n  PHONEBOOK_DATA_DIR   Storage directory\n  PHONEBOOK_LOG_LEVEL  Log verbosity\n  PHONEBOOK_LOG_DIR    Log file directory"
)]
struct Cli {
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print contacts, optionally filtered by name.
    List {
        #[arg(long, default_value = "")]
        filter: String,
    },
    /// Add a contact.
    Add { name: String, number: String },
    /// Delete a contact by id; an unknown id changes nothing.
    Delete { id: String },
    /// Interactive session with toggleable form and filter panels.
    Shell,
}

/// Prints notifications to stdout.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("ok: {message}");
    }

    fn warning(&self, message: &str) {
        println!("warning: {message}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(ConfigOverrides {
        data_dir: cli.data_dir,
        log_level: cli.log_level,
        log_dir: cli.log_dir,
    })?;
    start_logging(&config);

    let db_path = config.db_path();
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open storage at `{}`", db_path.display()))?;
    let book = ContactBook::open(SqliteKeyValueStore::new(&conn), ConsoleNotifier);

    match cli.command {
        Command::List { filter } => {
            for contact in filter_contacts(book.contacts(), &filter) {
                println!("{}\t{}\t{}", contact.id, contact.name, contact.number);
            }
            Ok(())
        }
        Command::Add { name, number } => {
            let mut book = book;
            let accepted = validate_new_contact(&name, &number, book.contacts())?;
            let contact = book.add(accepted.name, accepted.number);
            println!("{}", contact.id);
            Ok(())
        }
        Command::Delete { id } => {
            let mut book = book;
            delete_contact(&mut book, id.trim());
            Ok(())
        }
        Command::Shell => run_session(PhonebookShell::new(book)),
    }
}

fn start_logging(config: &AppConfig) {
    // A logging failure should not block contact management.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("logging disabled: {err}");
    }
}

fn run_session(mut shell: PhonebookShell<SqliteKeyValueStore<'_>, ConsoleNotifier>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let origin = match shell.book().source() {
        ContactSource::Storage => "local storage",
        ContactSource::Seed => "the starter list",
    };
    println!("{} contacts loaded from {origin}", shell.book().len());
    print!("{}", shell.render());
    println!("type `help` for commands");

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let (command, rest) = split_command(&line);

        let event = match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{SESSION_HELP}");
                continue;
            }
            "list" => {
                print!("{}", shell.render());
                continue;
            }
            "toggle" => match rest.parse::<ToggleTarget>() {
                Ok(target) => ShellEvent::Toggle(target),
                Err(err) => {
                    println!("error: {err}");
                    continue;
                }
            },
            "form" => ShellEvent::Toggle(ToggleTarget::Form),
            "filter" => ShellEvent::Toggle(ToggleTarget::Filter),
            "search" => ShellEvent::SetFilter(rest.to_string()),
            "add" => match rest.split_once(';') {
                Some((name, number)) => ShellEvent::Submit {
                    name: name.to_string(),
                    number: number.to_string(),
                },
                None => {
                    println!("usage: add <name>; <number>");
                    continue;
                }
            },
            "delete" => match resolve_delete_target(&mut shell, rest) {
                Ok(id) => ShellEvent::Delete(id),
                Err(message) => {
                    println!("{message}");
                    continue;
                }
            },
            other => {
                println!("unknown command `{other}`; type `help`");
                continue;
            }
        };

        match shell.handle(event) {
            Ok(ShellOutcome::Rejected(_)) => {}
            Ok(ShellOutcome::Deleted { removed: false }) => {
                warn!("event=cli_delete module=cli status=noop");
            }
            Ok(_) => print!("{}", shell.render()),
            Err(err) => println!("error: {err}"),
        }
        stdout.flush().context("failed to flush stdout")?;
    }

    Ok(())
}

const SESSION_HELP: &str = "\
commands:
  form | filter | toggle <form|filter>   open/close a panel
  search <text>                          set the filter (filter panel open)
  add <name>; <number>                   add a contact (form panel open)
  delete <position|id>                   delete a contact
  list                                   redraw
  quit";

fn split_command(line: &str) -> (&str, &str) {
    let trimmed = line.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    }
}

/// Deletes by id. An unknown id leaves the list as it was and is not an error.
fn delete_contact<S: KeyValueStore, N: Notifier>(
    book: &mut ContactBook<S, N>,
    id: &str,
) -> bool {
    let removed = book.delete(&ContactId::from(id));
    if !removed {
        warn!("event=cli_delete module=cli status=noop id={id}");
    }
    removed
}

/// Maps `delete` input to an id: digits are a 1-based position in the
/// visible list, anything else is taken as an id.
fn resolve_delete_target<S: KeyValueStore, N: Notifier>(
    shell: &mut PhonebookShell<S, N>,
    arg: &str,
) -> Result<ContactId, String> {
    if arg.is_empty() {
        return Err("usage: delete <position|id>".to_string());
    }
    match arg.parse::<usize>() {
        Ok(position) => shell
            .visible_contact_id(position)
            .ok_or_else(|| format!("no contact at position {position}")),
        Err(_) => Ok(ContactId::from(arg)),
    }
}
