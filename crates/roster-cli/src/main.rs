//! `roster`: command-line front end for the student roster.
//!
//! # Usage
//!
//! ```text
//! roster add-subject math
//! roster add-student --roll 7 --name "Ada" --mark math=91
//! roster add-subject art
//! roster list
//! roster --data-file class-7b.csv remove-subject math --yes
//! ```

mod render;
mod settings;

use std::{
  io::{self, BufRead, Write},
  path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roster_core::{NewStudent, Roster, Subject, TableStore};
use roster_store_file::FileStore;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Student marks, totals, and grades")]
struct Cli {
  /// Path to a TOML config file (`data_file = "..."`).
  #[arg(short, long, value_name = "FILE", default_value = "roster.toml")]
  config: PathBuf,

  /// CSV file holding the roster; overrides the config file.
  #[arg(long, value_name = "FILE")]
  data_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Create the data file if it does not exist yet.
  Init,
  /// List subjects in column order.
  Subjects,
  /// Show every student.
  List {
    /// Emit the table as JSON instead of text.
    #[arg(long)]
    json: bool,
  },
  /// Add a student with optional marks.
  AddStudent {
    #[arg(long)]
    roll:  String,
    #[arg(long)]
    name:  String,
    /// A mark as SUBJECT=MARK; repeat for each subject.
    #[arg(long = "mark", value_name = "SUBJECT=MARK", value_parser = parse_mark)]
    marks: Vec<(String, String)>,
  },
  /// Delete every student with this roll number.
  DeleteStudent { roll: String },
  /// Register a new subject column.
  AddSubject { name: String },
  /// Remove a subject column and its marks.
  RemoveSubject {
    name: String,
    /// Skip the confirmation prompt.
    #[arg(long)]
    yes:  bool,
  },
}

/// Split `SUBJECT=MARK`; the mark itself is validated by the roster.
fn parse_mark(s: &str) -> Result<(String, String), String> {
  s.split_once('=')
    .map(|(subject, mark)| (subject.to_string(), mark.to_string()))
    .ok_or_else(|| format!("expected SUBJECT=MARK, got {s:?}"))
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config, cli.data_file)?;

  let store = FileStore::open(&settings.data_file)
    .with_context(|| format!("failed to open {}", settings.data_file.display()))?;
  let mut roster = Roster::open(store).context("failed to load roster")?;

  run(&mut roster, cli.command)
}

fn run(roster: &mut Roster<FileStore>, command: Command) -> Result<()> {
  match command {
    Command::Init => {
      println!(
        "Roster ready at {} ({} subjects)",
        roster.store().path().display(),
        roster.list_subjects().len()
      );
    }

    Command::Subjects => {
      for subject in roster.list_subjects() {
        println!("{subject}");
      }
    }

    Command::List { json } => {
      let table = roster.list_records()?;
      if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
      } else {
        print!("{}", render::render_table(&table));
      }
    }

    Command::AddStudent { roll, name, marks } => {
      let record = roster.add_student(NewStudent { roll, name, marks })?;
      println!(
        "Added {} ({}): total {}, {:.2}%, grade {}",
        record.roll, record.name, record.total, record.percentage, record.grade
      );
    }

    Command::DeleteStudent { roll } => match roster.delete_student(&roll)? {
      0 => println!("No student with roll number {roll:?}"),
      n => println!("Deleted {n} record(s) for roll number {roll:?}"),
    },

    Command::AddSubject { name } => {
      let subject = add_subject(roster, &name)?;
      println!("Subject '{subject}' added");
    }

    Command::RemoveSubject { name, yes } => {
      let target = roster
        .registry()
        .find_case_insensitive(&name)
        .map(|s| s.to_string());
      if let Some(target) = &target
        && !yes
        && !confirm(&format!(
          "Delete '{target}' from [{}]? This updates every student record.",
          roster.registry().subjects_display()
        ))?
      {
        println!("Cancelled");
        return Ok(());
      }
      let subject = roster.remove_subject(&name)?;
      println!("Subject '{subject}' removed");
    }
  }
  Ok(())
}

/// Add a subject and make sure it outlives this process.
///
/// On a roster with no students the core only registers the subject; each
/// invocation is a fresh process, so the header-only table is written here.
fn add_subject(roster: &mut Roster<FileStore>, name: &str) -> Result<Subject> {
  let subject = roster.add_subject(name)?;
  let table = roster.list_records()?;
  if table.is_empty() {
    roster
      .store()
      .save(&table)
      .with_context(|| format!("failed to write {}", roster.store().path().display()))?;
  }
  Ok(subject)
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` is a no.
fn confirm(question: &str) -> Result<bool> {
  print!("{question} [y/N] ");
  io::stdout().flush().ok();
  let mut answer = String::new();
  io::stdin()
    .lock()
    .read_line(&mut answer)
    .context("reading confirmation")?;
  Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
