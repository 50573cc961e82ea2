use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{AppError, Command, HELP, Listing, Session};
use crate::domain::{EntryId, Ledger, RejectedInput, format_fixed2};
use crate::io::{ReportFormat, save_report};

/// Tallysheet - running-total number sheet
#[derive(Parser)]
#[command(name = "tallysheet")]
#[command(about = "Keep a list of numbers with a running total and export it to CSV or PDF")]
#[command(version)]
pub struct Cli {
    /// Start with an empty sheet instead of the example entries
    #[arg(long, global = true)]
    pub empty: bool,

    /// Directory where exported reports are saved
    #[arg(long, default_value = ".", global = true)]
    pub out_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session (default)
    Shell,

    /// Build a sheet from the command line and export it once
    Report {
        /// Format: csv, pdf
        #[arg(short, long)]
        format: ReportFormat,

        /// Value to add (repeatable, e.g. --add 15.5 --add -3)
        #[arg(long = "add", allow_hyphen_values = true)]
        add: Vec<String>,

        /// Entry id to remove, applied after all additions (repeatable)
        #[arg(long = "remove")]
        remove: Vec<EntryId>,

        /// Output file (stdout for csv, <out-dir>/calculator-report.pdf for pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn new_session(&self) -> Session {
        let ledger = if self.empty {
            Ledger::new()
        } else {
            Ledger::seeded()
        };
        Session::new(ledger)
    }

    pub fn run(self) -> Result<()> {
        let mut session = self.new_session();

        match self.command {
            None | Some(Commands::Shell) => {
                let stdin = io::stdin();
                let stdout = io::stdout();
                run_shell(&mut session, &self.out_dir, stdin.lock(), stdout.lock())?;
            }

            Some(Commands::Report {
                format,
                add,
                remove,
                output,
            }) => {
                let request = ReportRequest {
                    format,
                    add: &add,
                    remove: &remove,
                    output: output.as_deref(),
                    out_dir: &self.out_dir,
                };
                run_report_command(&mut session, &request, io::stdout().lock())?;
            }
        }

        Ok(())
    }
}

/// Arguments of the one-shot `report` command.
pub struct ReportRequest<'a> {
    pub format: ReportFormat,
    pub add: &'a [String],
    pub remove: &'a [EntryId],
    pub output: Option<&'a Path>,
    pub out_dir: &'a Path,
}

/// Apply every addition, then every removal, and export the result once.
/// CSV without an output file goes to `stdout`.
pub fn run_report_command<W: Write>(
    session: &mut Session,
    request: &ReportRequest<'_>,
    mut stdout: W,
) -> Result<()> {
    for value in request.add {
        session
            .add(value.as_str())
            .with_context(|| format!("Invalid value '{}'. Use a number like '15.5'", value))?;
    }
    for &id in request.remove {
        session.delete(id);
    }

    let format = request.format;
    let report = session.export(format)?;

    match (request.output, format) {
        (Some(path), _) => {
            fs::write(path, &report.bytes)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            eprintln!("Exported {} entries to {}", report.entry_count, path.display());
        }
        (None, ReportFormat::Csv) => {
            stdout.write_all(&report.bytes)?;
            stdout.flush()?;
        }
        (None, ReportFormat::Pdf) => {
            let path = save_report(request.out_dir, format, &report.bytes)
                .with_context(|| format!("Failed to save {} report", format))?;
            eprintln!("Exported {} entries to {}", report.entry_count, path.display());
        }
    }

    Ok(())
}

/// Render the session and save it under the format's file name.
fn export_to_dir(
    session: &Session,
    format: ReportFormat,
    out_dir: &Path,
) -> Result<(usize, PathBuf)> {
    let report = session.export(format)?;
    let path = save_report(out_dir, format, &report.bytes)
        .with_context(|| format!("Failed to save {} report", format))?;
    Ok((report.entry_count, path))
}

/// Read commands line by line until `quit` or end of input.
pub fn run_shell<R: BufRead, W: Write>(
    session: &mut Session,
    out_dir: &Path,
    input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "Type a number to add it, 'help' for commands.")?;
    print_listing(&mut output, &session.listing())?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{}", err)?;
                continue;
            }
        };

        match command {
            Command::Add(text) => match session.add(text) {
                Ok(id) => {
                    let value = session.ledger().get(id).map(|e| e.value).unwrap_or_default();
                    writeln!(output, "Added #{}: {}", id, format_fixed2(value))?;
                    writeln!(output, "Total: {}", format_fixed2(session.total()))?;
                }
                Err(AppError::Rejected(RejectedInput::Empty)) => {}
                Err(err) => writeln!(output, "{}", err)?,
            },

            Command::Delete(id) => match session.delete(id) {
                Some(entry) => {
                    writeln!(output, "Deleted #{}: {}", entry.id, format_fixed2(entry.value))?;
                    writeln!(output, "Total: {}", format_fixed2(session.total()))?;
                }
                None => writeln!(output, "No entry #{}", id)?,
            },

            Command::List { json: false } => print_listing(&mut output, &session.listing())?,

            Command::List { json: true } => {
                let json = serde_json::to_string_pretty(&session.listing())?;
                writeln!(output, "{}", json)?;
            }

            Command::Total => writeln!(output, "Total: {}", format_fixed2(session.total()))?,

            Command::Export(format) => match export_to_dir(session, format, out_dir) {
                Ok((count, path)) => {
                    writeln!(output, "Exported {} entries to {}", count, path.display())?
                }
                Err(err) => writeln!(output, "{:#}", err)?,
            },

            Command::Help => writeln!(output, "{}", HELP)?,

            Command::Quit => break,
        }
    }

    output.flush()?;
    Ok(())
}

fn print_listing<W: Write>(output: &mut W, listing: &Listing) -> Result<()> {
    if listing.entries.is_empty() {
        writeln!(output, "No entries.")?;
    } else {
        writeln!(output, "{:<6} {:<6} {:>14}", "ORDER", "ID", "NUMBER")?;
        writeln!(output, "{}", "-".repeat(28))?;
        for row in &listing.entries {
            writeln!(
                output,
                "{:<6} {:<6} {:>14}",
                row.display_index,
                row.id,
                format_fixed2(row.value)
            )?;
        }
        writeln!(output, "{}", "-".repeat(28))?;
    }
    writeln!(output, "{:<13} {:>14}", "TOTAL", format_fixed2(listing.total))?;
    Ok(())
}
