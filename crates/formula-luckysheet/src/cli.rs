use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    migrate_json_str, IdGenerator, MigrateError, MigrationOptions, OperatorFallback,
    RandomIdGenerator, DEFAULT_ID_LEN,
};

/// CLI arguments for `luckysheet-migrate`.
#[derive(Debug, Parser)]
#[command(about = "Convert a Luckysheet JSON export into a Univer workbook snapshot.")]
pub struct Args {
    /// Luckysheet JSON document (`-` reads stdin).
    input: PathBuf,

    /// Write the snapshot here instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Fail instead of dropping legacy entries that have no Univer equivalent.
    #[arg(long)]
    strict: bool,

    /// Workbook locale (e.g. `enUS`, `zhCN`).
    #[arg(long, default_value = "enUS")]
    locale: String,

    /// Leave comparison validations without an operator code unset instead of `equal`.
    #[arg(long)]
    no_operator_fallback: bool,

    /// Seed the id generator for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Length of generated ids.
    #[arg(long, default_value_t = DEFAULT_ID_LEN)]
    id_len: usize,

    /// Print the migration report to stderr.
    #[arg(long)]
    report: bool,

    /// Emit compact JSON instead of pretty-printed JSON.
    #[arg(long)]
    compact: bool,
}

impl Args {
    fn options(&self) -> MigrationOptions {
        MigrationOptions {
            id_len: self.id_len,
            locale: self.locale.clone(),
            operator_fallback: if self.no_operator_fallback {
                OperatorFallback::Omit
            } else {
                OperatorFallback::Equal
            },
            strict: self.strict,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    run_with_args(args)
}

pub fn run_with_args(args: Args) -> Result<()> {
    let input = read_input(&args)?;
    let options = args.options();

    let mut ids: Box<dyn IdGenerator> = match args.seed {
        Some(seed) => Box::new(RandomIdGenerator::seeded(seed)),
        None => Box::new(RandomIdGenerator::new()),
    };

    let migration = match migrate_json_str(&input, &options, ids.as_mut()) {
        Ok(migration) => migration,
        Err(MigrateError::Rejected(report)) => {
            for entry in report.iter() {
                eprintln!("{entry}");
            }
            anyhow::bail!(MigrateError::Rejected(report));
        }
        Err(err) => {
            return Err(err).with_context(|| format!("migrate {}", args.input.display()));
        }
    };

    if args.report {
        if migration.report.is_empty() {
            eprintln!("No entries dropped.");
        }
        for entry in migration.report.iter() {
            eprintln!("{entry}");
        }
    }

    let mut json = if args.compact {
        serde_json::to_string(&migration.workbook)?
    } else {
        serde_json::to_string_pretty(&migration.workbook)?
    };
    json.push('\n');

    match &args.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("write snapshot {}", path.display()))?,
        None => write_stdout(json.as_bytes())?,
    }
    Ok(())
}

fn read_input(args: &Args) -> Result<String> {
    if args.input.as_os_str() == "-" {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("read Luckysheet document from stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(&args.input)
        .with_context(|| format!("read Luckysheet document {}", args.input.display()))
}

fn write_stdout(bytes: &[u8]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match handle.write_all(bytes).and_then(|()| handle.flush()) {
        // A closed pipe (e.g. `| head`) is not a failure.
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("write snapshot to stdout"),
    }
}
