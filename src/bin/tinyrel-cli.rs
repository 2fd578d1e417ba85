//! tinyrel interactive shell
//!
//! Reads statements from stdin, writes results to stdout and logs to stderr.

use anyhow::{bail, Context};
use std::env;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tinyrel::{Interpreter, SessionConfig, Tokenizer};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut config_path: Option<PathBuf> = None;
    let mut data_dir: Option<PathBuf> = None;
    let mut batch = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("tinyrel v{}", VERSION);
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                config_path = Some(args.next().context("--config needs a file")?.into());
            }
            "--data-dir" | "-d" => {
                data_dir = Some(args.next().context("--data-dir needs a directory")?.into());
            }
            "--batch" | "-b" => batch = true,
            other => {
                print_help();
                bail!("invalid argument: {}", other);
            }
        }
    }

    let mut config = match config_path {
        Some(path) => SessionConfig::from_json_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(dir) = data_dir {
        config = config.with_data_dir(dir);
    }
    if batch {
        config.prompt = false;
        config.echo_banner = false;
    }

    if config.echo_banner {
        println!("tinyrel v{}", VERSION);
        println!("Tables are read from and written to {}", config.data_dir.display());
    }

    let mut input = Tokenizer::new(BufReader::new(io::stdin()));
    if config.prompt {
        input = input.with_prompter(Box::new(io::stdout()));
    }

    let mut interpreter = Interpreter::new(input, io::stdout(), config);
    interpreter.run()?;
    Ok(())
}

fn print_help() {
    println!(
        r#"
tinyrel v{} - tiny relational query interpreter

Usage:
  tinyrel-cli                    interactive shell, tables in ./
  tinyrel-cli -d <dir>           read and write <name>.db files in <dir>
  tinyrel-cli -c <config.json>   load session settings from JSON
  tinyrel-cli -b                 no prompts or banner (for piped input)
  tinyrel-cli --version          show version
  tinyrel-cli --help             show this help

Statements:
  create table students (SID, Lastname, Year);
  create table seniors as select SID, Lastname from students where Year = '2010';
  insert into students values '101', 'Knowles', '2010';
  load enrolled;
  store students;
  print students;
  select Lastname, CCN from students, enrolled where students.SID = enrolled.SID;
  exit;

Set RUST_LOG=debug to trace statement execution on stderr.
"#,
        VERSION
    );
}
