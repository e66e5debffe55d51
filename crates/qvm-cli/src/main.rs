//! Query Expression VM - CLI
//!
//! Runs a JSON instruction listing against the built-in function table and
//! prints the emitted results.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use qvm_core::{Instruction, ResultValue, VirtualMachine, VmConfig};
use qvm_func::builtins;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Plain,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "qvm")]
#[command(about = "Query expression VM - run a compiled instruction listing", long_about = None)]
struct Cli {
    /// JSON instruction listing (`-` reads stdin)
    program: PathBuf,

    /// Output format for the emitted results
    #[arg(long, value_enum, default_value = "plain")]
    format: OutputFormat,

    /// Abort after this many instructions
    #[arg(long)]
    max_instructions: Option<usize>,

    /// Print the instruction listing instead of running it
    #[arg(long)]
    disassemble: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn vm_config(&self) -> VmConfig {
        match self.max_instructions {
            Some(limit) => VmConfig::new().with_max_instructions(limit),
            None => VmConfig::new(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = execute(&cli) {
        error!(error = %e, "run failed");
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let program = load_program(&cli.program)?;
    info!(path = %cli.program.display(), instructions = program.len(), "program loaded");

    if cli.disassemble {
        print!("{}", disassemble(&program));
        return Ok(());
    }

    let functions = builtins();
    let vm = VirtualMachine::new(cli.vm_config(), &functions);
    let results = vm.run(&program).context("runtime error")?;
    info!(results = results.len(), "program finished");

    println!("{}", render(&results, cli.format)?);
    Ok(())
}

fn load_program(path: &Path) -> Result<Vec<Instruction>> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read program from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    parse_program(&text)
}

fn parse_program(text: &str) -> Result<Vec<Instruction>> {
    serde_json::from_str(text).context("invalid instruction listing")
}

fn disassemble(program: &[Instruction]) -> String {
    program
        .iter()
        .enumerate()
        .map(|(ip, instruction)| format!("{:04} {}\n", ip, instruction))
        .collect()
}

fn render(results: &[ResultValue], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(results
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\t")),
        OutputFormat::Json => serde_json::to_string(results).context("failed to encode results"),
    }
}
