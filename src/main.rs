//! MCQ generation workspace tool.
//!
//! `init` scaffolds a workspace skeleton (idempotent, never overwrites
//! non-empty files). `generate` reads a source document and a response
//! template, drives the external chain backend through the generate and
//! review stages, and prints the resulting question table and usage summary.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use mcqgen::core::table::render_rows;
use mcqgen::exit_codes;
use mcqgen::generate::{self, GenerateOptions};
use mcqgen::io::chain::{ChainFailure, CommandChain};
use mcqgen::io::config::load_config;
use mcqgen::io::scaffold::{default_plan, scaffold};
use mcqgen::logging;

#[derive(Parser)]
#[command(name = "mcqgen", version, about = "MCQ generation workspace tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the workspace skeleton. Safe to re-run; never overwrites
    /// non-empty files.
    Init {
        /// Workspace root to scaffold into.
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Generate a quiz from a document, then review it.
    Generate {
        /// Source document (.txt or .md).
        #[arg(long)]
        file: PathBuf,
        /// Response template constraining the quiz shape.
        #[arg(long, default_value = "Response.json")]
        template: PathBuf,
        /// Pipeline config file.
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,
        /// Directory for quiz.json, review.md, and stage logs.
        #[arg(long, default_value = "output")]
        out: PathBuf,
        /// Number of questions (default from config).
        #[arg(long)]
        number: Option<u32>,
        /// Subject the questions target (default from config).
        #[arg(long)]
        subject: Option<String>,
        /// Tone of the questions (default from config).
        #[arg(long)]
        tone: Option<String>,
    },
}

fn main() {
    logging::init();
    // clap's default usage-error code collides with CHAIN_FAILED; map CLI
    // misuse to INVALID ourselves. Help and version still exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                exit_codes::INVALID
            } else {
                exit_codes::OK
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };
    if let Err(err) = run(cli) {
        eprintln!("{:#}", err);
        let code = if err.downcast_ref::<ChainFailure>().is_some() {
            exit_codes::CHAIN_FAILED
        } else {
            exit_codes::INVALID
        };
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init { root } => cmd_init(&root),
        Command::Generate {
            file,
            template,
            config,
            out,
            number,
            subject,
            tone,
        } => cmd_generate(file, template, config, out, number, subject, tone),
    }
}

fn cmd_init(root: &std::path::Path) -> Result<()> {
    scaffold(root, &default_plan())?;
    println!("workspace ready at {}", root.display());
    Ok(())
}

fn cmd_generate(
    file: PathBuf,
    template: PathBuf,
    config_path: PathBuf,
    out: PathBuf,
    number: Option<u32>,
    subject: Option<String>,
    tone: Option<String>,
) -> Result<()> {
    let workdir = std::env::current_dir()?;
    let config = load_config(&workdir.join(&config_path))?;
    let chain = CommandChain::new(config.chain.command.clone())?;

    let options = GenerateOptions {
        document: file,
        template,
        out_dir: out,
        number,
        subject,
        tone,
    };
    let report = generate::run(&workdir, &chain, &config, &options)?;

    print!("{}", render_rows(&report.rows));
    println!();
    println!("review: {}", report.review);
    println!();
    println!("total tokens: {}", report.usage.total_tokens);
    println!("prompt tokens: {}", report.usage.prompt_tokens);
    println!("completion tokens: {}", report.usage.completion_tokens);
    println!("total cost: {:.6}", report.usage.total_cost);
    println!();
    println!("quiz written to {}", report.quiz_path.display());
    println!("review written to {}", report.review_path.display());
    Ok(())
}
