use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "fixboard",
    version,
    about = "Score breakdown and fix table for evaluator runs"
)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a harness result document.
    Show(ShowArgs),
    /// Score metrics passed on the command line.
    Score(ScoreArgs),
    Init(InitArgs),
}

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Harness result JSON; `-` reads stdin.
    #[arg(long, short, default_value = "-")]
    pub input: PathBuf,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
#[command(group(ArgGroup::new("outcome").required(true).args(["passed", "failed"])))]
pub struct ScoreArgs {
    #[arg(long)]
    pub passed: bool,
    #[arg(long)]
    pub failed: bool,
    #[arg(long, allow_negative_numbers = true)]
    pub elapsed: i64,
    #[arg(long, allow_negative_numbers = true)]
    pub commits: i64,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
}
