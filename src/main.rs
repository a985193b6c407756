mod config;
mod input;
mod logging;
mod pipeline;
mod rank;
mod report;
mod trend;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::config::{
    DEFAULT_DOMAIN, EdgeConfig, EvalConfig, TrendConfig, parse_run_groups, parse_score_sources,
};
use crate::pipeline::edges::run_edges;
use crate::pipeline::likelihood::run_likelihood;
use crate::pipeline::precision_recall::{run_precision_recall, summarize};
use crate::pipeline::speed::run_speed;
use crate::rank::AreaRule;
use crate::report::format_auc;
use crate::report::json::render_summary_json;
use crate::trend::ProfileParams;
use crate::trend::profile::{DEFAULT_BUCKET, DEFAULT_STRIDE};

#[derive(Debug, Parser)]
#[command(name = "rankplot", version, about = "Precision-recall and trend plots for ranked predictions")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Precision-recall curves of score files against gold labels
    Pr(PrArgs),
    /// Mean log-likelihood curves of groups of runs
    Likelihood(LikelihoodArgs),
    /// Mean run time per step of groups of runs
    Speed(SpeedArgs),
    /// Ranked `row column value` list from a score matrix
    Edges(EdgesArgs),
}

#[derive(Debug, Args)]
struct PrArgs {
    /// Score files in legend order, each optionally followed by `as <alias>`.
    /// The last path is the gold file unless --gold is given.
    #[arg(required = true, num_args = 1..)]
    sources: Vec<String>,

    /// Gold label file
    #[arg(long)]
    gold: Option<PathBuf>,

    /// Leave AUC values out of the legend
    #[arg(long)]
    no_auc: bool,

    #[arg(long, value_enum, default_value_t = AreaRule::Step)]
    area: AreaRule,

    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Print a JSON summary instead of one line per source
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct LikelihoodArgs {
    /// Run files grouped by a closing `as <label>`
    #[arg(required = true, num_args = 1..)]
    groups: Vec<String>,

    /// Number of dense steps on the x axis
    #[arg(long, default_value_t = DEFAULT_DOMAIN)]
    domain: usize,

    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct SpeedArgs {
    /// Run files grouped by a closing `as <label>`
    #[arg(required = true, num_args = 1..)]
    groups: Vec<String>,

    /// Steps are rounded up to a multiple of this width
    #[arg(long, default_value_t = DEFAULT_BUCKET, value_parser = clap::value_parser!(u64).range(1..))]
    bucket: u64,

    /// Keep every n-th sample of each run
    #[arg(long, default_value_t = DEFAULT_STRIDE, value_parser = clap::value_parser!(u64).range(1..))]
    stride: u64,

    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct EdgesArgs {
    /// Matrix with a header row of column names; every other row is a row
    /// name followed by its values
    matrix: PathBuf,

    /// Write the edge list here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::info!(args = ?std::env::args().collect::<Vec<_>>(), "rankplot");

    if let Err(err) = run(cli.command) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Pr(args) => {
            let json = args.json;
            let config = eval_config(args)?;
            tracing::info!(?config, "precision-recall");
            let output = run_precision_recall(&config).context("precision-recall evaluation failed")?;
            if json {
                println!("{}", render_summary_json(&summarize(&config, &output))?);
            } else {
                for result in &output.results {
                    if let Some(aupr) = result.evaluation.aupr {
                        println!("{}\t{}", result.name, format_auc(aupr));
                    }
                }
            }
        }
        Command::Likelihood(args) => {
            if args.domain == 0 {
                anyhow::bail!("--domain must be positive");
            }
            let config = trend_config(&args.groups, args.out)?;
            tracing::info!(?config, domain = args.domain, "likelihood");
            run_likelihood(&config, args.domain).context("likelihood plot failed")?;
        }
        Command::Speed(args) => {
            let config = trend_config(&args.groups, args.out)?;
            let params = ProfileParams {
                bucket: args.bucket,
                stride: args.stride,
            };
            tracing::info!(?config, ?params, "speed");
            run_speed(&config, params).context("speed plot failed")?;
        }
        Command::Edges(args) => {
            let config = EdgeConfig {
                matrix_path: args.matrix,
                output: args.output,
            };
            tracing::info!(?config, "edges");
            let edges = run_edges(&config).context("edge list failed")?;
            tracing::debug!(edges, "ranked matrix cells");
        }
    }
    Ok(())
}

fn eval_config(args: PrArgs) -> anyhow::Result<EvalConfig> {
    let (gold_path, score_sources) = parse_score_sources(&args.sources, args.gold)
        .context("invalid score source list")?;
    Ok(EvalConfig {
        gold_path,
        score_sources,
        annotate_auc: !args.no_auc,
        area_rule: args.area,
        out_dir: args.out,
    })
}

fn trend_config(tokens: &[String], out_dir: PathBuf) -> anyhow::Result<TrendConfig> {
    let groups = parse_run_groups(tokens).context("invalid run file list")?;
    Ok(TrendConfig { groups, out_dir })
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
