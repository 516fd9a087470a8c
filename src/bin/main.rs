//! svmprep Command Line Interface
//!
//! Inspect how a LibSVM dataset decomposes into one-vs-one sub-problems and
//! export its CSR buffers.

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use svmprep::core::{PrepConfig, Result};
use svmprep::export::CsrExport;
use svmprep::utils::stats;
use svmprep::{CsrMatrix, LibSVMDataset, SampleSet, SvmProblem};

#[derive(Parser)]
#[command(name = "svmprep")]
#[command(about = "One-vs-one problem decomposition and CSR conversion for SVM data")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "svmprep Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the classes of a dataset
    Groups(GroupsArgs),
    /// List every one-vs-one sub-problem
    Pairs(PairsArgs),
    /// Convert a dataset or sub-problem to CSR
    Csr(CsrArgs),
    /// Display a saved CSR export
    Info(InfoArgs),
}

#[derive(Args)]
struct GroupsArgs {
    /// Data file in LibSVM format
    #[arg(long)]
    data: PathBuf,
}

#[derive(Args)]
struct PairsArgs {
    /// Data file in LibSVM format
    #[arg(long)]
    data: PathBuf,

    /// Extract pairs on a single thread
    #[arg(long)]
    sequential: bool,

    /// Smallest pair count extracted in parallel
    #[arg(long, default_value = "4")]
    min_parallel_pairs: usize,
}

#[derive(Args)]
struct CsrArgs {
    /// Data file in LibSVM format
    #[arg(long)]
    data: PathBuf,

    /// Convert only the sub-problem of two class indices, e.g. 0,2
    #[arg(long, value_parser = parse_pair)]
    pair: Option<(usize, usize)>,

    /// Write the CSR buffers as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct InfoArgs {
    /// CSR export file
    export: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Groups(args) => groups_command(args),
        Commands::Pairs(args) => pairs_command(args),
        Commands::Csr(args) => csr_command(args),
        Commands::Info(args) => info_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn load_problem(path: &Path) -> Result<SvmProblem> {
    info!("Loading dataset from: {path:?}");
    let problem = LibSVMDataset::from_file(path)?.into_problem()?;
    info!(
        "Loaded {} samples, {} features, {} classes",
        problem.num_samples(),
        problem.num_features(),
        problem.num_classes()
    );
    Ok(problem)
}

fn groups_command(args: GroupsArgs) -> Result<()> {
    let problem = load_problem(&args.data)?;
    let grouping = problem.grouping();

    println!("class\tlabel\tcount\tstart");
    for k in 0..grouping.num_classes() {
        println!(
            "{k}\t{}\t{}\t{}",
            grouping.labels()[k],
            grouping.counts()[k],
            grouping.starts()[k]
        );
    }
    println!("Imbalance ratio: {:.2}", stats::imbalance_ratio(&problem));

    Ok(())
}

fn pairs_command(args: PairsArgs) -> Result<()> {
    let problem = load_problem(&args.data)?;
    let config = PrepConfig::default()
        .with_parallel(!args.sequential)
        .with_min_parallel_pairs(args.min_parallel_pairs);

    let subs = problem.sub_problems_with(&config)?;
    let labels = problem.grouping().labels();

    println!("pair\tlabels\tpositive\tnegative");
    for sub in &subs {
        let (i, j) = sub.classes();
        println!(
            "{i},{j}\t{},{}\t{}\t{}",
            labels[i],
            labels[j],
            sub.num_positive(),
            sub.num_negative()
        );
    }
    println!("Sub-problems: {}", subs.len());

    Ok(())
}

fn csr_command(args: CsrArgs) -> Result<()> {
    let problem = load_problem(&args.data)?;

    let (matrix, source) = match args.pair {
        Some((i, j)) => {
            let sub = problem.sub_problem(i, j)?;
            info!("Converting sub-problem ({i}, {j}) with {} samples", sub.len());
            (
                CsrMatrix::from_problem(&sub)?,
                format!("{} classes {i},{j}", args.data.display()),
            )
        }
        None => (
            CsrMatrix::from_problem(&problem)?,
            args.data.display().to_string(),
        ),
    };

    let row_stats = stats::csr_stats(&matrix);
    println!("Rows: {}", matrix.num_rows());
    println!("Non-zeros: {}", matrix.nnz());
    println!("Max features per row: {}", matrix.max_features());
    println!("Mean features per row: {:.2}", row_stats.mean_nnz);
    println!("Density: {:.4}", matrix.density(problem.num_features()));

    if let Some(output) = &args.output {
        CsrExport::from_matrix(&matrix, source).save_to_file(output)?;
        info!("CSR export saved to: {output:?}");
    }

    Ok(())
}

fn info_command(args: InfoArgs) -> Result<()> {
    info!("Loading export from: {:?}", args.export);
    let export = CsrExport::load_from_file(&args.export)?;
    export.print_summary();
    Ok(())
}

fn parse_pair(s: &str) -> std::result::Result<(usize, usize), String> {
    let (i, j) = s
        .split_once(',')
        .ok_or_else(|| format!("expected two class indices like 0,1, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid class index '{v}'"))
    };
    Ok((parse(i)?, parse(j)?))
}
