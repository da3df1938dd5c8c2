//! Symmetra command-line entry point

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::error;
use symmetra::symnmf::{DEFAULT_EPSILON, DEFAULT_MAX_ITER};
use symmetra::{
    compare_with, format_labels, format_matrix, read_dataset, run_goal, Goal, KMeans,
    KMeansConfig, Result, SymNmfConfig,
};

/// Symmetra: compare K-Means and SymNMF clustering
#[derive(Parser, Debug)]
#[command(name = "symmetra")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the similarity matrix A
    Sym {
        /// Dataset file, one point per line
        file: PathBuf,
    },
    /// Print the diagonal degree matrix D
    Ddg { file: PathBuf },
    /// Print the normalized similarity matrix W
    Norm { file: PathBuf },
    /// Run the full factorization and print H
    Symnmf {
        /// Number of clusters
        k: usize,
        file: PathBuf,
        /// Seed for the initial factor matrix
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Convergence threshold on the Frobenius norm of the update
        #[arg(long, default_value_t = DEFAULT_EPSILON)]
        epsilon: f64,
        #[arg(long, default_value_t = DEFAULT_MAX_ITER)]
        max_iter: usize,
    },
    /// Run K-Means and print one label per point
    Kmeans {
        k: usize,
        file: PathBuf,
        #[arg(long, default_value_t = 300)]
        max_iter: usize,
    },
    /// Score both engines with the silhouette coefficient
    Analysis {
        k: usize,
        file: PathBuf,
        /// Seed for the SymNMF factor matrix
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn goal_output(goal: Goal, file: &Path, config: &SymNmfConfig) -> Result<String> {
    let x = read_dataset(file)?;
    let m = run_goal(goal, &x, config)?;
    Ok(format_matrix(&m))
}

fn run(args: Args) -> Result<String> {
    match args.command {
        Command::Sym { file } => goal_output(Goal::Sym, &file, &SymNmfConfig::default()),
        Command::Ddg { file } => goal_output(Goal::Ddg, &file, &SymNmfConfig::default()),
        Command::Norm { file } => goal_output(Goal::Norm, &file, &SymNmfConfig::default()),
        Command::Symnmf {
            k,
            file,
            seed,
            epsilon,
            max_iter,
        } => {
            let config = SymNmfConfig::new(k)
                .with_seed(seed)
                .with_epsilon(epsilon)
                .with_max_iter(max_iter);
            goal_output(Goal::SymNmf, &file, &config)
        }
        Command::Kmeans { k, file, max_iter } => {
            let x = read_dataset(&file)?;
            let mut model = KMeans::from_config(KMeansConfig::new(k).with_max_iter(max_iter));
            model.fit(&x)?;
            Ok(format_labels(model.labels().map(Vec::as_slice).unwrap_or_default()))
        }
        Command::Analysis { k, file, seed } => {
            let x = read_dataset(&file)?;
            let comparison = compare_with(
                &x,
                SymNmfConfig::new(k).with_seed(seed),
                KMeansConfig::new(k),
            )?;
            Ok(comparison.to_string())
        }
    }
}

fn main() -> ExitCode {
    let env = Env::default().filter_or("RUST_LOG", "warn");
    env_logger::init_from_env(env);

    let args = Args::parse();
    match run(args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("An Error Has Occurred");
            ExitCode::FAILURE
        }
    }
}
