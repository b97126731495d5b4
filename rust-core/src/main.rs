use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{info, warn};
use nalgebra::{Vector2, Vector3};
use tight_binding::lattice::{
    chain_lattice, honeycomb_lattice, simple_cubic_lattice, square_lattice, Lattice,
};
use tight_binding::prelude::*;

#[derive(Parser)]
#[command(name = "tbm")]
#[command(about = "Build tight-binding models and report their Hamiltonians")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Number of threads to use (default: all available cores)
    #[arg(short, long)]
    threads: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    Chain,
    Square,
    Honeycomb,
    Cubic,
}

#[derive(clap::Args)]
struct ModelArgs {
    /// Lattice preset
    #[arg(short, long, value_enum, default_value = "square")]
    lattice: Preset,

    /// Lattice constant
    #[arg(short = 'a', long, default_value = "1.0")]
    constant: f64,

    /// Nearest-neighbour hopping energy
    #[arg(long, default_value = "-1.0")]
    hopping: f64,

    /// Unit cells along each lattice vector
    #[arg(short, long, num_args = 1..=3, default_values_t = vec![1])]
    size: Vec<i32>,

    /// Select sites inside a circle of this radius instead of a block
    #[arg(short, long)]
    radius: Option<f64>,

    /// Lattice vector indices to make periodic
    #[arg(short, long, num_args = 1..=3)]
    periodic: Vec<usize>,

    /// Use double precision scalars
    #[arg(long)]
    double: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a model at one wave vector and print its report
    Build {
        #[command(flatten)]
        model: ModelArgs,

        /// Wave vector x component
        #[arg(long, default_value = "0.0")]
        kx: f64,

        /// Wave vector y component
        #[arg(long, default_value = "0.0")]
        ky: f64,
    },
    /// Build Hamiltonians along kx from 0 to pi / a
    Sweep {
        #[command(flatten)]
        model: ModelArgs,

        /// Number of k-points
        #[arg(short = 'n', long, default_value = "16")]
        points: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Set thread pool size if specified
    if let Some(threads) = cli.threads {
        #[cfg(feature = "parallel")]
        {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("failed to set thread pool size")?;
            info!("Using {} threads", threads);
        }
        #[cfg(not(feature = "parallel"))]
        {
            warn!(
                "Thread count {} specified but parallel feature not enabled. Ignoring.",
                threads
            );
        }
    }

    info!("Starting tbm v{}", tight_binding::VERSION);

    match cli.command {
        Commands::Build { model, kx, ky } => build(&model, Vector3::new(kx, ky, 0.0)),
        Commands::Sweep { model, points } => sweep(&model, points),
    }
}

fn preset_lattice(args: &ModelArgs) -> anyhow::Result<Lattice> {
    let lattice = match args.lattice {
        Preset::Chain => chain_lattice(args.constant, args.hopping),
        Preset::Square => square_lattice(args.constant, args.hopping),
        Preset::Honeycomb => honeycomb_lattice(args.constant, args.hopping),
        Preset::Cubic => simple_cubic_lattice(args.constant, args.hopping),
    };
    lattice.with_context(|| format!("failed to construct {:?} lattice", args.lattice))
}

fn make_model(args: &ModelArgs) -> anyhow::Result<Model> {
    let lattice = preset_lattice(args)?;
    if args.periodic.iter().any(|&axis| axis >= lattice.ndim()) {
        bail!(
            "periodic axes {:?} out of range for a {}D lattice",
            args.periodic,
            lattice.ndim()
        );
    }

    let mut model = Model::new(lattice);
    match args.radius {
        Some(radius) => model.set_shape(Circle::new(Vector2::zeros(), radius)),
        None => {
            let size = |i: usize| args.size.get(i).copied().unwrap_or(1);
            model.set_primitive(Primitive::new(size(0), size(1), size(2)));
        }
    }
    if !args.periodic.is_empty() {
        model.set_symmetry(TranslationalSymmetry::along(&args.periodic));
    }
    if args.double {
        model.add_onsite_modifier(Arc::new(force_double_precision()));
    }
    Ok(model)
}

fn build(args: &ModelArgs, k_vector: Cartesian) -> anyhow::Result<()> {
    let mut model = make_model(args)?;
    model.set_wave_vector(k_vector)?;
    model.hamiltonian().context("failed to build Hamiltonian")?;
    println!("{}", model.report());
    Ok(())
}

fn sweep(args: &ModelArgs, points: usize) -> anyhow::Result<()> {
    if points == 0 {
        bail!("at least one k-point is required");
    }

    let mut model = make_model(args)?;
    let step = std::f64::consts::PI / args.constant / points as f64;
    let k_points: Vec<Cartesian> = (0..points)
        .map(|i| Vector3::new(step * i as f64, 0.0, 0.0))
        .collect();

    // phases at k != 0 are complex in general
    let scalar_type = ScalarType::select(true, model.is_double());
    let modifiers = model.hamiltonian_modifiers().clone();
    let system = model.system()?;
    let hamiltonians = Hamiltonian::build_for_k_points(system, &modifiers, &k_points, scalar_type)?;

    println!("{}", model.report());
    for hamiltonian in &hamiltonians {
        let k = hamiltonian.k_vector();
        println!("k = ({:.4}, {:.4}, {:.4}): {}", k.x, k.y, k.z, hamiltonian.report());
    }
    Ok(())
}
