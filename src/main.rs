use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bagl::fmt::pretty;
use bagl::interpreter::{Convergence, Reducer, ReducerConfig};

#[derive(Parser, Debug)]
#[command(name = "bagl", version, about = "Lazy graph reduction for a small lambda calculus")]
struct Args {
    /// Program to run, read from stdin when neither this nor --expr is given
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Run this source text instead of a file
    #[arg(short, long, value_name = "SOURCE", conflicts_with = "file")]
    expr: Option<String>,

    /// Force every field of a data result before printing it
    #[arg(long)]
    deep: bool,

    /// Give up after this many reduction steps
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,

    /// Stop when head and spine stop changing rather than when no rule fires
    #[arg(long)]
    structural: bool,

    /// Print the desugared core expression before evaluating it
    #[arg(long)]
    show_core: bool,
}

impl Args {
    fn config(&self) -> ReducerConfig {
        let mut config = ReducerConfig::default();
        if let Some(max_steps) = self.max_steps {
            config = config.with_max_steps(max_steps);
        }
        if self.structural {
            config = config.with_convergence(Convergence::Structural);
        }
        config
    }

    fn source(&self) -> anyhow::Result<String> {
        if let Some(expr) = &self.expr {
            return Ok(expr.clone());
        }
        match &self.file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display())),
            None => {
                let mut source = String::new();
                std::io::stdin()
                    .read_to_string(&mut source)
                    .context("could not read program from stdin")?;
                Ok(source)
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let source = args.source()?;

    let expr = bagl::compile(&source)?;
    if args.show_core {
        println!("{}", pretty(&expr));
        println!();
    }

    let mut reducer = Reducer::new(args.config());
    let value = if args.deep {
        reducer.normalize(&expr)?
    } else {
        reducer.whnf(&expr)?
    };
    info!(steps = reducer.steps(), "evaluation finished");

    println!("{value}");
    Ok(())
}
