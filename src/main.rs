use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bytebag::{Bag, BagConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bytebag", about = "Load lines into an insertion-only bag and read them back")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add every line of INPUT to a bag, then print the bag through its cursor.
    Collect {
        /// Input file, one item per line (`-` for stdin).
        input: PathBuf,
        /// Number of full reset-then-advance traversals to print.
        #[arg(long, default_value_t = 1)]
        passes: usize,
        /// Print the space profile after the traversals.
        #[arg(long)]
        profile: bool,
    },
    /// Load INPUT into a bag and report its size and space usage.
    Stats {
        /// Input file, one item per line (`-` for stdin).
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Collect {
            input,
            passes,
            profile,
        } => run_collect(&input, passes, profile)?,
        Commands::Stats { input } => run_stats(&input)?,
    }

    Ok(())
}

fn run_collect(input: &Path, passes: usize, profile: bool) -> Result<()> {
    let config = if profile {
        BagConfig::default().profiled()
    } else {
        BagConfig::default()
    };
    let mut bag = load_bag(input, config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for pass in 1..=passes {
        writeln!(out, "pass {}", pass)?;
        let mut item = bag.next(true);
        while let Some(bytes) = item {
            out.write_all(&bytes)?;
            out.write_all(b"\n")?;
            item = bag.next(false);
        }
    }

    if let Some(profile) = bag.take_profile() {
        writeln!(out, "{}", profile.report())?;
    }

    Ok(())
}

fn run_stats(input: &Path) -> Result<()> {
    let bag = load_bag(input, BagConfig::default().profiled())?;

    println!("items\t{}", bag.len());
    println!("empty\t{}", bag.is_empty());
    println!("bytes\t{}", bag.space().item_bytes());
    println!("space\t{}", bag.space().current_space());
    if let Some(profile) = bag.space().profile() {
        println!("{}", profile.report());
    }

    let released = bag.destroy();
    println!("released\t{} nodes, {} bytes", released.nodes, released.bytes);
    Ok(())
}

fn load_bag(input: &Path, config: BagConfig) -> Result<Bag> {
    let reader: Box<dyn BufRead> = if input == Path::new("-") {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(input)
            .with_context(|| format!("failed to open input file {}", input.display()))?;
        Box::new(BufReader::new(file))
    };

    let mut bag = Bag::with_config(config);
    for (line_no, line) in reader.split(b'\n').enumerate() {
        let mut line = line.with_context(|| {
            format!("failed to read line {} of {}", line_no + 1, input.display())
        })?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        bag.try_add(&line)
            .with_context(|| format!("failed to store line {}", line_no + 1))?;
    }

    Ok(bag)
}
