use anyhow::{bail, Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use ccspell_core::{
    codec,
    consts::{DEFAULT_COUNT, DEFAULT_OUTPUT, DEFAULT_PROB},
    dictionary::{build_from_file, BuildOptions},
    BloomFilter, SeedPolicy,
};

#[derive(Parser)]
#[command(
    name = "ccspellcheck",
    version,
    about = "Spell checking backed by a Bloom filter",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Build a Bloom filter from a newline-delimited dictionary file
    Build {
        dictionary: PathBuf,
        #[arg(long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Estimated number of words in the dictionary
        #[arg(long, default_value_t = DEFAULT_COUNT, allow_negative_numbers = true)]
        count: i64,
        /// Desired false-positive probability
        #[arg(long, default_value_t = DEFAULT_PROB)]
        prob: f64,
        /// Draw hash seeds from a PRNG seeded with this value
        #[arg(long, value_name = "SEED")]
        prng_seed: Option<u64>,
    },

    /// Report which words are definitely not in the dictionary
    Check {
        filter: PathBuf,
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },

    /// Show the header and fill statistics of a filter file
    Info {
        filter: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn ensure_file(p: &Path, what: &str) -> Result<()> {
    if !p.is_file() {
        bail!("{what} \"{}\" not found", p.display());
    }
    Ok(())
}

fn load_filter(path: &Path) -> Result<BloomFilter> {
    ensure_file(path, "bloom filter file")?;
    BloomFilter::load(path).with_context(|| format!("loading {}", path.display()))
}

fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = parse_cli();
    match cli.cmd {
        Cmd::Build { dictionary, output, count, prob, prng_seed } => {
            ensure_file(&dictionary, "dictionary file")?;
            let opts = BuildOptions {
                count,
                prob,
                seeds: prng_seed.map(SeedPolicy::Prng).unwrap_or_default(),
            };
            debug!(?opts, "build options");
            let (filter, n) = build_from_file(&dictionary, &opts)
                .with_context(|| format!("building filter from {}", dictionary.display()))?;
            filter
                .save(&output)
                .with_context(|| format!("writing {}", output.display()))?;
            println!(
                "build: {} words -> {} (m={} k={} bytes={})",
                n,
                output.display(),
                filter.m(),
                filter.k(),
                codec::encoded_len(&filter)
            );
        }
        Cmd::Check { filter, words } => {
            let bf = load_filter(&filter)?;
            let missing: Vec<&String> = words.iter().filter(|w| !bf.contains(w)).collect();
            if missing.is_empty() {
                println!("All given words are probably in the dictionary!");
            } else {
                println!("These words are definitely NOT in the dictionary:");
                for w in missing {
                    println!("  - {w}");
                }
            }
        }
        Cmd::Info { filter, json } => {
            ensure_file(&filter, "bloom filter file")?;
            let bytes = std::fs::read(&filter)?;
            let header = codec::read_header(&bytes)?;
            let bf = BloomFilter::from_bytes(&bytes)
                .with_context(|| format!("decoding {}", filter.display()))?;
            if json {
                let out = serde_json::json!({
                    "path": filter.display().to_string(),
                    "header": header,
                    "seeds": bf.seeds(),
                    "set_bits": bf.count_ones(),
                    "fill_ratio": bf.fill_ratio(),
                    "estimated_fpr": bf.estimated_fpr(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("file:    {}", filter.display());
                println!("version: {}", header.version);
                println!("k:       {}", header.k);
                println!("m:       {}", header.m);
                println!("seeds:   {:?}", bf.seeds());
                println!(
                    "set:     {} ({:.4} filled, est. fpr≈{:.6})",
                    bf.count_ones(),
                    bf.fill_ratio(),
                    bf.estimated_fpr()
                );
            }
        }
    }
    Ok(())
}
