use std::path::PathBuf;

use aag_cli::analysis::replay_in_class_example;
use aag_cli::report::{render_exchange, render_in_class, render_wire};
use aag_crypto::group::create_heisenberg_group;
use aag_crypto::keypair::{KeyExchangeConfig, PartySizes};
use aag_crypto::protocol::{match_rate, run_key_exchange};

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aag-cli")]
#[command(about = "AAG commutator key exchange over the Heisenberg group", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one key exchange between Alice and Bob
    Run {
        #[command(flatten)]
        params: ExchangeArgs,
        /// Print keys, witnesses, conjugated keys and secrets
        #[arg(short, long)]
        print: bool,
        /// Also print the conjugated keys in their JSON wire form
        #[arg(long)]
        wire: bool,
    },
    /// Repeat the exchange and report how many runs matched
    Repeat {
        #[command(flatten)]
        params: ExchangeArgs,
        #[arg(short, long, default_value = "1000")]
        runs: usize,
    },
    /// Replay the in-class length-based example
    LbaExample,
}

#[derive(Args)]
struct ExchangeArgs {
    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Ring modulus, 0 for exact integers
    #[arg(short, long)]
    modulus: Option<u64>,
    /// Alice's public and private key sizes, e.g. 10,2
    #[arg(long, value_parser = parse_sizes)]
    alice: Option<PartySizes>,
    /// Bob's public and private key sizes, e.g. 10,4
    #[arg(long, value_parser = parse_sizes)]
    bob: Option<PartySizes>,
    /// Exponent bound for generator powers
    #[arg(short, long)]
    bound: Option<u64>,
    #[arg(short, long)]
    seed: Option<u64>,
}

fn parse_sizes(value: &str) -> Result<PartySizes, String> {
    let (public, private) = value
        .split_once(',')
        .ok_or_else(|| format!("expected PUBLIC,PRIVATE, got {value:?}"))?;
    let public = public.trim().parse().map_err(|e| format!("public size: {e}"))?;
    let private = private.trim().parse().map_err(|e| format!("private size: {e}"))?;
    Ok(PartySizes::new(public, private))
}

impl ExchangeArgs {
    fn into_config(self) -> Result<KeyExchangeConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => KeyExchangeConfig::from_file(path)?,
            None => KeyExchangeConfig::default(),
        };
        if let Some(modulus) = self.modulus {
            config.modulus = modulus;
        }
        if let Some(alice) = self.alice {
            config.alice = alice;
        }
        if let Some(bob) = self.bob {
            config.bob = bob;
        }
        if let Some(bound) = self.bound {
            config.random_bound = bound;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            params,
            print,
            wire,
        } => {
            let mut config = params.into_config()?;
            config.keep_transcript = print || wire;
            let group = create_heisenberg_group(config.modulus)?;
            log::info!(
                "running exchange over modulus {} (alice {:?}, bob {:?})",
                config.modulus,
                config.alice,
                config.bob
            );

            let result = run_key_exchange(&group, config)?;
            if print {
                print!("{}", render_exchange(&result));
            } else {
                println!("{}", result.matched);
            }
            if wire {
                if let Some(text) = render_wire(&result)? {
                    println!("{text}");
                }
            }
        }
        Commands::Repeat { params, runs } => {
            let config = params.into_config()?;
            let group = create_heisenberg_group(config.modulus)?;
            let matched = match_rate(&group, &config, runs)?;
            println!("{matched}/{runs} runs matched");
            if matched != runs {
                log::warn!("{} runs failed to agree on a secret", runs - matched);
            }
        }
        Commands::LbaExample => {
            let report = replay_in_class_example()?;
            print!("{}", render_in_class(&report));
        }
    }

    Ok(())
}
