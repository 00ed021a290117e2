use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use dnafec_core::FecError;
use dnafec_fountain::{LtConfig, LtDecoder, LtEncoder};
use dnafec_reedsolomon::ReedSolomon;
use log::{debug, info, warn};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[derive(Parser)]
#[command(about = "Randomised self-test for the Reed-Solomon and LT codecs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reed-Solomon roundtrips with injected symbol errors.
    Rs {
        #[arg(long, default_value_t = 255)] n: usize,
        #[arg(long, default_value_t = 223)] k: usize,
        #[arg(long, default_value_t = 16)] errors: usize,
        #[arg(long, default_value_t = 100)] trials: usize,
        #[arg(long, default_value_t = 1)] seed: u64,
    },
    /// LT encode/decode of random blocks.
    Lt {
        #[arg(long, default_value_t = 10)] blocks: usize,
        #[arg(long, default_value_t = 20)] drops: usize,
        #[arg(long, default_value_t = 4)] width: usize,
        #[arg(long, default_value_t = 100)] trials: usize,
        #[arg(long, default_value_t = 1)] seed: u64,
        /// Fall back to GF(2) elimination when peeling stalls.
        #[arg(long)] elimination: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match Cli::parse().command {
        Command::Rs { n, k, errors, trials, seed } => run_rs(n, k, errors, trials, seed),
        Command::Lt { blocks, drops, width, trials, seed, elimination } => {
            run_lt(blocks, drops, width, trials, seed, elimination)
        }
    }
}

fn run_rs(n: usize, k: usize, errors: usize, trials: usize, seed: u64) -> anyhow::Result<()> {
    let rs = ReedSolomon::new(n, k).with_context(|| format!("RS({}, {})", n, k))?;
    if errors > n {
        bail!("cannot inject {} errors into a {}-symbol codeword", errors, n);
    }
    let capacity = rs.params().capacity();
    info!("RS({}, {}): capacity {} errors, injecting {}", n, k, capacity, errors);
    if errors > capacity {
        warn!("{} errors exceeds capacity {}; expect failures", errors, capacity);
    }

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let (mut exact, mut detected, mut wrong) = (0usize, 0usize, 0usize);
    for trial in 0..trials {
        let mut message = vec![0u8; k];
        rng.fill_bytes(&mut message);
        let mut received = rs.encode(&message)?;
        for pos in rand::seq::index::sample(&mut rng, n, errors).into_iter() {
            received[pos] ^= rng.gen_range(1..=255u8);
        }

        match rs.decode_checked(&received) {
            Ok(decoded) if decoded.message == message => exact += 1,
            Ok(_) => {
                debug!("trial {}: miscorrected", trial);
                wrong += 1;
            }
            Err(FecError::Uncorrectable { .. }) => detected += 1,
            Err(e) => return Err(e).context(format!("trial {}", trial)),
        }
    }

    info!(
        "RS({}, {}) x{}: {} recovered, {} detected uncorrectable, {} miscorrected",
        n, k, trials, exact, detected, wrong
    );
    Ok(())
}

fn run_lt(
    blocks: usize,
    drops: usize,
    width: usize,
    trials: usize,
    seed: u64,
    elimination: bool,
) -> anyhow::Result<()> {
    info!(
        "LT: {} blocks x {} bytes, {} droplets, elimination {}",
        blocks, width, drops, elimination
    );

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let (mut complete, mut stalled) = (0usize, 0usize);
    for trial in 0..trials {
        let source: Vec<Vec<u8>> = (0..blocks)
            .map(|_| {
                let mut block = vec![0u8; width];
                rng.fill_bytes(&mut block);
                block
            })
            .collect();

        let config = LtConfig { elimination, ..LtConfig::with_seed(rng.next_u64()) };
        let droplets = LtEncoder::new(config)
            .encode(&source, drops)
            .with_context(|| format!("trial {}", trial))?;
        let decoded = LtDecoder::new(config).decode(&droplets, blocks)?;

        if decoded.complete {
            if decoded.into_blocks() != source {
                bail!("trial {}: decoded blocks differ from source", trial);
            }
            complete += 1;
        } else {
            debug!("trial {}: missing {:?}", trial, decoded.missing(blocks));
            stalled += 1;
        }
    }

    info!("LT x{}: {} complete, {} stalled", trials, complete, stalled);
    Ok(())
}
