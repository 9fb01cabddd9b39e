use std::{
    fmt,
    hint::black_box,
    time::{Duration, Instant},
};

use avltree::{AvlTree, Error};
use clap::Parser;
use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Measure the wall-clock cost of AVL tree insertion, search and deletion
/// across a sweep of tree sizes.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Comma separated number of keys to measure, one table row each.
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [1_usize, 5, 10, 25, 50, 100, 250, 1_000, 2_500, 5_000, 7_500, 10_000]
    )]
    sizes: Vec<usize>,

    /// Keys are drawn uniformly from 1 to max-key (inclusive).
    #[arg(long, default_value_t = 1_000_000, value_parser = clap::value_parser!(u32).range(1..))]
    max_key: u32,

    /// Seed for the key generator, for reproducible runs.
    ///
    /// A random seed is used (and logged) when not provided.
    #[arg(long)]
    seed: Option<u64>,
}

/// The measurements for one tree size.
#[derive(Debug)]
struct Row {
    n_keys: usize,
    insert: Duration,
    search: Duration,
    delete: Duration,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{:.4}\t\t{:.4}\t\t{:.4}",
            self.n_keys,
            millis(self.insert),
            millis(self.search),
            millis(self.delete),
        )
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}

/// Insert `n_keys` random keys into an empty tree, then search for and delete
/// each of them, timing each phase.
///
/// Generated keys may repeat, in which case the repeats are no-ops.
fn measure<R>(n_keys: usize, max_key: u32, rng: &mut R) -> Result<Row, Error>
where
    R: Rng,
{
    let keys = (0..n_keys)
        .map(|_| rng.gen_range(1..=max_key))
        .collect::<Vec<_>>();

    let mut t = AvlTree::new();

    let start = Instant::now();
    for &key in &keys {
        t.try_insert(key)?;
    }
    let insert = start.elapsed();

    debug!(
        "n_keys={n_keys} stored {} unique keys, tree height {}",
        t.len(),
        t.height()
    );

    let start = Instant::now();
    for key in &keys {
        black_box(t.search(key));
    }
    let search = start.elapsed();

    let start = Instant::now();
    for key in &keys {
        t.remove(key);
    }
    let delete = start.elapsed();

    if !t.is_empty() {
        warn!(
            "n_keys={n_keys} tree holds {} keys after deleting every inserted key",
            t.len()
        );
    }
    t.clear();

    Ok(Row {
        n_keys,
        insert,
        search,
        delete,
    })
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());

    info!(
        "measuring {} tree sizes, keys in 1..={}, seed {seed}",
        args.sizes.len(),
        args.max_key
    );

    let mut rng = StdRng::seed_from_u64(seed);

    println!("N\tInsert (ms)\tSearch (ms)\tDelete (ms)");
    println!("{}", "-".repeat(66));

    for &n_keys in &args.sizes {
        let row = measure(n_keys, args.max_key, &mut rng)?;
        println!("{row}");
    }

    Ok(())
}
