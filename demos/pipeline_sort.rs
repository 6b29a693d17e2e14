//! Pipelined insertion sort across an in-process chain of ranks.
//!
//! Spawns an 8-rank local chain. Rank 0 seeds it with random values, the
//! pipeline skims running minima down the chain, and the gathered result
//! is printed next to the input.
//!
//! ```bash
//! cargo run --example pipeline_sort
//! ```

use pipesort::{sort_random, PipesortConfig};

#[tokio::main]
async fn main() -> pipesort::Result<()> {
    tracing_subscriber::fmt::init();

    let config = PipesortConfig::from_env();
    let (input, sorted) = sort_random(8, &config).await?;

    println!("Original: {input:?}");
    println!("Sorted:   {sorted:?}");

    Ok(())
}
