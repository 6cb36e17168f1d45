//! Maps command - demo the map structures.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use inferds_core::{ChainMap, LruCache};

use crate::config::DemoConfig;

/// Maps command arguments.
#[derive(Args, Debug)]
pub struct MapsArgs {
    /// Cache capacity as a fraction of scale (1/n).
    #[arg(long, default_value_t = 4)]
    pub cache_divisor: usize,
}

impl Default for MapsArgs {
    fn default() -> Self {
        Self { cache_divisor: 4 }
    }
}

/// Execute the maps command.
pub fn execute(args: MapsArgs, config: &DemoConfig, json: bool) -> Result<()> {
    // A page table mapping logical block numbers to physical slots.
    let mut table = ChainMap::new();
    for block in 0..config.scale as u64 {
        table.insert(block, mix(block, config.seed));
    }
    let hits = (0..config.scale as u64)
        .filter(|block| table.get(block).is_some())
        .count();
    let table_stats = table.stats();

    // A bounded cache reused across a skewed access pattern.
    let capacity = (config.scale / args.cache_divisor).max(1);
    let mut cache = LruCache::new(capacity)?;
    for i in 0..config.scale as u64 {
        // Hot keys repeat; cold keys stream through once.
        let key = if i % 4 == 0 { i % 16 } else { i };
        if cache.get(&key).is_none() {
            cache.put(key, mix(key, config.seed));
        }
    }
    let cache_stats = cache.stats();

    let report = serde_json::json!({
        "chain_map": {
            "len": table.len(),
            "buckets": table.bucket_count(),
            "load_factor": table.load_factor(),
            "max_chain_len": table.max_chain_len(),
            "rehashes": table_stats.rehashes,
            "lookup_hits": hits,
        },
        "lru_cache": {
            "capacity": cache.capacity(),
            "len": cache.len(),
            "hits": cache_stats.hits,
            "misses": cache_stats.misses,
            "evictions": cache_stats.evictions,
        },
    });

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "\n{} scale={}",
            "Map Structures".bright_green().bold(),
            config.scale
        );
        println!();

        println!("  {}", "Chained Hash Map".bright_cyan().underline());
        println!("    Entries: {}", table.len());
        println!("    Buckets: {}", table.bucket_count());
        println!("    Load factor: {:.3}", table.load_factor());
        println!("    Longest chain: {}", table.max_chain_len());
        println!("    Rehashes: {}", table_stats.rehashes);
        println!("    Lookup hits: {hits}/{}", config.scale);
        println!();

        println!("  {}", "LRU Cache".bright_cyan().underline());
        println!("    Capacity: {}", cache.capacity());
        println!("    Entries: {}", cache.len());
        println!(
            "    Hits: {}  Misses: {}  Evictions: {}",
            cache_stats.hits, cache_stats.misses, cache_stats.evictions
        );
        let total = cache_stats.hits + cache_stats.misses;
        if total > 0 {
            println!(
                "    Hit rate: {:.1}%",
                100.0 * cache_stats.hits as f64 / total as f64
            );
        }
        println!();
    }

    Ok(())
}

/// Deterministic value derivation so runs are reproducible per seed.
fn mix(key: u64, seed: u64) -> u64 {
    key.wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(31) ^ seed
}
