//! Trees command - demo the tree structures.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use inferds_core::{AvlTree, BinaryTree, FenwickTree, NaryTree, Trie};

use crate::config::DemoConfig;

/// Trees command arguments.
#[derive(Args, Debug)]
pub struct TreesArgs {
    /// Prefix to complete against the vocabulary trie.
    #[arg(long, default_value = "tok")]
    pub prefix: String,
}

impl Default for TreesArgs {
    fn default() -> Self {
        Self {
            prefix: "tok".to_string(),
        }
    }
}

const VOCABULARY: &[&str] = &[
    "token", "tokens", "tokenize", "tokenizer", "top", "topk", "temperature", "tensor", "text",
    "sample", "sampler", "sampling", "sequence", "schedule", "scheduler",
];

/// Execute the trees command.
pub fn execute(args: TreesArgs, config: &DemoConfig, json: bool) -> Result<()> {
    // An ordered schedule under worst-case sorted insertion.
    let mut schedule = AvlTree::new();
    for priority in 0..config.scale as u64 {
        schedule.insert(priority);
    }
    let avl_stats = schedule.stats();
    let ideal_height = (config.scale.max(1) as f64).log2().ceil() as u32;

    // A vocabulary trie answering prefix completions.
    let mut vocab = Trie::new();
    for word in VOCABULARY {
        vocab.insert(word);
    }
    let completions = vocab.complete(&args.prefix);

    // Per-position counts with prefix sums.
    let counts: Vec<i64> = (0..config.scale as i64).map(|i| i % 7).collect();
    let mut fenwick = FenwickTree::from_values(&counts);
    if !counts.is_empty() {
        fenwick.update(0, 10)?;
    }
    let total = if counts.is_empty() {
        0
    } else {
        fenwick.prefix_sum(counts.len() - 1)?
    };

    // A fixed expression-shaped binary tree and its traversals.
    let expr = BinaryTree::from_level_order(&[
        Some("+"),
        Some("*"),
        Some("-"),
        Some("a"),
        Some("b"),
        Some("c"),
        Some("d"),
    ]);
    let inorder: Vec<&str> = expr.inorder().into_iter().copied().collect();

    // A shallow category tree.
    let mut categories = NaryTree::with_root("structures");
    categories.add_child(&[], "linear")?;
    categories.add_child(&[], "trees")?;
    categories.add_child(&[], "graphs")?;
    categories.add_child(&[0], "buffer")?;
    categories.add_child(&[0], "list")?;
    categories.add_child(&[1], "avl")?;
    categories.add_child(&[1], "trie")?;

    let report = serde_json::json!({
        "avl": {
            "len": schedule.len(),
            "height": schedule.height(),
            "ideal_height": ideal_height,
            "left_rotations": avl_stats.left_rotations,
            "right_rotations": avl_stats.right_rotations,
            "min": schedule.min(),
            "max": schedule.max(),
        },
        "trie": {
            "words": vocab.len(),
            "prefix": args.prefix,
            "completions": completions,
        },
        "fenwick": {
            "len": fenwick.len(),
            "total": total,
        },
        "binary_tree": {
            "len": expr.len(),
            "height": expr.height(),
            "inorder": inorder,
        },
        "nary_tree": {
            "len": categories.len(),
            "height": categories.height(),
            "root_children": categories.child_count(&[]),
        },
    });

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "\n{} scale={}",
            "Tree Structures".bright_green().bold(),
            config.scale
        );
        println!();

        println!("  {}", "AVL Tree".bright_cyan().underline());
        println!("    Entries: {}", schedule.len());
        println!(
            "    Height: {} (ideal {})",
            schedule.height(),
            ideal_height
        );
        println!(
            "    Rotations: {} left, {} right",
            avl_stats.left_rotations, avl_stats.right_rotations
        );
        println!();

        println!("  {}", "Vocabulary Trie".bright_cyan().underline());
        println!("    Words: {}", vocab.len());
        println!(
            "    Completions of {:?}: {}",
            args.prefix,
            completions.join(", ")
        );
        println!();

        println!("  {}", "Fenwick Tree".bright_cyan().underline());
        println!("    Positions: {}", fenwick.len());
        println!("    Total count: {total}");
        println!();

        println!("  {}", "Binary Tree".bright_cyan().underline());
        println!("    Nodes: {}  Height: {}", expr.len(), expr.height());
        println!("    Inorder: {}", inorder.join(" "));
        println!();

        println!("  {}", "N-ary Tree".bright_cyan().underline());
        println!(
            "    Nodes: {}  Height: {}  Root children: {}",
            categories.len(),
            categories.height(),
            categories.child_count(&[]).unwrap_or(0)
        );
        println!();
    }

    Ok(())
}
