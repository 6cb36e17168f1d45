//! Linear command - demo the linear structures.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use inferds_core::{GrowBuf, LinkedList, RingQueue};

use crate::config::DemoConfig;

/// Linear command arguments.
#[derive(Args, Debug)]
pub struct LinearArgs {
    /// Stride for the strided view over the buffer.
    #[arg(long, default_value_t = 4, allow_hyphen_values = true)]
    pub stride: isize,

    /// Ring queue capacity.
    #[arg(long, default_value_t = 16)]
    pub queue_capacity: usize,
}

impl Default for LinearArgs {
    fn default() -> Self {
        Self {
            stride: 4,
            queue_capacity: 16,
        }
    }
}

/// Execute the linear command.
pub fn execute(args: LinearArgs, config: &DemoConfig, json: bool) -> Result<()> {
    // A token stream filling the growable buffer.
    let mut buf = GrowBuf::new();
    for i in 0..config.scale {
        buf.push(i as u64);
    }
    let half = config.scale / 2;
    for _ in 0..half {
        buf.pop()?;
    }
    let buf_stats = buf.stats();
    let strided = if buf.is_empty() {
        Vec::new()
    } else {
        buf.strided(buf.len() - 1, -args.stride.abs())?
    };

    // A sequence list churned like a block allocator.
    let mut list = LinkedList::new();
    for i in 0..config.scale {
        list.push_back(i as u64);
    }
    for _ in 0..half {
        list.pop_front()?;
    }
    for i in 0..half / 2 {
        list.push_back(i as u64);
    }

    // A bounded ring queue wrapped past its capacity.
    let mut queue = RingQueue::new(args.queue_capacity)?;
    let mut dropped = 0usize;
    for i in 0..config.scale {
        if queue.is_full() {
            queue.dequeue()?;
            dropped += 1;
        }
        queue.enqueue(i as u64)?;
    }

    let report = serde_json::json!({
        "buffer": {
            "len": buf.len(),
            "capacity": buf.capacity(),
            "grows": buf_stats.grows,
            "shrinks": buf_stats.shrinks,
            "strided_view_len": strided.len(),
        },
        "list": {
            "len": list.len(),
            "free_slots": list.free_slots(),
            "front": list.front(),
            "back": list.back(),
        },
        "ring_queue": {
            "capacity": queue.capacity(),
            "len": queue.len(),
            "dropped": dropped,
        },
    });

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "\n{} scale={}",
            "Linear Structures".bright_green().bold(),
            config.scale
        );
        println!();

        println!("  {}", "Growable Buffer".bright_cyan().underline());
        println!("    Length: {}", buf.len());
        println!("    Capacity: {}", buf.capacity());
        println!("    Grows: {}", buf_stats.grows);
        println!("    Shrinks: {}", buf_stats.shrinks);
        println!(
            "    Strided view (stride {}): {} elements",
            args.stride,
            strided.len()
        );
        println!();

        println!("  {}", "Linked List".bright_cyan().underline());
        println!("    Length: {}", list.len());
        println!("    Recycled slots available: {}", list.free_slots());
        if let (Some(front), Some(back)) = (list.front(), list.back()) {
            println!("    Front: {front}  Back: {back}");
        }
        println!();

        println!("  {}", "Ring Queue".bright_cyan().underline());
        println!("    Capacity: {}", queue.capacity());
        println!("    Length: {}", queue.len());
        println!("    Evicted on overflow: {dropped}");
        println!();
    }

    Ok(())
}
