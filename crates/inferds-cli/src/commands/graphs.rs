//! Graphs command - demo the graph structures.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use inferds_core::graph::VertexId;
use inferds_core::{AdjacencyList, AdjacencyMatrix, WeightedGraph};

use crate::config::DemoConfig;

/// Graphs command arguments.
#[derive(Args, Debug)]
pub struct GraphsArgs {
    /// Source vertex for traversals and shortest paths.
    #[arg(long, default_value_t = 0)]
    pub source: VertexId,
}

impl Default for GraphsArgs {
    fn default() -> Self {
        Self { source: 0 }
    }
}

/// Execute the graphs command.
pub fn execute(args: GraphsArgs, config: &DemoConfig, json: bool) -> Result<()> {
    // A stage pipeline: tokenize -> embed -> attend -> sample -> detokenize,
    // with a skip edge around attention.
    let mut pipeline = AdjacencyList::directed();
    pipeline.add_edge(0, 1);
    pipeline.add_edge(1, 2);
    pipeline.add_edge(2, 3);
    pipeline.add_edge(3, 4);
    pipeline.add_edge(1, 3);
    let bfs = pipeline.bfs(args.source);
    let dfs = pipeline.dfs(args.source);

    // Weighted routing between the same stages, cost in microseconds.
    let mut routes = WeightedGraph::directed();
    routes.add_edge(0, 1, 120);
    routes.add_edge(1, 2, 900);
    routes.add_edge(2, 3, 200);
    routes.add_edge(1, 3, 1_400);
    routes.add_edge(3, 4, 80);
    let distances = routes.dijkstra(args.source);
    let mut by_vertex: Vec<(VertexId, u64)> = distances.iter().map(|(v, d)| (*v, *d)).collect();
    by_vertex.sort_unstable();

    // A dense affinity matrix over a small vertex set.
    let n = (config.scale.min(64)).max(2);
    let mut affinity = AdjacencyMatrix::undirected(n);
    for v in 0..n as VertexId {
        let next = (v + 1) % n as VertexId;
        affinity.add_edge(v, next)?;
    }
    let possible = n * (n - 1) / 2;
    let density = affinity.edge_count() as f64 / possible as f64;

    let report = serde_json::json!({
        "adjacency_list": {
            "vertices": pipeline.vertex_count(),
            "edges": pipeline.edge_count(),
            "bfs": bfs,
            "dfs": dfs,
        },
        "weighted": {
            "source": args.source,
            "distances": by_vertex
                .iter()
                .map(|(v, d)| serde_json::json!({"vertex": v, "cost": d}))
                .collect::<Vec<_>>(),
        },
        "matrix": {
            "vertices": affinity.vertex_count(),
            "edges": affinity.edge_count(),
            "density": density,
        },
    });

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n{}", "Graph Structures".bright_green().bold());
        println!();

        println!("  {}", "Stage Pipeline".bright_cyan().underline());
        println!(
            "    Vertices: {}  Edges: {}",
            pipeline.vertex_count(),
            pipeline.edge_count()
        );
        println!("    BFS from {}: {:?}", args.source, bfs);
        println!("    DFS from {}: {:?}", args.source, dfs);
        println!();

        println!("  {}", "Weighted Routing".bright_cyan().underline());
        for (v, d) in &by_vertex {
            println!("    Stage {v}: {d} us");
        }
        println!();

        println!("  {}", "Affinity Matrix".bright_cyan().underline());
        println!(
            "    Vertices: {}  Edges: {}  Density: {:.3}",
            affinity.vertex_count(),
            affinity.edge_count(),
            density
        );
        println!();
    }

    Ok(())
}
