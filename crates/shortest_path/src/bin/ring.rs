use std::env;

use log::info;
use shortest_path::ShortestPaths;
use shortest_path::ring;

const DEFAULT_VERTEX_COUNT: usize = 16;

fn parse_arg(args: &[String], idx: usize, default: usize) -> Result<usize, Box<dyn std::error::Error>> {
    match args.get(idx) {
        Some(raw) => raw
            .parse()
            .map_err(|e| format!("argument {idx} ({raw:?}) is not a vertex count: {e}").into()),
        None => Ok(default),
    }
}

/// Usage: `ring [vertex_count] [source]`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let n = parse_arg(&args, 1, DEFAULT_VERTEX_COUNT)?;
    let source = parse_arg(&args, 2, 0)?;

    let graph = ring(n);
    info!("ring with {} vertices and {} edges", graph.vertex_count(), graph.edge_count());
    let sp = ShortestPaths::run(&graph, source)?;

    println!("{:>8} {:>8} {:>8}", "vertex", "dist", "pred");
    for v in 0..n {
        let dist = sp.dist(v).map_or_else(|| "inf".to_string(), |d| d.to_string());
        let pred = sp.pred(v).map_or_else(|| "-".to_string(), |p| p.to_string());
        println!("{v:>8} {dist:>8} {pred:>8}");
    }
    Ok(())
}
