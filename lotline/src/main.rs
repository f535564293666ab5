//! Demo driver: builds a sample lot network (or loads one from a JSON
//! scenario file), then renders inventory, provenance summaries and detailed
//! path traces.

mod config;
mod report;
mod scenario;

use std::{env, process};

use config::{AppConfig, ConfigError, ScenarioSource};
use lot_graph::{GraphError, LotGraph};
use scenario::ScenarioError;
use thiserror::Error;

#[derive(Debug, Error)]
enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("scenario error: {0}")]
    Scenario(#[from] ScenarioError),
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("lotline failed: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config = AppConfig::from_args(env::args().skip(1))?;
    let ops = match &config.scenario {
        ScenarioSource::Builtin => scenario::builtin_sample(),
        ScenarioSource::File(path) => scenario::load(path)?,
    };

    let mut graph = LotGraph::new(config.graph);
    scenario::apply(&mut graph, &ops)?;

    print!("{}", report::render_inventory(&graph));

    println!("\nShowing source summary");
    for node in graph.node_names() {
        for line in report::summary_lines(&graph, &node) {
            println!("{line}");
        }
    }

    println!("\nShowing detailed path");
    for node in graph.node_names() {
        if graph.node_balance(&node) <= 0 {
            continue;
        }
        println!("---------- {node} ---------");
        for line in report::path_lines(&graph, &node)? {
            println!("{line}");
        }
    }
    Ok(())
}
