use std::{fs, io, path::Path};

use lot_graph::{LotGraph, Quantity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("scenario parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One mutation against the graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Supply {
        node: String,
        qty: Quantity,
    },
    Transfer {
        from: String,
        to: String,
        qty: Quantity,
    },
}

pub fn load(path: &Path) -> Result<Vec<Op>, ScenarioError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn apply(graph: &mut LotGraph, ops: &[Op]) -> lot_graph::Result<()> {
    for op in ops {
        match op {
            Op::Supply { node, qty } => graph.introduce_supply(node, *qty)?,
            Op::Transfer { from, to, qty } => graph.transfer(from, to, *qty)?,
        }
    }
    Ok(())
}

/// The fixed sample network: three sources feeding a small production
/// fan-out that ends fully matched at A009..A011.
pub fn builtin_sample() -> Vec<Op> {
    fn supply(node: &str, qty: Quantity) -> Op {
        Op::Supply {
            node: node.to_string(),
            qty,
        }
    }
    fn transfer(from: &str, to: &str, qty: Quantity) -> Op {
        Op::Transfer {
            from: from.to_string(),
            to: to.to_string(),
            qty,
        }
    }

    vec![
        supply("A001", 100),
        supply("A002", 100),
        supply("A003", 100),
        transfer("A001", "A004", 100),
        transfer("A002", "A004", 100),
        transfer("A003", "A005", 20),
        transfer("A003", "A006", 80),
        transfer("A004", "A007", 40),
        transfer("A004", "A008", 160),
        transfer("A005", "A008", 20),
        transfer("A006", "A008", 80),
        transfer("A007", "A009", 40),
        transfer("A008", "A009", 60),
        transfer("A008", "A010", 100),
        transfer("A008", "A011", 100),
    ]
}
