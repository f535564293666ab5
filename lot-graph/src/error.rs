use thiserror::Error;

use crate::{
    lot::{LotId, Quantity},
    node_map::NodeMapError,
};

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("quantity {qty} is negative")]
    NegativeQuantity { qty: Quantity },
    #[error("split amount {amount} not strictly between 0 and {quantity} for lot {lot}")]
    InvalidSplitAmount {
        lot: LotId,
        amount: Quantity,
        quantity: Quantity,
    },
    #[error("lot {lot} already has {side} link")]
    AlreadyLinked { lot: LotId, side: LinkSide },
    #[error("cannot link lot {upstream} (qty {upstream_qty}) to lot {downstream} (qty {downstream_qty})")]
    QuantityMismatch {
        upstream: LotId,
        upstream_qty: Quantity,
        downstream: LotId,
        downstream_qty: Quantity,
    },
    #[error("cannot split lot {lot}: {side} link already established")]
    SplitPrecondition { lot: LotId, side: LinkSide },
    #[error("unresolved deficit of {quantity} at node {node}")]
    UnresolvedDeficit { node: String, quantity: Quantity },
    #[error("node map error: {0}")]
    NodeMap(#[from] NodeMapError),
}

/// Which of a lot's two links an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkSide {
    Upstream,
    Downstream,
}

impl std::fmt::Display for LinkSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkSide::Upstream => f.write_str("an upstream"),
            LinkSide::Downstream => f.write_str("a downstream"),
        }
    }
}
