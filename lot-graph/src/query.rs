use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    error::{GraphError, Result},
    graph::LotGraph,
    lot::{LotId, NodeId, Quantity, Upstream},
};

/// Held/owed quantities at a node grouped by the node their origin lot sits
/// at, split by whether that origin is a true source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProvenanceSummary {
    pub matched: BTreeMap<String, Quantity>,
    pub unmatched: BTreeMap<String, Quantity>,
}

/// Node sequence from one held lot back to its origin, held lot first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TracedPath {
    pub quantity: Quantity,
    pub path: Vec<String>,
    /// Whether the walk ended at a true source rather than an open deficit.
    pub sourced: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LotStanding {
    Matched,
    Surplus,
    Deficit,
}

/// Read-only view of one ledger entry, oldest first in [`LotGraph::node_inventory`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LotState {
    pub quantity: Quantity,
    pub standing: LotStanding,
    pub from_source: bool,
}

impl LotGraph {
    /// Follows upstream links to the source lot, or to the open deficit the
    /// chain currently stops at.
    pub fn origin(&self, lot: LotId) -> LotId {
        let mut cursor = lot;
        loop {
            match self.lot(cursor).upstream {
                Upstream::Lot(parent) => cursor = parent,
                Upstream::Source | Upstream::Open => return cursor,
            }
        }
    }

    /// Follows downstream links to the lot the quantity currently rests at.
    pub fn terminus(&self, lot: LotId) -> LotId {
        let mut cursor = lot;
        while let Some(child) = self.lot(cursor).downstream {
            cursor = child;
        }
        cursor
    }

    /// True on-hand quantity at `node`; negative when over-committed.
    pub fn node_balance(&self, node: &str) -> Quantity {
        match self.node_map.resolve(node) {
            Some(id) => self.ledger_lots(id).map(|lot| self.lot(lot).net_quantity()).sum(),
            None => 0,
        }
    }

    pub fn provenance_summary(&self, node: &str) -> ProvenanceSummary {
        let mut summary = ProvenanceSummary::default();
        let Some(id) = self.node_map.resolve(node) else {
            return summary;
        };
        for lot_id in self.ledger_lots(id) {
            if self.lot(lot_id).net_quantity() == 0 {
                continue;
            }
            let origin = self.lot(self.origin(lot_id));
            let bucket = if origin.is_source() {
                &mut summary.matched
            } else {
                &mut summary.unmatched
            };
            *bucket
                .entry(self.node_name(origin.node).to_string())
                .or_insert(0) += origin.quantity;
        }
        summary
    }

    /// Origin trace for every held lot at `node`.
    ///
    /// Fails with [`GraphError::UnresolvedDeficit`] if the node still owes
    /// quantity it never received.
    pub fn detailed_path(&self, node: &str) -> Result<Vec<TracedPath>> {
        let Some(id) = self.node_map.resolve(node) else {
            return Ok(Vec::new());
        };
        let mut traces = Vec::new();
        for lot_id in self.ledger_lots(id) {
            let net = self.lot(lot_id).net_quantity();
            if net < 0 {
                return Err(GraphError::UnresolvedDeficit {
                    node: node.to_string(),
                    quantity: -net,
                });
            }
            if net == 0 {
                continue;
            }

            let mut path = Vec::new();
            let mut cursor = lot_id;
            let sourced = loop {
                let lot = self.lot(cursor);
                path.push(self.node_name(lot.node).to_string());
                match lot.upstream {
                    Upstream::Lot(parent) => cursor = parent,
                    Upstream::Source => break true,
                    Upstream::Open => break false,
                }
            };
            traces.push(TracedPath {
                quantity: net,
                path,
                sourced,
            });
        }
        Ok(traces)
    }

    /// Ordered per-lot states for `node`, oldest first.
    pub fn node_inventory(&self, node: &str) -> Vec<LotState> {
        let Some(id) = self.node_map.resolve(node) else {
            return Vec::new();
        };
        self.ledger_lots(id)
            .map(|lot_id| {
                let lot = self.lot(lot_id);
                let standing = match lot.net_quantity() {
                    0 => LotStanding::Matched,
                    net if net > 0 => LotStanding::Surplus,
                    _ => LotStanding::Deficit,
                };
                LotState {
                    quantity: lot.quantity,
                    standing,
                    from_source: lot.is_source(),
                }
            })
            .collect()
    }

    /// All node names seen so far, sorted for stable report output.
    pub fn node_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.node_map.iter().map(|(_, name)| name.to_string()).collect();
        names.sort();
        names
    }

    fn ledger_lots(&self, id: NodeId) -> impl Iterator<Item = LotId> + '_ {
        self.ledgers[id as usize].iter()
    }
}
