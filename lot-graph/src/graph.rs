use log::{debug, trace};

use crate::{
    config::GraphConfig,
    error::{GraphError, LinkSide, Result},
    ledger::NodeLedger,
    lot::{Lot, LotArena, LotId, NodeId, Quantity, Upstream},
    node_map::NodeMap,
};

/// In-memory network of node ledgers with end-to-end lot genealogy.
///
/// `introduce_supply` and `transfer` are the only mutation entry points; all
/// other operations are read-only. Mutation is not reentrant-safe: callers
/// needing concurrent access must serialize on one exclusive writer per
/// graph.
#[derive(Debug)]
pub struct LotGraph {
    pub(crate) arena: LotArena,
    pub(crate) node_map: NodeMap,
    pub(crate) ledgers: Vec<NodeLedger>,
}

impl LotGraph {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            arena: LotArena::new(),
            node_map: NodeMap::new(config.max_nodes),
            ledgers: Vec::new(),
        }
    }

    pub fn lot(&self, id: LotId) -> &Lot {
        self.arena.get(id)
    }

    /// Number of lots allocated so far; ids `0..lot_count()` are all valid.
    pub fn lot_count(&self) -> LotId {
        self.arena.len() as LotId
    }

    pub fn node_name(&self, id: NodeId) -> &str {
        self.node_map.lookup(id).expect("node id issued by this graph")
    }

    pub(crate) fn ensure_node(&mut self, name: &str) -> Result<NodeId> {
        let id = self.node_map.resolve_or_insert(name)?;
        if self.ledgers.len() <= id as usize {
            self.ledgers.resize_with(id as usize + 1, NodeLedger::new);
        }
        Ok(id)
    }

    fn alloc_at(&mut self, node: NodeId, quantity: Quantity, upstream: Upstream) -> LotId {
        let id = self.arena.alloc(Lot::new(node, quantity, upstream));
        self.ledgers[node as usize].push(id);
        id
    }

    fn check_split_amount(&self, lot: LotId, amount: Quantity) -> Result<Quantity> {
        let quantity = self.arena.get(lot).quantity;
        if amount <= 0 || amount >= quantity {
            return Err(GraphError::InvalidSplitAmount {
                lot,
                amount,
                quantity,
            });
        }
        Ok(quantity - amount)
    }

    /// Carves `amount` out of `lot` and every lot linked behind it, producing
    /// a parallel chain with the same node sequence.
    ///
    /// `lot` must be the outbound frontier of its chain (no downstream link).
    /// Returns the new sibling at `lot`'s node, which the node ledger now
    /// holds immediately before `lot`.
    pub fn split_by_upstream_chain(&mut self, lot: LotId, amount: Quantity) -> Result<LotId> {
        if self.arena.get(lot).downstream.is_some() {
            return Err(GraphError::SplitPrecondition {
                lot,
                side: LinkSide::Downstream,
            });
        }
        let remain = self.check_split_amount(lot, amount)?;
        debug!("splitting upstream chain of lot {lot} into {remain}+{amount}");

        let mut cursor = lot;
        let mut prev_sibling: Option<LotId> = None;
        let mut head = None;
        loop {
            let current = self.arena.get(cursor);
            let node = current.node;
            let upstream = current.upstream;
            let sibling_upstream = if upstream == Upstream::Source {
                Upstream::Source
            } else {
                Upstream::Open
            };

            self.arena.get_mut(cursor).quantity = remain;
            let sibling = self.arena.alloc(Lot::new(node, amount, sibling_upstream));
            if let Some(prev) = prev_sibling {
                self.arena.link(sibling, prev)?;
            }
            self.ledgers[node as usize].insert_before(cursor, sibling);
            trace!("split lot {cursor} at node {node}: sibling {sibling}");

            head.get_or_insert(sibling);
            prev_sibling = Some(sibling);
            match upstream {
                Upstream::Lot(parent) => cursor = parent,
                Upstream::Source | Upstream::Open => break,
            }
        }
        Ok(head.expect("split walk visits at least one lot"))
    }

    /// Mirror of [`split_by_upstream_chain`]: carves `amount` out of `lot`
    /// and every lot linked ahead of it.
    ///
    /// `lot` must be the inbound frontier of its chain (upstream still open).
    pub fn split_by_downstream_chain(&mut self, lot: LotId, amount: Quantity) -> Result<LotId> {
        if self.arena.get(lot).has_upstream() {
            return Err(GraphError::SplitPrecondition {
                lot,
                side: LinkSide::Upstream,
            });
        }
        let remain = self.check_split_amount(lot, amount)?;
        debug!("splitting downstream chain of lot {lot} into {remain}+{amount}");

        let mut cursor = Some(lot);
        let mut prev_sibling: Option<LotId> = None;
        let mut head = None;
        while let Some(current_id) = cursor {
            let current = self.arena.get(current_id);
            let node = current.node;
            let next = current.downstream;

            self.arena.get_mut(current_id).quantity = remain;
            let sibling = self.arena.alloc(Lot::new(node, amount, Upstream::Open));
            if let Some(prev) = prev_sibling {
                self.arena.link(prev, sibling)?;
            }
            self.ledgers[node as usize].insert_before(current_id, sibling);
            trace!("split lot {current_id} at node {node}: sibling {sibling}");

            head.get_or_insert(sibling);
            prev_sibling = Some(sibling);
            cursor = next;
        }
        Ok(head.expect("split walk visits at least one lot"))
    }

    /// Adds `qty` units of brand-new, traceable-to-origin supply at `node`.
    ///
    /// Outstanding deficits at the node absorb the supply oldest-first; any
    /// excess becomes a fresh source lot at the ledger tail.
    pub fn introduce_supply(&mut self, node: &str, qty: Quantity) -> Result<()> {
        if qty < 0 {
            return Err(GraphError::NegativeQuantity { qty });
        }
        let node_id = self.ensure_node(node)?;
        debug!("introduce {qty} at {node}");

        let mut remaining = qty;
        while remaining > 0 {
            let head = self.ledgers[node_id as usize].first_open(&self.arena);
            match head.and_then(|id| self.receivable(id)) {
                None => {
                    self.alloc_at(node_id, remaining, Upstream::Source);
                    remaining = 0;
                }
                Some((deficit, rx)) if rx <= remaining => {
                    self.arena.promote_to_source(deficit)?;
                    remaining -= rx;
                }
                Some((deficit, _)) => {
                    let carved = self.split_by_downstream_chain(deficit, remaining)?;
                    self.arena.promote_to_source(carved)?;
                    remaining = 0;
                }
            }
        }
        Ok(())
    }

    /// Moves `qty` traceable units from `from` to `to`, linking lots
    /// one-to-one and splitting whichever side is larger until quantities
    /// agree exactly.
    pub fn transfer(&mut self, from: &str, to: &str, qty: Quantity) -> Result<()> {
        if qty < 0 {
            return Err(GraphError::NegativeQuantity { qty });
        }
        let from_id = self.ensure_node(from)?;
        let to_id = self.ensure_node(to)?;
        debug!("transfer {qty} from {from} to {to}");

        let mut remaining = qty;
        while remaining > 0 {
            let src = self.ledgers[from_id as usize].first_open(&self.arena);
            let dst = self.ledgers[to_id as usize].first_open(&self.arena);
            let tx = src.and_then(|id| self.sendable(id));
            let rx = dst.and_then(|id| self.receivable(id));

            let mut step = remaining;
            if let Some((_, tx_qty)) = tx {
                step = step.min(tx_qty);
            }
            if let Some((_, rx_qty)) = rx {
                step = step.min(rx_qty);
            }

            if let Some((src_id, tx_qty)) = tx {
                if tx_qty > step {
                    self.split_by_upstream_chain(src_id, step)?;
                    continue;
                }
            }
            if let Some((dst_id, rx_qty)) = rx {
                if rx_qty > step {
                    self.split_by_downstream_chain(dst_id, step)?;
                    continue;
                }
            }

            // Quantities agree; missing sides get fresh lots.
            let src_id = match tx {
                Some((id, _)) => id,
                None => self.alloc_at(from_id, step, Upstream::Open),
            };
            let dst_id = match rx {
                Some((id, _)) => id,
                None => self.alloc_at(to_id, step, Upstream::Open),
            };
            self.arena.link(src_id, dst_id)?;
            remaining -= step;
        }
        Ok(())
    }

    /// Quantity `id` would match if it were to send flow: held supply with no
    /// downstream yet.
    fn sendable(&self, id: LotId) -> Option<(LotId, Quantity)> {
        let lot = self.arena.get(id);
        (lot.has_upstream() && lot.downstream.is_none()).then(|| (id, lot.quantity))
    }

    /// Quantity `id` would match if it were to receive flow: committed
    /// outflow still awaiting supply.
    fn receivable(&self, id: LotId) -> Option<(LotId, Quantity)> {
        let lot = self.arena.get(id);
        (lot.downstream.is_some() && !lot.has_upstream()).then(|| (id, lot.quantity))
    }
}

impl Default for LotGraph {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}
