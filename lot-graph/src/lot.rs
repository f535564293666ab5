use crate::error::{GraphError, LinkSide, Result};

pub type LotId = u32;
pub type NodeId = u16;
pub type Quantity = i64;

/// Upstream side of a lot.
///
/// `Open` means the link has not been assigned yet; `Source` marks a lot whose
/// quantity originates at its node with no further provenance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upstream {
    Open,
    Lot(LotId),
    Source,
}

/// One tracked quantity at one node, at one position in its provenance chain.
///
/// Each link is assignable exactly once; once both sides are set the lot is
/// the permanent historical record and its quantity no longer changes.
#[derive(Clone, Debug)]
pub struct Lot {
    pub node: NodeId,
    pub quantity: Quantity,
    pub upstream: Upstream,
    pub downstream: Option<LotId>,
}

impl Lot {
    pub fn new(node: NodeId, quantity: Quantity, upstream: Upstream) -> Self {
        Self {
            node,
            quantity,
            upstream,
            downstream: None,
        }
    }

    pub fn is_source(&self) -> bool {
        self.upstream == Upstream::Source
    }

    pub fn has_upstream(&self) -> bool {
        self.upstream != Upstream::Open
    }

    pub fn is_fully_linked(&self) -> bool {
        self.has_upstream() && self.downstream.is_some()
    }

    /// Net signed contribution to the owning node's balance: zero once the
    /// quantity has passed through, positive while held, negative while the
    /// outflow awaits a supply match.
    pub fn net_quantity(&self) -> Quantity {
        debug_assert!(
            self.has_upstream() || self.downstream.is_some(),
            "lot with neither link"
        );
        match (self.has_upstream(), self.downstream.is_some()) {
            (true, true) => 0,
            (true, false) => self.quantity,
            _ => -self.quantity,
        }
    }
}

/// Stable-id storage for lots. Ids are never invalidated; lots are never
/// removed.
#[derive(Debug, Default)]
pub struct LotArena {
    lots: Vec<Lot>,
}

impl LotArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, lot: Lot) -> LotId {
        let id = self.lots.len() as LotId;
        self.lots.push(lot);
        id
    }

    pub fn get(&self, id: LotId) -> &Lot {
        &self.lots[id as usize]
    }

    pub fn get_mut(&mut self, id: LotId) -> &mut Lot {
        &mut self.lots[id as usize]
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// Establishes the two-way link `upstream -> downstream`.
    ///
    /// Both sides must still be open and quantities must agree exactly; a
    /// mismatch here means a matching bug upstream of this call.
    pub fn link(&mut self, upstream: LotId, downstream: LotId) -> Result<()> {
        let up = self.get(upstream);
        let down = self.get(downstream);
        if up.downstream.is_some() {
            return Err(GraphError::AlreadyLinked {
                lot: upstream,
                side: LinkSide::Downstream,
            });
        }
        if down.has_upstream() {
            return Err(GraphError::AlreadyLinked {
                lot: downstream,
                side: LinkSide::Upstream,
            });
        }
        if up.quantity != down.quantity {
            return Err(GraphError::QuantityMismatch {
                upstream,
                upstream_qty: up.quantity,
                downstream,
                downstream_qty: down.quantity,
            });
        }
        self.get_mut(upstream).downstream = Some(downstream);
        self.get_mut(downstream).upstream = Upstream::Lot(upstream);
        Ok(())
    }

    /// Marks an upstream-open lot as originating at its node.
    pub fn promote_to_source(&mut self, id: LotId) -> Result<()> {
        let lot = self.get(id);
        if lot.has_upstream() {
            return Err(GraphError::AlreadyLinked {
                lot: id,
                side: LinkSide::Upstream,
            });
        }
        self.get_mut(id).upstream = Upstream::Source;
        Ok(())
    }
}
