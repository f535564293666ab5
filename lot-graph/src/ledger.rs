use crate::lot::{LotArena, LotId};

/// Ordered lot sequence for one node, oldest first.
///
/// Fresh lots append at the tail; split-off lots insert immediately before
/// the lot they were carved from so older material keeps FIFO precedence.
#[derive(Debug, Default)]
pub struct NodeLedger {
    lots: Vec<LotId>,
}

impl NodeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: LotId) {
        self.lots.push(id);
    }

    pub fn insert_before(&mut self, anchor: LotId, id: LotId) {
        let pos = self
            .lots
            .iter()
            .position(|&existing| existing == anchor)
            .expect("split anchor present in its node ledger");
        self.lots.insert(pos, id);
    }

    /// Oldest lot that is not yet fully linked, if any.
    pub fn first_open(&self, arena: &LotArena) -> Option<LotId> {
        self.lots
            .iter()
            .copied()
            .find(|&id| !arena.get(id).is_fully_linked())
    }

    pub fn iter(&self) -> impl Iterator<Item = LotId> + '_ {
        self.lots.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lot::{Lot, Upstream};

    #[test]
    fn insert_before_keeps_order() {
        let mut ledger = NodeLedger::new();
        ledger.push(10);
        ledger.push(20);
        ledger.insert_before(20, 15);
        assert_eq!(ledger.iter().collect::<Vec<_>>(), vec![10, 15, 20]);
    }

    #[test]
    fn first_open_skips_fully_linked() {
        let mut arena = LotArena::new();
        let a = arena.alloc(Lot::new(0, 5, Upstream::Source));
        let b = arena.alloc(Lot::new(0, 5, Upstream::Source));
        arena.get_mut(a).downstream = Some(99);

        let mut ledger = NodeLedger::new();
        ledger.push(a);
        ledger.push(b);
        assert_eq!(ledger.first_open(&arena), Some(b));
    }
}
