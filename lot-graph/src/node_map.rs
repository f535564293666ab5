use std::collections::HashMap;

use thiserror::Error;

use crate::lot::NodeId;

#[derive(Debug, Error)]
pub enum NodeMapError {
    #[error("node limit of {limit} exhausted")]
    Exhausted { limit: NodeId },
}

/// Bi-directional node-name registry.
///
/// Nodes are registered lazily the first time a mutation references them and
/// are never removed.
#[derive(Debug, Clone)]
pub struct NodeMap {
    forward: Vec<String>,
    reverse: HashMap<String, NodeId>,
    max_nodes: NodeId,
}

impl NodeMap {
    pub fn new(max_nodes: NodeId) -> Self {
        Self {
            forward: Vec::new(),
            reverse: HashMap::new(),
            max_nodes,
        }
    }

    pub fn resolve_or_insert(&mut self, name: &str) -> Result<NodeId, NodeMapError> {
        if let Some(id) = self.reverse.get(name) {
            return Ok(*id);
        }

        if self.forward.len() as NodeId >= self.max_nodes {
            return Err(NodeMapError::Exhausted {
                limit: self.max_nodes,
            });
        }

        let id = self.forward.len() as NodeId;
        self.forward.push(name.to_string());
        self.reverse.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn resolve(&self, name: &str) -> Option<NodeId> {
        self.reverse.get(name).copied()
    }

    pub fn lookup(&self, id: NodeId) -> Option<&str> {
        self.forward.get(id as usize).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.forward
            .iter()
            .enumerate()
            .map(|(idx, name)| (idx as NodeId, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_round_trip() {
        let mut map = NodeMap::new(4);
        let a = map.resolve_or_insert("A001").unwrap();
        let b = map.resolve_or_insert("A002").unwrap();
        assert_ne!(a, b);
        assert_eq!(map.resolve_or_insert("A001").unwrap(), a);
        assert_eq!(map.lookup(b), Some("A002"));
        assert_eq!(map.resolve("A003"), None);
    }

    #[test]
    fn limit_is_enforced() {
        let mut map = NodeMap::new(1);
        map.resolve_or_insert("A").unwrap();
        let err = map.resolve_or_insert("B").unwrap_err();
        assert!(matches!(err, NodeMapError::Exhausted { limit: 1 }));
    }
}
