use crate::lot::NodeId;

pub const DEFAULT_MAX_NODES: NodeId = 1_024;

#[derive(Clone, Copy, Debug)]
pub struct GraphConfig {
    pub max_nodes: NodeId,
}

impl GraphConfig {
    pub fn new(max_nodes: NodeId) -> Self {
        Self { max_nodes }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}
