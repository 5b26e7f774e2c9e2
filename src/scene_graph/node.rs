use glam::Mat4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    Sphere,
    OrbitObj1,
    OrbitObj2,
    /// Centre of the ring traced by `OrbitObj2`.
    OrbitPath2,
}

impl NodeId {
    pub const ALL: [NodeId; 4] = [
        NodeId::Sphere,
        NodeId::OrbitObj1,
        NodeId::OrbitObj2,
        NodeId::OrbitPath2,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// World matrices for every node, indexed by `NodeId`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMatrices([Mat4; NodeId::ALL.len()]);

impl NodeMatrices {
    pub fn identity() -> Self {
        Self([Mat4::IDENTITY; NodeId::ALL.len()])
    }

    pub fn get(&self, node: NodeId) -> Mat4 {
        self.0[node.index()]
    }

    pub fn set(&mut self, node: NodeId, matrix: Mat4) {
        self.0[node.index()] = matrix;
    }
}
