pub mod node;
pub mod orbit;
pub mod scene;

pub use node::NodeId;
pub use scene::Scene;
