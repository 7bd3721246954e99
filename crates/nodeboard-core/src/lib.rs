pub mod ids {
    use crate::model::NodeId;

    /// Issues node identifiers "1", "2", "3", ... for the lifetime of a session.
    /// Identifiers are never handed out twice, even after the node is deleted.
    #[derive(Debug, Clone)]
    pub struct IdAllocator {
        next: u64,
    }

    impl IdAllocator {
        pub const FIRST_ID: u64 = 1;

        pub fn new() -> Self {
            Self {
                next: Self::FIRST_ID,
            }
        }

        /// Consume the next identifier.
        pub fn allocate(&mut self) -> NodeId {
            let id = self.next;
            self.next += 1;
            NodeId::from(id.to_string())
        }

        /// The identifier the next `allocate` call will return.
        pub fn peek(&self) -> u64 {
            self.next
        }
    }

    impl Default for IdAllocator {
        fn default() -> Self {
            Self::new()
        }
    }
}

pub mod layout {
    use crate::model::Position;

    /// Placement rule for freshly added nodes.
    ///
    /// Starts at (400, 400) and steps 10 units along both axes per add, wrapping
    /// every 10 adds, so the k-th and (k+10)-th nodes land on the same spot.
    #[derive(Debug, Clone, Default)]
    pub struct LayoutHint {
        adds: u64,
    }

    impl LayoutHint {
        pub const BASE: f64 = 400.0;
        pub const STEP: u64 = 10;
        pub const SPAN: u64 = 100;

        pub fn new() -> Self {
            Self { adds: 0 }
        }

        /// Position for the k-th add (k = 0 for the first node).
        pub fn position_for(k: u64) -> Position {
            let base = Self::BASE as u64;
            let offset = (base + Self::STEP * k) % Self::SPAN;
            let coord = Self::BASE + offset as f64;
            Position::new(coord, coord)
        }

        /// Position for the next add; advances the add counter.
        pub fn next_position(&mut self) -> Position {
            let pos = Self::position_for(self.adds);
            self.adds += 1;
            pos
        }

        pub fn adds(&self) -> u64 {
            self.adds
        }
    }
}

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod protocol;
pub mod stdio;
pub mod store;
pub mod view;

pub use controller::{Effect, HostCommand, InteractionController, RenderSurface, SurfaceEvent};
pub use model::{Edge, EdgeId, EdgeState, GraphSnapshot, Node, NodeId, Position, RenderState};
pub use store::GraphStore;
