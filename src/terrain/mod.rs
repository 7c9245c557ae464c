//! Tiled terrain: shared tile geometry, scroll wrapping and the orchestrator.

mod mesh;
mod scroll;
mod system;

// Re-export public types
pub use mesh::{lattice_offsets, Tile, TileGeometry, TileInstance, TileLattice, TileVertex};
pub use scroll::{wrap_centered, ScrollState};
pub use system::{needs_rebuild, ConfigChange, TerrainTopo};
