//! Ambient garden life: swaying trees and grass, wandering butterflies, and
//! falling leaves. Everything is procedural meshes; no assets are loaded.

mod systems;
mod types;

#[cfg(test)]
mod tests;

pub use systems::{
    animate_butterflies, fall_leaves, flap_butterfly_wings, setup_environment, sway_grass,
    sway_trees, sync_butterflies, sync_leaves,
};
pub use types::{
    Butterfly, ButterflyWing, EnvironmentToggles, FallingLeaf, GrassBlade, SwayingTree,
};
