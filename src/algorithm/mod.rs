/// Fixed-size bitset for cell domains and compatibility rows
pub mod bitset;
/// Wave solver: initialization, injection, observation loop
pub mod executor;
/// Overlapping-pattern generator over sample grids
pub mod overlapping;
/// Support-counter constraint propagation
pub mod propagation;
/// Seeded weighted random selection
pub mod selection;
/// Single entry point switching between generator kinds
pub mod session;
/// Tiling generator over compiled tile sets
pub mod tiling;
/// Cell domains with incremental entropy
pub mod wave;
