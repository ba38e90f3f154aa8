//! Tile set compilation
//!
//! Expands named, symmetry-annotated tiles into oriented catalog elements and
//! compact left-of adjacency rules into a full direction-aware compatibility
//! table. Anything no rule derives is incompatible.

use crate::{
    analysis::{
        compatibility::{CompatibilityTable, Model},
        symmetry::{ACTION_DIRECTIONS, Symmetry},
    },
    io::error::{Result, invalid_input},
    spatial::Direction,
};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// A named tile with its symmetry class, weight and payload
#[derive(Clone, Debug, PartialEq)]
pub struct TileDefinition<P> {
    /// Unique tile name referenced by rules and constraints
    pub name: String,
    /// Symmetry class deciding the realizable orientations
    pub symmetry: Symmetry,
    /// Relative frequency of the tile over all its orientations
    pub weight: f64,
    /// Caller data carried through to rendering
    pub payload: P,
}

impl<P> TileDefinition<P> {
    /// Create a tile definition
    pub fn new(name: impl Into<String>, symmetry: Symmetry, weight: f64, payload: P) -> Self {
        Self {
            name: name.into(),
            symmetry,
            weight,
            payload,
        }
    }
}

/// "`tile1` at `orientation1` may sit immediately left of `tile2` at `orientation2`"
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AdjacencyRule {
    /// Name of the left tile
    pub tile1: String,
    /// Orientation of the left tile
    pub orientation1: usize,
    /// Name of the right tile
    pub tile2: String,
    /// Orientation of the right tile
    pub orientation2: usize,
}

impl AdjacencyRule {
    /// Create an adjacency rule
    pub fn new(
        tile1: impl Into<String>,
        orientation1: usize,
        tile2: impl Into<String>,
        orientation2: usize,
    ) -> Self {
        Self {
            tile1: tile1.into(),
            orientation1,
            tile2: tile2.into(),
            orientation2,
        }
    }
}

impl fmt::Display for AdjacencyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{} | {}@{}",
            self.tile1, self.orientation1, self.tile2, self.orientation2
        )
    }
}

/// A tile index paired with one of its orientations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrientedTile {
    /// Index of the tile in its tile set
    pub tile: usize,
    /// Orientation index, below the tile's orientation count
    pub orientation: usize,
}

impl OrientedTile {
    /// Pair a tile index with an orientation
    pub const fn new(tile: usize, orientation: usize) -> Self {
        Self { tile, orientation }
    }
}

/// One entry of a rule's orientation closure
///
/// The second tile at `orientation2` may sit in `direction` of the first tile
/// at `orientation1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DerivedRule {
    /// Orientation of the first tile
    pub orientation1: usize,
    /// Where the second tile sits relative to the first
    pub direction: Direction,
    /// Orientation of the second tile
    pub orientation2: usize,
}

/// Apply all 8 dihedral actions to both sides of a rule
///
/// Returns the distinct derived entries in action order. Empty when either
/// orientation is outside its symmetry's orientation count.
pub fn derive_rules(rule: &AdjacencyRule, symmetry1: Symmetry, symmetry2: Symmetry) -> Vec<DerivedRule> {
    if rule.orientation1 >= symmetry1.orientation_count()
        || rule.orientation2 >= symmetry2.orientation_count()
    {
        return Vec::new();
    }

    let actions1 = symmetry1.action_map();
    let actions2 = symmetry2.action_map();
    let mut seen = HashSet::new();
    let mut derived = Vec::new();

    for ((map1, map2), &direction) in actions1.iter().zip(&actions2).zip(&ACTION_DIRECTIONS) {
        let (Some(&orientation1), Some(&orientation2)) =
            (map1.get(rule.orientation1), map2.get(rule.orientation2))
        else {
            continue;
        };
        let entry = DerivedRule {
            orientation1,
            direction,
            orientation2,
        };
        if seen.insert(entry) {
            derived.push(entry);
        }
    }
    derived
}

/// A rule left out of compilation and the reason it was dropped
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRule {
    /// The rule as authored
    pub rule: AdjacencyRule,
    /// Why it could not be compiled
    pub reason: String,
}

/// Tiles expanded into oriented elements with a compiled compatibility table
#[derive(Clone, Debug)]
pub struct CompiledTileset<P> {
    tiles: Vec<TileDefinition<P>>,
    names: HashMap<String, usize>,
    /// First catalog index of each tile
    offsets: Vec<usize>,
    elements: Vec<OrientedTile>,
    skipped: Vec<SkippedRule>,
    model: Arc<Model>,
}

impl<P> CompiledTileset<P> {
    /// Compile tiles and adjacency rules
    ///
    /// Catalog indices are assigned tile by tile, orientation by orientation.
    /// Each oriented element weighs its tile's weight divided by the tile's
    /// orientation count. Rules naming unknown tiles or out-of-range
    /// orientations are dropped with a warning and listed in [`Self::skipped`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile list is empty
    /// - Two tiles share a name
    /// - A tile weight is negative or not finite
    pub fn compile(tiles: Vec<TileDefinition<P>>, rules: &[AdjacencyRule]) -> Result<Self> {
        if tiles.is_empty() {
            return Err(invalid_input(&"tile set is empty"));
        }

        let mut names = HashMap::with_capacity(tiles.len());
        let mut offsets = Vec::with_capacity(tiles.len());
        let mut elements = Vec::new();
        let mut weights = Vec::new();

        for (index, tile) in tiles.iter().enumerate() {
            if names.insert(tile.name.clone(), index).is_some() {
                return Err(invalid_input(&format!("duplicate tile name '{}'", tile.name)));
            }
            if !tile.weight.is_finite() || tile.weight < 0.0 {
                return Err(invalid_input(&format!(
                    "tile '{}' has invalid weight {}",
                    tile.name, tile.weight
                )));
            }
            let count = tile.symmetry.orientation_count();
            offsets.push(elements.len());
            for orientation in 0..count {
                elements.push(OrientedTile::new(index, orientation));
                weights.push(tile.weight / count as f64);
            }
        }

        let mut table = CompatibilityTable::new(elements.len());
        let mut skipped = Vec::new();

        for rule in rules {
            let resolved = resolve(&tiles, &names, &offsets, rule);
            let (first, second) = match resolved {
                Ok(pair) => pair,
                Err(reason) => {
                    tracing::warn!(%rule, %reason, "skipping adjacency rule");
                    skipped.push(SkippedRule {
                        rule: rule.clone(),
                        reason,
                    });
                    continue;
                }
            };
            for derived in derive_rules(rule, first.symmetry, second.symmetry) {
                table.allow(
                    first.offset + derived.orientation1,
                    derived.direction,
                    second.offset + derived.orientation2,
                );
            }
        }

        tracing::debug!(
            tiles = tiles.len(),
            elements = elements.len(),
            rules = rules.len(),
            skipped = skipped.len(),
            compatible_pairs = table.entry_count(),
            "compiled tile set"
        );

        Ok(Self {
            model: Arc::new(Model::new(weights, table)?),
            tiles,
            names,
            offsets,
            elements,
            skipped,
        })
    }

    /// Tile definitions in index order
    pub fn tiles(&self) -> &[TileDefinition<P>] {
        &self.tiles
    }

    /// Tile definition at an index
    pub fn tile(&self, index: usize) -> Option<&TileDefinition<P>> {
        self.tiles.get(index)
    }

    /// Index of a tile by name
    pub fn tile_index(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Catalog index of a tile in a given orientation
    pub fn element_id(&self, tile: usize, orientation: usize) -> Option<usize> {
        let definition = self.tiles.get(tile)?;
        if orientation >= definition.symmetry.orientation_count() {
            return None;
        }
        self.offsets.get(tile).map(|offset| offset + orientation)
    }

    /// Oriented tile behind a catalog index
    pub fn oriented(&self, element: usize) -> Option<OrientedTile> {
        self.elements.get(element).copied()
    }

    /// All oriented elements in catalog order
    pub fn elements(&self) -> &[OrientedTile] {
        &self.elements
    }

    /// Rules dropped during compilation
    pub fn skipped(&self) -> &[SkippedRule] {
        &self.skipped
    }

    /// Weights and compatibility shared with the propagation engine
    pub const fn model(&self) -> &Arc<Model> {
        &self.model
    }
}

/// A rule endpoint resolved against the tile list
#[derive(Clone, Copy)]
struct Endpoint {
    symmetry: Symmetry,
    offset: usize,
}

fn resolve<P>(
    tiles: &[TileDefinition<P>],
    names: &HashMap<String, usize>,
    offsets: &[usize],
    rule: &AdjacencyRule,
) -> std::result::Result<(Endpoint, Endpoint), String> {
    let endpoint = |name: &str, orientation: usize| -> std::result::Result<Endpoint, String> {
        let index = names
            .get(name)
            .copied()
            .ok_or_else(|| format!("unknown tile '{name}'"))?;
        let (Some(tile), Some(&offset)) = (tiles.get(index), offsets.get(index)) else {
            return Err(format!("unknown tile '{name}'"));
        };
        let count = tile.symmetry.orientation_count();
        if orientation >= count {
            return Err(format!(
                "orientation {orientation} out of range for '{name}' ({count} orientations)"
            ));
        }
        Ok(Endpoint {
            symmetry: tile.symmetry,
            offset,
        })
    };
    Ok((
        endpoint(&rule.tile1, rule.orientation1)?,
        endpoint(&rule.tile2, rule.orientation2)?,
    ))
}
