//! Category catalog: a flat, indexed table of the two-level category tree
//!
//! The showroom navigates a fixed hierarchy: top-level categories, each of
//! which may drill down into one level of sub-categories. The catalog is
//! built once from a nested spec structure and never mutated afterwards.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Stable category identifier, unique across both levels of the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub u32);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog construction errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("duplicate category id {0}")]
    DuplicateId(CategoryId),

    #[error("category {0} nests deeper than two levels")]
    TooDeep(CategoryId),

    #[error("catalog has no top-level categories")]
    Empty,
}

/// Nested input structure for catalog construction
///
/// This mirrors the shape the content team authors: top-level entries with
/// an optional list of sub-entries. `has_subcategories` is carried through
/// separately from the actual list so a flagged-but-childless entry can be
/// detected and downgraded to a leaf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpec {
    pub id: u32,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub has_subcategories: bool,
    #[serde(default)]
    pub subcategories: Vec<CategorySpec>,
}

/// One category in the flattened catalog
#[derive(Debug, Clone)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image: String,
    /// Back-reference for lookup only; the tree owns all nodes
    pub parent: Option<CategoryId>,
    /// Ordered child ids; empty for leaves
    pub children: Vec<CategoryId>,
    /// The source flag, kept even when the child list turned out empty
    pub flagged_children: bool,
}

impl CategoryNode {
    /// A node can be drilled into only if it actually has children.
    /// A node flagged as having sub-categories but shipping none is
    /// treated as a leaf.
    pub fn is_drillable(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Immutable catalog of categories, indexed by id
#[derive(Debug)]
pub struct CategoryTree {
    nodes: HashMap<CategoryId, CategoryNode>,
    roots: Vec<CategoryId>,
}

impl CategoryTree {
    /// Build the flat catalog from the nested spec list.
    ///
    /// Validates id uniqueness across both levels and rejects nesting
    /// beyond the two meaningful depths.
    pub fn from_specs(specs: &[CategorySpec]) -> Result<Self, CatalogError> {
        if specs.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut nodes = HashMap::new();
        let mut roots = Vec::with_capacity(specs.len());

        for spec in specs {
            let id = CategoryId(spec.id);
            let mut children = Vec::with_capacity(spec.subcategories.len());

            for sub in &spec.subcategories {
                let sub_id = CategoryId(sub.id);
                if !sub.subcategories.is_empty() {
                    return Err(CatalogError::TooDeep(sub_id));
                }
                let node = CategoryNode {
                    id: sub_id,
                    title: sub.title.clone(),
                    subtitle: sub.subtitle.clone(),
                    description: sub.description.clone(),
                    image: sub.image.clone(),
                    parent: Some(id),
                    children: Vec::new(),
                    flagged_children: false,
                };
                if nodes.insert(sub_id, node).is_some() {
                    return Err(CatalogError::DuplicateId(sub_id));
                }
                children.push(sub_id);
            }

            if spec.has_subcategories && children.is_empty() {
                tracing::warn!(
                    id = spec.id,
                    title = %spec.title,
                    "category flagged with sub-categories but has none; treating as leaf"
                );
            }

            let node = CategoryNode {
                id,
                title: spec.title.clone(),
                subtitle: spec.subtitle.clone(),
                description: spec.description.clone(),
                image: spec.image.clone(),
                parent: None,
                children,
                flagged_children: spec.has_subcategories,
            };
            if nodes.insert(id, node).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }
            roots.push(id);
        }

        Ok(Self { nodes, roots })
    }

    /// The built-in showroom catalog
    pub fn builtin() -> Arc<CategoryTree> {
        BUILTIN.clone()
    }

    pub fn get(&self, id: CategoryId) -> Option<&CategoryNode> {
        self.nodes.get(&id)
    }

    /// Ordered top-level category ids
    pub fn roots(&self) -> &[CategoryId] {
        &self.roots
    }

    /// Ordered children of a node; empty for leaves and unknown ids
    pub fn children_of(&self, id: CategoryId) -> &[CategoryId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent_of(&self, id: CategoryId) -> Option<CategoryId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn is_drillable(&self, id: CategoryId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.is_drillable())
    }

    /// Total node count across both levels
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

static BUILTIN: Lazy<Arc<CategoryTree>> = Lazy::new(|| {
    Arc::new(CategoryTree::from_specs(&builtin_specs()).expect("built-in catalog is valid"))
});

fn spec(
    id: u32,
    title: &str,
    subtitle: &str,
    description: &str,
    image: &str,
    subcategories: Vec<CategorySpec>,
) -> CategorySpec {
    CategorySpec {
        id,
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        has_subcategories: !subcategories.is_empty(),
        subcategories,
    }
}

/// The showroom's standard category hierarchy: six top-level categories,
/// two of which drill down into styles/rooms.
pub fn builtin_specs() -> Vec<CategorySpec> {
    vec![
        spec(
            1,
            "KITCHEN",
            "Culinary Excellence",
            "Luxury kitchens balancing function and form.",
            "assets/categories/kitchen.avif",
            vec![
                spec(
                    101,
                    "MODERN",
                    "Contemporary Kitchen",
                    "Clean lines and minimalist culinary spaces.",
                    "assets/categories/kitchen_modern.avif",
                    vec![],
                ),
                spec(
                    102,
                    "TRADITIONAL",
                    "Classic Kitchen",
                    "Rich detail and warm, timeless tones.",
                    "assets/categories/kitchen_traditional.avif",
                    vec![],
                ),
                spec(
                    103,
                    "ART DECO",
                    "Artistic Kitchen",
                    "Bold geometry and luxurious finishes.",
                    "assets/categories/kitchen_art_deco.avif",
                    vec![],
                ),
            ],
        ),
        spec(
            2,
            "FURNITURE",
            "Elegant Comfort",
            "Furnishings for refined everyday living.",
            "assets/categories/furniture.avif",
            vec![
                spec(
                    201,
                    "LIVING ROOM",
                    "Living Space",
                    "Sophisticated pieces for shared spaces.",
                    "assets/categories/furniture_living.avif",
                    vec![],
                ),
                spec(
                    202,
                    "DINING ROOM",
                    "Dining Space",
                    "Dining sets for memorable gatherings.",
                    "assets/categories/furniture_dining.avif",
                    vec![],
                ),
                spec(
                    203,
                    "BEDROOM",
                    "Bedroom Space",
                    "Bedroom furniture built for comfort.",
                    "assets/categories/furniture_bedroom.avif",
                    vec![],
                ),
            ],
        ),
        spec(
            3,
            "LIGHT",
            "Outshine the standard",
            "Curated lighting for every space.",
            "assets/categories/light.avif",
            vec![],
        ),
        spec(
            4,
            "BATH",
            "Inner peace of Italy",
            "Bathrooms with spa-like tranquility.",
            "assets/categories/bath.avif",
            vec![],
        ),
        spec(
            5,
            "OUTDOOR",
            "Outdoor Elegance",
            "Outdoor spaces for rest and entertainment.",
            "assets/categories/outdoor.avif",
            vec![],
        ),
        spec(
            6,
            "OFFICE",
            "Calming Office",
            "Workspaces designed for focus.",
            "assets/categories/office.avif",
            vec![],
        ),
    ]
}
