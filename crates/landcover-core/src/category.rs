use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of mutually exclusive land-cover classes.
///
/// The set is fixed for the whole process; every per-category table in the
/// workspace (`CategoryMap`, display colors, carbon coefficients) is keyed
/// by this enum so that a missing entry is a compile error, not a stray
/// string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Building,
    Road,
    Water,
    Forest,
    Tree,
    Grass,
    Wetland,
    Soil,
}

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Category; 8] = [
        Category::Building,
        Category::Road,
        Category::Water,
        Category::Forest,
        Category::Tree,
        Category::Grass,
        Category::Wetland,
        Category::Soil,
    ];

    pub const COUNT: usize = 8;

    /// Stable wire name used by the coefficient CSV and JSON reports.
    pub fn label(self) -> &'static str {
        match self {
            Category::Building => "BUILDING",
            Category::Road => "ROAD",
            Category::Water => "WATER",
            Category::Forest => "FOREST",
            Category::Tree => "TREE",
            Category::Grass => "GRASS",
            Category::Wetland => "WETLAND",
            Category::Soil => "SOIL",
        }
    }

    /// Fixed display color (RGB) used by the overlay compositor and legend.
    pub fn display_color(self) -> [u8; 3] {
        match self {
            Category::Building => [255, 100, 100],
            Category::Road => [64, 64, 64],
            Category::Water => [0, 128, 255],
            Category::Forest => [0, 100, 0],
            Category::Tree => [34, 139, 34],
            Category::Grass => [144, 238, 144],
            Category::Wetland => [0, 191, 191],
            Category::Soil => [160, 82, 45],
        }
    }

    /// Position in [`Category::ALL`]; index into a [`CategoryMap`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for a string that names no known land-cover category.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown land-cover category `{0}`")]
pub struct UnknownCategoryError(pub String);

impl FromStr for Category {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownCategoryError(s.to_owned()))
    }
}

/// Fixed-size associative array keyed by [`Category`].
///
/// Replaces the string-keyed dictionaries a dynamic language would use for
/// per-category data; indexing is infallible and iteration is always in
/// [`Category::ALL`] order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryMap<T>([T; Category::COUNT]);

impl<T> CategoryMap<T> {
    /// Build a map by evaluating `f` for every category in canonical order.
    pub fn from_fn(f: impl FnMut(Category) -> T) -> Self {
        Self(Category::ALL.map(f))
    }

    #[inline]
    pub fn get(&self, category: Category) -> &T {
        &self.0[category.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, category: Category) -> &mut T {
        &mut self.0[category.index()]
    }

    /// Iterate `(category, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().zip(self.0.iter())
    }

    /// Values in canonical order, aligned with [`Category::ALL`].
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }
}

impl<T: Default> Default for CategoryMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<Category> for CategoryMap<T> {
    type Output = T;

    #[inline]
    fn index(&self, category: Category) -> &T {
        self.get(category)
    }
}

impl<T> IndexMut<Category> for CategoryMap<T> {
    #[inline]
    fn index_mut(&mut self, category: Category) -> &mut T {
        self.get_mut(category)
    }
}
