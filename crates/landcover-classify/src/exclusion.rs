//! Ordered overlap-exclusion rules.
//!
//! The band predicates overlap on purpose (the tree band contains most of
//! the forest band, pavement shadows match road, and so on). This pass
//! resolves overlaps with a fixed precedence: built structures and roads
//! occlude vegetation, vegetation wins ties with bare soil, and water is
//! removed from building overlap. Rules are evaluated top to bottom against
//! the current masks, so order is part of the contract.
//!
//! WETLAND and the base BUILDING/ROAD/WATER masks are deliberately not
//! reduced further; the residual overlaps are a known limitation of the
//! threshold approximation, kept for output compatibility.

use landcover_core::{Category, CategoryMap, Mask};

/// One subtraction rule: `target -= subtracted[0] | subtracted[1] | ...`.
#[derive(Clone, Copy, Debug)]
pub struct ExclusionRule {
    pub target: Category,
    pub subtracted: &'static [Category],
}

/// The precedence table, in evaluation order.
pub const EXCLUSION_RULES: [ExclusionRule; 5] = [
    ExclusionRule {
        target: Category::Tree,
        subtracted: &[Category::Forest, Category::Building, Category::Road],
    },
    ExclusionRule {
        target: Category::Grass,
        subtracted: &[
            Category::Forest,
            Category::Tree,
            Category::Building,
            Category::Road,
        ],
    },
    ExclusionRule {
        target: Category::Forest,
        subtracted: &[Category::Building, Category::Road],
    },
    ExclusionRule {
        target: Category::Soil,
        subtracted: &[
            Category::Building,
            Category::Road,
            Category::Grass,
            Category::Tree,
            Category::Forest,
        ],
    },
    ExclusionRule {
        target: Category::Water,
        subtracted: &[Category::Building],
    },
];

/// Apply [`EXCLUSION_RULES`] in order, mutating the mask set in place.
pub fn apply_exclusions(masks: &mut CategoryMap<Mask>) {
    for rule in &EXCLUSION_RULES {
        // take the target out so the other masks can be borrowed immutably
        let mut target = std::mem::replace(&mut masks[rule.target], Mask::new(0, 0));
        for &other in rule.subtracted {
            target.subtract(&masks[other]);
        }
        masks[rule.target] = target;
    }
}
