//! Display grouping of attribute ids into categories.
//!
//! The taxonomy is static configuration, versioned separately from the
//! backend's attribute id namespace. It is only used to order and group
//! attributes for display; scoring never looks at it.

use crate::attribute::PolicyAttribute;
use crate::report::TrustReport;

/// One display category and the attribute ids it collects, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub title: &'static str,
    /// Icon identifier for the front end.
    pub icon: &'static str,
    pub attribute_ids: &'static [&'static str],
}

/// An ordered set of categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Taxonomy {
    pub version: &'static str,
    pub categories: &'static [Category],
}

/// A category with the report attributes that matched it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub title: &'static str,
    pub icon: &'static str,
    pub attributes: Vec<&'a PolicyAttribute>,
}

// ── Standard taxonomy ──

const DATA_PRACTICES: &[&str] = &["data_selling", "data_sharing", "third_party_tracking"];

const YOUR_RIGHTS: &[&str] = &[
    "account_deletion",
    "class_action_waiver",
    "arbitration_clause",
];

const SECURITY_RETENTION: &[&str] = &["encryption", "data_retention", "government_requests"];

const LEGAL_TERMS: &[&str] = &[
    "unilateral_changes",
    "liability_limitation",
    "content_license",
];

/// The taxonomy shipped with this release.
pub const STANDARD_TAXONOMY: Taxonomy = Taxonomy {
    version: "2025-1",
    categories: &[
        Category {
            title: "Data Practices",
            icon: "database",
            attribute_ids: DATA_PRACTICES,
        },
        Category {
            title: "Your Rights",
            icon: "scale",
            attribute_ids: YOUR_RIGHTS,
        },
        Category {
            title: "Security & Retention",
            icon: "shield",
            attribute_ids: SECURITY_RETENTION,
        },
        Category {
            title: "Legal Terms",
            icon: "file-text",
            attribute_ids: LEGAL_TERMS,
        },
    ],
};

impl Default for Taxonomy {
    fn default() -> Self {
        STANDARD_TAXONOMY
    }
}

impl Taxonomy {
    /// Group a report's attributes by category.
    ///
    /// Categories keep declaration order and attributes keep the order listed
    /// in the category, regardless of their position in the report. Ids the
    /// taxonomy does not know are skipped; categories with no match are dropped.
    pub fn classify<'a>(&self, report: &'a TrustReport) -> Vec<CategoryGroup<'a>> {
        self.categories
            .iter()
            .filter_map(|category| {
                let attributes: Vec<&PolicyAttribute> = category
                    .attribute_ids
                    .iter()
                    .filter_map(|id| report.attribute(id))
                    .collect();
                if attributes.is_empty() {
                    return None;
                }
                Some(CategoryGroup {
                    title: category.title,
                    icon: category.icon,
                    attributes,
                })
            })
            .collect()
    }

    /// Attributes in the report that no category lists.
    pub fn uncategorized<'a>(&self, report: &'a TrustReport) -> Vec<&'a PolicyAttribute> {
        report
            .attributes
            .iter()
            .filter(|a| !self.contains(&a.id))
            .collect()
    }

    /// `true` when some category lists `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.attribute_ids.contains(&id))
    }

    /// Category title for an attribute id.
    pub fn category_of(&self, id: &str) -> Option<&'static str> {
        self.categories
            .iter()
            .find(|c| c.attribute_ids.contains(&id))
            .map(|c| c.title)
    }
}
