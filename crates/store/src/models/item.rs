//! Wardrobe item, image link, and category models.

use attire_core::Id;
use serde::{Deserialize, Serialize};

/// A wardrobe item. Only the fields the tag processor patches are modeled;
/// the full item surface lives with the external store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: Id,
    pub owner_id: Id,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Id>,
    pub subcategory_id: Option<Id>,
    pub primary_color: Option<String>,
}

/// Partial update for an item. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Id>,
    pub subcategory_id: Option<Id>,
    pub primary_color: Option<String>,
}

impl ItemPatch {
    /// Whether this patch changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.subcategory_id.is_none()
            && self.primary_color.is_none()
    }
}

/// Role of an image attached to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Original,
    ProductShot,
}

/// Item-to-image association.
///
/// Invariant: when a `ProductShot` link exists for an item it sits at
/// `sort_order = 0` and every other link for that item has
/// `sort_order >= 1` in its original relative order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageLink {
    pub id: Id,
    pub item_id: Id,
    pub image_id: Id,
    pub kind: LinkKind,
    pub sort_order: i32,
}

/// Entry of the canonical category list the tag processor matches against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub subcategories: Vec<Subcategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: Id,
    pub name: String,
}
