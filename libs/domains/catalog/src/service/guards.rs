//! Pre-conditions on category writes, kept free of I/O.

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, Item};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryCheck {
    Available,
    /// Another category already carries the name, ignoring case
    Collision { existing_id: String, name: String },
    /// Items still embed the category
    InUse { item_ids: Vec<String> },
}

impl CategoryCheck {
    pub fn is_available(&self) -> bool {
        matches!(self, CategoryCheck::Available)
    }

    /// Map a failed check onto the conflict it represents.
    pub fn into_result(self, category_id: &str) -> CatalogResult<()> {
        match self {
            CategoryCheck::Available => Ok(()),
            CategoryCheck::Collision { name, .. } => Err(CatalogError::DuplicateCategory(name)),
            CategoryCheck::InUse { item_ids } => Err(CatalogError::CategoryInUse {
                category_id: category_id.to_string(),
                item_ids,
            }),
        }
    }
}

/// Compare `name` against every existing category. The category being renamed
/// is not exempt, so re-submitting its current name collides too.
pub fn check_name_available(name: &str, existing: &[Category]) -> CategoryCheck {
    let wanted = name.to_lowercase();
    existing
        .iter()
        .find(|c| c.name.to_lowercase() == wanted)
        .map_or(CategoryCheck::Available, |c| CategoryCheck::Collision {
            existing_id: c.id.clone(),
            name: c.name.clone(),
        })
}

/// `referencing` are the items embedding the category about to be deleted.
pub fn check_unused(referencing: &[Item]) -> CategoryCheck {
    if referencing.is_empty() {
        CategoryCheck::Available
    } else {
        CategoryCheck::InUse {
            item_ids: referencing.iter().map(|item| item.id.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemStatus;

    fn categories() -> Vec<Category> {
        vec![Category::new("c1", "Shoes"), Category::new("c2", "Hats")]
    }

    fn item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            name: "Runner".to_string(),
            description: String::new(),
            status: ItemStatus::Active,
            shop_id: "s1".to_string(),
            user_id: "u1".to_string(),
            category: Category::new("c1", "Shoes"),
            price: None,
            images: vec![],
            attributes: Default::default(),
            eligible: vec![],
        }
    }

    #[test]
    fn test_new_name_is_available() {
        assert!(check_name_available("Footwear", &categories()).is_available());
        assert!(check_name_available("Shoes", &[]).is_available());
    }

    #[test]
    fn test_collision_ignores_case() {
        assert_eq!(
            check_name_available("sHOES", &categories()),
            CategoryCheck::Collision {
                existing_id: "c1".to_string(),
                name: "Shoes".to_string(),
            }
        );
    }

    #[test]
    fn test_collision_maps_to_duplicate() {
        let err = check_name_available("hats", &categories())
            .into_result("c9")
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCategory(name) if name == "Hats"));
    }

    #[test]
    fn test_referenced_category_is_in_use() {
        let check = check_unused(&[item("a1"), item("a2")]);
        let err = check.into_result("c1").unwrap_err();
        match err {
            CatalogError::CategoryInUse {
                category_id,
                item_ids,
            } => {
                assert_eq!(category_id, "c1");
                assert_eq!(item_ids, ["a1", "a2"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unreferenced_category_is_available() {
        assert!(check_unused(&[]).into_result("c1").is_ok());
    }
}
