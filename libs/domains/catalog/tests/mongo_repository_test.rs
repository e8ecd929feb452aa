//! Integration tests for the MongoDB repositories
//!
//! These start a real MongoDB via testcontainers. Run with
//! `cargo test -p domain_catalog -- --ignored` on a host with Docker.

use domain_catalog::{
    CatalogError, Category, CategoryRepository, ItemRepository, ItemStatus,
    MongoCategoryRepository, MongoItemRepository,
    models::{Eligible, ItemDraft, ItemFields},
};
use std::collections::BTreeMap;
use test_utils::{TestDataBuilder, TestMongo};

fn draft(shop_id: &str, user_id: &str, category: &Category, name: &str) -> ItemDraft {
    let mut fields = ItemFields {
        name: name.to_string(),
        description: "Integration test item".to_string(),
        status: None,
        category: category.clone(),
        images: vec!["img/1.png".to_string()],
        attributes: BTreeMap::from([("color".to_string(), "red".to_string())]),
        eligible: vec![Eligible {
            id: String::new(),
            title: "Size".to_string(),
            kind: "select".to_string(),
            is_required: true,
            options: vec!["40".to_string()],
        }],
    };
    fields.assign_eligible_ids();
    ItemDraft {
        shop_id: shop_id.to_string(),
        user_id: user_id.to_string(),
        fields,
    }
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_item_lifecycle() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog_items_lifecycle");
    let repo = MongoItemRepository::new(db);
    repo.init_indexes().await.unwrap();
    let builder = TestDataBuilder::from_test_name("item_lifecycle");
    let shop = builder.hex_id(1);
    let shoes = Category::new(builder.hex_id(2), "Shoes");

    let id = repo
        .save(&draft(&shop, &builder.user_id(), &shoes, "Runner"))
        .await
        .unwrap();
    assert_eq!(id.len(), 24);

    let item = repo.get_by_id(&id).await.unwrap();
    assert_eq!(item.name, "Runner");
    assert_eq!(item.status, ItemStatus::Active);
    assert_eq!(item.category, shoes);
    assert!(item.price.is_none());
    assert_eq!(item.eligible[0].id.len(), 24);

    let mut fields = draft(&shop, "someone-else", &shoes, "Trail runner").fields;
    fields.status = Some(ItemStatus::Archived);
    assert_eq!(repo.update(&id, &fields).await.unwrap(), 1);

    let updated = repo.get_by_id(&id).await.unwrap();
    assert_eq!(updated.name, "Trail runner");
    assert_eq!(updated.status, ItemStatus::Archived);
    assert_eq!(updated.user_id, builder.user_id());

    // Same fields again: matched but nothing modified
    assert_eq!(repo.update(&id, &fields).await.unwrap(), 0);

    repo.delete(&id).await.unwrap();
    assert!(repo.get_by_id(&id).await.unwrap_err().is_not_found());
    assert!(repo.delete(&id).await.unwrap_err().is_not_found());
    assert!(repo.update(&id, &fields).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_bulk_reads_treat_empty_as_not_found() {
    let mongo = TestMongo::new().await;
    let repo = MongoItemRepository::new(mongo.database("catalog_bulk_reads"));
    let builder = TestDataBuilder::from_test_name("bulk_reads");
    let shop = builder.hex_id(1);
    let shoes = Category::new(builder.hex_id(2), "Shoes");
    let hats = Category::new(builder.hex_id(3), "Hats");

    assert!(repo.get_by_shop_id(&shop).await.unwrap_err().is_not_found());

    let a = repo.save(&draft(&shop, "u1", &shoes, "A")).await.unwrap();
    let b = repo.save(&draft(&shop, "u1", &hats, "B")).await.unwrap();
    repo.save(&draft(&shop, "u2", &shoes, "C")).await.unwrap();

    assert_eq!(repo.get_by_shop_id(&shop).await.unwrap().len(), 3);
    assert_eq!(repo.get_by_user_id("u1").await.unwrap().len(), 2);
    assert_eq!(
        repo.get_by_shop_and_category(&shop, &hats.id)
            .await
            .unwrap()
            .len(),
        1
    );
    assert_eq!(repo.get_by_category_id(&shoes.id).await.unwrap().len(), 2);

    let found = repo
        .get_by_ids(&[a.clone(), b.clone(), builder.hex_id(99)])
        .await
        .unwrap();
    assert_eq!(found.len(), 2);

    let err = repo
        .get_by_ids(&["not-hex".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidId));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_category_rewrite_on_items() {
    let mongo = TestMongo::new().await;
    let repo = MongoItemRepository::new(mongo.database("catalog_category_rewrite"));
    let builder = TestDataBuilder::from_test_name("category_rewrite");
    let shop = builder.hex_id(1);
    let shoes = Category::new(builder.hex_id(2), "Shoes");

    repo.save(&draft(&shop, "u1", &shoes, "A")).await.unwrap();
    repo.save(&draft(&shop, "u1", &shoes, "B")).await.unwrap();

    let renamed = Category::new(shoes.id.clone(), "Footwear");
    assert_eq!(repo.update_category(&renamed).await.unwrap(), 2);
    let items = repo.get_by_category_id(&shoes.id).await.unwrap();
    assert!(items.iter().all(|item| item.category.name == "Footwear"));

    let unused = Category::new(builder.hex_id(3), "Hats");
    assert!(repo.update_category(&unused).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_category_repository() {
    let mongo = TestMongo::new().await;
    let repo = MongoCategoryRepository::new(mongo.database("catalog_categories"));

    assert!(repo.list().await.unwrap().is_empty());

    let shoes = repo.create("Shoes").await.unwrap();
    assert_eq!(repo.get(&shoes.id).await.unwrap(), shoes);

    repo.rename(&Category::new(shoes.id.clone(), "Footwear"))
        .await
        .unwrap();
    // Renaming to the current name still matches
    repo.rename(&Category::new(shoes.id.clone(), "Footwear"))
        .await
        .unwrap();
    assert_eq!(repo.list().await.unwrap()[0].name, "Footwear");

    repo.delete(&shoes.id).await.unwrap();
    assert!(repo.get(&shoes.id).await.unwrap_err().is_not_found());
    assert!(repo.delete(&shoes.id).await.unwrap_err().is_not_found());
    assert!(
        repo.rename(&Category::new(shoes.id.clone(), "Gone"))
            .await
            .unwrap_err()
            .is_not_found()
    );
}
