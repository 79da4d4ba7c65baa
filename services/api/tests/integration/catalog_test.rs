use foodgram_api::error::ApiError;
use foodgram_api::usecase::ingredient::{GetIngredientUseCase, ListIngredientsUseCase};
use foodgram_api::usecase::tag::{GetTagUseCase, ListTagsUseCase};

use crate::helpers::MockStore;

#[tokio::test]
async fn should_search_ingredients_by_case_insensitive_prefix() {
    let uc = ListIngredientsUseCase {
        repo: MockStore::seeded(vec![]),
    };

    let found = uc.execute(Some("  fl ")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Flour");

    let all = uc.execute(Some("")).await.unwrap();
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_ingredient() {
    let uc = GetIngredientUseCase {
        repo: MockStore::seeded(vec![]),
    };
    assert_eq!(uc.execute(3).await.unwrap().measurement_unit, "pcs");
    assert!(matches!(uc.execute(99).await, Err(ApiError::IngredientNotFound)));
}

#[tokio::test]
async fn should_list_and_get_tags() {
    let store = MockStore::seeded(vec![]);

    let tags = ListTagsUseCase {
        repo: store.clone(),
    }
    .execute()
    .await
    .unwrap();
    assert_eq!(tags.len(), 2);

    let get = GetTagUseCase { repo: store };
    assert_eq!(get.execute(2).await.unwrap().slug, "dinner");
    assert!(matches!(get.execute(9).await, Err(ApiError::TagNotFound)));
}
