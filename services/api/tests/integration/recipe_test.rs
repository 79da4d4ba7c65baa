use foodgram_api::domain::types::IngredientAmount;
use foodgram_api::domain::validation::ValidationError;
use foodgram_api::error::ApiError;
use foodgram_api::usecase::recipe::{
    CreateRecipeInput, CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase,
    ListRecipesInput, ListRecipesUseCase, UpdateRecipeInput, UpdateRecipeUseCase,
};
use foodgram_domain::pagination::PageRequest;
use foodgram_domain::user::UserRole;

use crate::helpers::{MockStore, amount, blocked, test_user, with_role};

fn pancakes() -> CreateRecipeInput {
    CreateRecipeInput {
        name: "Pancakes".to_owned(),
        image: "data:image/png;base64,AAAA".to_owned(),
        text: "Mix and fry.".to_owned(),
        cooking_time: 15,
        tags: vec![1],
        ingredients: vec![amount(1, 2), amount(2, 3)],
    }
}

fn replace_with(ingredients: Vec<IngredientAmount>) -> UpdateRecipeInput {
    UpdateRecipeInput {
        name: None,
        image: None,
        text: None,
        cooking_time: None,
        tags: vec![],
        ingredients,
    }
}

fn create_uc(store: &MockStore) -> CreateRecipeUseCase<MockStore, MockStore, MockStore> {
    CreateRecipeUseCase {
        recipes: store.clone(),
        ingredients: store.clone(),
        tags: store.clone(),
    }
}

fn update_uc(store: &MockStore) -> UpdateRecipeUseCase<MockStore, MockStore, MockStore> {
    UpdateRecipeUseCase {
        recipes: store.clone(),
        ingredients: store.clone(),
        tags: store.clone(),
    }
}

#[tokio::test]
async fn should_create_recipe_with_line_items_and_tags() {
    let author = test_user("author");
    let store = MockStore::seeded(vec![author.clone()]);

    let recipe = create_uc(&store)
        .execute(Some(&author), pancakes())
        .await
        .unwrap();

    assert_eq!(recipe.author.id, author.id);
    assert_eq!(recipe.tags.len(), 1);
    assert_eq!(recipe.tags[0].slug, "breakfast");
    let items: Vec<(i32, i32)> = recipe
        .ingredients
        .iter()
        .map(|i| (i.ingredient_id, i.amount))
        .collect();
    assert_eq!(items, vec![(1, 2), (2, 3)]);
}

#[tokio::test]
async fn should_replace_all_line_items_on_update() {
    let author = test_user("author");
    let store = MockStore::seeded(vec![author.clone()]);
    let created = create_uc(&store)
        .execute(Some(&author), pancakes())
        .await
        .unwrap();

    let updated = update_uc(&store)
        .execute(Some(&author), created.id, replace_with(vec![amount(3, 1)]))
        .await
        .unwrap();

    assert_eq!(updated.ingredients.len(), 1, "old line items must be gone");
    assert_eq!(updated.ingredients[0].ingredient_id, 3);
    assert_eq!(updated.ingredients[0].amount, 1);
    assert!(updated.tags.is_empty(), "tags are replaced by the payload");
}

#[tokio::test]
async fn should_keep_scalar_fields_missing_from_update() {
    let author = test_user("author");
    let store = MockStore::seeded(vec![author.clone()]);
    let created = create_uc(&store)
        .execute(Some(&author), pancakes())
        .await
        .unwrap();

    let mut changes = replace_with(vec![amount(1, 5)]);
    changes.cooking_time = Some(30);
    let updated = update_uc(&store)
        .execute(Some(&author), created.id, changes)
        .await
        .unwrap();

    assert_eq!(updated.name, "Pancakes");
    assert_eq!(updated.text, "Mix and fry.");
    assert_eq!(updated.cooking_time, 30);
}

#[tokio::test]
async fn should_reject_unknown_ingredient_without_persisting() {
    let author = test_user("author");
    let store = MockStore::seeded(vec![author.clone()]);
    let mut input = pancakes();
    input.ingredients.push(amount(99, 1));

    let result = create_uc(&store).execute(Some(&author), input).await;

    assert!(
        matches!(result, Err(ApiError::IngredientNotFound)),
        "expected IngredientNotFound, got {result:?}"
    );
    assert_eq!(store.recipe_count(), 0);
}

#[tokio::test]
async fn should_reject_unknown_tag() {
    let author = test_user("author");
    let store = MockStore::seeded(vec![author.clone()]);
    let mut input = pancakes();
    input.tags = vec![1, 42];

    let result = create_uc(&store).execute(Some(&author), input).await;

    assert!(matches!(result, Err(ApiError::TagNotFound)));
}

#[tokio::test]
async fn should_reject_duplicate_ingredient_before_persisting() {
    let author = test_user("author");
    let store = MockStore::seeded(vec![author.clone()]);
    let mut input = pancakes();
    input.ingredients = vec![amount(1, 2), amount(1, 4)];

    let result = create_uc(&store).execute(Some(&author), input).await;

    assert!(matches!(
        result,
        Err(ApiError::Validation(ValidationError::DuplicateIngredient(1)))
    ));
    assert_eq!(store.recipe_count(), 0);
}

#[tokio::test]
async fn should_reject_anonymous_create() {
    let store = MockStore::seeded(vec![]);
    let result = create_uc(&store).execute(None, pancakes()).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_forbid_update_by_other_user() {
    let author = test_user("author");
    let other = test_user("other");
    let store = MockStore::seeded(vec![author.clone(), other.clone()]);
    let id = store.insert_recipe(author.id, "Soup", &[amount(1, 1)]);

    let result = update_uc(&store)
        .execute(Some(&other), id, replace_with(vec![amount(2, 1)]))
        .await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[tokio::test]
async fn should_check_ownership_before_validating_update() {
    let author = test_user("author");
    let other = test_user("other");
    let store = MockStore::seeded(vec![author.clone(), other.clone()]);
    let id = store.insert_recipe(author.id, "Soup", &[amount(1, 1)]);

    let result = update_uc(&store)
        .execute(Some(&other), id, replace_with(vec![]))
        .await;

    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_report_missing_recipe_before_validating_update() {
    let author = test_user("author");
    let store = MockStore::seeded(vec![author.clone()]);

    let result = update_uc(&store)
        .execute(Some(&author), 9999, replace_with(vec![]))
        .await;

    assert!(
        matches!(result, Err(ApiError::RecipeNotFound)),
        "expected RecipeNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_validate_update_from_author() {
    let author = test_user("author");
    let store = MockStore::seeded(vec![author.clone()]);
    let id = store.insert_recipe(author.id, "Soup", &[amount(1, 1)]);

    let result = update_uc(&store)
        .execute(Some(&author), id, replace_with(vec![]))
        .await;

    assert!(matches!(
        result,
        Err(ApiError::Validation(ValidationError::EmptyIngredients))
    ));
}

#[tokio::test]
async fn should_let_moderators_edit_and_delete_any_recipe() {
    let author = test_user("author");
    let admin = with_role(test_user("admin"), UserRole::Admin);
    let root = with_role(test_user("root"), UserRole::Superuser);
    let store = MockStore::seeded(vec![author.clone(), admin.clone(), root.clone()]);
    let id = store.insert_recipe(author.id, "Soup", &[amount(1, 1)]);

    update_uc(&store)
        .execute(Some(&admin), id, replace_with(vec![amount(2, 7)]))
        .await
        .unwrap();

    let uc = DeleteRecipeUseCase {
        recipes: store.clone(),
    };
    uc.execute(Some(&root), id).await.unwrap();
    assert_eq!(store.recipe_count(), 0);
}

#[tokio::test]
async fn should_reject_every_write_from_suspended_author() {
    let author = blocked(test_user("author"));
    let store = MockStore::seeded(vec![author.clone()]);
    let id = store.insert_recipe(author.id, "Soup", &[amount(1, 1)]);

    let created = create_uc(&store).execute(Some(&author), pancakes()).await;
    assert!(matches!(created, Err(ApiError::AccountSuspended)));

    let updated = update_uc(&store)
        .execute(Some(&author), id, replace_with(vec![amount(2, 1)]))
        .await;
    assert!(matches!(updated, Err(ApiError::AccountSuspended)));

    let deleted = DeleteRecipeUseCase {
        recipes: store.clone(),
    }
    .execute(Some(&author), id)
    .await;
    assert!(matches!(deleted, Err(ApiError::AccountSuspended)));
    assert_eq!(store.recipe_count(), 1);
}

#[tokio::test]
async fn should_return_not_found_for_missing_recipe() {
    let author = test_user("author");
    let store = MockStore::seeded(vec![author.clone()]);

    let updated = update_uc(&store)
        .execute(Some(&author), 404, replace_with(vec![amount(1, 1)]))
        .await;
    assert!(matches!(updated, Err(ApiError::RecipeNotFound)));

    let fetched = GetRecipeUseCase {
        recipes: store.clone(),
        viewer_ctx: store.clone(),
    }
    .execute(None, 404)
    .await;
    assert!(matches!(fetched, Err(ApiError::RecipeNotFound)));
}

#[tokio::test]
async fn should_annotate_recipe_for_viewer() {
    let author = test_user("author");
    let viewer = test_user("viewer");
    let store = MockStore::seeded(vec![author.clone(), viewer.clone()]);
    let id = store.insert_recipe(author.id, "Soup", &[amount(1, 1)]);
    {
        let mut data = store.lock();
        data.favorites.insert((viewer.id, id));
        data.follows.push((viewer.id, author.id));
    }

    let uc = GetRecipeUseCase {
        recipes: store.clone(),
        viewer_ctx: store.clone(),
    };
    let seen = uc.execute(Some(&viewer), id).await.unwrap();
    assert!(seen.is_favorited);
    assert!(!seen.is_in_shopping_cart);
    assert!(seen.author_is_subscribed);

    let anonymous = uc.execute(None, id).await.unwrap();
    assert!(!anonymous.is_favorited);
    assert!(!anonymous.author_is_subscribed);
}

#[tokio::test]
async fn should_list_newest_first_with_filters() {
    let author = test_user("author");
    let viewer = test_user("viewer");
    let store = MockStore::seeded(vec![author.clone(), viewer.clone()]);
    let soup = store.insert_recipe(author.id, "Soup", &[amount(1, 1)]);
    let bread = store.insert_recipe(author.id, "Bread", &[amount(2, 500)]);
    let omelette = create_uc(&store)
        .execute(
            Some(&author),
            CreateRecipeInput {
                name: "Omelette".to_owned(),
                ingredients: vec![amount(3, 2)],
                ..pancakes()
            },
        )
        .await
        .unwrap()
        .id;
    store.lock().favorites.insert((viewer.id, soup));

    let uc = ListRecipesUseCase {
        recipes: store.clone(),
        viewer_ctx: store.clone(),
    };

    let all = uc
        .execute(None, ListRecipesInput::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.count, 3);
    let ids: Vec<i32> = all.results.iter().map(|v| v.recipe.id).collect();
    assert_eq!(ids, vec![omelette, bread, soup]);

    let tagged = uc
        .execute(
            None,
            ListRecipesInput {
                tag_slugs: vec!["breakfast".to_owned(), "brunch".to_owned()],
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(tagged.count, 1);
    assert_eq!(tagged.results[0].recipe.id, omelette);

    let favorites = uc
        .execute(
            Some(&viewer),
            ListRecipesInput {
                is_favorited: true,
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(favorites.count, 1);
    assert!(favorites.results[0].is_favorited);

    let anonymous_favorites = uc
        .execute(
            None,
            ListRecipesInput {
                is_favorited: true,
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(anonymous_favorites.count, 3, "flag is ignored for anonymous viewers");

    let second_page = uc
        .execute(
            None,
            ListRecipesInput::default(),
            PageRequest { limit: 2, page: 2 },
        )
        .await
        .unwrap();
    assert_eq!(second_page.count, 3);
    assert_eq!(second_page.results.len(), 1);
    assert_eq!(second_page.results[0].recipe.id, soup);
}
