use foodgram_api::error::ApiError;
use foodgram_api::usecase::shopping_list::DownloadShoppingListUseCase;

use crate::helpers::{MockStore, amount, test_user};

#[tokio::test]
async fn should_sum_shared_ingredient_across_cart_recipes() {
    let user = test_user("cook");
    let store = MockStore::seeded(vec![user.clone()]);
    let soup = store.insert_recipe(user.id, "Soup", &[amount(1, 2), amount(4, 200)]);
    let bread = store.insert_recipe(user.id, "Bread", &[amount(1, 3), amount(2, 500)]);
    let ignored = store.insert_recipe(user.id, "Omelette", &[amount(3, 2)]);
    {
        let mut data = store.lock();
        data.cart.insert((user.id, soup));
        data.cart.insert((user.id, bread));
        data.favorites.insert((user.id, ignored));
    }

    let uc = DownloadShoppingListUseCase {
        repo: store.clone(),
    };
    let items = uc.items(Some(&user)).await.unwrap();

    let salt: Vec<_> = items.iter().filter(|i| i.name == "Salt").collect();
    assert_eq!(salt.len(), 1);
    assert_eq!(salt[0].amount, 5);
    assert_eq!(salt[0].measurement_unit, "g");

    let text = uc.execute(Some(&user)).await.unwrap();
    assert_eq!(text, "Flour - 500 g; \nMilk - 200 ml; \nSalt - 5 g; \n");
}

#[tokio::test]
async fn should_render_empty_list_for_empty_cart() {
    let user = test_user("cook");
    let store = MockStore::seeded(vec![user.clone()]);

    let uc = DownloadShoppingListUseCase { repo: store };
    assert_eq!(uc.execute(Some(&user)).await.unwrap(), "");
}

#[tokio::test]
async fn should_require_identity_for_shopping_list() {
    let uc = DownloadShoppingListUseCase {
        repo: MockStore::seeded(vec![]),
    };
    let result = uc.execute(None).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}
