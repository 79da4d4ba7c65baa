use foodgram_api::domain::validation::ValidationError;
use foodgram_api::error::ApiError;
use foodgram_api::usecase::subscription::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};
use foodgram_domain::pagination::PageRequest;

use crate::helpers::{MockStore, RacingToggle, amount, test_user};

fn subscribe_uc(store: &MockStore) -> SubscribeUseCase<MockStore, MockStore, MockStore> {
    SubscribeUseCase {
        follows: store.clone(),
        users: store.clone(),
        recipes: store.clone(),
    }
}

#[tokio::test]
async fn should_reject_self_follow_without_creating_row() {
    let user = test_user("cook");
    let store = MockStore::seeded(vec![user.clone()]);

    let result = subscribe_uc(&store).execute(Some(&user), user.id, None).await;

    assert!(
        matches!(result, Err(ApiError::Validation(ValidationError::SelfFollow))),
        "expected SelfFollow, got {result:?}"
    );
    assert!(store.lock().follows.is_empty());
}

#[tokio::test]
async fn should_subscribe_with_recipe_preview() {
    let follower = test_user("follower");
    let author = test_user("author");
    let store = MockStore::seeded(vec![follower.clone(), author.clone()]);
    store.insert_recipe(author.id, "Soup", &[amount(1, 1)]);
    let newest = store.insert_recipe(author.id, "Bread", &[amount(2, 1)]);

    let subscription = subscribe_uc(&store)
        .execute(Some(&follower), author.id, Some(1))
        .await
        .unwrap();

    assert_eq!(subscription.author.id, author.id);
    assert_eq!(subscription.recipes_count, 2);
    assert_eq!(subscription.recipes.len(), 1);
    assert_eq!(subscription.recipes[0].id, newest);
}

#[tokio::test]
async fn should_conflict_on_duplicate_subscription() {
    let follower = test_user("follower");
    let author = test_user("author");
    let store = MockStore::seeded(vec![follower.clone(), author.clone()]);
    let uc = subscribe_uc(&store);

    uc.execute(Some(&follower), author.id, None).await.unwrap();
    let result = uc.execute(Some(&follower), author.id, None).await;

    assert!(matches!(result, Err(ApiError::AlreadySubscribed)));
    assert_eq!(store.lock().follows.len(), 1);
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_author() {
    let follower = test_user("follower");
    let store = MockStore::seeded(vec![follower.clone()]);

    let result = subscribe_uc(&store)
        .execute(Some(&follower), uuid::Uuid::now_v7(), None)
        .await;

    assert!(matches!(result, Err(ApiError::UserNotFound)));
}

#[tokio::test]
async fn should_return_not_found_when_unsubscribing_twice() {
    let follower = test_user("follower");
    let author = test_user("author");
    let store = MockStore::seeded(vec![follower.clone(), author.clone()]);
    store.lock().follows.push((follower.id, author.id));
    let uc = UnsubscribeUseCase {
        follows: store.clone(),
        users: store.clone(),
    };

    uc.execute(Some(&follower), author.id).await.unwrap();
    let result = uc.execute(Some(&follower), author.id).await;

    assert!(matches!(result, Err(ApiError::SubscriptionNotFound)));
}

#[tokio::test]
async fn should_list_followed_authors_newest_first() {
    let follower = test_user("follower");
    let first = test_user("first");
    let second = test_user("second");
    let store = MockStore::seeded(vec![follower.clone(), first.clone(), second.clone()]);
    for _ in 0..3 {
        store.insert_recipe(first.id, "Soup", &[amount(1, 1)]);
    }
    {
        let mut data = store.lock();
        data.follows.push((follower.id, first.id));
        data.follows.push((follower.id, second.id));
    }

    let uc = ListSubscriptionsUseCase {
        follows: store.clone(),
        recipes: store.clone(),
    };
    let page = uc
        .execute(Some(&follower), PageRequest::default(), Some(2))
        .await
        .unwrap();

    assert_eq!(page.count, 2);
    assert_eq!(page.results[0].author.id, second.id);
    assert_eq!(page.results[1].author.id, first.id);
    assert_eq!(page.results[1].recipes.len(), 2);
    assert_eq!(page.results[1].recipes_count, 3);

    let anonymous = uc.execute(None, PageRequest::default(), None).await;
    assert!(matches!(anonymous, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_conflict_when_concurrent_subscribe_wins_the_insert() {
    let follower = test_user("follower");
    let author = test_user("author");
    let store = MockStore::seeded(vec![follower.clone(), author.clone()]);
    let uc = SubscribeUseCase {
        follows: RacingToggle,
        users: store.clone(),
        recipes: store.clone(),
    };

    let result = uc.execute(Some(&follower), author.id, None).await;

    assert!(
        matches!(result, Err(ApiError::AlreadySubscribed)),
        "expected AlreadySubscribed, got {result:?}"
    );
}
