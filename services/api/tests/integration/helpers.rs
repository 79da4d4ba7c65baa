use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Duration, Utc};
use uuid::Uuid;

use foodgram_api::domain::repository::{
    FollowRepository, IngredientRepository, RecipeCollectionRepository, RecipeRepository,
    ShoppingListRepository, TagRepository, UserRepository, ViewerContextPort,
};
use foodgram_api::domain::types::{
    CartLine, Ingredient, IngredientAmount, NewRecipe, Recipe, RecipeChanges, RecipeFilter,
    RecipeIngredient, RecipeSummary, Tag, User,
};
use foodgram_api::error::ApiError;
use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::user::{UserRole, UserStatus};

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(username: &str) -> User {
    User {
        id: Uuid::now_v7(),
        email: format!("{username}@example.com"),
        username: username.to_owned(),
        first_name: "Test".to_owned(),
        last_name: "Cook".to_owned(),
        role: UserRole::User,
        status: UserStatus::Enabled,
        created_at: Utc::now(),
    }
}

pub fn with_role(mut user: User, role: UserRole) -> User {
    user.role = role;
    user
}

pub fn blocked(mut user: User) -> User {
    user.status = UserStatus::Blocked;
    user
}

pub fn ingredient(id: i32, name: &str, unit: &str) -> Ingredient {
    Ingredient {
        id,
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
    }
}

pub fn tag(id: i32, slug: &str) -> Tag {
    Tag {
        id,
        name: slug.to_uppercase(),
        color: format!("#00000{id}"),
        slug: slug.to_owned(),
    }
}

pub fn amount(id: i32, amount: i32) -> IngredientAmount {
    IngredientAmount { id, amount }
}

// ── MockStore ────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct StoreData {
    pub users: Vec<User>,
    pub ingredients: Vec<Ingredient>,
    pub tags: Vec<Tag>,
    pub recipes: Vec<Recipe>,
    pub favorites: HashSet<(Uuid, i32)>,
    pub cart: HashSet<(Uuid, i32)>,
    /// `(follower, author)` in insertion order.
    pub follows: Vec<(Uuid, Uuid)>,
    pub next_recipe_id: i32,
}

/// In-memory store implementing every repository trait over shared state.
#[derive(Clone, Default)]
pub struct MockStore {
    pub data: Arc<Mutex<StoreData>>,
}

impl MockStore {
    /// Store seeded with four ingredients and two tags.
    pub fn seeded(users: Vec<User>) -> Self {
        let store = Self::default();
        {
            let mut data = store.lock();
            data.users = users;
            data.ingredients = vec![
                ingredient(1, "Salt", "g"),
                ingredient(2, "Flour", "g"),
                ingredient(3, "Egg", "pcs"),
                ingredient(4, "Milk", "ml"),
            ];
            data.tags = vec![tag(1, "breakfast"), tag(2, "dinner")];
            data.next_recipe_id = 1;
        }
        store
    }

    pub fn lock(&self) -> MutexGuard<'_, StoreData> {
        self.data.lock().unwrap()
    }

    pub fn favorites(&self) -> MockFavorites {
        MockFavorites(self.clone())
    }

    pub fn cart(&self) -> MockCart {
        MockCart(self.clone())
    }

    pub fn recipe_count(&self) -> usize {
        self.lock().recipes.len()
    }

    /// Insert a recipe directly, bypassing use-case checks.
    pub fn insert_recipe(&self, author_id: Uuid, name: &str, items: &[IngredientAmount]) -> i32 {
        let recipe = NewRecipe {
            name: name.to_owned(),
            image: "data:image/png;base64,AAAA".to_owned(),
            text: format!("How to cook {name}."),
            cooking_time: 10,
            tag_ids: vec![],
            ingredients: items.to_vec(),
        };
        let mut data = self.lock();
        insert(&mut data, author_id, &recipe).unwrap()
    }
}

fn insert(data: &mut StoreData, author_id: Uuid, recipe: &NewRecipe) -> Result<i32, ApiError> {
    let author = data
        .users
        .iter()
        .find(|u| u.id == author_id)
        .cloned()
        .ok_or(ApiError::UserNotFound)?;
    let tags = resolve_tags(data, &recipe.tag_ids)?;
    let ingredients = resolve_items(data, &recipe.ingredients)?;
    let id = data.next_recipe_id.max(1);
    data.next_recipe_id = id + 1;
    data.recipes.push(Recipe {
        id,
        author,
        name: recipe.name.clone(),
        image: recipe.image.clone(),
        text: recipe.text.clone(),
        cooking_time: recipe.cooking_time,
        // Strictly increasing so newest-first ordering is deterministic.
        created_at: Utc::now() + Duration::milliseconds(i64::from(id)),
        tags,
        ingredients,
    });
    Ok(id)
}

fn resolve_tags(data: &StoreData, ids: &[i32]) -> Result<Vec<Tag>, ApiError> {
    ids.iter()
        .map(|id| {
            data.tags
                .iter()
                .find(|t| t.id == *id)
                .cloned()
                .ok_or(ApiError::TagNotFound)
        })
        .collect()
}

fn resolve_items(
    data: &StoreData,
    items: &[IngredientAmount],
) -> Result<Vec<RecipeIngredient>, ApiError> {
    items
        .iter()
        .map(|item| {
            let ingredient = data
                .ingredients
                .iter()
                .find(|i| i.id == item.id)
                .ok_or(ApiError::IngredientNotFound)?;
            Ok(RecipeIngredient {
                ingredient_id: ingredient.id,
                name: ingredient.name.clone(),
                measurement_unit: ingredient.measurement_unit.clone(),
                amount: item.amount,
            })
        })
        .collect()
}

fn paginate<T>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let count = items.len() as u64;
    let results = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.clamped().limit as usize)
        .collect();
    Page { count, results }
}

impl UserRepository for MockStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ApiError> {
        Ok(self.lock().users.iter().any(|u| u.email == email))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, ApiError> {
        Ok(self.lock().users.iter().any(|u| u.username == username))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.lock().users.push(user.clone());
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, ApiError> {
        let mut users = self.lock().users.clone();
        users.reverse();
        Ok(paginate(users, page))
    }
}

impl IngredientRepository for MockStore {
    async fn list(&self, prefix: Option<&str>) -> Result<Vec<Ingredient>, ApiError> {
        let prefix = prefix.map(str::to_lowercase);
        let mut items: Vec<Ingredient> = self
            .lock()
            .ingredients
            .iter()
            .filter(|i| match &prefix {
                Some(p) => i.name.to_lowercase().starts_with(p.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, ApiError> {
        Ok(self.lock().ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, ApiError> {
        Ok(self
            .lock()
            .ingredients
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect())
    }
}

impl TagRepository for MockStore {
    async fn list(&self) -> Result<Vec<Tag>, ApiError> {
        Ok(self.lock().tags.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, ApiError> {
        Ok(self.lock().tags.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, ApiError> {
        Ok(self
            .lock()
            .tags
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }
}

impl RecipeRepository for MockStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, ApiError> {
        Ok(self.lock().recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn find_author_id(&self, id: i32) -> Result<Option<Uuid>, ApiError> {
        Ok(self
            .lock()
            .recipes
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.author.id))
    }

    async fn find_summary(&self, id: i32) -> Result<Option<RecipeSummary>, ApiError> {
        Ok(self
            .lock()
            .recipes
            .iter()
            .find(|r| r.id == id)
            .map(Recipe::summary))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, ApiError> {
        let data = self.lock();
        let mut recipes: Vec<Recipe> = data
            .recipes
            .iter()
            .filter(|r| {
                filter.tag_slugs.is_empty()
                    || r.tags.iter().any(|t| filter.tag_slugs.contains(&t.slug))
            })
            .filter(|r| filter.author_id.is_none_or(|a| r.author.id == a))
            .filter(|r| {
                filter
                    .favorited_by
                    .is_none_or(|u| data.favorites.contains(&(u, r.id)))
            })
            .filter(|r| filter.in_cart_of.is_none_or(|u| data.cart.contains(&(u, r.id))))
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(paginate(recipes, page))
    }

    async fn create(&self, author_id: Uuid, recipe: &NewRecipe) -> Result<i32, ApiError> {
        let mut data = self.lock();
        insert(&mut data, author_id, recipe)
    }

    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<(), ApiError> {
        let mut data = self.lock();
        let tags = resolve_tags(&data, &changes.tag_ids)?;
        let ingredients = resolve_items(&data, &changes.ingredients)?;
        let recipe = data
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ApiError::RecipeNotFound)?;
        if let Some(name) = &changes.name {
            recipe.name = name.clone();
        }
        if let Some(image) = &changes.image {
            recipe.image = image.clone();
        }
        if let Some(text) = &changes.text {
            recipe.text = text.clone();
        }
        if let Some(cooking_time) = changes.cooking_time {
            recipe.cooking_time = cooking_time;
        }
        recipe.tags = tags;
        recipe.ingredients = ingredients;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let mut data = self.lock();
        let before = data.recipes.len();
        data.recipes.retain(|r| r.id != id);
        data.favorites.retain(|(_, recipe_id)| *recipe_id != id);
        data.cart.retain(|(_, recipe_id)| *recipe_id != id);
        Ok(data.recipes.len() < before)
    }

    async fn list_summaries_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<RecipeSummary>, ApiError> {
        let data = self.lock();
        let mut recipes: Vec<&Recipe> = data
            .recipes
            .iter()
            .filter(|r| r.author.id == author_id)
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let limit = limit.map_or(usize::MAX, |l| l as usize);
        Ok(recipes.into_iter().take(limit).map(Recipe::summary).collect())
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, ApiError> {
        Ok(self
            .lock()
            .recipes
            .iter()
            .filter(|r| r.author.id == author_id)
            .count() as u64)
    }
}

impl ShoppingListRepository for MockStore {
    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, ApiError> {
        let data = self.lock();
        Ok(data
            .recipes
            .iter()
            .filter(|r| data.cart.contains(&(user_id, r.id)))
            .flat_map(|r| r.ingredients.iter())
            .map(|item| CartLine {
                name: item.name.clone(),
                measurement_unit: item.measurement_unit.clone(),
                amount: i64::from(item.amount),
            })
            .collect())
    }
}

impl FollowRepository for MockStore {
    async fn contains(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, ApiError> {
        Ok(self.lock().follows.contains(&(user_id, author_id)))
    }

    async fn add(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, ApiError> {
        let mut data = self.lock();
        if data.follows.contains(&(user_id, author_id)) {
            return Ok(false);
        }
        data.follows.push((user_id, author_id));
        Ok(true)
    }

    async fn remove(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, ApiError> {
        let mut data = self.lock();
        let before = data.follows.len();
        data.follows.retain(|pair| *pair != (user_id, author_id));
        Ok(data.follows.len() < before)
    }

    async fn list_authors(&self, user_id: Uuid, page: PageRequest) -> Result<Page<User>, ApiError> {
        let data = self.lock();
        let authors: Vec<User> = data
            .follows
            .iter()
            .rev()
            .filter(|(follower, _)| *follower == user_id)
            .filter_map(|(_, author)| data.users.iter().find(|u| u.id == *author).cloned())
            .collect();
        Ok(paginate(authors, page))
    }
}

impl ViewerContextPort for MockStore {
    async fn favorited_recipe_ids(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<Vec<i32>, ApiError> {
        let data = self.lock();
        Ok(recipe_ids
            .iter()
            .copied()
            .filter(|id| data.favorites.contains(&(user_id, *id)))
            .collect())
    }

    async fn carted_recipe_ids(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<Vec<i32>, ApiError> {
        let data = self.lock();
        Ok(recipe_ids
            .iter()
            .copied()
            .filter(|id| data.cart.contains(&(user_id, *id)))
            .collect())
    }

    async fn followed_author_ids(
        &self,
        user_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, ApiError> {
        let data = self.lock();
        Ok(author_ids
            .iter()
            .copied()
            .filter(|id| data.follows.contains(&(user_id, *id)))
            .collect())
    }
}

// ── MockFavorites / MockCart ─────────────────────────────────────────────────

pub struct MockFavorites(pub MockStore);

impl RecipeCollectionRepository for MockFavorites {
    async fn contains(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        Ok(self.0.lock().favorites.contains(&(user_id, recipe_id)))
    }

    async fn add(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        Ok(self.0.lock().favorites.insert((user_id, recipe_id)))
    }

    async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        Ok(self.0.lock().favorites.remove(&(user_id, recipe_id)))
    }
}

pub struct MockCart(pub MockStore);

impl RecipeCollectionRepository for MockCart {
    async fn contains(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        Ok(self.0.lock().cart.contains(&(user_id, recipe_id)))
    }

    async fn add(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        Ok(self.0.lock().cart.insert((user_id, recipe_id)))
    }

    async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        Ok(self.0.lock().cart.remove(&(user_id, recipe_id)))
    }
}

// ── RacingToggle ─────────────────────────────────────────────────────────────

/// A toggle whose pre-check misses a row that a concurrent request inserts
/// before our own insert lands.
pub struct RacingToggle;

impl RecipeCollectionRepository for RacingToggle {
    async fn contains(&self, _user_id: Uuid, _recipe_id: i32) -> Result<bool, ApiError> {
        Ok(false)
    }

    async fn add(&self, _user_id: Uuid, _recipe_id: i32) -> Result<bool, ApiError> {
        Ok(false)
    }

    async fn remove(&self, _user_id: Uuid, _recipe_id: i32) -> Result<bool, ApiError> {
        Ok(false)
    }
}

impl FollowRepository for RacingToggle {
    async fn contains(&self, _user_id: Uuid, _author_id: Uuid) -> Result<bool, ApiError> {
        Ok(false)
    }

    async fn add(&self, _user_id: Uuid, _author_id: Uuid) -> Result<bool, ApiError> {
        Ok(false)
    }

    async fn remove(&self, _user_id: Uuid, _author_id: Uuid) -> Result<bool, ApiError> {
        Ok(false)
    }

    async fn list_authors(
        &self,
        _user_id: Uuid,
        _page: PageRequest,
    ) -> Result<Page<User>, ApiError> {
        Ok(Page {
            count: 0,
            results: vec![],
        })
    }
}
