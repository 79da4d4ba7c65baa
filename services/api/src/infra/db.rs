use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ActiveValue::Unchanged, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Statement, TransactionError,
    TransactionTrait,
    sea_query::{Expr, Func, OnConflict, Query},
};
use uuid::Uuid;

use foodgram_api_schema::{
    favorites, follows, ingredients, recipe_ingredients, recipe_tags, recipes,
    shopping_cart_entries, tags, users,
};
use foodgram_core::sea_ext::DbErrExt as _;
use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::user::{UserRole, UserStatus};

use crate::domain::repository::{
    FollowRepository, IngredientRepository, RecipeCollectionRepository, RecipeRepository,
    ShoppingListRepository, TagRepository, UserRepository, ViewerContextPort,
};
use crate::domain::types::{
    CartLine, Ingredient, IngredientAmount, NewRecipe, Recipe, RecipeChanges, RecipeFilter,
    RecipeIngredient, RecipeSummary, Tag, User,
};
use crate::error::ApiError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ApiError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await
            .context("count users by email")?;
        Ok(count > 0)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, ApiError> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.db)
            .await
            .context("count users by username")?;
        Ok(count > 0)
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            role: Set(user.role.as_str().to_owned()),
            status: Set(user.status.as_str().to_owned()),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            // Lost a race with a concurrent registration.
            Err(err) if err.is_unique_violation() => {
                if self.exists_by_email(&user.email).await? {
                    Err(ApiError::EmailTaken)
                } else {
                    Err(ApiError::UsernameTaken)
                }
            }
            Err(err) => Err(anyhow::Error::new(err).context("create user").into()),
        }
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, ApiError> {
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .order_by_desc(users::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list users")?;
        let results = models
            .into_iter()
            .map(user_from_model)
            .collect::<Result<_, _>>()?;
        Ok(Page { count, results })
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    Ok(User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        role: model.role.parse::<UserRole>().context("parse user role")?,
        status: model
            .status
            .parse::<UserStatus>()
            .context("parse user status")?,
        created_at: model.created_at,
    })
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

impl IngredientRepository for DbIngredientRepository {
    async fn list(&self, prefix: Option<&str>) -> Result<Vec<Ingredient>, ApiError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = prefix {
            let pattern = format!("{}%", escape_like(&prefix.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(ingredients::Column::Name))).like(pattern),
            );
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .all(&self.db)
            .await
            .context("list ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, ApiError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, ApiError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = ingredients::Entity::find()
            .filter(ingredients::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .context("find ingredients by ids")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

/// Escape LIKE metacharacters so user input only matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, ApiError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, ApiError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, ApiError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = tags::Entity::find()
            .filter(tags::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .context("find tags by ids")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        color: model.color,
        slug: model.slug,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

impl RecipeRepository for DbRecipeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, ApiError> {
        let Some(model) = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?
        else {
            return Ok(None);
        };
        Ok(hydrate_recipes(&self.db, vec![model]).await?.pop())
    }

    async fn find_author_id(&self, id: i32) -> Result<Option<Uuid>, ApiError> {
        let author_id = recipes::Entity::find_by_id(id)
            .select_only()
            .column(recipes::Column::AuthorId)
            .into_tuple::<Uuid>()
            .one(&self.db)
            .await
            .context("find recipe author")?;
        Ok(author_id)
    }

    async fn find_summary(&self, id: i32) -> Result<Option<RecipeSummary>, ApiError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe summary")?;
        Ok(model.map(summary_from_model))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, ApiError> {
        let mut query = recipes::Entity::find();
        if !filter.tag_slugs.is_empty() {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column((recipe_tags::Entity, recipe_tags::Column::RecipeId))
                        .from(recipe_tags::Entity)
                        .inner_join(
                            tags::Entity,
                            Expr::col((tags::Entity, tags::Column::Id))
                                .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
                        )
                        .and_where(
                            Expr::col((tags::Entity, tags::Column::Slug))
                                .is_in(filter.tag_slugs.clone()),
                        )
                        .to_owned(),
                ),
            );
        }
        if let Some(author_id) = filter.author_id {
            query = query.filter(recipes::Column::AuthorId.eq(author_id));
        }
        if let Some(user_id) = filter.favorited_by {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(favorites::Column::RecipeId)
                        .from(favorites::Entity)
                        .and_where(Expr::col(favorites::Column::UserId).eq(user_id))
                        .to_owned(),
                ),
            );
        }
        if let Some(user_id) = filter.in_cart_of {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(shopping_cart_entries::Column::RecipeId)
                        .from(shopping_cart_entries::Entity)
                        .and_where(Expr::col(shopping_cart_entries::Column::UserId).eq(user_id))
                        .to_owned(),
                ),
            );
        }

        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count recipes")?;
        let models = query
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list recipes")?;
        let results = hydrate_recipes(&self.db, models).await?;
        Ok(Page { count, results })
    }

    async fn create(&self, author_id: Uuid, recipe: &NewRecipe) -> Result<i32, ApiError> {
        self.db
            .transaction::<_, i32, DbErr>(|txn| {
                let recipe = recipe.clone();
                Box::pin(async move {
                    let model = recipes::ActiveModel {
                        author_id: Set(author_id),
                        name: Set(recipe.name),
                        image: Set(recipe.image),
                        text: Set(recipe.text),
                        cooking_time: Set(recipe.cooking_time),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    insert_recipe_tags(txn, model.id, &recipe.tag_ids).await?;
                    insert_recipe_ingredients(txn, model.id, &recipe.ingredients).await?;
                    Ok(model.id)
                })
            })
            .await
            .map_err(|err| recipe_write_error(err, "create recipe"))
    }

    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let changes = changes.clone();
                Box::pin(async move {
                    let mut am = recipes::ActiveModel {
                        id: Unchanged(id),
                        ..Default::default()
                    };
                    if let Some(name) = changes.name {
                        am.name = Set(name);
                    }
                    if let Some(image) = changes.image {
                        am.image = Set(image);
                    }
                    if let Some(text) = changes.text {
                        am.text = Set(text);
                    }
                    if let Some(cooking_time) = changes.cooking_time {
                        am.cooking_time = Set(cooking_time);
                    }
                    if am.is_changed() {
                        am.update(txn).await?;
                    }

                    recipe_tags::Entity::delete_many()
                        .filter(recipe_tags::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await?;
                    insert_recipe_tags(txn, id, &changes.tag_ids).await?;

                    recipe_ingredients::Entity::delete_many()
                        .filter(recipe_ingredients::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await?;
                    insert_recipe_ingredients(txn, id, &changes.ingredients).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|err| recipe_write_error(err, "update recipe"))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_summaries_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<RecipeSummary>, ApiError> {
        let mut query = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let models = query
            .all(&self.db)
            .await
            .context("list recipe summaries by author")?;
        Ok(models.into_iter().map(summary_from_model).collect())
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, ApiError> {
        let count = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .context("count recipes by author")?;
        Ok(count)
    }
}

async fn insert_recipe_tags<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    tag_ids: &[i32],
) -> Result<(), DbErr> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    recipe_tags::Entity::insert_many(tag_ids.iter().map(|&tag_id| recipe_tags::ActiveModel {
        recipe_id: Set(recipe_id),
        tag_id: Set(tag_id),
    }))
    .exec_without_returning(conn)
    .await?;
    Ok(())
}

async fn insert_recipe_ingredients<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    items: &[IngredientAmount],
) -> Result<(), DbErr> {
    if items.is_empty() {
        return Ok(());
    }
    recipe_ingredients::Entity::insert_many(items.iter().map(|item| {
        recipe_ingredients::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient_id: Set(item.id),
            amount: Set(item.amount),
            ..Default::default()
        }
    }))
    .exec_without_returning(conn)
    .await?;
    Ok(())
}

const FK_RECIPE_INGREDIENTS_RECIPE: &str = "fk_recipe_ingredients_recipe";
const FK_RECIPE_INGREDIENTS_INGREDIENT: &str = "fk_recipe_ingredients_ingredient";
const FK_RECIPE_TAGS_RECIPE: &str = "fk_recipe_tags_recipe";
const FK_RECIPE_TAGS_TAG: &str = "fk_recipe_tags_tag";

/// Name the row a foreign-key failure points at, by the violated constraint.
fn missing_reference(message: &str) -> Option<ApiError> {
    if message.contains(FK_RECIPE_INGREDIENTS_RECIPE) || message.contains(FK_RECIPE_TAGS_RECIPE) {
        Some(ApiError::RecipeNotFound)
    } else if message.contains(FK_RECIPE_TAGS_TAG) {
        Some(ApiError::TagNotFound)
    } else if message.contains(FK_RECIPE_INGREDIENTS_INGREDIENT) {
        Some(ApiError::IngredientNotFound)
    } else {
        None
    }
}

/// A foreign-key failure means a referenced row vanished after the checks ran.
fn recipe_write_error(err: TransactionError<DbErr>, action: &'static str) -> ApiError {
    if let TransactionError::Transaction(db_err) = &err {
        if let Some(message) = db_err.foreign_key_violation() {
            if let Some(mapped) = missing_reference(&message) {
                return mapped;
            }
        }
        if matches!(db_err, DbErr::RecordNotUpdated) {
            return ApiError::RecipeNotFound;
        }
    }
    anyhow::Error::new(err).context(action).into()
}

fn summary_from_model(model: recipes::Model) -> RecipeSummary {
    RecipeSummary {
        id: model.id,
        name: model.name,
        image: model.image,
        cooking_time: model.cooking_time,
    }
}

/// Load authors, tags and line items for a page of recipes, keeping input order.
async fn hydrate_recipes(
    db: &DatabaseConnection,
    models: Vec<recipes::Model>,
) -> Result<Vec<Recipe>, ApiError> {
    if models.is_empty() {
        return Ok(vec![]);
    }
    let recipe_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let mut author_ids: Vec<Uuid> = models.iter().map(|m| m.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors: HashMap<Uuid, User> = users::Entity::find()
        .filter(users::Column::Id.is_in(author_ids))
        .all(db)
        .await
        .context("load recipe authors")?
        .into_iter()
        .map(|model| user_from_model(model).map(|user| (user.id, user)))
        .collect::<Result<_, _>>()?;

    let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
    let tag_rows = recipe_tags::Entity::find()
        .filter(recipe_tags::Column::RecipeId.is_in(recipe_ids.clone()))
        .order_by_asc(recipe_tags::Column::TagId)
        .find_also_related(tags::Entity)
        .all(db)
        .await
        .context("load recipe tags")?;
    for (link, tag) in tag_rows {
        if let Some(tag) = tag {
            tags_by_recipe
                .entry(link.recipe_id)
                .or_default()
                .push(tag_from_model(tag));
        }
    }

    let mut items_by_recipe: HashMap<i32, Vec<RecipeIngredient>> = HashMap::new();
    let item_rows = recipe_ingredients::Entity::find()
        .filter(recipe_ingredients::Column::RecipeId.is_in(recipe_ids))
        .order_by_asc(recipe_ingredients::Column::Id)
        .find_also_related(ingredients::Entity)
        .all(db)
        .await
        .context("load recipe ingredients")?;
    for (item, ingredient) in item_rows {
        if let Some(ingredient) = ingredient {
            items_by_recipe
                .entry(item.recipe_id)
                .or_default()
                .push(RecipeIngredient {
                    ingredient_id: ingredient.id,
                    name: ingredient.name,
                    measurement_unit: ingredient.measurement_unit,
                    amount: item.amount,
                });
        }
    }

    models
        .into_iter()
        .map(|model| -> Result<Recipe, ApiError> {
            let author = authors
                .get(&model.author_id)
                .cloned()
                .with_context(|| format!("author of recipe {} not found", model.id))?;
            Ok(Recipe {
                id: model.id,
                author,
                tags: tags_by_recipe.remove(&model.id).unwrap_or_default(),
                ingredients: items_by_recipe.remove(&model.id).unwrap_or_default(),
                name: model.name,
                image: model.image,
                text: model.text,
                cooking_time: model.cooking_time,
                created_at: model.created_at,
            })
        })
        .collect()
}

// ── Favorites ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFavoriteRepository {
    pub db: DatabaseConnection,
}

impl RecipeCollectionRepository for DbFavoriteRepository {
    async fn contains(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        let model = favorites::Entity::find_by_id((user_id, recipe_id))
            .one(&self.db)
            .await
            .context("find favorite")?;
        Ok(model.is_some())
    }

    async fn add(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        let rows = favorites::Entity::insert(favorites::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert favorite")?;
        Ok(rows > 0)
    }

    async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        let result = favorites::Entity::delete_by_id((user_id, recipe_id))
            .exec(&self.db)
            .await
            .context("delete favorite")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Shopping cart ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbShoppingCartRepository {
    pub db: DatabaseConnection,
}

impl RecipeCollectionRepository for DbShoppingCartRepository {
    async fn contains(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        let model = shopping_cart_entries::Entity::find_by_id((user_id, recipe_id))
            .one(&self.db)
            .await
            .context("find shopping cart entry")?;
        Ok(model.is_some())
    }

    async fn add(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        let rows = shopping_cart_entries::Entity::insert(shopping_cart_entries::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                shopping_cart_entries::Column::UserId,
                shopping_cart_entries::Column::RecipeId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert shopping cart entry")?;
        Ok(rows > 0)
    }

    async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError> {
        let result = shopping_cart_entries::Entity::delete_by_id((user_id, recipe_id))
            .exec(&self.db)
            .await
            .context("delete shopping cart entry")?;
        Ok(result.rows_affected > 0)
    }
}

impl ShoppingListRepository for DbShoppingCartRepository {
    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, ApiError> {
        #[derive(Debug, FromQueryResult)]
        struct CartLineRow {
            name: String,
            measurement_unit: String,
            amount: i64,
        }

        let sql = r#"
            SELECT i.name, i.measurement_unit, ri.amount::BIGINT AS amount
            FROM shopping_cart_entries AS sc
            JOIN recipe_ingredients AS ri ON ri.recipe_id = sc.recipe_id
            JOIN ingredients AS i ON i.id = ri.ingredient_id
            WHERE sc.user_id = $1
        "#;

        let rows = CartLineRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [user_id.into()],
        ))
        .all(&self.db)
        .await
        .context("load shopping cart lines")?;

        Ok(rows
            .into_iter()
            .map(|row| CartLine {
                name: row.name,
                measurement_unit: row.measurement_unit,
                amount: row.amount,
            })
            .collect())
    }
}

// ── Follows ──────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFollowRepository {
    pub db: DatabaseConnection,
}

impl FollowRepository for DbFollowRepository {
    async fn contains(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, ApiError> {
        let model = follows::Entity::find_by_id((user_id, author_id))
            .one(&self.db)
            .await
            .context("find follow")?;
        Ok(model.is_some())
    }

    async fn add(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, ApiError> {
        let rows = follows::Entity::insert(follows::ActiveModel {
            user_id: Set(user_id),
            author_id: Set(author_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([follows::Column::UserId, follows::Column::AuthorId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert follow")?;
        Ok(rows > 0)
    }

    async fn remove(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, ApiError> {
        let result = follows::Entity::delete_by_id((user_id, author_id))
            .exec(&self.db)
            .await
            .context("delete follow")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_authors(&self, user_id: Uuid, page: PageRequest) -> Result<Page<User>, ApiError> {
        let query = users::Entity::find()
            .join_rev(JoinType::InnerJoin, follows::Relation::Author.def())
            .filter(follows::Column::UserId.eq(user_id));

        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count followed authors")?;
        let models = query
            .order_by_desc(follows::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list followed authors")?;
        let results = models
            .into_iter()
            .map(user_from_model)
            .collect::<Result<_, _>>()?;
        Ok(Page { count, results })
    }
}

// ── Viewer context ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbViewerContext {
    pub db: DatabaseConnection,
}

impl ViewerContextPort for DbViewerContext {
    async fn favorited_recipe_ids(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<Vec<i32>, ApiError> {
        let ids = favorites::Entity::find()
            .select_only()
            .column(favorites::Column::RecipeId)
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::RecipeId.is_in(recipe_ids.to_vec()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("load favorited recipe ids")?;
        Ok(ids)
    }

    async fn carted_recipe_ids(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<Vec<i32>, ApiError> {
        let ids = shopping_cart_entries::Entity::find()
            .select_only()
            .column(shopping_cart_entries::Column::RecipeId)
            .filter(shopping_cart_entries::Column::UserId.eq(user_id))
            .filter(shopping_cart_entries::Column::RecipeId.is_in(recipe_ids.to_vec()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("load carted recipe ids")?;
        Ok(ids)
    }

    async fn followed_author_ids(
        &self,
        user_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, ApiError> {
        let ids = follows::Entity::find()
            .select_only()
            .column(follows::Column::AuthorId)
            .filter(follows::Column::UserId.eq(user_id))
            .filter(follows::Column::AuthorId.is_in(author_ids.to_vec()))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .context("load followed author ids")?;
        Ok(ids)
    }
}
