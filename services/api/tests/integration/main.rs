mod helpers;

mod catalog_test;
mod recipe_test;
mod shopping_list_test;
mod subscription_test;
