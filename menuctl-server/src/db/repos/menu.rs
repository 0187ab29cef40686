//! Menu item repository
//!
//! - list_for_restaurant: restaurant id seeded as `$1`, then optional filters
//! - find_by_ids: IN-list sized to the input

use crate::db::executor::{QueryExecutor, Row};
use crate::db::{DbError, SqlValue};
use crate::models::{MenuFilter, RecordId};
use crate::query::{in_list_placeholders, FilterBuilder};

const SELECT_MENU_ITEMS: &str = "SELECT id, restaurant_id, name, category, price::float8 AS price, \
     is_available, created_at FROM menu_items";

/// Menu item repository
pub struct MenuRepo<'a> {
    executor: &'a dyn QueryExecutor,
}

impl<'a> MenuRepo<'a> {
    pub fn new(executor: &'a dyn QueryExecutor) -> Self {
        Self { executor }
    }

    /// Menu of one restaurant, alphabetical.
    ///
    /// An unknown restaurant yields an empty list, not an error.
    pub async fn list_for_restaurant(
        &self,
        restaurant_id: RecordId,
        filter: &MenuFilter,
    ) -> Result<Vec<Row>, DbError> {
        let built = FilterBuilder::new()
            .require_eq("restaurant_id", restaurant_id.get())
            .eq("is_available", filter.available)
            .eq_ignore_case("category", filter.category.as_deref())
            .paginate(filter.page);

        let sql = built.to_sql(SELECT_MENU_ITEMS, "name ASC, id ASC");
        self.executor.run(&sql, built.into_params()).await
    }

    /// Items whose id is in `ids`. Missing ids are simply absent from the
    /// result; an empty slice matches nothing and skips the database.
    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Row>, DbError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "{} WHERE id IN ({}) ORDER BY id ASC",
            SELECT_MENU_ITEMS,
            in_list_placeholders(1, ids.len())
        );
        let params = ids.iter().copied().map(SqlValue::Int).collect();
        self.executor.run(&sql, params).await
    }
}
