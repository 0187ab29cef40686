//! Restaurant repository
//!
//! - list: dynamic filters, best-rated first, unrated last
//! - get: single row or `None`
//! - set_open: the only write path, `UPDATE ... RETURNING`

use crate::db::executor::{QueryExecutor, Row};
use crate::db::{DbError, SqlValue};
use crate::models::{RecordId, RestaurantFilter};
use crate::query::FilterBuilder;

const SELECT_RESTAURANTS: &str = "SELECT id, name, cuisine, city, rating::float8 AS rating, \
     is_open, created_at FROM restaurants";

const ORDER_BY_RATING: &str = "rating DESC NULLS LAST, id ASC";

/// Restaurant repository
pub struct RestaurantRepo<'a> {
    executor: &'a dyn QueryExecutor,
}

impl<'a> RestaurantRepo<'a> {
    pub fn new(executor: &'a dyn QueryExecutor) -> Self {
        Self { executor }
    }

    /// List restaurants matching `filter`.
    pub async fn list(&self, filter: &RestaurantFilter) -> Result<Vec<Row>, DbError> {
        let built = FilterBuilder::new()
            .eq("city", filter.city.as_deref())
            .eq_ignore_case("cuisine", filter.cuisine.as_deref())
            .at_least("rating", filter.min_rating)
            .paginate(filter.page);

        let sql = built.to_sql(SELECT_RESTAURANTS, ORDER_BY_RATING);
        self.executor.run(&sql, built.into_params()).await
    }

    /// Fetch one restaurant; `None` when the id does not exist.
    pub async fn get(&self, id: RecordId) -> Result<Option<Row>, DbError> {
        let sql = format!("{} WHERE id = $1", SELECT_RESTAURANTS);
        let rows = self.executor.run(&sql, vec![SqlValue::Int(id.get())]).await?;
        Ok(rows.into_iter().next())
    }

    /// Set the open/closed flag; `None` when the id does not exist.
    pub async fn set_open(&self, id: RecordId, is_open: bool) -> Result<Option<Row>, DbError> {
        let rows = self
            .executor
            .run(
                "UPDATE restaurants SET is_open = $1 WHERE id = $2 \
                 RETURNING id AS restaurant_id, is_open",
                vec![SqlValue::Bool(is_open), SqlValue::Int(id.get())],
            )
            .await?;
        Ok(rows.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockExecutor;
    use crate::models::Page;
    use serde_json::json;

    #[tokio::test]
    async fn list_builds_filtered_statement() {
        let mock = MockExecutor::new();
        let filter = RestaurantFilter {
            city: Some("Paris".into()),
            cuisine: Some("italian".into()),
            min_rating: None,
            page: Page::new(50, 0),
        };

        RestaurantRepo::new(&mock).list(&filter).await.unwrap();

        let call = &mock.calls()[0];
        assert_eq!(
            call.sql,
            "SELECT id, name, cuisine, city, rating::float8 AS rating, is_open, created_at \
             FROM restaurants WHERE city = $1 AND LOWER(cuisine) = LOWER($2) \
             ORDER BY rating DESC NULLS LAST, id ASC LIMIT $3 OFFSET $4"
        );
        assert_eq!(call.params.len(), 4);
    }

    #[tokio::test]
    async fn get_returns_first_row_or_none() {
        let mock = MockExecutor::new();
        let row = json!({"id": 9, "name": "Sakura"}).as_object().cloned().unwrap();
        mock.push_rows(vec![row.clone()]);

        let repo = RestaurantRepo::new(&mock);
        let id = RecordId::new("id", 9).unwrap();
        assert_eq!(repo.get(id).await.unwrap(), Some(row));
        assert_eq!(repo.get(id).await.unwrap(), None);
        assert_eq!(mock.calls()[0].params, vec![SqlValue::Int(9)]);
    }

    #[tokio::test]
    async fn set_open_binds_flag_then_id() {
        let mock = MockExecutor::new();
        let id = RecordId::new("id", 3).unwrap();

        RestaurantRepo::new(&mock).set_open(id, false).await.unwrap();

        let call = &mock.calls()[0];
        assert!(call.sql.starts_with("UPDATE restaurants SET is_open = $1 WHERE id = $2"));
        assert_eq!(call.params, vec![SqlValue::Bool(false), SqlValue::Int(3)]);
    }
}
