//! Dynamic WHERE / LIMIT builder
//!
//! Every condition appends its value to the parameter list first and then
//! references that value's 1-based position, so `$n` always names
//! `params[n - 1]`. LIMIT and OFFSET are always the last two parameters.
//!
//! Column names are `&'static str` on purpose: only code chooses columns,
//! client input only ever becomes a bound value.

use crate::db::SqlValue;
use crate::models::Page;

/// Accumulates conditions and their bound values.
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    conditions: Vec<String>,
    params: Vec<SqlValue>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a value and return its placeholder position.
    fn bind(&mut self, value: SqlValue) -> usize {
        self.params.push(value);
        self.params.len()
    }

    /// Mandatory exact match, e.g. a path-derived parent id.
    pub fn require_eq(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        let n = self.bind(value.into());
        self.conditions.push(format!("{} = ${}", column, n));
        self
    }

    /// Exact match when present. Blank text counts as absent.
    pub fn eq<T: Into<SqlValue>>(self, column: &'static str, value: Option<T>) -> Self {
        match value.map(Into::into) {
            Some(v) if is_present(&v) => self.require_eq(column, v),
            _ => self,
        }
    }

    /// Case-insensitive exact match when present and non-blank.
    pub fn eq_ignore_case(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            let n = self.bind(SqlValue::Text(v.to_owned()));
            self.conditions
                .push(format!("LOWER({}) = LOWER(${})", column, n));
        }
        self
    }

    /// Numeric threshold (`column >= value`) when present.
    pub fn at_least(mut self, column: &'static str, value: Option<f64>) -> Self {
        if let Some(v) = value {
            let n = self.bind(SqlValue::Float(v));
            self.conditions.push(format!("{} >= ${}", column, n));
        }
        self
    }

    /// Append LIMIT/OFFSET as the final two parameters.
    pub fn paginate(mut self, page: Page) -> BuiltQuery {
        let limit_pos = self.bind(SqlValue::Int(page.limit()));
        let offset_pos = self.bind(SqlValue::Int(page.offset()));

        BuiltQuery {
            conditions: self.conditions,
            params: self.params,
            limit_pos,
            offset_pos,
        }
    }
}

fn is_present(value: &SqlValue) -> bool {
    match value {
        SqlValue::Text(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Output of [`FilterBuilder::paginate`]: clause pieces plus bound values.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub conditions: Vec<String>,
    pub params: Vec<SqlValue>,
    limit_pos: usize,
    offset_pos: usize,
}

impl BuiltQuery {
    /// `WHERE a AND b`, or an empty string when there are no conditions.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// `LIMIT $n OFFSET $m`
    pub fn limit_clause(&self) -> String {
        format!("LIMIT ${} OFFSET ${}", self.limit_pos, self.offset_pos)
    }

    /// Assemble `select [WHERE ...] ORDER BY order_by LIMIT ... OFFSET ...`.
    pub fn to_sql(&self, select: &str, order_by: &str) -> String {
        let mut sql = select.trim_end().to_owned();
        let where_clause = self.where_clause();
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause);
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);
        sql.push(' ');
        sql.push_str(&self.limit_clause());
        sql
    }

    pub fn into_params(self) -> Vec<SqlValue> {
        self.params
    }
}

/// Placeholder numbers in order of appearance.
///
/// Used by tests to check that `$n` references line up with the bound values.
pub fn placeholder_positions(sql: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut chars = sql.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if c != '$' {
            continue;
        }
        let mut digits = String::new();
        while let Some(&(_, d)) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            digits.push(d);
            chars.next();
        }
        if let Ok(n) = digits.parse() {
            positions.push(n);
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contiguous(built: &BuiltQuery, sql: &str) {
        let positions = placeholder_positions(sql);
        let expected: Vec<usize> = (1..=built.params.len()).collect();
        assert_eq!(positions, expected, "placeholders out of line in: {}", sql);
    }

    #[test]
    fn city_and_cuisine() {
        let built = FilterBuilder::new()
            .eq("city", Some("Paris"))
            .eq_ignore_case("cuisine", Some("italian"))
            .at_least("rating", None)
            .paginate(Page::new(50, 0));

        assert_eq!(
            built.conditions,
            vec!["city = $1", "LOWER(cuisine) = LOWER($2)"]
        );
        assert_eq!(built.where_clause(), "WHERE city = $1 AND LOWER(cuisine) = LOWER($2)");
        assert_eq!(built.limit_clause(), "LIMIT $3 OFFSET $4");
        assert_eq!(
            built.params,
            vec![
                SqlValue::Text("Paris".into()),
                SqlValue::Text("italian".into()),
                SqlValue::Int(50),
                SqlValue::Int(0),
            ]
        );
        contiguous(&built, &built.to_sql("SELECT * FROM restaurants", "id"));
    }

    #[test]
    fn no_filters_no_where() {
        let built = FilterBuilder::new()
            .eq::<&str>("city", None)
            .eq_ignore_case("cuisine", None)
            .at_least("rating", None)
            .paginate(Page::new(50, 0));

        let sql = built.to_sql("SELECT * FROM restaurants", "rating DESC NULLS LAST");
        assert!(!sql.contains("WHERE"));
        assert_eq!(built.params.len(), 2);
        assert_eq!(
            sql,
            "SELECT * FROM restaurants ORDER BY rating DESC NULLS LAST LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn blank_values_are_skipped() {
        let built = FilterBuilder::new()
            .eq("city", Some("  "))
            .eq_ignore_case("cuisine", Some(""))
            .paginate(Page::new(10, 0));
        assert!(built.conditions.is_empty());
        assert_eq!(built.params.len(), 2);
    }

    #[test]
    fn seeded_filter_comes_first() {
        let built = FilterBuilder::new()
            .require_eq("restaurant_id", 7_i64)
            .eq("is_available", Some(true))
            .eq_ignore_case("category", Some("Dessert"))
            .paginate(Page::new(100, 20));

        assert_eq!(
            built.where_clause(),
            "WHERE restaurant_id = $1 AND is_available = $2 AND LOWER(category) = LOWER($3)"
        );
        assert_eq!(built.limit_clause(), "LIMIT $4 OFFSET $5");
        assert_eq!(built.params[0], SqlValue::Int(7));
        assert_eq!(built.params[1], SqlValue::Bool(true));
        assert_eq!(built.params[4], SqlValue::Int(20));
    }

    #[test]
    fn threshold_uses_gte() {
        let built = FilterBuilder::new()
            .at_least("rating", Some(4.0))
            .paginate(Page::new(5, 0));
        assert_eq!(built.conditions, vec!["rating >= $1"]);
        assert_eq!(built.params[0], SqlValue::Float(4.0));
    }

    #[test]
    fn every_combination_is_contiguous() {
        for mask in 0..8u8 {
            let city = (mask & 1 != 0).then_some("Lyon");
            let cuisine = (mask & 2 != 0).then_some("thai");
            let rating = (mask & 4 != 0).then_some(3.5);

            let built = FilterBuilder::new()
                .eq("city", city)
                .eq_ignore_case("cuisine", cuisine)
                .at_least("rating", rating)
                .paginate(Page::new(50, 0));

            assert_eq!(built.conditions.len(), mask.count_ones() as usize);
            contiguous(&built, &built.to_sql("SELECT id FROM restaurants", "id"));
        }
    }

    #[test]
    fn positions_parser() {
        assert_eq!(placeholder_positions("a = $1 AND b = $12 OR $x"), vec![1, 12]);
        assert!(placeholder_positions("no params").is_empty());
    }
}
