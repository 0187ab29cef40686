use menuctl_server::models::Page;
use menuctl_server::query::{in_list_placeholders, placeholder_positions, FilterBuilder};
use proptest::prelude::*;

fn opt_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[ a-zA-Z']{0,12}")
}

proptest! {
    /// Property: `$n` references are 1..=params.len(), in order, for any filter mix
    #[test]
    fn prop_placeholders_contiguous(
        seed in prop::option::of(1i64..10_000),
        city in opt_text(),
        cuisine in opt_text(),
        min_rating in prop::option::of(0.0f64..=5.0),
        available in prop::option::of(any::<bool>()),
        limit in any::<i64>(),
        offset in any::<i64>(),
    ) {
        let mut builder = FilterBuilder::new();
        if let Some(id) = seed {
            builder = builder.require_eq("restaurant_id", id);
        }
        let built = builder
            .eq("city", city.as_deref())
            .eq_ignore_case("cuisine", cuisine.as_deref())
            .at_least("rating", min_rating)
            .eq("is_available", available)
            .paginate(Page::new(limit, offset));

        let sql = built.to_sql("SELECT id FROM restaurants", "id");
        let expected: Vec<usize> = (1..=built.params.len()).collect();
        prop_assert_eq!(placeholder_positions(&sql), expected);
        prop_assert_eq!(built.params.len(), built.conditions.len() + 2);
        prop_assert_eq!(sql.contains("WHERE"), !built.conditions.is_empty());
    }

    /// Property: limit is always bounded
    #[test]
    fn prop_page_bounded(limit in any::<i64>(), offset in any::<i64>()) {
        let page = Page::new(limit, offset);
        prop_assert!((1..=200).contains(&page.limit()));
        prop_assert!(page.offset() >= 0);
    }

    /// Property: IN-list has exactly one placeholder per value
    #[test]
    fn prop_in_list_sized(len in 1usize..600) {
        let list = in_list_placeholders(1, len);
        let expected: Vec<usize> = (1..=len).collect();
        prop_assert_eq!(placeholder_positions(&list), expected);
    }
}
