//! Positional placeholder lists for `IN (...)` clauses

/// Placeholders `$start, $start+1, ...` for `len` values, comma-joined.
///
/// `start` is the 1-based position of the first value. Returns an empty
/// string for `len == 0`; callers must reject empty lists before building
/// SQL since `IN ()` is not valid.
///
/// ```
/// use menuctl_server::query::in_list_placeholders;
///
/// assert_eq!(in_list_placeholders(1, 3), "$1, $2, $3");
/// assert_eq!(in_list_placeholders(4, 2), "$4, $5");
/// ```
pub fn in_list_placeholders(start: usize, len: usize) -> String {
    (start..start + len)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sized_to_input() {
        for len in 1..=50 {
            let list = in_list_placeholders(1, len);
            assert_eq!(list.split(", ").count(), len);
            assert!(list.starts_with("$1"));
            assert!(list.ends_with(&format!("${}", len)));
        }
    }

    #[test]
    fn empty_for_zero() {
        assert_eq!(in_list_placeholders(1, 0), "");
    }

    #[test]
    fn multi_digit_positions() {
        assert_eq!(in_list_placeholders(9, 3), "$9, $10, $11");
    }
}
