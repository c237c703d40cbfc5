//! PostgREST query builder.
//!
//! Builds the `column=op.value` query parameters PostgREST understands.
//! Values are URL-encoded by the HTTP client.

use std::fmt::Display;

/// Filters, ordering and limits for a table request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `Query::new().eq(column, value)`.
    pub fn by(column: &str, value: impl Display) -> Self {
        Self::new().eq(column, value)
    }

    pub fn select(self, columns: &str) -> Self {
        self.push("select", columns.to_string())
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.push(column, format!("eq.{value}"))
    }

    /// Case-insensitive substring match.
    pub fn ilike(self, column: &str, needle: &str) -> Self {
        self.push(column, format!("ilike.*{}*", escape_pattern(needle)))
    }

    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.push(column, format!("gte.{value}"))
    }

    pub fn lte(self, column: &str, value: impl Display) -> Self {
        self.push(column, format!("lte.{value}"))
    }

    /// Array column shares at least one element with `values`.
    pub fn overlaps(self, column: &str, values: &[String]) -> Self {
        let items: Vec<String> = values
            .iter()
            .map(|v| format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
            .collect();
        self.push(column, format!("ov.{{{}}}", items.join(",")))
    }

    /// Any of the given `column.op.value` conditions.
    pub fn or(self, conditions: &[String]) -> Self {
        self.push("or", format!("({})", conditions.join(",")))
    }

    pub fn order(self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.push("order", format!("{column}.{direction}"))
    }

    pub fn limit(self, limit: u32) -> Self {
        self.push("limit", limit.to_string())
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    fn push(mut self, key: &str, value: String) -> Self {
        self.params.push((key.to_string(), value));
        self
    }
}

/// Strip characters that carry meaning inside filter expressions.
pub fn escape_pattern(needle: &str) -> String {
    needle
        .chars()
        .filter(|c| !matches!(c, '*' | '%' | ',' | '(' | ')' | '"' | '\\'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// `column.ilike.*needle*` condition for use inside [`Query::or`].
pub fn ilike_condition(column: &str, needle: &str) -> String {
    format!("{column}.ilike.*{}*", escape_pattern(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(query: &Query) -> Vec<(&str, &str)> {
        query
            .params()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_filters() {
        let query = Query::by("role", "talent")
            .ilike("location", "Chennai")
            .gte("budget_min", 100)
            .order("posted_at", false)
            .limit(20);

        assert_eq!(
            pairs(&query),
            vec![
                ("role", "eq.talent"),
                ("location", "ilike.*Chennai*"),
                ("budget_min", "gte.100"),
                ("order", "posted_at.desc"),
                ("limit", "20"),
            ]
        );
    }

    #[test]
    fn test_overlaps_quotes_values() {
        let query = Query::new().overlaps("skills", &["rust".into(), "machine learning".into()]);
        assert_eq!(
            pairs(&query),
            vec![("skills", "ov.{\"rust\",\"machine learning\"}")]
        );
    }

    #[test]
    fn test_or_with_escaped_patterns() {
        let query = Query::new().or(&[
            ilike_condition("full_name", "pri(ya)"),
            ilike_condition("email", "a,b*"),
        ]);
        assert_eq!(
            pairs(&query),
            vec![("or", "(full_name.ilike.*priya*,email.ilike.*ab*)")]
        );
    }
}
