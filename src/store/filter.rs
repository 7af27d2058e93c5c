//! # Question Filter
//!
//! Composable WHERE clause for question queries: an optional category
//! restriction plus an optional set of excluded question ids. Values are
//! always bound as parameters, never spliced into the SQL text. The exclusion
//! set travels as a single JSON array expanded by `json_each`, so its size is
//! not limited by SQLite's bound-parameter cap.

use sqlx::{QueryBuilder, Sqlite};

/// Eligibility filter over the `questions` table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Restrict to one category (None = all categories)
    pub category: Option<i64>,

    /// Question ids that must not be returned, sorted and deduplicated
    pub exclude: Vec<i64>,
}

impl QuestionFilter {
    /// Filter matching every question
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter matching one category, or all of them when `None`
    pub fn in_category(category: Option<i64>) -> Self {
        Self {
            category,
            exclude: Vec::new(),
        }
    }

    /// Add ids to the exclusion set
    pub fn excluding(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.exclude.extend(ids);
        self.exclude.sort_unstable();
        self.exclude.dedup();
        self
    }

    fn exclude_json(&self) -> String {
        serde_json::Value::from(self.exclude.clone()).to_string()
    }

    /// Append the WHERE clause (if any) to a query under construction
    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        let mut keyword = " WHERE ";

        if let Some(category) = self.category {
            builder.push(keyword).push("category = ").push_bind(category);
            keyword = " AND ";
        }

        if !self.exclude.is_empty() {
            builder
                .push(keyword)
                .push("id NOT IN (SELECT value FROM json_each(")
                .push_bind(self.exclude_json())
                .push("))");
        }
    }
}
