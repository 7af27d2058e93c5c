//! # Store and Session
//!
//! Connection management and every read/write query the API needs.
//! Listings are ordered by id so pagination is stable between requests.

use std::str::FromStr;

use rand::Rng;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Connection, QueryBuilder, Sqlite};

use super::errors::{StoreError, StoreResult};
use super::filter::QuestionFilter;
use super::models::{Category, NewQuestion, Question};
use super::schema;

/// Handle to the trivia database
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating if missing) the database at `url`
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        tracing::debug!(url, max_connections, "opened trivia database");
        Ok(Self { pool })
    }

    /// Open a private in-memory database.
    ///
    /// Every SQLite memory connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn connect_in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Create the tables if they do not exist yet
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        let mut session = self.session().await?;
        for statement in schema::STATEMENTS {
            sqlx::query(statement).execute(&mut *session.conn).await?;
        }
        Ok(())
    }

    /// Check out one connection for the duration of a request
    pub async fn session(&self) -> StoreResult<Session> {
        let conn = self.pool.acquire().await?;
        Ok(Session { conn })
    }

    /// Close the pool, waiting for checked-out connections to come back
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// One pooled connection, released when the session is dropped
pub struct Session {
    pub(super) conn: PoolConnection<Sqlite>,
}

impl Session {
    /// All categories, ordered by id
    pub async fn list_categories(&mut self) -> StoreResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>(r#"SELECT id, "type" FROM categories ORDER BY id"#)
                .fetch_all(&mut *self.conn)
                .await?;
        Ok(categories)
    }

    /// Total number of stored questions
    pub async fn count_questions(&mut self) -> StoreResult<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(total)
    }

    /// One window of the full listing, ordered by id
    pub async fn question_page(&mut self, offset: i64, limit: i64) -> StoreResult<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions \
             ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(questions)
    }

    /// Questions whose text contains `term`, ignoring case, ordered by id.
    ///
    /// SQLite only folds ASCII case, so matching happens on lowercased text
    /// here rather than through LIKE.
    pub async fn search_questions(&mut self, term: &str) -> StoreResult<Vec<Question>> {
        let needle = term.to_lowercase();
        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(questions
            .into_iter()
            .filter(|q| q.question.to_lowercase().contains(&needle))
            .collect())
    }

    /// Questions referencing `category`, ordered by id
    pub async fn questions_in_category(&mut self, category: i64) -> StoreResult<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions \
             WHERE category = ? ORDER BY id",
        )
        .bind(category)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(questions)
    }

    pub async fn find_question(&mut self, id: i64) -> StoreResult<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(question)
    }

    /// Persist a question and return it with its generated id
    pub async fn insert_question(&mut self, new: &NewQuestion) -> StoreResult<Question> {
        sqlx::query_as::<_, Question>(
            "INSERT INTO questions (question, answer, category, difficulty) VALUES (?, ?, ?, ?) \
             RETURNING id, question, answer, category, difficulty",
        )
        .bind(&new.question)
        .bind(&new.answer)
        .bind(new.category)
        .bind(new.difficulty)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(StoreError::from_write)
    }

    /// Delete by id. Returns false when no such question existed.
    pub async fn delete_question(&mut self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Draw one question uniformly at random among those matching `filter`.
    ///
    /// Counting and fetching run in one transaction so both see the same rows.
    pub async fn random_question(&mut self, filter: &QuestionFilter) -> StoreResult<Option<Question>> {
        let mut tx = self.conn.begin().await?;

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM questions");
        filter.push_where(&mut count);
        let eligible = count.build_query_scalar::<i64>().fetch_one(&mut *tx).await?;

        if eligible == 0 {
            return Ok(None);
        }

        let offset = rand::thread_rng().gen_range(0..eligible);

        let mut select = QueryBuilder::<Sqlite>::new(
            "SELECT id, question, answer, category, difficulty FROM questions",
        );
        filter.push_where(&mut select);
        select.push(" ORDER BY id LIMIT 1 OFFSET ").push_bind(offset);
        let question = select
            .build_query_as::<Question>()
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(question)
    }
}
