//! Restaurant store backed by the `restaurants` table.
//!
//! Each row holds the original document in a `JSONB` column. Filters are
//! pushed down to SQL and must agree with [`RestaurantFilter::matches`], which
//! the in-memory store uses directly: text filters see the same rendering of
//! `cuisines` and `name` (`dinescout_search_text`), and coordinates the same
//! decimal grammar (`dinescout_try_float8`). Word boundaries follow each
//! engine's word-character class, which differ only outside letters, digits
//! and `_` (combining marks, for example).

use async_trait::async_trait;
use dinescout_core::{RestaurantFilter, RestaurantRecord, TextMatcher};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::{ensure_objects, RestaurantStore};
use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    document: Value,
}

impl From<DocumentRow> for RestaurantRecord {
    fn from(row: DocumentRow) -> Self {
        RestaurantRecord::from_document(row.id, row.document)
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PgRestaurantStore {
    pool: PgPool,
}

impl PgRestaurantStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RestaurantStore for PgRestaurantStore {
    async fn count(&self) -> Result<u64, DbError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM restaurants")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn find(&self, skip: u64, limit: u64) -> Result<Vec<RestaurantRecord>, DbError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, document FROM restaurants ORDER BY seq OFFSET $1 LIMIT $2",
        )
        .bind(to_i64(skip))
        .bind(to_i64(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RestaurantRecord::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RestaurantRecord>, DbError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, document FROM restaurants WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RestaurantRecord::from))
    }

    async fn find_matching(
        &self,
        filter: &RestaurantFilter,
    ) -> Result<Vec<RestaurantRecord>, DbError> {
        let rows = match filter {
            RestaurantFilter::Id(id) => {
                return Ok(self.find_by_id(*id).await?.into_iter().collect());
            }
            RestaurantFilter::AnyText(matchers) => {
                let (patterns, like_patterns) = text_patterns(matchers);
                sqlx::query_as::<_, DocumentRow>(
                    "SELECT id, document FROM ( \
                         SELECT id, document, seq, \
                                dinescout_search_text(document->'cuisines') AS cuisines, \
                                CASE WHEN jsonb_typeof(document->'name') = 'string' \
                                     THEN document->>'name' END AS name \
                         FROM restaurants \
                     ) AS searchable \
                     WHERE cuisines ~* ANY($1::text[]) \
                        OR name ~* ANY($1::text[]) \
                        OR cuisines ILIKE ANY($2::text[]) \
                        OR name ILIKE ANY($2::text[]) \
                     ORDER BY seq",
                )
                .bind(patterns)
                .bind(like_patterns)
                .fetch_all(&self.pool)
                .await?
            }
            RestaurantFilter::Within(bounds) => {
                sqlx::query_as::<_, DocumentRow>(
                    "SELECT id, document FROM restaurants \
                     WHERE dinescout_try_float8(document #>> '{location,latitude}') BETWEEN $1 AND $2 \
                       AND dinescout_try_float8(document #>> '{location,longitude}') BETWEEN $3 AND $4 \
                     ORDER BY seq",
                )
                .bind(bounds.min_latitude)
                .bind(bounds.max_latitude)
                .bind(bounds.min_longitude)
                .bind(bounds.max_longitude)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(RestaurantRecord::from).collect())
    }

    async fn insert_many(&self, documents: Vec<Value>) -> Result<usize, DbError> {
        ensure_objects(&documents)?;

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for document in documents {
            sqlx::query("INSERT INTO restaurants (document) VALUES ($1)")
                .bind(document)
                .execute(&mut *tx)
                .await?;
            inserted += 1;
        }
        tx.commit().await?;

        tracing::debug!(inserted, "restaurant documents stored");
        Ok(inserted)
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Splits matchers into Postgres regex patterns (whole-word) and `ILIKE`
/// patterns (substring). Terms are matched literally in both.
fn text_patterns(matchers: &[TextMatcher]) -> (Vec<String>, Vec<String>) {
    let mut regexes = Vec::new();
    let mut likes = Vec::new();
    for matcher in matchers {
        match matcher {
            TextMatcher::WholeWord(term) => {
                regexes.push(format!(r"\y{}\y", regex::escape(term)));
            }
            TextMatcher::Substring(term) => likes.push(format!("%{}%", escape_like(term))),
        }
    }
    (regexes, likes)
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
