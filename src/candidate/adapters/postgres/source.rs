//! `PostgreSQL` lookup for source-message snippets.

use super::{models::SourceMessageRow, schema::source_messages};
use crate::candidate::{
    domain::{SourceMessageId, SourceSnippet},
    ports::{SourceMessageError, SourceMessageRepository, SourceMessageResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL`-backed source-message projection.
#[derive(Debug, Clone)]
pub struct PostgresSourceMessageRepository {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl PostgresSourceMessageRepository {
    /// Creates a new projection from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SourceMessageRepository for PostgresSourceMessageRepository {
    async fn find_snippet(
        &self,
        id: SourceMessageId,
    ) -> SourceMessageResult<Option<SourceSnippet>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SourceMessageError::persistence)?;
            let row = source_messages::table
                .filter(source_messages::id.eq(id.into_inner()))
                .select(SourceMessageRow::as_select())
                .first::<SourceMessageRow>(&mut connection)
                .optional()
                .map_err(SourceMessageError::persistence)?;
            row.map(row_to_snippet).transpose()
        })
        .await
        .map_err(SourceMessageError::persistence)?
    }
}

fn row_to_snippet(row: SourceMessageRow) -> SourceMessageResult<SourceSnippet> {
    let SourceMessageRow {
        subject,
        from_name,
        from_email,
        received_at,
        body_snippet,
        urls: persisted_urls,
    } = row;

    let urls = serde_json::from_value::<Vec<String>>(persisted_urls)
        .map_err(SourceMessageError::persistence)?;

    Ok(SourceSnippet {
        subject,
        from_name,
        from_email,
        received_at,
        body_snippet,
        urls,
    })
}
