use libsql::Connection;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: u8,
}

/// A validated bookmark that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: u8,
}

/// A validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkChanges {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<u8>,
}

impl BookmarkChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.rating.is_none()
    }
}

pub struct Bookmarks<'a> {
    conn: &'a Connection,
}

impl<'a> Bookmarks<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> StoreResult<Vec<Bookmark>> {
        let query = r#"
            SELECT id, title, url, description, rating
            FROM bookmarks
            ORDER BY id
        "#;

        let mut rows = self.conn.query(query, ()).await?;
        let mut bookmarks = Vec::new();

        while let Some(row) = rows.next().await? {
            bookmarks.push(self.row_to_bookmark(&row)?);
        }

        Ok(bookmarks)
    }

    pub async fn get_by_id(&self, id: i64) -> StoreResult<Option<Bookmark>> {
        let query = r#"
            SELECT id, title, url, description, rating
            FROM bookmarks WHERE id = ?
        "#;

        let mut rows = self.conn.query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(self.row_to_bookmark(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn insert(&self, input: NewBookmark) -> StoreResult<Bookmark> {
        let query = r#"
            INSERT INTO bookmarks (title, url, description, rating)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, url, description, rating
        "#;

        let mut rows = self
            .conn
            .query(
                query,
                libsql::params![input.title, input.url, input.description, input.rating as i64],
            )
            .await?;

        match rows.next().await? {
            Some(row) => self.row_to_bookmark(&row),
            None => Err(StoreError::InvalidRow("insert returned no row".to_string())),
        }
    }

    pub async fn update(&self, id: i64, input: BookmarkChanges) -> StoreResult<()> {
        if input.is_empty() {
            return match self.get_by_id(id).await? {
                Some(_) => Ok(()),
                None => Err(StoreError::NotFound),
            };
        }

        let mut updates = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(title) = input.title {
            updates.push("title = ?");
            params.push(title.into());
        }
        if let Some(url) = input.url {
            updates.push("url = ?");
            params.push(url.into());
        }
        if let Some(description) = input.description {
            updates.push("description = ?");
            params.push(description.into());
        }
        if let Some(rating) = input.rating {
            updates.push("rating = ?");
            params.push((rating as i64).into());
        }

        params.push(id.into());
        let query = format!("UPDATE bookmarks SET {} WHERE id = ?", updates.join(", "));

        match self.conn.execute(&query, params).await? {
            0 => Err(StoreError::NotFound),
            _ => Ok(()),
        }
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?", libsql::params![id])
            .await?;

        match affected {
            0 => Err(StoreError::NotFound),
            _ => Ok(()),
        }
    }

    fn row_to_bookmark(&self, row: &libsql::Row) -> StoreResult<Bookmark> {
        let rating: i64 = row.get(4)?;
        let rating = u8::try_from(rating)
            .ok()
            .filter(|r| (1..=5).contains(r))
            .ok_or_else(|| StoreError::InvalidRow(format!("rating {} out of range", rating)))?;

        Ok(Bookmark {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            description: row.get(3)?,
            rating,
        })
    }
}
