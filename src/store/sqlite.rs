use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};
use url::Url;
use uuid::Uuid;

use crate::app::StoreError;
use crate::store::{CachedFeed, FeedStore, ImageDataStore, LocalFeedItem, StoreResult};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

type ItemRow = (String, Option<String>, Option<String>, String);

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> StoreResult<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.conn()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        Ok(())
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn parse_datetime(s: &str) -> StoreResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| StoreError::Corrupt(format!("timestamp {s:?}: {e}")))
    }

    fn local_item((id, description, location, image_url): ItemRow) -> StoreResult<LocalFeedItem> {
        let id = Uuid::parse_str(&id)
            .map_err(|e| StoreError::Corrupt(format!("item id {id:?}: {e}")))?;
        let url = Url::parse(&image_url)
            .map_err(|e| StoreError::Corrupt(format!("image url {image_url:?}: {e}")))?;

        Ok(LocalFeedItem {
            id,
            description,
            location,
            url,
        })
    }
}

impl FeedStore for SqliteStore {
    fn delete_cached_feed(&self) -> StoreResult<()> {
        let mut conn = self.conn()?;

        let tx = conn.transaction()?;
        tx.execute("DELETE FROM feed_cache_items", [])?;
        tx.execute("DELETE FROM feed_cache", [])?;
        tx.commit()?;

        Ok(())
    }

    fn insert(&self, items: &[LocalFeedItem], timestamp: DateTime<Utc>) -> StoreResult<()> {
        let mut conn = self.conn()?;

        let tx = conn.transaction()?;
        tx.execute("DELETE FROM feed_cache_items", [])?;
        tx.execute(
            "INSERT OR REPLACE INTO feed_cache (id, timestamp) VALUES (1, ?1)",
            params![timestamp.to_rfc3339()],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO feed_cache_items (position, id, description, location, image_url)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (position, item) in items.iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    item.id.to_string(),
                    item.description,
                    item.location,
                    item.url.as_str()
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn retrieve(&self) -> StoreResult<Option<CachedFeed>> {
        let conn = self.conn()?;

        let timestamp: Option<String> = conn
            .query_row("SELECT timestamp FROM feed_cache WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(timestamp) = timestamp else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(
            "SELECT id, description, location, image_url
             FROM feed_cache_items ORDER BY position",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<std::result::Result<Vec<ItemRow>, _>>()?;

        let items = rows
            .into_iter()
            .map(Self::local_item)
            .collect::<StoreResult<Vec<_>>>()?;

        Ok(Some(CachedFeed {
            items,
            timestamp: Self::parse_datetime(&timestamp)?,
        }))
    }
}

impl ImageDataStore for SqliteStore {
    fn retrieve_data(&self, url: &Url) -> StoreResult<Option<Vec<u8>>> {
        let conn = self.conn()?;

        let data = conn
            .query_row(
                "SELECT data FROM image_data WHERE url = ?1",
                params![url.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(data)
    }

    fn insert_data(&self, data: &[u8], url: &Url) -> StoreResult<()> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO image_data (url, data) VALUES (?1, ?2)
             ON CONFLICT(url) DO UPDATE SET data = excluded.data",
            params![url.as_str(), data],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn local_item(n: u8) -> LocalFeedItem {
        LocalFeedItem {
            id: Uuid::new_v4(),
            description: Some(format!("description {n}")),
            location: if n % 2 == 0 { None } else { Some(format!("location {n}")) },
            url: Url::parse(&format!("https://example.com/image-{n}.png")).unwrap(),
        }
    }

    #[test]
    fn test_retrieve_empty_cache() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.retrieve().unwrap().is_none());
    }

    #[test]
    fn test_retrieve_twice_on_empty_cache_has_no_side_effects() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.retrieve().unwrap().is_none());
        assert!(store.retrieve().unwrap().is_none());
    }

    #[test]
    fn test_insert_then_retrieve_preserves_order_and_timestamp() {
        let store = SqliteStore::in_memory().unwrap();
        let items: Vec<_> = (0..4).map(local_item).collect();
        let timestamp = Utc::now();

        store.insert(&items, timestamp).unwrap();

        let cached = store.retrieve().unwrap().unwrap();
        assert_eq!(cached.items, items);
        assert_eq!(cached.timestamp, timestamp);
    }

    #[test]
    fn test_insert_replaces_previous_cache() {
        let store = SqliteStore::in_memory().unwrap();
        let first: Vec<_> = (0..3).map(local_item).collect();
        let second = vec![local_item(9)];
        let later = Utc::now();

        store.insert(&first, later - Duration::days(1)).unwrap();
        store.insert(&second, later).unwrap();

        let cached = store.retrieve().unwrap().unwrap();
        assert_eq!(cached.items, second);
        assert_eq!(cached.timestamp, later);
    }

    #[test]
    fn test_insert_empty_collection_is_a_present_cache() {
        let store = SqliteStore::in_memory().unwrap();
        store.insert(&[], Utc::now()).unwrap();

        let cached = store.retrieve().unwrap().unwrap();
        assert!(cached.items.is_empty());
    }

    #[test]
    fn test_delete_empty_cache_succeeds() {
        let store = SqliteStore::in_memory().unwrap();
        store.delete_cached_feed().unwrap();
        assert!(store.retrieve().unwrap().is_none());
    }

    #[test]
    fn test_delete_removes_cached_feed() {
        let store = SqliteStore::in_memory().unwrap();
        store.insert(&[local_item(1)], Utc::now()).unwrap();

        store.delete_cached_feed().unwrap();

        assert!(store.retrieve().unwrap().is_none());
    }

    #[test]
    fn test_image_data_missing() {
        let store = SqliteStore::in_memory().unwrap();
        let url = Url::parse("https://example.com/a.png").unwrap();
        assert!(store.retrieve_data(&url).unwrap().is_none());
    }

    #[test]
    fn test_image_data_upserts_by_url() {
        let store = SqliteStore::in_memory().unwrap();
        let url = Url::parse("https://example.com/a.png").unwrap();
        let other = Url::parse("https://example.com/b.png").unwrap();

        store.insert_data(b"first", &url).unwrap();
        store.insert_data(b"last", &url).unwrap();
        store.insert_data(b"other", &other).unwrap();

        assert_eq!(store.retrieve_data(&url).unwrap(), Some(b"last".to_vec()));
        assert_eq!(store.retrieve_data(&other).unwrap(), Some(b"other".to_vec()));
    }

    #[test]
    fn test_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.db");
        let items = vec![local_item(1), local_item(2)];
        let timestamp = Utc::now();

        {
            let store = SqliteStore::new(&path).unwrap();
            store.insert(&items, timestamp).unwrap();
        }

        let reopened = SqliteStore::new(&path).unwrap();
        let cached = reopened.retrieve().unwrap().unwrap();
        assert_eq!(cached.items, items);
        assert_eq!(cached.timestamp, timestamp);
    }
}
