// src/repositories/settings_repository.rs

use std::sync::Arc;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::ConnectionPool;
use crate::error::AppResult;

/// Keys of the persisted flags.
pub mod keys {
    pub const LAUNCH_COUNT: &str = "SessionsCount";
    pub const APOLOGY_NOTICE_SHOWN: &str = "isUserViewAd";
    pub const PREMIUM_CACHE: &str = "premium_cache";
    pub const REVIEW_PROMPT_REMOVED: &str = "AppRatingRemovedKey";
    pub const REVIEW_PROMPT_MIN_LAUNCHES: &str = "AppRatingMinLaunchesCountKey";
}

/// Key-value flag store.
///
/// Values are stored as JSON text so any serde type round-trips.
pub trait SettingsRepository: Send + Sync {
    fn get_raw(&self, key: &str) -> AppResult<Option<String>>;
    fn set_raw(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Typed accessors over any `SettingsRepository`.
pub trait SettingsExt {
    fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>>;
    fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()>;

    fn get_u64(&self, key: &str) -> AppResult<u64> {
        Ok(self.get::<u64>(key)?.unwrap_or(0))
    }

    fn get_bool(&self, key: &str) -> AppResult<bool> {
        Ok(self.get::<bool>(key)?.unwrap_or(false))
    }
}

impl<R: SettingsRepository + ?Sized> SettingsExt for R {
    fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, &raw)
    }
}

pub struct SqliteSettingsRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteSettingsRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl SettingsRepository for SqliteSettingsRepository {
    fn get_raw(&self, key: &str) -> AppResult<Option<String>> {
        let conn = self.pool.get()?;

        let value = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM settings WHERE key = ?1", params![key])?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::memory_settings;
    use super::*;
    use crate::db::{create_connection_pool, initialize_database};
    use crate::domain::{EntitlementState, PeriodKind};

    #[test]
    fn test_missing_keys_default() {
        let settings = memory_settings();
        assert_eq!(settings.get_u64(keys::LAUNCH_COUNT).unwrap(), 0);
        assert!(!settings.get_bool(keys::APOLOGY_NOTICE_SHOWN).unwrap());
        assert!(settings.get_raw("missing").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let settings = memory_settings();
        settings.set(keys::LAUNCH_COUNT, &1u64).unwrap();
        settings.set(keys::LAUNCH_COUNT, &2u64).unwrap();
        assert_eq!(settings.get_u64(keys::LAUNCH_COUNT).unwrap(), 2);
    }

    #[test]
    fn test_structured_values() {
        let settings = memory_settings();
        let state = EntitlementState::active(PeriodKind::Lifetime, None);
        settings.set(keys::PREMIUM_CACHE, &state).unwrap();

        let cached: Option<EntitlementState> = settings.get(keys::PREMIUM_CACHE).unwrap();
        assert_eq!(cached, Some(state));

        settings.remove(keys::PREMIUM_CACHE).unwrap();
        let cached: Option<EntitlementState> = settings.get(keys::PREMIUM_CACHE).unwrap();
        assert!(cached.is_none());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("settings.db");

        {
            let pool = create_connection_pool(&db_path).unwrap();
            initialize_database(&pool.get().unwrap()).unwrap();
            let settings = SqliteSettingsRepository::new(Arc::new(pool));
            settings.set(keys::LAUNCH_COUNT, &7u64).unwrap();
        }

        let pool = create_connection_pool(&db_path).unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        let settings = SqliteSettingsRepository::new(Arc::new(pool));
        assert_eq!(settings.get_u64(keys::LAUNCH_COUNT).unwrap(), 7);
    }
}
