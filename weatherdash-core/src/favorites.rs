use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{model::CurrentConditions, store::KeyValueStore};

/// Store key holding the JSON array of favorites.
pub const FAVORITES_KEY: &str = "weatherFavorites";

/// Snapshot of a location's conditions at the time it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub location: String,
    pub temperature: i64,
    pub description: String,
    pub weather_icon: String,
    pub humidity: u8,
    pub wind_speed: i64,
    pub added_at: DateTime<Utc>,
}

impl Favorite {
    pub fn from_conditions(conditions: &CurrentConditions, added_at: DateTime<Utc>) -> Self {
        let location = conditions.location.trim().to_string();
        Self {
            id: favorite_id(&location),
            location,
            temperature: conditions.temperature,
            description: conditions.description.clone(),
            weather_icon: conditions.weather_icon.clone(),
            humidity: conditions.humidity,
            wind_speed: conditions.wind_speed,
            added_at,
        }
    }
}

/// `"New  York, US"` → `"new-york,-us"`.
pub fn favorite_id(location: &str) -> String {
    location
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Favorites list kept in sync with a [`KeyValueStore`].
#[derive(Debug)]
pub struct Favorites<S> {
    store: S,
    items: Vec<Favorite>,
}

impl<S: KeyValueStore> Favorites<S> {
    /// Reads the persisted list. Unreadable or malformed data is logged and
    /// treated as an empty list.
    pub fn load(store: S) -> Self {
        let items = match store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Favorite>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    tracing::error!("Ignoring malformed favorites data: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!("Error loading favorites: {e}");
                Vec::new()
            }
        };

        Self { store, items }
    }

    pub fn list(&self) -> &[Favorite] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Favorite> {
        self.items.iter().find(|fav| fav.id == id)
    }

    /// Saves `conditions` unless the location is already present
    /// (case-insensitive). Returns whether a favorite was added.
    pub fn add(&mut self, conditions: &CurrentConditions) -> Result<bool> {
        let favorite = Favorite::from_conditions(conditions, Utc::now());
        let needle = favorite.location.to_lowercase();

        if self
            .items
            .iter()
            .any(|fav| fav.location.to_lowercase() == needle)
        {
            tracing::debug!(location = %favorite.location, "favorite already present");
            return Ok(false);
        }

        let mut next = self.items.clone();
        next.push(favorite);
        self.commit(next)?;
        Ok(true)
    }

    /// Returns whether a favorite with `id` existed.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let next: Vec<_> = self
            .items
            .iter()
            .filter(|fav| fav.id != id)
            .cloned()
            .collect();
        if next.len() == self.items.len() {
            return Ok(false);
        }

        self.commit(next)?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store
            .remove(FAVORITES_KEY)
            .context("Failed to clear favorites")?;
        self.items.clear();
        Ok(())
    }

    /// Writes `next` to the store and adopts it only once the write succeeds.
    fn commit(&mut self, next: Vec<Favorite>) -> Result<()> {
        let json = serde_json::to_string(&next).context("Failed to serialize favorites")?;
        self.store
            .set(FAVORITES_KEY, &json)
            .context("Failed to save favorites")?;
        self.items = next;
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryStore, StoreError};

    /// Reads from an inner store but refuses every write.
    struct ReadOnlyStore(MemoryStore);

    fn denied(key: &str) -> StoreError {
        StoreError::Io {
            path: key.into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        }
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(denied(key))
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            Err(denied(key))
        }
    }

    fn conditions(location: &str, temperature: i64) -> CurrentConditions {
        CurrentConditions {
            location: location.into(),
            temperature,
            feels_like: temperature,
            humidity: 55,
            wind_speed: 12,
            pressure: 1009,
            visibility: 10,
            uv_index: 0.0,
            description: "few clouds".into(),
            weather_icon: "⛅".into(),
            sunrise: Some("06:40".into()),
            sunset: Some("17:02".into()),
        }
    }

    #[test]
    fn id_is_slugged_location() {
        assert_eq!(favorite_id("  New  York, US "), "new-york,-us");
        assert_eq!(favorite_id("Paris, FR"), "paris,-fr");
    }

    #[test]
    fn add_dedupes_case_insensitively() {
        let mut favs = Favorites::load(MemoryStore::new());

        assert!(favs.add(&conditions("Paris, FR", 18)).unwrap());
        assert!(!favs.add(&conditions("paris, fr", 20)).unwrap());
        assert!(favs.add(&conditions("Oslo, NO", 2)).unwrap());

        let locations: Vec<_> = favs.list().iter().map(|f| f.location.as_str()).collect();
        assert_eq!(locations, ["Paris, FR", "Oslo, NO"]);
        assert_eq!(favs.get("paris,-fr").map(|f| f.temperature), Some(18));
    }

    #[test]
    fn mutations_are_persisted() {
        let mut favs = Favorites::load(MemoryStore::new());
        favs.add(&conditions("Lima, PE", 21)).unwrap();
        favs.add(&conditions("Quito, EC", 14)).unwrap();
        assert!(favs.remove("lima,-pe").unwrap());
        assert!(!favs.remove("lima,-pe").unwrap());

        let reloaded = Favorites::load(favs.into_store());
        assert_eq!(reloaded.list().len(), 1);
        assert_eq!(reloaded.list()[0].location, "Quito, EC");
        assert_eq!(reloaded.list()[0].weather_icon, "⛅");
    }

    #[test]
    fn clear_drops_the_key() {
        let mut favs = Favorites::load(MemoryStore::new());
        favs.add(&conditions("Cairo, EG", 33)).unwrap();
        favs.clear().unwrap();

        assert!(favs.list().is_empty());
        let store = favs.into_store();
        assert_eq!(store.get(FAVORITES_KEY).unwrap(), None);
    }

    #[test]
    fn malformed_data_loads_as_empty() {
        let mut store = MemoryStore::new();
        store.set(FAVORITES_KEY, r#"{"not":"an array"}"#).unwrap();

        let favs = Favorites::load(store);
        assert!(favs.list().is_empty());
    }

    #[test]
    fn survives_a_file_store_round_trip() {
        let tmp = tempfile::tempdir().unwrap();

        let mut favs = Favorites::load(FileStore::new(tmp.path()));
        favs.add(&conditions("Reykjavík, IS", -1)).unwrap();

        let reloaded = Favorites::load(FileStore::new(tmp.path()));
        assert_eq!(reloaded.list(), favs.list());
    }

    #[test]
    fn failed_writes_leave_the_list_unchanged() {
        let mut seeded = Favorites::load(MemoryStore::new());
        seeded.add(&conditions("Tokyo, JP", 19)).unwrap();

        let mut favs = Favorites::load(ReadOnlyStore(seeded.into_store()));
        assert_eq!(favs.list().len(), 1);

        assert!(favs.add(&conditions("Seoul, KR", 15)).is_err());
        assert!(favs.remove("tokyo,-jp").is_err());
        assert!(favs.clear().is_err());

        let locations: Vec<_> = favs.list().iter().map(|f| f.location.as_str()).collect();
        assert_eq!(locations, ["Tokyo, JP"]);
    }
}
