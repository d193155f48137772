//! Player preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// Cosmetic bird variants (one sprite, tinted)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BirdSkin {
    #[default]
    Yellow,
    Blue,
    Red,
}

impl BirdSkin {
    pub const ALL: [BirdSkin; 3] = [BirdSkin::Yellow, BirdSkin::Blue, BirdSkin::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            BirdSkin::Yellow => "yellow",
            BirdSkin::Blue => "blue",
            BirdSkin::Red => "red",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yellow" => Some(BirdSkin::Yellow),
            "blue" => Some(BirdSkin::Blue),
            "red" => Some(BirdSkin::Red),
            _ => None,
        }
    }

    /// CSS filter applied to the sprite (the source art is yellow)
    pub fn css_filter(&self) -> &'static str {
        match self {
            BirdSkin::Yellow => "none",
            BirdSkin::Blue => "hue-rotate(170deg)",
            BirdSkin::Red => "hue-rotate(-50deg) saturate(1.6)",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Selected bird tint
    pub skin: BirdSkin,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skin: BirdSkin::Yellow,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flappy_settings";

    /// Load settings, falling back to defaults on absence or corruption
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save(&self, store: &mut impl KeyValueStore) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode settings: {}", e);
                return;
            }
        };
        match store.set(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    #[test]
    fn test_skin_names() {
        for skin in BirdSkin::ALL {
            assert_eq!(BirdSkin::from_name(skin.as_str()), Some(skin));
        }
        assert_eq!(BirdSkin::from_name("BLUE"), Some(BirdSkin::Blue));
        assert_eq!(BirdSkin::from_name("green"), None);
    }

    #[test]
    fn test_settings_persist() {
        let mut store = MemoryStorage::new();
        let settings = Settings { skin: BirdSkin::Red };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_corrupt_or_partial_settings() {
        let mut store = MemoryStorage::new();
        store.set(Settings::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());

        store.set(Settings::STORAGE_KEY, r#"{"skin":"Blue"}"#).unwrap();
        assert_eq!(Settings::load(&store).skin, BirdSkin::Blue);

        store.set(Settings::STORAGE_KEY, "{}").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_stale_fields_are_ignored() {
        let mut store = MemoryStorage::new();
        store
            .set(Settings::STORAGE_KEY, r#"{"skin":"Red","show_fps":true}"#)
            .unwrap();
        assert_eq!(Settings::load(&store), Settings { skin: BirdSkin::Red });

        // Saving rewrites the blob with the skin only
        Settings::load(&store).save(&mut store);
        assert_eq!(
            store.get(Settings::STORAGE_KEY).as_deref(),
            Some(r#"{"skin":"Red"}"#)
        );
    }
}
