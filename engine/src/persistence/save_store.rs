use std::path::PathBuf;

use super::SavedGame;
use crate::config::{ContentProvider, ContentSerializer, FileContentProvider, YamlConfigSerializer};

/// Single-slot store for the game in progress.
pub struct SaveStore<TProvider, TSerializer = YamlConfigSerializer>
where
    TProvider: ContentProvider,
    TSerializer: ContentSerializer<SavedGame>,
{
    provider: TProvider,
    serializer: TSerializer,
}

impl SaveStore<FileContentProvider, YamlConfigSerializer> {
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentProvider::new(path))
    }
}

impl<TProvider> SaveStore<TProvider, YamlConfigSerializer>
where
    TProvider: ContentProvider,
{
    pub fn new(provider: TProvider) -> Self {
        Self::with_serializer(provider, YamlConfigSerializer::new())
    }
}

impl<TProvider, TSerializer> SaveStore<TProvider, TSerializer>
where
    TProvider: ContentProvider,
    TSerializer: ContentSerializer<SavedGame>,
{
    pub fn with_serializer(provider: TProvider, serializer: TSerializer) -> Self {
        Self {
            provider,
            serializer,
        }
    }

    pub fn save(&self, game: &SavedGame) -> Result<(), String> {
        let content = self.serializer.serialize(game)?;
        self.provider.set_content(&content)
    }

    pub fn load(&self) -> Result<Option<SavedGame>, String> {
        let Some(content) = self.provider.get_content()? else {
            return Ok(None);
        };

        self.serializer
            .deserialize(&content)
            .map(Some)
            .map_err(|e| format!("Saved game is unreadable: {}", e))
    }

    pub fn clear(&self) -> Result<(), String> {
        self.provider.clear_content()
    }

    pub fn has_save(&self) -> Result<bool, String> {
        Ok(self.provider.get_content()?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameMode;
    use crate::config::MemoryContentProvider;

    fn sample() -> SavedGame {
        SavedGame {
            cells: Vec::new(),
            time: 5,
            mode: GameMode::Classic,
            history: Vec::new(),
            next_id: 27,
            level_id: None,
            powerups: 3,
        }
    }

    #[test]
    fn test_empty_store() {
        let store = SaveStore::new(MemoryContentProvider::new());

        assert_eq!(store.load().unwrap(), None);
        assert!(!store.has_save().unwrap());
    }

    #[test]
    fn test_save_load_clear() {
        let store = SaveStore::new(MemoryContentProvider::new());

        store.save(&sample()).unwrap();
        assert!(store.has_save().unwrap());
        assert_eq!(store.load().unwrap(), Some(sample()));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_save_is_an_error() {
        let store = SaveStore::new(MemoryContentProvider::with_content("cells: [oops"));

        let result = store.load();

        assert!(result.unwrap_err().contains("unreadable"));
    }
}
