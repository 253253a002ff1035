use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::board::GameMode;
use crate::config::{ContentProvider, ContentSerializer, FileContentProvider, YamlConfigSerializer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeStatistics {
    pub started: u32,
    pub won: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub modes: BTreeMap<GameMode, ModeStatistics>,
}

impl Statistics {
    pub fn for_mode(&self, mode: GameMode) -> ModeStatistics {
        self.modes.get(&mode).copied().unwrap_or_default()
    }

    pub fn total(&self) -> ModeStatistics {
        self.modes.values().fold(ModeStatistics::default(), |acc, s| ModeStatistics {
            started: acc.started + s.started,
            won: acc.won + s.won,
        })
    }
}

pub struct StatisticsStore<TProvider, TSerializer = YamlConfigSerializer>
where
    TProvider: ContentProvider,
    TSerializer: ContentSerializer<Statistics>,
{
    provider: TProvider,
    serializer: TSerializer,
}

impl StatisticsStore<FileContentProvider, YamlConfigSerializer> {
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentProvider::new(path))
    }
}

impl<TProvider> StatisticsStore<TProvider, YamlConfigSerializer>
where
    TProvider: ContentProvider,
{
    pub fn new(provider: TProvider) -> Self {
        Self {
            provider,
            serializer: YamlConfigSerializer::new(),
        }
    }
}

impl<TProvider, TSerializer> StatisticsStore<TProvider, TSerializer>
where
    TProvider: ContentProvider,
    TSerializer: ContentSerializer<Statistics>,
{
    pub fn load(&self) -> Result<Statistics, String> {
        match self.provider.get_content()? {
            Some(content) => self.serializer.deserialize(&content),
            None => Ok(Statistics::default()),
        }
    }

    pub fn record_started(&self, mode: GameMode) -> Result<Statistics, String> {
        self.update(|stats| {
            stats.modes.entry(mode).or_default().started += 1;
        })
    }

    pub fn record_won(&self, mode: GameMode) -> Result<Statistics, String> {
        self.update(|stats| {
            stats.modes.entry(mode).or_default().won += 1;
        })
    }

    pub fn reset(&self) -> Result<(), String> {
        self.provider.clear_content()
    }

    fn update(&self, apply: impl FnOnce(&mut Statistics)) -> Result<Statistics, String> {
        let mut stats = self.load()?;
        apply(&mut stats);
        self.provider.set_content(&self.serializer.serialize(&stats)?)?;
        Ok(stats)
    }
}
