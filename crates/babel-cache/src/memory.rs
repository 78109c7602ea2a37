use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use babel_types::LanguageTag;
use parking_lot::RwLock;

use crate::{Cache, CacheError};

type PhraseMap = HashMap<String, HashMap<LanguageTag, String>>;

/// Unbounded in-memory cache, source phrase first, then canonical target tag.
///
/// One reader/writer lock guards the whole map: lookups share it, `put`
/// takes it exclusively. Nothing is ever evicted.
#[derive(Default)]
pub struct MemoryCache {
    phrases: RwLock<PhraseMap>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of (phrase, target) entries
    pub fn len(&self) -> usize {
        self.phrases.read().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write every entry as `{"phrase": {"tag": "translation"}}` JSON
    pub fn save<W: Write>(&self, writer: W) -> Result<(), CacheError> {
        let phrases = self.phrases.read();
        serde_json::to_writer(writer, &*phrases)?;
        Ok(())
    }

    /// Build a cache from a snapshot written by [`MemoryCache::save`].
    ///
    /// Tags that no longer parse are skipped rather than failing the load.
    pub fn load<R: Read>(reader: R) -> Result<Self, CacheError> {
        let raw: HashMap<String, HashMap<String, String>> = serde_json::from_reader(reader)?;

        let mut phrases = PhraseMap::with_capacity(raw.len());
        for (source_phrase, targets) in raw {
            let entry = phrases.entry(source_phrase).or_default();
            for (tag, translated) in targets {
                match LanguageTag::parse(&tag) {
                    Ok(tag) => {
                        entry.insert(tag, translated);
                    }
                    Err(e) => tracing::warn!(tag = %tag, "skipping cached entry: {e}"),
                }
            }
        }

        Ok(Self {
            phrases: RwLock::new(phrases),
        })
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), CacheError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.save(&mut writer)?;
        writer.flush()?;
        tracing::info!(path = %path.display(), entries = self.len(), "Saved cache snapshot");
        Ok(())
    }

    /// Load a snapshot from disk; a missing file gives an empty cache
    pub fn load_from_path(path: &Path) -> Result<Self, CacheError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No cache snapshot found, starting empty");
            return Ok(Self::new());
        }

        let cache = Self::load(BufReader::new(File::open(path)?))?;
        tracing::info!(path = %path.display(), entries = cache.len(), "Loaded cache snapshot");
        Ok(cache)
    }
}

impl Cache for MemoryCache {
    fn put(
        &self,
        source_phrase: &str,
        target: &LanguageTag,
        translated_phrase: &str,
    ) -> Result<(), CacheError> {
        let mut phrases = self.phrases.write();
        phrases
            .entry(source_phrase.to_string())
            .or_default()
            .insert(target.clone(), translated_phrase.to_string());
        Ok(())
    }

    fn has(&self, source_phrase: &str, target: &LanguageTag) -> bool {
        self.phrases
            .read()
            .get(source_phrase)
            .is_some_and(|targets| targets.contains_key(target))
    }

    fn get(&self, source_phrase: &str, target: &LanguageTag) -> Result<String, CacheError> {
        self.phrases
            .read()
            .get(source_phrase)
            .and_then(|targets| targets.get(target))
            .cloned()
            .ok_or(CacheError::NotFound)
    }
}
