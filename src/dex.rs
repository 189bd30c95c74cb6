//! Species and move reference data.

use crate::error::Result;
use crate::model::{normalize_id, Move, SpeciesProfile};
use anyhow::Context;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

/// Read-only source of species profiles and moves. Lookups must be synchronous.
pub trait DataProvider: Sync {
    fn species(&self, species_id: u32) -> Option<&SpeciesProfile>;

    /// Case-insensitive; spaces and punctuation are ignored.
    fn move_by_name(&self, name: &str) -> Option<&Move>;

    /// Species lookup that falls back to [`SpeciesProfile::unknown`].
    fn profile(&self, species_id: u32) -> Cow<'_, SpeciesProfile> {
        match self.species(species_id) {
            Some(profile) => Cow::Borrowed(profile),
            None => {
                tracing::warn!(species_id, "unknown species, using zero base stats");
                Cow::Owned(SpeciesProfile::unknown(species_id))
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct DexFile {
    #[serde(default)]
    species: Vec<SpeciesProfile>,
    #[serde(default)]
    moves: Vec<Move>,
}

/// In-memory provider, usually loaded from a JSON file with `species` and `moves` arrays.
#[derive(Clone, Debug, Default)]
pub struct Dex {
    species: HashMap<u32, SpeciesProfile>,
    moves: HashMap<String, Move>,
}

impl Dex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let file: DexFile = serde_json::from_str(raw)?;
        let mut dex = Dex::new();
        for profile in file.species {
            dex.insert_species(profile);
        }
        for mv in file.moves {
            dex.insert_move(mv);
        }
        Ok(dex)
    }

    pub fn from_json_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dex file at {}", path.display()))?;
        let dex = Self::from_json_str(&raw)
            .with_context(|| format!("Failed to parse dex JSON from {}", path.display()))?;
        tracing::info!(
            species = dex.species.len(),
            moves = dex.moves.len(),
            path = %path.display(),
            "loaded dex"
        );
        Ok(dex)
    }

    pub fn insert_species(&mut self, profile: SpeciesProfile) {
        self.species.insert(profile.species_id, profile);
    }

    pub fn insert_move(&mut self, mv: Move) {
        self.moves.insert(normalize_id(&mv.name), mv);
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

impl DataProvider for Dex {
    fn species(&self, species_id: u32) -> Option<&SpeciesProfile> {
        self.species.get(&species_id)
    }

    fn move_by_name(&self, name: &str) -> Option<&Move> {
        self.moves.get(&normalize_id(name))
    }
}
