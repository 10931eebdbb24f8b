//! Biome registry: maps [`BiomeId`] to [`BiomeDef`] with name-based lookup.

use hashbrown::HashMap;

use super::BiomeDef;
use crate::classify::Biome;

/// Numeric biome id as used by the host biome table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeId(pub u8);

/// Errors that can occur when registering biomes.
#[derive(Debug, thiserror::Error)]
pub enum BiomeRegistryError {
    /// A biome with this name is already registered.
    #[error("duplicate biome name: {0}")]
    DuplicateName(String),

    /// The id slot is already taken.
    #[error("biome id {0} is already registered")]
    DuplicateId(u8),
}

/// Fixed-slot table of biome definitions with O(1) lookup by id.
pub struct BiomeRegistry {
    slots: Vec<Option<BiomeDef>>,
    name_to_id: HashMap<String, BiomeId>,
}

impl BiomeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            slots: vec![None; usize::from(u8::MAX) + 1],
            name_to_id: HashMap::new(),
        }
    }

    /// Registry holding every biome the height ladder can produce.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for (biome, temperature, rainfall) in [
            (Biome::Ocean, 0.5, 0.5),
            (Biome::River, 0.5, 0.5),
            (Biome::Beach, 0.8, 0.4),
            (Biome::Plains, 0.8, 0.4),
            (Biome::ForestHills, 0.7, 0.8),
            (Biome::IceMountains, 0.0, 0.5),
        ] {
            registry
                .register(biome.id(), BiomeDef::new(biome.name(), temperature, rainfall))
                .expect("ladder biome ids and names are distinct");
        }
        registry
    }

    /// Registers `def` under `id`.
    ///
    /// # Errors
    ///
    /// [`BiomeRegistryError::DuplicateId`] if the slot is taken,
    /// [`BiomeRegistryError::DuplicateName`] if the name is.
    pub fn register(&mut self, id: BiomeId, def: BiomeDef) -> Result<(), BiomeRegistryError> {
        let slot = &mut self.slots[usize::from(id.0)];
        if slot.is_some() {
            return Err(BiomeRegistryError::DuplicateId(id.0));
        }
        if self.name_to_id.contains_key(&def.name) {
            return Err(BiomeRegistryError::DuplicateName(def.name));
        }
        self.name_to_id.insert(def.name.clone(), id);
        *slot = Some(def);
        Ok(())
    }

    /// Returns the definition for `id`, if registered.
    pub fn get(&self, id: BiomeId) -> Option<&BiomeDef> {
        self.slots[usize::from(id.0)].as_ref()
    }

    /// Looks up a biome ID by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<BiomeId> {
        self.name_to_id.get(name).copied()
    }

    /// Returns the number of registered biomes.
    pub fn len(&self) -> usize {
        self.name_to_id.len()
    }

    /// Returns `true` if no biomes are registered.
    pub fn is_empty(&self) -> bool {
        self.name_to_id.is_empty()
    }
}

impl Default for BiomeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_covers_ladder() {
        let registry = BiomeRegistry::standard();
        assert_eq!(registry.len(), Biome::ALL.len());
        for biome in Biome::ALL {
            let def = registry.get(biome.id()).expect("ladder biome registered");
            assert_eq!(def.name, biome.name());
            assert_eq!(registry.lookup_by_name(biome.name()), Some(biome.id()));
        }
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = BiomeRegistry::new();
        registry
            .register(BiomeId(3), BiomeDef::new("a", 0.5, 0.5))
            .unwrap();
        let err = registry
            .register(BiomeId(3), BiomeDef::new("b", 0.5, 0.5))
            .unwrap_err();
        assert!(matches!(err, BiomeRegistryError::DuplicateId(3)));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = BiomeRegistry::new();
        registry
            .register(BiomeId(3), BiomeDef::new("swamp", 0.8, 0.9))
            .unwrap();
        let err = registry
            .register(BiomeId(4), BiomeDef::new("swamp", 0.8, 0.9))
            .unwrap_err();
        assert!(matches!(err, BiomeRegistryError::DuplicateName(ref n) if n == "swamp"));
        assert!(registry.get(BiomeId(4)).is_none());
    }

    #[test]
    fn test_empty_registry() {
        let registry = BiomeRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.get(BiomeId(0)).is_none());
    }
}
