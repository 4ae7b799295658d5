use super::config::{DatabaseConfig, LibraryConfig};
use super::error::EngineError;
use super::library::GammaLibrary;
use crate::core::tables::elements::ElementTable;
use crate::core::tables::nuclides::NuclideTable;
use std::sync::Arc;
use tracing::info;

/// Everything a lookup needs: both reference tables and the registered gamma libraries.
///
/// Tables are loaded eagerly; libraries are only registered here and open on first query.
#[derive(Debug)]
pub struct ReferenceData {
    elements: Arc<ElementTable>,
    nuclides: Arc<NuclideTable>,
    libraries: Vec<GammaLibrary>,
}

impl ReferenceData {
    /// Wraps already loaded tables, with no libraries registered.
    pub fn new(elements: Arc<ElementTable>, nuclides: Arc<NuclideTable>) -> Self {
        Self {
            elements,
            nuclides,
            libraries: Vec::new(),
        }
    }

    /// Loads the element and nuclide tables and registers every configured library.
    pub fn load(config: &DatabaseConfig) -> Result<Self, EngineError> {
        let elements = ElementTable::load(&config.elements_path)?;
        let nuclides = NuclideTable::load(&config.nuclides_path, &elements)?;

        let mut data = Self::new(Arc::new(elements), Arc::new(nuclides));
        for library in &config.libraries {
            data.register(library)?;
        }

        info!(
            "Reference data ready: {} elements, {} nuclides, {} gamma libraries",
            data.elements.len(),
            data.nuclides.len(),
            data.libraries.len()
        );
        Ok(data)
    }

    /// Registers a file-backed library described by `config`.
    pub fn register(&mut self, config: &LibraryConfig) -> Result<(), EngineError> {
        let library = GammaLibrary::from_path(
            &config.name,
            config.kind,
            &config.path,
            Arc::clone(&self.nuclides),
        )
        .with_fuzziness(config.fuzziness);
        self.add_library(library)
    }

    pub fn add_library(&mut self, library: GammaLibrary) -> Result<(), EngineError> {
        if self.find_library(library.name()).is_some() {
            return Err(EngineError::DuplicateLibrary(library.name().to_string()));
        }
        self.libraries.push(library);
        Ok(())
    }

    pub fn elements(&self) -> &ElementTable {
        &self.elements
    }

    pub fn nuclides(&self) -> &NuclideTable {
        &self.nuclides
    }

    pub fn libraries(&self) -> &[GammaLibrary] {
        &self.libraries
    }

    /// Case-insensitive library lookup.
    pub fn library(&self, name: &str) -> Result<&GammaLibrary, EngineError> {
        self.find_library(name)
            .ok_or_else(|| EngineError::LibraryNotFound(name.to_string()))
    }

    fn find_library(&self, name: &str) -> Option<&GammaLibrary> {
        self.libraries
            .iter()
            .find(|library| library.name().eq_ignore_ascii_case(name))
    }
}
