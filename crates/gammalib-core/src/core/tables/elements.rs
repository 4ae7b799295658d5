use crate::core::io::delimited::{DataLoadError, DelimitedFile, MalformedKind};
use crate::core::models::element::{Element, MAX_ATOMIC_NUMBER};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

const COL_Z: usize = 0;
const COL_SYMBOL: usize = 1;
const COL_NAME: usize = 2;
const COL_MASS: usize = 3;
const ELEMENT_COLUMNS: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("No element with {field} '{value}'")]
    NotFound { field: &'static str, value: String },
}

/// The periodic table.
///
/// Conceptually a mapping from atomic number to [`Element`]. Atomic number 0 is a
/// permanent sentinel for "no element" (a free neutron) and never resolves to a record,
/// whatever the loaded file contains. Atomic numbers inside the loaded range that have no
/// row in the file stay explicitly absent.
#[derive(Debug, Default)]
pub struct ElementTable {
    /// Elements ordered by atomic number.
    elements: Vec<Arc<Element>>,
    /// `slots[z]` is the position of element `z` in `elements`; sized to the highest Z.
    slots: Vec<Option<usize>>,
}

impl ElementTable {
    /// Loads the table from a delimited file with columns `Z, Symbol, Name, Mass`.
    ///
    /// # Errors
    ///
    /// Returns `DataLoadError::Io`/`Csv` if the file cannot be read, and
    /// `DataLoadError::Malformed` with the offending line for short rows, unparsable or
    /// out-of-range atomic numbers, empty symbols or names, and duplicate elements.
    /// A malformed mass alone does not fail: the element loads with an unknown mass.
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let file = DelimitedFile::open(path)?;
        Self::from_file(&file)
    }

    pub fn from_file(file: &DelimitedFile) -> Result<Self, DataLoadError> {
        let mut elements = Vec::with_capacity(file.len());
        let mut seen_z = HashSet::new();
        let mut seen_symbols = HashSet::new();
        let mut seen_names = HashSet::new();

        for row in file.rows(ELEMENT_COLUMNS) {
            let row = row?;
            let z = row.required_u32(COL_Z, "Z")?;
            if z == 0 || z > MAX_ATOMIC_NUMBER {
                return Err(row.malformed(MalformedKind::AtomicNumberOutOfRange(z)));
            }
            let symbol = row.required_text(COL_SYMBOL, "Symbol")?;
            let name = row.required_text(COL_NAME, "Name")?;
            let mass = row.measured(COL_MASS, "Mass");

            if !seen_z.insert(z) {
                return Err(row.malformed(MalformedKind::DuplicateAtomicNumber(z)));
            }
            if !seen_symbols.insert(symbol.to_ascii_lowercase()) {
                return Err(row.malformed(MalformedKind::DuplicateSymbol(symbol.to_string())));
            }
            if !seen_names.insert(name.to_ascii_lowercase()) {
                return Err(row.malformed(MalformedKind::DuplicateName(name.to_string())));
            }

            elements.push(Arc::new(Element::new(z, symbol, name, mass)));
        }

        let table = Self::from_sorted(elements);
        tracing::info!(
            "Loaded {} elements (Z up to {}) from '{}'",
            table.len(),
            table.max_z(),
            file.path()
        );
        Ok(table)
    }

    fn from_sorted(mut elements: Vec<Arc<Element>>) -> Self {
        elements.sort_by_key(|e| e.z());
        let max_z = elements.last().map_or(0, |e| e.z() as usize);
        let mut slots = vec![None; max_z + 1];
        for (index, element) in elements.iter().enumerate() {
            slots[element.z() as usize] = Some(index);
        }
        Self { elements, slots }
    }

    /// Shared handle to the element with atomic number `z`.
    pub fn get(&self, z: u32) -> Option<&Arc<Element>> {
        // Z = 0 means "no element", regardless of what was loaded.
        if z == 0 {
            return None;
        }
        let index = (*self.slots.get(z as usize)?)?;
        self.elements.get(index)
    }

    /// The element with atomic number `z`; `None` for `z = 0` and for any Z not loaded.
    pub fn by_z(&self, z: u32) -> Option<&Element> {
        self.get(z).map(Arc::as_ref)
    }

    /// Case-insensitive lookup by symbol.
    pub fn by_symbol(&self, symbol: &str) -> Result<&Element, LookupError> {
        self.elements
            .iter()
            .find(|e| e.symbol().eq_ignore_ascii_case(symbol))
            .map(Arc::as_ref)
            .ok_or_else(|| LookupError::NotFound {
                field: "symbol",
                value: symbol.to_string(),
            })
    }

    /// Case-insensitive lookup by name.
    pub fn by_name(&self, name: &str) -> Result<&Element, LookupError> {
        self.elements
            .iter()
            .find(|e| e.name().eq_ignore_ascii_case(name))
            .map(Arc::as_ref)
            .ok_or_else(|| LookupError::NotFound {
                field: "name",
                value: name.to_string(),
            })
    }

    /// Every element, ordered by atomic number.
    pub fn all(&self) -> &[Arc<Element>] {
        &self.elements
    }

    /// Resolves a combined selector.
    ///
    /// A symbol takes precedence over a name, which takes precedence over an atomic
    /// number; without any selector every element is returned. Symbol and name misses are
    /// errors, an absent atomic number is an empty result.
    pub fn select(
        &self,
        z: Option<u32>,
        symbol: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<&Element>, LookupError> {
        if let Some(symbol) = symbol {
            return self.by_symbol(symbol).map(|e| vec![e]);
        }
        if let Some(name) = name {
            return self.by_name(name).map(|e| vec![e]);
        }
        if let Some(z) = z {
            return Ok(self.by_z(z).into_iter().collect());
        }
        Ok(self.elements.iter().map(Arc::as_ref).collect())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Highest loaded atomic number, 0 for an empty table.
    pub fn max_z(&self) -> u32 {
        self.elements.last().map_or(0, |e| e.z())
    }
}
