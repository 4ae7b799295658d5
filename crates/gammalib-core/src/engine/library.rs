use super::config::DEFAULT_FUZZINESS;
use super::query::{FieldKind, GammaQuery, QueryArg, QueryError, Schema};
use super::schema::schema_for;
use crate::core::io::delimited::DataLoadError;
use crate::core::io::gamma::{DelimitedGammaSource, LibraryKind};
use crate::core::io::traits::GammaSource;
use crate::core::models::gamma::GammaLine;
use crate::core::tables::nuclides::NuclideTable;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

type LoadResult = Result<Vec<GammaLine>, Arc<DataLoadError>>;

/// A named, lazily opened collection of gamma lines.
///
/// The lines are read from the library's source on first use. The first caller performs the
/// load while concurrent callers wait for it; every later call sees the same line set. A
/// failed load is cached as well, so an unusable file is reported consistently instead of
/// being re-read on each query.
pub struct GammaLibrary {
    name: String,
    kind: LibraryKind,
    fuzziness: f64,
    source: Box<dyn GammaSource>,
    nuclides: Arc<NuclideTable>,
    lines: OnceLock<LoadResult>,
}

impl GammaLibrary {
    pub fn new(
        name: &str,
        kind: LibraryKind,
        source: Box<dyn GammaSource>,
        nuclides: Arc<NuclideTable>,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            fuzziness: DEFAULT_FUZZINESS,
            source,
            nuclides,
            lines: OnceLock::new(),
        }
    }

    /// A library backed by a delimited file of the given kind.
    pub fn from_path(name: &str, kind: LibraryKind, path: &Path, nuclides: Arc<NuclideTable>) -> Self {
        Self::new(name, kind, Box::new(DelimitedGammaSource::new(path, kind)), nuclides)
    }

    pub fn with_fuzziness(mut self, fuzziness: f64) -> Self {
        self.fuzziness = fuzziness;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LibraryKind {
        self.kind
    }

    /// Fuzziness used by queries that do not set their own.
    pub fn fuzziness(&self) -> f64 {
        self.fuzziness
    }

    pub fn schema(&self) -> &'static Schema {
        schema_for(self.kind)
    }

    /// Queryable fields and their comparison kinds.
    pub fn fields(&self) -> Vec<(&'static str, FieldKind)> {
        self.schema().describe()
    }

    pub fn source(&self) -> &dyn GammaSource {
        self.source.as_ref()
    }

    /// Whether the line set has been loaded successfully.
    pub fn is_open(&self) -> bool {
        matches!(self.lines.get(), Some(Ok(_)))
    }

    /// Loads the line set if this has not happened yet.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Load` when the source cannot be read. The error is remembered
    /// and returned again by every later call.
    pub fn open(&self) -> Result<&[GammaLine], QueryError> {
        let loaded = self.lines.get_or_init(|| {
            info!("Opening {} as '{}'", self.source.describe(), self.name);
            let result = self.source.load(&self.nuclides);
            match &result {
                Ok(lines) => info!("Loaded {} gamma lines into '{}'", lines.len(), self.name),
                Err(e) => tracing::error!("Failed to open gamma library '{}': {}", self.name, e),
            }
            result.map_err(Arc::new)
        });

        match loaded {
            Ok(lines) => Ok(lines.as_slice()),
            Err(e) => Err(QueryError::Load {
                library: self.name.clone(),
                source: Arc::clone(e),
            }),
        }
    }

    /// All lines in library order. Opens the library if necessary.
    pub fn lines(&self) -> Result<&[GammaLine], QueryError> {
        self.open()
    }

    /// Runs `query` against the library.
    ///
    /// Every filter and sort key is validated against the library's fields before the
    /// library is opened, so a bad key never triggers a load.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidKey`, `QueryError::InvalidValue` or `QueryError::Load`.
    pub fn query(&self, query: &GammaQuery) -> Result<Vec<GammaLine>, QueryError> {
        let compiled = self.schema().compile(&self.name, query, self.fuzziness)?;
        if compiled.filter_count() == 0 {
            debug!("Query against '{}' has no usable filter; nothing matches", self.name);
            return Ok(Vec::new());
        }

        let lines = self.open()?;
        let results = compiled.execute(lines);
        debug!(
            "Query against '{}' matched {} of {} lines",
            self.name,
            results.len(),
            lines.len()
        );
        Ok(results)
    }

    /// Keyword-style search: `filters` maps field names to literal values.
    pub fn find(
        &self,
        fuzziness: Option<f64>,
        sort_key: Option<&str>,
        sort_reverse: bool,
        filters: &BTreeMap<String, QueryArg>,
    ) -> Result<Vec<GammaLine>, QueryError> {
        let mut query = filters
            .iter()
            .fold(GammaQuery::new(), |q, (key, value)| q.filter(key, value.clone()))
            .reverse(sort_reverse);
        if let Some(fuzziness) = fuzziness {
            query = query.fuzziness(fuzziness);
        }
        if let Some(key) = sort_key {
            query = query.sort_by(key);
        }
        self.query(&query)
    }
}

impl fmt::Debug for GammaLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GammaLibrary")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("fuzziness", &self.fuzziness)
            .field("source", &self.source.describe())
            .field("open", &self.is_open())
            .finish()
    }
}
