use crate::core::io::delimited::DataLoadError;
use crate::core::measured::MeasuredValue;
use crate::core::models::gamma::GammaLine;
use phf::Map;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum QueryError {
    #[error("Invalid key '{key}' for gamma library '{library}'")]
    InvalidKey { library: String, key: String },

    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidValue { field: String, value: String },

    #[error("Gamma library '{library}' could not be opened: {source}")]
    Load {
        library: String,
        source: Arc<DataLoadError>,
    },
}

/// A literal filter value as supplied by a caller.
///
/// `Null` marks a filter that was named but left empty; such filters are skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryArg {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for QueryArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for QueryArg {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for QueryArg {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for QueryArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for QueryArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<QueryArg>> From<Option<T>> for QueryArg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl fmt::Display for QueryArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// A typed comparison value produced by a field's converter.
///
/// The variant, not the field, decides how records are compared: integers compare
/// exactly, text compares case-insensitively and numbers compare within the fuzziness.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparand {
    Int(i64),
    Text(String),
    Number(f64),
}

/// The value of a field as read off a record.
#[derive(Debug, Clone, Copy)]
pub enum Attribute<'a> {
    Int(i64),
    Text(&'a str),
    /// `None` when the record's library does not carry the quantity at all.
    Measured(Option<MeasuredValue>),
}

/// Comparison kind declared for a field in a library's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    ExactInt,
    ExactText,
    FuzzyNumeric,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactInt => "integer, exact",
            Self::ExactText => "text, case-insensitive",
            Self::FuzzyNumeric => "number, fuzzy",
        }
    }
}

/// One entry of a field registry.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub convert: fn(&QueryArg) -> Option<Comparand>,
    pub access: for<'a> fn(&'a GammaLine) -> Attribute<'a>,
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec").field("kind", &self.kind).finish()
    }
}

/// Converts integers, integral floats and integer text.
pub fn to_int(arg: &QueryArg) -> Option<Comparand> {
    match arg {
        QueryArg::Int(v) => Some(Comparand::Int(*v)),
        QueryArg::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(Comparand::Int(*v as i64)),
        QueryArg::Text(s) => s.trim().parse().ok().map(Comparand::Int),
        _ => None,
    }
}

/// Converts any non-null literal to its text form.
pub fn to_text(arg: &QueryArg) -> Option<Comparand> {
    match arg {
        QueryArg::Null => None,
        QueryArg::Text(s) => Some(Comparand::Text(s.trim().to_string())),
        other => Some(Comparand::Text(other.to_string())),
    }
}

/// Converts numbers and numeric text (including the `value(error)` encoding).
pub fn to_number(arg: &QueryArg) -> Option<Comparand> {
    match arg {
        QueryArg::Int(v) => Some(Comparand::Number(*v as f64)),
        QueryArg::Float(v) if v.is_finite() => Some(Comparand::Number(*v)),
        QueryArg::Text(s) => MeasuredValue::from_text(s).value().map(Comparand::Number),
        _ => None,
    }
}

/// A query against a gamma library.
///
/// ```ignore
/// let query = GammaQuery::new()
///     .filter("energy", 1332.0)
///     .filter("symbol", "Co")
///     .fuzziness(0.5)
///     .sort_by("intensity")
///     .descending();
/// let lines = library.query(&query)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GammaQuery {
    fuzziness: Option<f64>,
    sort_key: Option<String>,
    sort_reverse: bool,
    filters: Vec<(String, QueryArg)>,
}

impl GammaQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, key: &str, value: impl Into<QueryArg>) -> Self {
        self.filters.push((key.to_string(), value.into()));
        self
    }

    pub fn fuzziness(mut self, fuzziness: f64) -> Self {
        self.fuzziness = Some(fuzziness);
        self
    }

    pub fn sort_by(mut self, key: &str) -> Self {
        self.sort_key = Some(key.to_string());
        self
    }

    pub fn descending(mut self) -> Self {
        self.sort_reverse = true;
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.sort_reverse = reverse;
        self
    }
}

/// A library's field registry: lowercase field name to [`FieldSpec`].
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: Map<&'static str, FieldSpec>,
}

impl Schema {
    /// Case-insensitive field lookup.
    pub fn resolve(&self, key: &str) -> Option<(&'static str, &FieldSpec)> {
        self.fields
            .get_entry(key.trim().to_ascii_lowercase().as_str())
            .map(|(name, spec)| (*name, spec))
    }

    /// Field names with their comparison kinds, ordered by name.
    pub fn describe(&self) -> Vec<(&'static str, FieldKind)> {
        let mut fields: Vec<_> = self
            .fields
            .entries()
            .map(|(name, spec)| (*name, spec.kind))
            .collect();
        fields.sort_by_key(|(name, _)| *name);
        fields
    }

    /// Resolves and converts every part of `query` without touching any records.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidKey` for a filter or sort key missing from the registry
    /// and `QueryError::InvalidValue` for a literal the field's converter rejects or a
    /// fuzziness that is negative or not finite.
    pub fn compile(
        &self,
        library: &str,
        query: &GammaQuery,
        default_fuzziness: f64,
    ) -> Result<CompiledQuery<'_>, QueryError> {
        let invalid_key = |key: &str| QueryError::InvalidKey {
            library: library.to_string(),
            key: key.to_string(),
        };

        let mut resolved = Vec::with_capacity(query.filters.len());
        for (key, arg) in &query.filters {
            let (field, spec) = self.resolve(key).ok_or_else(|| invalid_key(key))?;
            resolved.push((field, spec, arg));
        }

        let sort = match &query.sort_key {
            Some(key) => Some(self.resolve(key).ok_or_else(|| invalid_key(key))?.1),
            None => None,
        };

        let fuzziness = query.fuzziness.unwrap_or(default_fuzziness);
        if !fuzziness.is_finite() || fuzziness < 0.0 {
            return Err(QueryError::InvalidValue {
                field: "fuzziness".to_string(),
                value: fuzziness.to_string(),
            });
        }

        let mut filters = Vec::with_capacity(resolved.len());
        for (field, spec, arg) in resolved {
            if *arg == QueryArg::Null {
                continue;
            }
            let comparand = (spec.convert)(arg).ok_or_else(|| QueryError::InvalidValue {
                field: field.to_string(),
                value: arg.to_string(),
            })?;
            filters.push(Filter {
                field,
                spec,
                comparand,
            });
        }

        Ok(CompiledQuery {
            filters,
            sort,
            sort_reverse: query.sort_reverse,
            fuzziness,
        })
    }
}

#[derive(Debug)]
struct Filter<'s> {
    field: &'static str,
    spec: &'s FieldSpec,
    comparand: Comparand,
}

impl Filter<'_> {
    fn matches(&self, line: &GammaLine, fuzziness: f64) -> bool {
        match (&self.comparand, (self.spec.access)(line)) {
            (Comparand::Int(wanted), Attribute::Int(actual)) => *wanted == actual,
            (Comparand::Text(wanted), Attribute::Text(actual)) => actual.eq_ignore_ascii_case(wanted),
            (Comparand::Number(wanted), Attribute::Measured(Some(actual))) => actual
                .distance_to(*wanted)
                .is_some_and(|distance| distance <= fuzziness),
            _ => false,
        }
    }
}

/// A validated query, ready to run against a line set.
#[derive(Debug)]
pub struct CompiledQuery<'s> {
    filters: Vec<Filter<'s>>,
    sort: Option<&'s FieldSpec>,
    sort_reverse: bool,
    fuzziness: f64,
}

impl CompiledQuery<'_> {
    /// Number of filters that carry a usable comparison value.
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Filters (and optionally sorts) a snapshot of `lines`.
    ///
    /// A query without any usable filter matches nothing. Filters are independent AND
    /// predicates, and the result keeps the order of `lines` unless a sort key was given.
    /// The sort is stable and always places unknown quantities last.
    pub fn execute(&self, lines: &[GammaLine]) -> Vec<GammaLine> {
        if self.filters.is_empty() {
            return Vec::new();
        }

        tracing::debug!(
            "Filtering {} lines on [{}] with fuzziness {}",
            lines.len(),
            self.filters
                .iter()
                .map(|f| format!("{}={:?}", f.field, f.comparand))
                .collect::<Vec<_>>()
                .join(", "),
            self.fuzziness
        );

        #[cfg(not(feature = "parallel"))]
        let iterator = lines.iter();

        #[cfg(feature = "parallel")]
        let iterator = lines.par_iter();

        let mut results: Vec<GammaLine> = iterator
            .filter(|line| self.filters.iter().all(|f| f.matches(line, self.fuzziness)))
            .cloned()
            .collect();

        if let Some(spec) = self.sort {
            results.sort_by(|a, b| {
                compare_attributes((spec.access)(a), (spec.access)(b), self.sort_reverse)
            });
        }
        results
    }
}

fn directed(ordering: Ordering, reverse: bool) -> Ordering {
    if reverse { ordering.reverse() } else { ordering }
}

fn compare_attributes(a: Attribute<'_>, b: Attribute<'_>, reverse: bool) -> Ordering {
    match (a, b) {
        (Attribute::Int(x), Attribute::Int(y)) => directed(x.cmp(&y), reverse),
        (Attribute::Text(x), Attribute::Text(y)) => directed(x.cmp(y), reverse),
        (Attribute::Measured(x), Attribute::Measured(y)) => {
            let x = x.unwrap_or(MeasuredValue::UNKNOWN);
            let y = y.unwrap_or(MeasuredValue::UNKNOWN);
            match (x.is_unknown(), y.is_unknown()) {
                (false, false) => directed(x.cmp_unknown_last(&y), reverse),
                _ => x.cmp_unknown_last(&y),
            }
        }
        _ => Ordering::Equal,
    }
}
