use crate::core::models::gamma::GammaLine;
use crate::engine::context::ReferenceData;
use crate::engine::error::EngineError;
use crate::engine::query::GammaQuery;
use itertools::Itertools;
use tracing::{debug, info, instrument};

/// A library line close to the searched energy.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub library: String,
    pub line: GammaLine,
    /// Absolute distance in keV between the line energy and the searched energy.
    pub distance: f64,
}

/// Searches every registered library for lines within `tolerance` of `energy`.
///
/// Each library uses its own default fuzziness when `tolerance` is `None`. Candidates are
/// ranked by distance, then by library name, then by line order.
///
/// # Errors
///
/// Returns `EngineError::Query` if any library fails to open.
#[instrument(skip_all, name = "identify_workflow")]
pub fn run(
    data: &ReferenceData,
    energy: f64,
    tolerance: Option<f64>,
) -> Result<Vec<Candidate>, EngineError> {
    let mut candidates = Vec::new();

    for library in data.libraries() {
        let mut query = GammaQuery::new().filter("energy", energy);
        if let Some(tolerance) = tolerance {
            query = query.fuzziness(tolerance);
        }

        let lines = library.query(&query)?;
        debug!("{} candidate(s) in '{}'", lines.len(), library.name());

        candidates.extend(lines.into_iter().filter_map(|line| {
            let distance = line.energy().distance_to(energy)?;
            Some(Candidate {
                library: library.name().to_string(),
                line,
                distance,
            })
        }));
    }

    info!(
        "Found {} candidate line(s) for {} keV across {} libraries",
        candidates.len(),
        energy,
        data.libraries().len()
    );

    Ok(candidates
        .into_iter()
        .sorted_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.library.cmp(&b.library))
                .then_with(|| a.line.cmp(&b.line))
        })
        .collect())
}
