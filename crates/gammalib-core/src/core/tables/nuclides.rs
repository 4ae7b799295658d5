use super::elements::ElementTable;
use crate::core::io::delimited::{DataLoadError, DelimitedFile, MalformedKind};
use crate::core::models::nuclide::Nuclide;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

const COL_Z: usize = 0;
const COL_A: usize = 1;
const COL_ABUNDANCE: usize = 2;
const COL_MASS: usize = 3;
const COL_SIGMA: usize = 4;
const NUCLIDE_COLUMNS: usize = 5;

/// The nuclide chart: a two-level index from atomic number to mass number.
///
/// Iteration order is by Z, then by A. No (Z, A) pair appears twice.
#[derive(Debug, Default)]
pub struct NuclideTable {
    storage: BTreeMap<u32, BTreeMap<u32, Arc<Nuclide>>>,
    count: usize,
}

impl NuclideTable {
    /// Loads the chart from a delimited file with columns `Z, A, Abundance (%), Mass, Sigma`.
    ///
    /// Abundances are stored as fractions. Any of the three measured columns may be blank
    /// or malformed, which loads as unknown.
    ///
    /// # Errors
    ///
    /// Returns `DataLoadError::Malformed` with the offending line for short rows,
    /// unparsable Z or A, a Z missing from `elements`, and duplicate (Z, A) pairs.
    pub fn load(path: &Path, elements: &ElementTable) -> Result<Self, DataLoadError> {
        let file = DelimitedFile::open(path)?;
        Self::from_file(&file, elements)
    }

    pub fn from_file(file: &DelimitedFile, elements: &ElementTable) -> Result<Self, DataLoadError> {
        let mut table = Self::default();

        for row in file.rows(NUCLIDE_COLUMNS) {
            let row = row?;
            let z = row.required_u32(COL_Z, "Z")?;
            let element = elements
                .get(z)
                .ok_or_else(|| row.malformed(MalformedKind::UnknownElement(z)))?;
            let a = row.required_u32(COL_A, "A")?;
            let abundance = row.measured(COL_ABUNDANCE, "Abundance") / 100.0;
            let mass = row.measured(COL_MASS, "Mass");
            let sigma = row.measured(COL_SIGMA, "Sigma");

            let isotopes = table.storage.entry(z).or_default();
            if isotopes.contains_key(&a) {
                return Err(row.malformed(MalformedKind::DuplicateNuclide { z, a }));
            }
            isotopes.insert(
                a,
                Arc::new(Nuclide::new(Arc::clone(element), a, mass, abundance, sigma)),
            );
            table.count += 1;
        }

        tracing::info!(
            "Loaded {} nuclides of {} elements from '{}'",
            table.count,
            table.storage.len(),
            file.path()
        );
        Ok(table)
    }

    /// Shared handle to the nuclide (Z, A).
    pub fn get(&self, z: u32, a: u32) -> Option<&Arc<Nuclide>> {
        self.storage.get(&z)?.get(&a)
    }

    /// All isotopes of element `z`, ordered by A.
    pub fn isotopes(&self, z: u32) -> impl Iterator<Item = &Arc<Nuclide>> {
        self.storage.get(&z).into_iter().flat_map(|by_a| by_a.values())
    }

    /// All nuclides, ordered by Z, then A.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Nuclide>> {
        self.storage.values().flat_map(|by_a| by_a.values())
    }

    /// Finds nuclides matching every given criterion.
    ///
    /// With Z and A the lookup is direct; with Z alone only that element's isotopes are
    /// scanned; otherwise every nuclide is. The remaining criteria (A, symbol and name,
    /// the latter two case-insensitive) narrow the candidates as independent AND
    /// filters. No match is an empty result, never an error.
    pub fn find(
        &self,
        z: Option<u32>,
        a: Option<u32>,
        symbol: Option<&str>,
        name: Option<&str>,
    ) -> Vec<&Nuclide> {
        let candidates: Vec<&Nuclide> = match (z, a) {
            (Some(z), Some(a)) => self.get(z, a).map(Arc::as_ref).into_iter().collect(),
            (Some(z), None) => self.isotopes(z).map(Arc::as_ref).collect(),
            (None, _) => self.iter().map(Arc::as_ref).collect(),
        };

        candidates
            .into_iter()
            .filter(|n| a.is_none_or(|a| n.a() == a))
            .filter(|n| symbol.is_none_or(|s| n.symbol().eq_ignore_ascii_case(s)))
            .filter(|n| name.is_none_or(|s| n.name().eq_ignore_ascii_case(s)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures;
    use std::collections::BTreeSet;

    fn ids(nuclides: &[&Nuclide]) -> BTreeSet<String> {
        nuclides.iter().map(|n| n.id().to_string()).collect()
    }

    fn parse(text: &str) -> Result<NuclideTable, DataLoadError> {
        let file = DelimitedFile::from_reader(text.as_bytes(), "nuclides.dat")?;
        NuclideTable::from_file(&file, &fixtures::element_table())
    }

    mod find_tests {
        use super::*;

        #[test]
        fn z_and_a_returns_exactly_one_nuclide() {
            let table = fixtures::nuclide_table();
            let found = table.find(Some(79), Some(197), None, None);
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].id(), "197-Au");
        }

        #[test]
        fn symbol_alone_returns_every_isotope_of_the_element() {
            let table = fixtures::nuclide_table();
            let found = table.find(None, None, Some("Au"), None);
            let expected: BTreeSet<String> = ["197-Au", "198-Au", "199-Au"]
                .into_iter()
                .map(String::from)
                .collect();
            assert_eq!(ids(&found), expected);
        }

        #[test]
        fn name_and_z_select_the_same_isotopes_as_symbol() {
            let table = fixtures::nuclide_table();
            let by_symbol = ids(&table.find(None, None, Some("au"), None));
            assert_eq!(ids(&table.find(None, None, None, Some("GOLD"))), by_symbol);
            assert_eq!(ids(&table.find(Some(79), None, None, None)), by_symbol);
        }

        #[test]
        fn a_alone_scans_all_elements() {
            let table = fixtures::nuclide_table();
            let found = table.find(None, Some(60), None, None);
            let expected: BTreeSet<String> =
                ["60-Co", "60-Ni"].into_iter().map(String::from).collect();
            assert_eq!(ids(&found), expected);
        }

        #[test]
        fn conflicting_criteria_yield_empty() {
            let table = fixtures::nuclide_table();
            assert!(table.find(Some(79), None, Some("Fe"), None).is_empty());
            assert!(table.find(Some(79), Some(60), None, None).is_empty());
            assert!(table.find(None, Some(197), None, Some("Iron")).is_empty());
        }

        #[test]
        fn z_without_isotopes_yields_empty_not_everything() {
            let table = fixtures::nuclide_table();
            assert!(table.find(Some(2), None, None, None).is_empty());
            assert!(table.find(Some(0), None, None, None).is_empty());
        }

        #[test]
        fn no_criteria_returns_every_nuclide_in_z_then_a_order() {
            let table = fixtures::nuclide_table();
            let found = table.find(None, None, None, None);
            assert_eq!(found.len(), table.len());
            let keys: Vec<(u32, u32)> = found.iter().map(|n| (n.z(), n.a())).collect();
            let mut sorted = keys.clone();
            sorted.sort_unstable();
            assert_eq!(keys, sorted);
        }

        #[test]
        fn filter_order_does_not_change_the_result() {
            let table = fixtures::nuclide_table();
            let all = table.find(None, None, None, None);
            let by_a_then_symbol: Vec<&str> = all
                .iter()
                .filter(|n| n.a() == 60)
                .filter(|n| n.symbol().eq_ignore_ascii_case("ni"))
                .map(|n| n.id())
                .collect();
            let by_symbol_then_a: Vec<&str> = all
                .iter()
                .filter(|n| n.symbol().eq_ignore_ascii_case("ni"))
                .filter(|n| n.a() == 60)
                .map(|n| n.id())
                .collect();
            let found: Vec<&str> = table
                .find(None, Some(60), Some("ni"), None)
                .iter()
                .map(|n| n.id())
                .collect();
            assert_eq!(found, by_a_then_symbol);
            assert_eq!(found, by_symbol_then_a);
        }
    }

    mod load_tests {
        use super::*;

        #[test]
        fn abundance_is_normalized_to_a_fraction() {
            let table = fixtures::nuclide_table();
            let au = table.get(79, 197).unwrap();
            assert_eq!(au.abundance().value(), Some(1.0));
        }

        #[test]
        fn blank_measured_columns_are_unknown() {
            let table = fixtures::nuclide_table();
            let co60 = table.get(27, 60).unwrap();
            assert!(co60.abundance().is_unknown());
            assert!(co60.sigma().is_unknown());
            assert!(!co60.atomic_mass().is_unknown());
        }

        #[test]
        fn nuclide_shares_the_element_record() {
            let elements = fixtures::element_table();
            let file = DelimitedFile::from_reader(fixtures::NUCLIDES_DAT.as_bytes(), "n").unwrap();
            let table = NuclideTable::from_file(&file, &elements).unwrap();
            let gold = elements.by_z(79).unwrap();
            assert!(std::ptr::eq(table.get(79, 197).unwrap().element(), gold));
        }

        #[test]
        fn malformed_measured_cell_keeps_the_row() {
            let table = parse("Z,A,Abundance,Mass,Sigma\n1,1,lots,1.0078,0.33\n").unwrap();
            let h1 = table.get(1, 1).unwrap();
            assert!(h1.abundance().is_unknown());
            assert_eq!(h1.sigma().value(), Some(0.33));
        }

        #[test]
        fn short_row_aborts_load_with_line_number() {
            let err = parse("Z,A,Abundance,Mass,Sigma\n1,1,99.98,1.0078,0.33\n1,2,0.01\n").unwrap_err();
            assert_eq!(err.path(), "nuclides.dat");
            assert_eq!(err.line(), Some(3));
        }

        #[test]
        fn unknown_element_aborts_load() {
            let err = parse("Z,A,Abundance,Mass,Sigma\n3,7,92.41,7.016,0.045\n").unwrap_err();
            assert!(matches!(
                err,
                DataLoadError::Malformed {
                    kind: MalformedKind::UnknownElement(3),
                    ..
                }
            ));
        }

        #[test]
        fn duplicate_nuclide_aborts_load() {
            let err = parse("Z,A,Abundance,Mass,Sigma\n1,1,,,\n1,1,,,\n").unwrap_err();
            assert!(matches!(
                err,
                DataLoadError::Malformed {
                    line: 3,
                    kind: MalformedKind::DuplicateNuclide { z: 1, a: 1 },
                    ..
                }
            ));
        }
    }
}
