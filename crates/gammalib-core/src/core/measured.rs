use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::ops::{Div, Mul};
use std::str::FromStr;

/// Token rendered in place of a quantity whose value is unknown.
pub const UNKNOWN_PLACEHOLDER: &str = "---";

/// A physical quantity with an optional value and an optional uncertainty.
///
/// "Unknown" is a regular state, distinct from zero: a nuclide without a measured
/// abundance carries an unknown abundance, not an abundance of `0.0`. Equality and
/// ordering are defined over the value alone and behave like IEEE NaN for unknown
/// values: an unknown quantity is never equal to, and never orderable against,
/// anything, including another unknown quantity.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasuredValue {
    value: Option<f64>,
    uncertainty: Option<f64>,
}

impl MeasuredValue {
    /// The fully unknown quantity.
    pub const UNKNOWN: Self = Self {
        value: None,
        uncertainty: None,
    };

    /// Creates a quantity with a known value and a known uncertainty.
    ///
    /// Non-finite components are stored as unknown.
    pub fn new(value: f64, uncertainty: f64) -> Self {
        Self::from_parts(Some(value), Some(uncertainty))
    }

    /// Creates a quantity with a known value and an unknown uncertainty.
    pub fn with_value(value: f64) -> Self {
        Self::from_parts(Some(value), None)
    }

    pub fn from_parts(value: Option<f64>, uncertainty: Option<f64>) -> Self {
        Self {
            value: value.filter(|v| v.is_finite()),
            uncertainty: uncertainty.filter(|u| u.is_finite()).map(f64::abs),
        }
    }

    /// Parses the combined `value(error)` text encoding.
    ///
    /// The parenthesised digits count in units of the last decimal place of the
    /// mantissa, so `"196.966569(4)"` is `196.966569 ± 0.000004`. An exponent may follow
    /// the closing parenthesis (`"1.23(4)e-3"`), and a decimal point inside the
    /// parenthesis marks an absolute uncertainty (`"1234(1.5)"`). A bare number yields a
    /// known value with an unknown uncertainty.
    ///
    /// This never fails: empty or malformed text yields [`MeasuredValue::UNKNOWN`].
    pub fn from_text(text: &str) -> Self {
        match parse_encoded(text) {
            Some((value, uncertainty)) => Self::from_parts(Some(value), uncertainty),
            None => Self::UNKNOWN,
        }
    }

    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    #[inline]
    pub fn uncertainty(&self) -> Option<f64> {
        self.uncertainty
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.value.is_none()
    }

    /// Absolute distance between this value and `other`, or `None` when unknown.
    pub fn distance_to(&self, other: f64) -> Option<f64> {
        self.value.map(|v| (v - other).abs())
    }

    /// Renders the quantity followed by `unit`, or the bare placeholder when unknown.
    pub fn with_unit<'a>(&'a self, unit: &'a str) -> WithUnit<'a> {
        WithUnit { value: self, unit }
    }

    /// Total order over values that places every unknown quantity after all known ones.
    ///
    /// Two unknown quantities compare as equal here so that a stable sort keeps them in
    /// their original relative order.
    pub fn cmp_unknown_last(&self, other: &Self) -> Ordering {
        match (self.value, other.value) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

pub struct WithUnit<'a> {
    value: &'a MeasuredValue,
    unit: &'a str,
}

impl fmt::Display for WithUnit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_unknown() {
            f.write_str(UNKNOWN_PLACEHOLDER)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_encoded(text: &str) -> Option<(f64, Option<f64>)> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let Some(open) = text.find('(') else {
        return parse_finite(text).map(|value| (value, None));
    };
    let close = open + text[open..].find(')')?;

    let mantissa = text[..open].trim();
    let error = text[open + 1..close].trim();
    let suffix = text[close + 1..].trim();

    // The digit count of the mantissa only means something without an inline exponent.
    if mantissa.contains(['e', 'E']) || error.is_empty() {
        return None;
    }

    let scale = if suffix.is_empty() {
        1.0
    } else {
        let exponent = suffix.strip_prefix(['e', 'E'])?;
        10f64.powi(exponent.parse::<i32>().ok()?)
    };

    let value = parse_finite(mantissa)? * scale;
    let uncertainty = if error.contains('.') {
        parse_finite(error)?
    } else {
        if !error.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits: f64 = error.parse().ok()?;
        let decimals = mantissa
            .split_once('.')
            .map_or(0, |(_, fraction)| fraction.len());
        digits / 10f64.powi(decimals as i32)
    };

    if uncertainty < 0.0 {
        return None;
    }
    Some((value, Some(uncertainty * scale)))
}

impl FromStr for MeasuredValue {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_text(s))
    }
}

impl From<f64> for MeasuredValue {
    fn from(value: f64) -> Self {
        Self::with_value(value)
    }
}

impl PartialEq for MeasuredValue {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.value, other.value), (Some(a), Some(b)) if a == b)
    }
}

impl PartialOrd for MeasuredValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.value, other.value) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => None,
        }
    }
}

/// Division by a scalar; the uncertainty propagates linearly.
impl Div<f64> for MeasuredValue {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self::from_parts(self.value.map(|v| v / rhs), self.uncertainty.map(|u| u / rhs))
    }
}

impl Mul<f64> for MeasuredValue {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::from_parts(self.value.map(|v| v * rhs), self.uncertainty.map(|u| u * rhs))
    }
}

impl fmt::Display for MeasuredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(value) = self.value else {
            return f.write_str(UNKNOWN_PLACEHOLDER);
        };

        match self.uncertainty {
            Some(u) if u > 0.0 => {
                // One significant digit of uncertainty, two when it starts with a 1.
                let exponent = u.log10().floor() as i32;
                let leading = u / 10f64.powi(exponent);
                let significant = if leading < 2.0 { 2 } else { 1 };
                let decimals = (significant - 1 - exponent).max(0);
                let digits = (u * 10f64.powi(decimals)).round() as u64;
                write!(f, "{:.*}({})", decimals as usize, value, digits)
            }
            _ => write!(f, "{}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("value should be known");
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    mod parsing {
        use super::*;

        #[test]
        fn parses_value_with_error_in_last_digits() {
            let m = MeasuredValue::from_text("196.966569(4)");
            assert_close(m.value(), 196.966569);
            assert_close(m.uncertainty(), 0.000004);
        }

        #[test]
        fn parses_integer_mantissa_with_error() {
            let m = MeasuredValue::from_text("1234(15)");
            assert_close(m.value(), 1234.0);
            assert_close(m.uncertainty(), 15.0);
        }

        #[test]
        fn exponent_suffix_scales_value_and_error() {
            let m = MeasuredValue::from_text("1.23(4)e-3");
            assert_close(m.value(), 1.23e-3);
            assert_close(m.uncertainty(), 0.04e-3);
        }

        #[test]
        fn decimal_error_is_absolute() {
            let m = MeasuredValue::from_text("1234(1.5)");
            assert_close(m.value(), 1234.0);
            assert_close(m.uncertainty(), 1.5);
        }

        #[test]
        fn bare_number_has_unknown_uncertainty() {
            let m = MeasuredValue::from_text(" 98.65 ");
            assert_close(m.value(), 98.65);
            assert!(m.uncertainty().is_none());
            assert!(!m.is_unknown());
        }

        #[test]
        fn empty_text_is_unknown() {
            assert!(MeasuredValue::from_text("").is_unknown());
            assert!(MeasuredValue::from_text("   ").is_unknown());
        }

        #[test]
        fn malformed_text_is_fully_unknown() {
            for text in ["abc", "1.0(", "1.0(x)", "1.0(2)junk", "nan", "inf", "1e3(2)"] {
                let m = MeasuredValue::from_text(text);
                assert!(m.is_unknown(), "'{text}' should be unknown");
                assert!(m.uncertainty().is_none(), "'{text}' should have no error");
            }
        }

        #[test]
        fn from_str_never_fails() {
            let m: MeasuredValue = "garbage".parse().unwrap();
            assert!(m.is_unknown());
        }
    }

    mod arithmetic {
        use super::*;

        #[test]
        fn division_propagates_uncertainty_linearly() {
            let m = MeasuredValue::new(50.0, 2.0) / 100.0;
            assert_close(m.value(), 0.5);
            assert_close(m.uncertainty(), 0.02);
        }

        #[test]
        fn division_of_unknown_stays_unknown() {
            let m = MeasuredValue::UNKNOWN / 100.0;
            assert!(m.is_unknown());
        }

        #[test]
        fn multiplication_scales_both_parts() {
            let m = MeasuredValue::new(0.25, 0.01) * 100.0;
            assert_close(m.value(), 25.0);
            assert_close(m.uncertainty(), 1.0);
        }

        #[test]
        fn distance_is_absolute() {
            let m = MeasuredValue::with_value(1332.5);
            assert_close(m.distance_to(1333.0), 0.5);
            assert_close(m.distance_to(1332.0), 0.5);
            assert!(MeasuredValue::UNKNOWN.distance_to(1.0).is_none());
        }
    }

    mod comparison {
        use super::*;

        #[test]
        fn equality_ignores_uncertainty() {
            assert_eq!(MeasuredValue::new(1.0, 0.1), MeasuredValue::new(1.0, 0.5));
            assert_ne!(MeasuredValue::new(1.0, 0.1), MeasuredValue::new(2.0, 0.1));
        }

        #[test]
        fn unknown_is_never_equal_or_orderable() {
            let unknown = MeasuredValue::UNKNOWN;
            let known = MeasuredValue::with_value(1.0);
            assert_ne!(unknown, unknown);
            assert_ne!(unknown, known);
            assert!(unknown.partial_cmp(&known).is_none());
            assert!(known.partial_cmp(&unknown).is_none());
        }

        #[test]
        fn ordering_follows_value() {
            assert!(MeasuredValue::with_value(1.0) < MeasuredValue::with_value(2.0));
        }

        #[test]
        fn cmp_unknown_last_places_unknown_after_known() {
            let mut values = vec![
                MeasuredValue::UNKNOWN,
                MeasuredValue::with_value(3.0),
                MeasuredValue::with_value(-1.0),
            ];
            values.sort_by(MeasuredValue::cmp_unknown_last);
            assert_eq!(values[0].value(), Some(-1.0));
            assert_eq!(values[1].value(), Some(3.0));
            assert!(values[2].is_unknown());
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn renders_single_significant_error_digit() {
            assert_eq!(MeasuredValue::new(1332.492, 0.004).to_string(), "1332.492(4)");
        }

        #[test]
        fn renders_two_digits_when_error_starts_with_one() {
            assert_eq!(MeasuredValue::new(0.5, 0.17).to_string(), "0.50(17)");
        }

        #[test]
        fn renders_large_errors_without_decimals() {
            assert_eq!(MeasuredValue::new(1234.0, 15.0).to_string(), "1234(15)");
        }

        #[test]
        fn renders_value_only_without_uncertainty() {
            assert_eq!(MeasuredValue::with_value(98.65).to_string(), "98.65");
        }

        #[test]
        fn renders_unknown_as_placeholder() {
            assert_eq!(MeasuredValue::UNKNOWN.to_string(), UNKNOWN_PLACEHOLDER);
        }

        #[test]
        fn unit_is_omitted_for_unknown_values() {
            assert_eq!(MeasuredValue::with_value(2.5).with_unit("b").to_string(), "2.5 b");
            assert_eq!(MeasuredValue::UNKNOWN.with_unit("b").to_string(), "---");
        }

        #[test]
        fn parsed_text_renders_back_to_the_same_encoding() {
            assert_eq!(
                MeasuredValue::from_text("196.966569(4)").to_string(),
                "196.966569(4)"
            );
        }
    }
}
