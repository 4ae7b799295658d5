use gammalib::engine::query::QueryArg;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid filter '{0}'. Expected 'FIELD=VALUE' (e.g., 'energy=1332.5').")]
    MissingSeparator(String),

    #[error("Field name cannot be empty in filter '{0}'.")]
    EmptyField(String),
}

/// Splits a `FIELD=VALUE` argument into the field name and a typed literal.
pub fn parse_filter(arg: &str) -> Result<(String, QueryArg), ParseError> {
    let (field, value) = arg
        .split_once('=')
        .ok_or_else(|| ParseError::MissingSeparator(arg.to_string()))?;

    let field = field.trim();
    if field.is_empty() {
        return Err(ParseError::EmptyField(arg.to_string()));
    }
    Ok((field.to_string(), parse_literal(value)))
}

/// Types a literal by its shape: integer text, then float text, then plain text.
/// Empty text is a null literal.
pub fn parse_literal(value: &str) -> QueryArg {
    let value = value.trim();
    if value.is_empty() {
        return QueryArg::Null;
    }
    if let Ok(int) = value.parse::<i64>() {
        return QueryArg::Int(int);
    }
    match value.parse::<f64>() {
        Ok(float) if float.is_finite() => QueryArg::Float(float),
        _ => QueryArg::Text(value.to_string()),
    }
}
