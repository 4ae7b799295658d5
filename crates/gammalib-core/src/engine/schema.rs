use super::query::{Attribute, FieldKind, FieldSpec, Schema, to_int, to_number, to_text};
use crate::core::io::gamma::LibraryKind;
use crate::core::models::gamma::GammaLine;
use phf::phf_map;

fn line_z(line: &GammaLine) -> Attribute<'_> {
    Attribute::Int(i64::from(line.z()))
}

fn line_a(line: &GammaLine) -> Attribute<'_> {
    Attribute::Int(i64::from(line.a()))
}

fn line_symbol(line: &GammaLine) -> Attribute<'_> {
    Attribute::Text(line.symbol())
}

fn line_nuclide(line: &GammaLine) -> Attribute<'_> {
    Attribute::Text(line.nuclide_id())
}

fn line_energy(line: &GammaLine) -> Attribute<'_> {
    Attribute::Measured(Some(line.energy()))
}

fn line_sigma(line: &GammaLine) -> Attribute<'_> {
    Attribute::Measured(line.sigma())
}

fn line_intensity(line: &GammaLine) -> Attribute<'_> {
    Attribute::Measured(line.intensity())
}

/// Fields of prompt-gamma libraries.
pub static PROMPT_SCHEMA: Schema = Schema {
    name: "prompt",
    fields: phf_map! {
        "z" => FieldSpec { kind: FieldKind::ExactInt, convert: to_int, access: line_z },
        "a" => FieldSpec { kind: FieldKind::ExactInt, convert: to_int, access: line_a },
        "symbol" => FieldSpec { kind: FieldKind::ExactText, convert: to_text, access: line_symbol },
        "nuclide" => FieldSpec { kind: FieldKind::ExactText, convert: to_text, access: line_nuclide },
        "energy" => FieldSpec { kind: FieldKind::FuzzyNumeric, convert: to_number, access: line_energy },
        "sigma" => FieldSpec { kind: FieldKind::FuzzyNumeric, convert: to_number, access: line_sigma },
        "intensity" => FieldSpec { kind: FieldKind::FuzzyNumeric, convert: to_number, access: line_intensity },
    },
};

/// Fields of decay-gamma libraries. Decay data carries no cross-sections.
pub static DECAY_SCHEMA: Schema = Schema {
    name: "decay",
    fields: phf_map! {
        "z" => FieldSpec { kind: FieldKind::ExactInt, convert: to_int, access: line_z },
        "a" => FieldSpec { kind: FieldKind::ExactInt, convert: to_int, access: line_a },
        "symbol" => FieldSpec { kind: FieldKind::ExactText, convert: to_text, access: line_symbol },
        "nuclide" => FieldSpec { kind: FieldKind::ExactText, convert: to_text, access: line_nuclide },
        "energy" => FieldSpec { kind: FieldKind::FuzzyNumeric, convert: to_number, access: line_energy },
        "intensity" => FieldSpec { kind: FieldKind::FuzzyNumeric, convert: to_number, access: line_intensity },
    },
};

pub fn schema_for(kind: LibraryKind) -> &'static Schema {
    match kind {
        LibraryKind::Prompt => &PROMPT_SCHEMA,
        LibraryKind::Decay => &DECAY_SCHEMA,
    }
}
