use gammalib::core::io::gamma::LibraryKind;

pub const ELEMENTS_FILE: &str = "elements.dat";
pub const NUCLIDES_FILE: &str = "nuclides.dat";

pub struct DefaultLibrary {
    pub name: &'static str,
    pub kind: LibraryKind,
    pub file: &'static str,
}

/// Libraries registered from the data directory when the config file declares none.
pub const DEFAULT_LIBRARIES: &[DefaultLibrary] = &[
    DefaultLibrary {
        name: "pgaa",
        kind: LibraryKind::Prompt,
        file: "prompt.dat",
    },
    DefaultLibrary {
        name: "decay",
        kind: LibraryKind::Decay,
        file: "decay.dat",
    },
];
