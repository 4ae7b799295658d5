//! Shared reference data for unit tests.

use crate::core::io::delimited::DelimitedFile;
use crate::core::tables::elements::ElementTable;
use crate::core::tables::nuclides::NuclideTable;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub const ELEMENTS_DAT: &str = "\
Z,Symbol,Name,Mass
1,H,Hydrogen,1.00794(7)
2,He,Helium,4.002602(2)
26,Fe,Iron,55.845(2)
27,Co,Cobalt,58.933195(5)
28,Ni,Nickel,58.6934(2)
79,Au,Gold,196.966569(4)
80,Hg,Mercury,200.59(2)
";

pub const NUCLIDES_DAT: &str = "\
Z,A,Abundance,Mass,Sigma
1,1,99.9885(70),1.00782503207(10),0.3326(7)
1,2,0.0115(70),2.0141017778(4),0.000519(7)
26,56,91.754(36),55.9349375(7),2.59(14)
27,59,100,58.9331950(7),37.18(6)
27,60,,59.9338171(8),
28,58,68.0769(89),57.9353429(7),4.6(3)
28,60,26.2231(77),59.9307864(7),2.9(2)
79,197,100,196.9665687(6),98.65(9)
79,198,,197.9682423(6),25100(1400)
79,199,,198.9687652(6),
";

/// Prompt-gamma library rows: `Z, A, Energy, Sigma, Intensity (%)`.
pub const PROMPT_GAMMA_DAT: &str = "\
Z,A,Energy,Sigma,Intensity
1,1,2223.2487(4),0.3326(7),100
26,56,7631.136(14),0.653(13),28.5(6)
26,56,7645.545(14),0.549(11),24.0(5)
28,58,8998.4(2),1.49(3),
79,197,214.971(3),7.68(14),7.8(2)
79,197,97.21(2),bogus,2.1(1)
";

/// Decay-gamma library rows: `Z, A, Energy, Intensity (%)`.
pub const DECAY_GAMMA_DAT: &str = "\
Z,A,Energy,Intensity
27,60,1173.228(3),99.85(3)
27,60,1332.5,99.9826(6)
28,60,1333.0,
26,56,1334.0,bogus
79,198,411.80205(17),95.62(6)
";

pub fn element_table() -> ElementTable {
    let file = DelimitedFile::from_reader(ELEMENTS_DAT.as_bytes(), "elements.dat").unwrap();
    ElementTable::from_file(&file).unwrap()
}

pub fn nuclide_table() -> NuclideTable {
    let file = DelimitedFile::from_reader(NUCLIDES_DAT.as_bytes(), "nuclides.dat").unwrap();
    NuclideTable::from_file(&file, &element_table()).unwrap()
}

pub fn shared_tables() -> (Arc<ElementTable>, Arc<NuclideTable>) {
    let elements = element_table();
    let file = DelimitedFile::from_reader(NUCLIDES_DAT.as_bytes(), "nuclides.dat").unwrap();
    let nuclides = NuclideTable::from_file(&file, &elements).unwrap();
    (Arc::new(elements), Arc::new(nuclides))
}

/// Writes the element, nuclide and both gamma-library files into `dir`.
pub fn write_data_dir(dir: &Path) {
    fs::write(dir.join("elements.dat"), ELEMENTS_DAT).unwrap();
    fs::write(dir.join("nuclides.dat"), NUCLIDES_DAT).unwrap();
    fs::write(dir.join("prompt.dat"), PROMPT_GAMMA_DAT).unwrap();
    fs::write(dir.join("decay.dat"), DECAY_GAMMA_DAT).unwrap();
}
