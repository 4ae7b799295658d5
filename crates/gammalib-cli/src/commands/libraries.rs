use super::{DataOptions, open_reference_data};
use crate::error::Result;

pub fn run(options: DataOptions<'_>) -> Result<()> {
    let data = open_reference_data(options)?;
    if data.libraries().is_empty() {
        println!("No gamma library is configured.");
        return Ok(());
    }

    for library in data.libraries() {
        println!(
            "{} ({} library, default fuzziness {})",
            library.name(),
            library.kind(),
            library.fuzziness()
        );
        println!("  source: {}", library.source().describe());
        for (field, kind) in library.fields() {
            println!("  {:<10} {}", field, kind.as_str());
        }
    }
    Ok(())
}
