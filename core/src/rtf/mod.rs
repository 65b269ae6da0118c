pub mod charset;
pub mod color_table;
pub mod controls;
pub mod lexer;

use std::path::Path;

/// Reads an RTF file. RTF is 7-bit text; stray bytes from broken editors
/// are replaced rather than rejected.
pub fn read_rtf(path: impl AsRef<Path>) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
