use std::path::Path;

use anyhow::Context;
use colored::*;

use crate::terminal::{colors, print};
use scriptor_common::{config::Config, success};
use scriptor_core::rtf::{color_table::ColorTable, read_rtf};

pub fn colors(file: &Path, cfg: &Config) -> anyhow::Result<()> {
    let rtf = read_rtf(file).with_context(|| format!("File {} cannot be read", file.display()))?;
    let table = ColorTable::parse(&rtf)
        .with_context(|| format!("Cannot read the colour table of {}", file.display()))?;

    let details: Vec<(String, ColoredString)> = table
        .iter()
        .map(|(idx, color)| {
            let value = match color {
                Some(rgb) => format!("{rgb}  {}", rgb.to_hex()).color(colors::ROLE),
                None => "default".color(colors::SEPARATOR),
            };
            (format!("\\cf{idx}"), value)
        })
        .collect();

    if cfg.quiet < 2 {
        print::tree_head(0, &file.display().to_string());
    }
    print::as_tree_one_level(details);

    success!("{} colour table entries", table.len());
    Ok(())
}
