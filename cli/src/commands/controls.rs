use std::path::Path;

use anyhow::Context;

use crate::terminal::print;
use scriptor_common::{config::Config, success};
use scriptor_core::rtf::{controls, read_rtf};

pub fn controls(file: &Path, cfg: &Config) -> anyhow::Result<()> {
    let rtf = read_rtf(file).with_context(|| format!("File {} cannot be read", file.display()))?;
    let controls = controls::collect_controls(&rtf)
        .with_context(|| format!("Cannot tokenise {}", file.display()))?;

    if controls.is_empty() {
        print::no_results();
        return Ok(());
    }

    for control in &controls {
        // A backslash before a line break shows up as "\↵".
        let shown = control.replace('\n', "↵");
        match cfg.quiet {
            2 => print::print(&shown),
            _ => print::print_status(shown),
        }
    }

    success!("{} distinct control sequences", controls.len());
    Ok(())
}
