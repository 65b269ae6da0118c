use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;

use crate::commands::ScriptFormat;
use crate::terminal::{input, print};
use scriptor_common::{config::Config, info, success, tagmap, warn};
use scriptor_core::rtf::read_rtf;
use scriptor_core::script::{Script, extract_script};

pub fn script(
    format: ScriptFormat,
    output: Option<PathBuf>,
    arguments: &[String],
    cfg: &Config,
) -> anyhow::Result<()> {
    let (tagmap, file) = tagmap::split_pairs_and_file(arguments)?;

    if !file.exists() {
        anyhow::bail!("File '{}' does not exist", file.display());
    }
    if tagmap.is_empty() {
        info!("No colour/role pairs given; turns are labelled by colour");
    }

    let rtf = read_rtf(&file).with_context(|| format!("File {} cannot be read", file.display()))?;
    let script: Script = extract_script(&rtf, &tagmap, cfg.strict)
        .with_context(|| format!("Cannot extract a script from {}", file.display()))?;

    if script.is_empty() {
        print::no_results();
        return Ok(());
    }

    let rendered: String = match format {
        ScriptFormat::Jsonl => script.to_jsonl()?,
        ScriptFormat::Text => script.to_text(),
    };

    match output {
        Some(path) => {
            if path.exists() && !cfg.force && !input::confirm_overwrite(&path)? {
                warn!("Aborting operation; nothing overwritten");
                return Ok(());
            }
            fs::write(&path, rendered)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            success!("Wrote {} turns to {}", script.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
