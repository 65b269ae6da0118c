use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;

use crate::terminal::{colors, input, print, progress};
use scriptor_common::{config::Config, success, tagmap::TagMap, warn};
use scriptor_core::converter::{
    BatchReport, COMBINED_FILE_NAME, Discussion, DiscussionConverter, write_combined,
};

type Detail = (String, ColoredString);

pub fn convert(
    rtf_dir: PathBuf,
    jsonl_dir: PathBuf,
    output: Option<PathBuf>,
    tags: &[String],
    cfg: &Config,
) -> anyhow::Result<()> {
    let tagmap: TagMap = if tags.is_empty() {
        TagMap::default_discussion()
    } else {
        TagMap::from_assignments(tags)?
    };
    let outfile: PathBuf = output.unwrap_or_else(|| jsonl_dir.join(COMBINED_FILE_NAME));

    if outfile.exists() && !cfg.force && !input::confirm_overwrite(&outfile)? {
        warn!("Aborting operation; nothing overwritten");
        return Ok(());
    }

    let converter = DiscussionConverter::new(rtf_dir, jsonl_dir, tagmap, cfg.strict);
    let total: usize = converter.rtf_files()?.len();

    let start_time: Instant = Instant::now();
    let span = progress::conversion_span(total);
    let guard = span.enter();
    let report: BatchReport = converter.convert_all(|_, _| progress::report_file_done(&span))?;
    drop(guard);
    drop(span);

    let discussions: Vec<Discussion> = converter
        .combine()
        .with_context(|| format!("Cannot combine the files in {}", converter.jsonl_dir().display()))?;
    write_combined(&discussions, &outfile)?;

    conversion_ends(&discussions, &report, &outfile, start_time.elapsed(), cfg);
    Ok(())
}

fn conversion_ends(
    discussions: &[Discussion],
    report: &BatchReport,
    outfile: &Path,
    total_time: Duration,
    cfg: &Config,
) {
    if discussions.is_empty() {
        print::header("zero discussions converted", cfg.quiet);
        print::no_results();
    } else {
        print::header("discussions", cfg.quiet);
        print_discussions(discussions, cfg);
    }

    for (path, e) in &report.failed {
        warn!("Skipping {}: {e}", path.display());
    }

    print_summary(discussions.len(), outfile, total_time, cfg);
}

fn print_discussions(discussions: &[Discussion], cfg: &Config) {
    for (idx, discussion) in discussions.iter().enumerate() {
        if cfg.quiet < 2 {
            print_discussion_tree(discussion, idx);
        }
        if cfg.quiet == 0 && idx + 1 != discussions.len() {
            print::print("");
        }
    }
}

fn print_discussion_tree(discussion: &Discussion, idx: usize) {
    print::tree_head(idx, &discussion.client_name);

    let mut roles: Vec<&str> = Vec::new();
    for turn in &discussion.conversation {
        if !roles.contains(&turn.role.as_str()) {
            roles.push(&turn.role);
        }
    }

    let details: Vec<Detail> = vec![
        ("Defense".to_string(), discussion.defense.as_str().normal()),
        (
            "Turns".to_string(),
            discussion.conversation.len().to_string().color(colors::ACCENT),
        ),
        ("Roles".to_string(), roles.join(", ").color(colors::ROLE)),
    ];
    print::as_tree_one_level(details);
}

fn print_summary(count: usize, outfile: &Path, total_time: Duration, cfg: &Config) {
    let converted: ColoredString = format!("{count} discussions").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!(
        "Conversion Complete: {converted} written to {} in {total_time}",
        outfile.display()
    );

    match cfg.quiet {
        0 => {
            print::separator();
            print::centerln(&output);
        }
        _ => success!("{}", output),
    }
}
