use crate::terminal::colors;
use colored::*;
use scriptor_common::config::Config;
use tracing::info;
use unicode_width::UnicodeWidthStr;

/// Width of rules and of the area the summary is centred in.
pub const LINE_WIDTH: usize = 64;

/// Writes `msg` verbatim through the log formatter, so it lands above any
/// running progress bar.
pub fn print(msg: &str) {
    info!(target: "scriptor::print", raw_msg = msg);
}

pub fn banner(cfg: &Config) {
    if cfg.no_banner || cfg.quiet > 0 {
        return;
    }
    let title = format!("SCRIPTOR v{}", env!("CARGO_PKG_VERSION"));
    print(&rule('═', Some(&title.bright_green().bold().to_string())));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level == 0 {
        print(&rule('─', Some(&msg.to_uppercase().bright_green().to_string())));
    }
}

pub fn separator() {
    print(&rule('═', None));
}

/// A dimmed line of `fill` across [`LINE_WIDTH`] columns, with `title`
/// framed in the middle.
fn rule(fill: char, title: Option<&str>) -> String {
    let Some(title) = title else {
        return fill.to_string().repeat(LINE_WIDTH).bright_black().to_string();
    };

    let framed = format!("⟦ {title} ⟧");
    let pad = LINE_WIDTH.saturating_sub(console::measure_text_width(&framed));
    let left = fill.to_string().repeat(pad / 2);
    let right = fill.to_string().repeat(pad - pad / 2);
    format!("{}{}{}", left.bright_black(), framed, right.bright_black())
}

/// `key` padded with dots to `width`, then a colon.
fn dotted_key(key: &str, width: usize) -> String {
    let dots = ".".repeat((width + 1).saturating_sub(key.width()));
    format!("{}{}", dots, ":").color(colors::SEPARATOR).to_string()
}

pub fn aligned_line(key: &str, key_width: usize, value: &str) {
    print_status(format!(
        "{}{} {}",
        key.color(colors::PRIMARY),
        dotted_key(key, key_width),
        value.color(colors::TEXT_DEFAULT)
    ));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    print(&format!("{} {}", ">".color(colors::SEPARATOR), msg.as_ref()));
}

pub fn tree_head(idx: usize, name: &str) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));
}

/// Prints `details` as the branches of one tree level, keys aligned.
pub fn as_tree_one_level(details: Vec<(String, ColoredString)>) {
    let key_width = details.iter().map(|(key, _)| key.width()).max().unwrap_or(0);
    let last = details.len().saturating_sub(1);

    for (i, (key, value)) in details.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        print(&format!(
            " {} {}{} {}",
            branch.bright_black(),
            key.color(colors::TEXT_DEFAULT),
            dotted_key(key, key_width),
            value
        ));
    }
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(LINE_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{space}{msg}"));
}

pub fn no_results() {
    centerln(&"NOTHING FOUND".red().bold().to_string());
}
