use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} [{bar:32.green/bright_black}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICK_STRINGS)
        .progress_chars("█▓░")
}

/// A span that renders as a progress bar over `total` files while entered.
pub fn conversion_span(total: usize) -> Span {
    let span = info_span!("conversion");
    span.pb_set_style(&bar_style());
    span.pb_set_length(total as u64);
    span.pb_set_message("Converting transcripts");
    span
}

pub fn report_file_done(span: &Span) {
    span.pb_inc(1);
}
