use std::fmt::Debug;

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the subscriber: `RUST_LOG` filtering (default `info`), the
/// scriptor event format, and output routed around progress bars.
pub fn init_logging() {
    let indicatif_layer = IndicatifLayer::new();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(ScriptorFormatter)
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .init();
}

pub struct ScriptorFormatter;

impl<S, N> FormatEvent<S, N> for ScriptorFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut fields = EventFields::default();
        event.record(&mut fields);

        if let Some(raw) = fields.raw_msg {
            return writeln!(writer, "{raw}");
        }

        let (symbol, color) = prefix(event.metadata().level(), fields.status.as_deref());
        write!(writer, "{} {}", symbol.color(color).bold(), fields.message)?;

        for (name, value) in &fields.extra {
            write!(writer, " {}={}", name.dimmed(), value)?;
        }

        writeln!(writer)
    }
}

fn prefix(level: &Level, status: Option<&str>) -> (&'static str, Color) {
    if status == Some("success") {
        return ("[+]", Color::Green);
    }
    match *level {
        Level::TRACE => ("[ ]", Color::BrightBlack),
        Level::DEBUG => ("[?]", Color::Blue),
        Level::INFO => ("[*]", Color::Cyan),
        Level::WARN => ("[!]", Color::Yellow),
        _ => ("[-]", Color::Red),
    }
}

#[derive(Default)]
struct EventFields {
    raw_msg: Option<String>,
    status: Option<String>,
    message: String,
    extra: Vec<(&'static str, String)>,
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "raw_msg" => self.raw_msg = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            "message" => self.message = value.to_string(),
            name => self.extra.push((name, value.to_string())),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            name => self.extra.push((name, format!("{value:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_overrides_level_symbol() {
        assert_eq!(prefix(&Level::INFO, Some("success")).0, "[+]");
        assert_eq!(prefix(&Level::INFO, Some("info")).0, "[*]");
        assert_eq!(prefix(&Level::WARN, Some("warn")).0, "[!]");
        assert_eq!(prefix(&Level::ERROR, None).0, "[-]");
        assert_eq!(prefix(&Level::DEBUG, None).0, "[?]");
    }
}
