//! Colorful console output for the credit score service.
//!
//! Provides a custom `tracing` layer that formats service events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (model loaded, listening) and predictions
//! - **WARN**: Rejected payloads
//! - **ERROR**: Internal failures while serving a request
//! - **DEBUG**: Assembled feature vectors

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static PREDICTIONS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVE: &str = "creditscore=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        EPOCH.get_or_init(Instant::now);
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive(
                DEFAULT_DIRECTIVE
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            )
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ServiceConsoleLayer)
            .try_init();
    });
}

fn elapsed_secs() -> f64 {
    EPOCH
        .get()
        .map(|epoch| epoch.elapsed().as_secs_f64())
        .unwrap_or(0.0)
}

fn print_banner() {
    let banner = r#"
  ____              _ _ _   ____
 / ___|_ __ ___  __| (_) |_/ ___|  ___ ___  _ __ ___
| |   | '__/ _ \/ _` | | __\___ \ / __/ _ \| '__/ _ \
| |___| | |  __/ (_| | | |_ ___) | (_| (_) | | |  __/
 \____|_|  \___|\__,_|_|\__|____/ \___\___/|_|  \___|
"#;

    let version_line = format!("                 v{} - Credit Score Inference\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats service events with colors.
pub struct ServiceConsoleLayer;

impl<S: Subscriber> Layer<S> for ServiceConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();

        // Accept events from service crates
        if !target.starts_with("creditscore") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        if visitor.event.as_deref() == Some("prediction") {
            visitor.served = Some(PREDICTIONS.fetch_add(1, Ordering::Relaxed) + 1);
        }

        let output = format_event(&visitor, *event.metadata().level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    severity: Option<String>,
    field: Option<String>,
    kind: Option<String>,
    path: Option<String>,
    addr: Option<String>,
    error: Option<String>,
    values: Option<String>,
    category: Option<u64>,
    lower: Option<u64>,
    upper: Option<u64>,
    elapsed_us: Option<u64>,
    trees: Option<u64>,
    classes: Option<u64>,
    /// Running prediction count, set by the layer.
    served: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "message" => self.message = Some(s),
            "path" => self.path = Some(s),
            "addr" => self.addr = Some(s),
            "error" => self.error = Some(s),
            "values" => self.values = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "category" => self.category = Some(value),
            "lower" => self.lower = Some(value),
            "upper" => self.upper = Some(value),
            "elapsed_us" => self.elapsed_us = Some(value),
            "trees" => self.trees = Some(value),
            "classes" => self.classes = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, non_negative(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            "severity" => self.severity = Some(value.to_string()),
            "field" => self.field = Some(value.to_string()),
            "kind" => self.kind = Some(value.to_string()),
            "path" => self.path = Some(value.to_string()),
            "addr" => self.addr = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

// Counted fields are never negative; clamp instead of wrapping.
fn non_negative(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "model_loaded" => format_model_loaded(v),
        "listening" => format_listening(v),
        "prediction" => format_prediction(v),
        "rejected" => format_rejected(v),
        "request_failed" => format_failure(v),
        "vector" if level == Level::DEBUG => format_vector(v),
        _ => format_plain(v, level),
    }
}

fn format_elapsed() -> String {
    format!("{:>8.3}s", elapsed_secs()).bright_black().to_string()
}

fn format_model_loaded(v: &EventVisitor) -> String {
    format!(
        "{} {} Model loaded │ {} │ {} trees │ {} classes",
        format_elapsed(),
        "▶".bright_green().bold(),
        v.path.as_deref().unwrap_or("?").white().bold(),
        v.trees
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_yellow(),
        v.classes.unwrap_or(0).bright_yellow()
    )
}

fn format_listening(v: &EventVisitor) -> String {
    format!(
        "{} {} Listening on {}",
        format_elapsed(),
        "▸".bright_green(),
        format!("http://{}", v.addr.as_deref().unwrap_or("?"))
            .bright_cyan()
            .underline()
    )
}

fn format_prediction(v: &EventVisitor) -> String {
    let served = v.served.unwrap_or(0);
    let range = format!("[{}, {}]", v.lower.unwrap_or(0), v.upper.unwrap_or(0));
    let range = match v.severity.as_deref() {
        Some("severe") => range.bright_red().bold().to_string(),
        Some("moderate") => range.yellow().bold().to_string(),
        _ => range.bright_green().bold().to_string(),
    };

    format!(
        "{} {} #{} │ category {} │ {} │ {}",
        format_elapsed(),
        "●".bright_cyan(),
        served.to_formatted_string(&Locale::en).white(),
        v.category.unwrap_or(0).bright_magenta().bold(),
        range,
        format_duration_us(v.elapsed_us.unwrap_or(0)).bright_black()
    )
}

fn format_rejected(v: &EventVisitor) -> String {
    format!(
        "{} {} Rejected │ {} │ {}",
        format_elapsed(),
        "✗".bright_yellow(),
        v.field.as_deref().unwrap_or("?").white().bold(),
        v.kind.as_deref().unwrap_or("?").yellow()
    )
}

fn format_failure(v: &EventVisitor) -> String {
    format!(
        "{} {} Internal error │ {}",
        format_elapsed(),
        "■".bright_red().bold(),
        v.error.as_deref().unwrap_or("unknown").bright_red()
    )
}

fn format_vector(v: &EventVisitor) -> String {
    format!(
        "{} {} {}",
        format_elapsed(),
        "·".bright_black(),
        v.values.as_deref().unwrap_or("[]").bright_black()
    )
}

fn format_plain(v: &EventVisitor, level: Level) -> String {
    let Some(message) = v.message.as_deref() else {
        return String::new();
    };
    let tag = match level {
        Level::ERROR => "ERROR".bright_red().bold().to_string(),
        Level::WARN => "WARN ".yellow().bold().to_string(),
        Level::INFO => "INFO ".bright_blue().to_string(),
        _ => "DEBUG".bright_black().to_string(),
    };
    format!("{} {} {}", format_elapsed(), tag, message)
}

fn format_duration_us(us: u64) -> String {
    if us < 1000 {
        format!("{}µs", us)
    } else if us < 1_000_000 {
        format!("{:.2}ms", us as f64 / 1000.0)
    } else {
        format!("{:.2}s", us as f64 / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_us(250), "250µs");
        assert_eq!(format_duration_us(1500), "1.50ms");
        assert_eq!(format_duration_us(2_500_000), "2.50s");
    }

    #[test]
    fn test_unknown_event_without_message_is_silent() {
        let v = EventVisitor {
            event: Some("something_else".to_string()),
            ..Default::default()
        };
        assert!(format_event(&v, Level::INFO).is_empty());
    }

    #[test]
    fn test_vector_only_at_debug() {
        let v = EventVisitor {
            event: Some("vector".to_string()),
            values: Some("[1.0, 2.0]".to_string()),
            ..Default::default()
        };
        assert!(format_event(&v, Level::DEBUG).contains("[1.0, 2.0]"));
        assert!(format_event(&v, Level::INFO).is_empty());
    }

    #[test]
    fn test_rejected_names_field() {
        let v = EventVisitor {
            event: Some("rejected".to_string()),
            field: Some("outstanding_debt".to_string()),
            kind: Some("missing_field".to_string()),
            ..Default::default()
        };
        let line = format_event(&v, Level::WARN);
        assert!(line.contains("outstanding_debt"));
        assert!(line.contains("missing_field"));
    }

    #[test]
    fn test_negative_i64_is_clamped() {
        assert_eq!(non_negative(-3), 0);
        assert_eq!(non_negative(i64::MIN), 0);
        assert_eq!(non_negative(7), 7);
    }

    #[test]
    fn test_formatting_does_not_count() {
        let v = EventVisitor {
            event: Some("prediction".to_string()),
            served: Some(4242),
            category: Some(2),
            lower: Some(670),
            upper: Some(739),
            severity: Some("good".to_string()),
            ..Default::default()
        };
        let before = PREDICTIONS.load(Ordering::Relaxed);
        let first = format_event(&v, Level::INFO);
        let second = format_event(&v, Level::INFO);
        assert_eq!(first, second);
        assert!(first.contains("4,242"));
        assert_eq!(PREDICTIONS.load(Ordering::Relaxed), before);
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
