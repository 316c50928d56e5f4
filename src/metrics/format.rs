//! Prometheus text exposition format

use super::Gauge;
use std::collections::HashSet;
use std::fmt::Write;

/// Render gauges, emitting HELP and TYPE once per metric name
pub fn render_metrics(gauges: &[Gauge]) -> String {
    let mut output = String::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for gauge in gauges {
        if seen.insert(gauge.name.as_str()) {
            let _ = writeln!(output, "# HELP {} {}", gauge.name, escape_help(gauge.help));
            let _ = writeln!(output, "# TYPE {} gauge", gauge.name);
        }

        if gauge.labels.is_empty() {
            let _ = writeln!(output, "{} {}", gauge.name, format_value(gauge.value));
        } else {
            let labels: Vec<String> = gauge
                .labels
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
                .collect();
            let _ = writeln!(
                output,
                "{}{{{}}} {}",
                gauge.name,
                labels.join(","),
                format_value(gauge.value)
            );
        }
    }

    output
}

fn escape_label_value(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\n', "\\n")
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v.is_sign_positive() { "+Inf" } else { "-Inf" }.to_string()
    } else if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gauge(name: &str, directory: &str, value: f64) -> Gauge {
        Gauge {
            name: name.to_string(),
            help: "Test gauge",
            labels: vec![("directory", directory.to_string())],
            value,
        }
    }

    #[test]
    fn test_header_once_per_family() {
        let output = render_metrics(&[
            gauge("dirsize_entries_count", "a", 1.0),
            gauge("dirsize_entries_count", "b", 2.0),
        ]);
        assert_eq!(output.matches("# TYPE dirsize_entries_count gauge").count(), 1);
        assert!(output.contains("dirsize_entries_count{directory=\"a\"} 1\n"));
        assert!(output.contains("dirsize_entries_count{directory=\"b\"} 2\n"));
    }

    #[test]
    fn test_escape_label_value() {
        assert_eq!(escape_label_value("we\"ird\\dir"), "we\\\"ird\\\\dir");
        assert_eq!(escape_label_value("line1\nline2"), "line1\\nline2");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1_700_000_000.0), "1700000000");
        assert_eq!(format_value(0.5), "0.5");
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
    }
}
