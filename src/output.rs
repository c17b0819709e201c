//! CLI output formatting.
//!
//! Results go to stdout, one line per fact, so they stay greppable; logs
//! from `tracing` go to stderr. Each report has a `format_*` function
//! (returns `Vec<String>`, no I/O) and a `print_*` wrapper.
//!
//! ## Cover creation
//!
//! ```text
//! Generated image to: /media/Movies/backdrop (Cover).jpg
//! ```
//!
//! ## Check
//!
//! ```text
//! Complex text shaping: available (built in)
//! Font: /usr/share/library-cover/fonts/Prima Sans Bold.otf
//!     Family: Prima Sans
//! ```

use crate::cover::CoverEvent;
use crate::fonts::Capabilities;

/// Lines for one progress event. Only finished covers are reported.
pub fn format_cover_event(event: &CoverEvent) -> Vec<String> {
    match event {
        CoverEvent::Started { .. } => Vec::new(),
        CoverEvent::Written { output, .. } => {
            vec![format!("Generated image to: {}", output.display())]
        }
    }
}

pub fn print_cover_event(event: &CoverEvent) {
    for line in format_cover_event(event) {
        println!("{}", line);
    }
}

/// Lines for the `check` command.
pub fn format_capabilities(caps: &Capabilities) -> Vec<String> {
    let shaping = if caps.complex_shaping {
        "available (built in)"
    } else {
        "unavailable"
    };
    let mut lines = vec![format!("Complex text shaping: {}", shaping)];
    match &caps.font {
        Ok((path, family)) => {
            lines.push(format!("Font: {}", path.display()));
            lines.push(format!("    Family: {}", family));
        }
        Err(e) => {
            lines.push("Font: missing".to_string());
            lines.push(format!("    {}", e));
        }
    }
    lines
}

pub fn print_capabilities(caps: &Capabilities) {
    for line in format_capabilities(caps) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::TextError;
    use std::path::PathBuf;

    #[test]
    fn written_event_prints_output_path() {
        let lines = format_cover_event(&CoverEvent::Written {
            index: 0,
            total: 1,
            output: PathBuf::from("/media/poster (Cover).jpg"),
        });
        assert_eq!(lines, vec!["Generated image to: /media/poster (Cover).jpg"]);
    }

    #[test]
    fn started_event_is_silent() {
        let lines = format_cover_event(&CoverEvent::Started {
            index: 0,
            total: 2,
            source: PathBuf::from("poster.jpg"),
        });
        assert!(lines.is_empty());
    }

    #[test]
    fn capabilities_with_font() {
        let caps = Capabilities {
            complex_shaping: true,
            font: Ok((PathBuf::from("fonts/Prima Sans Bold.otf"), "Prima Sans".into())),
        };
        assert_eq!(
            format_capabilities(&caps),
            vec![
                "Complex text shaping: available (built in)",
                "Font: fonts/Prima Sans Bold.otf",
                "    Family: Prima Sans",
            ]
        );
    }

    #[test]
    fn capabilities_without_font() {
        let caps = Capabilities {
            complex_shaping: true,
            font: Err(TextError::FontResource {
                path: PathBuf::from("fonts/Prima Sans Bold.otf"),
                message: "not found".into(),
            }),
        };
        let lines = format_capabilities(&caps);
        assert_eq!(lines[1], "Font: missing");
        assert!(lines[2].contains("not found"));
    }
}
