//! Narrative text transform: markdown-lite to sections.
//!
//! The forecast narrative arrives as plain text with `**heading**` markers
//! and newline breaks. This module splits it into renderable sections
//! without touching the terminal, so the splitting edge cases (missing
//! closing marker, blank bodies, mixed line-break styles) unit test on
//! their own.

/// One paragraph of the narrative: an optional emphasized heading and its
/// body lines. Empty body lines mark paragraph breaks inside a section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub heading: Option<String>,
    pub lines: Vec<String>,
}

/// Split narrative text at `**heading**` boundaries.
///
/// Each heading starts a new section and appears exactly once; the first
/// line after a heading is neither duplicated nor dropped. An unmatched
/// final `**` is treated as plain text.
pub fn parse_sections(raw: &str) -> Vec<Section> {
    let text = normalize_breaks(raw);
    let parts: Vec<&str> = text.split("**").collect();

    let mut sections = Vec::new();
    let preamble = body_lines(parts[0]);
    if !preamble.is_empty() {
        sections.push(Section {
            heading: None,
            lines: preamble,
        });
    }

    let mut index = 1;
    while index < parts.len() {
        let heading = parts[index].trim();
        let mut lines = match parts.get(index + 1) {
            Some(body) => body_lines(body),
            None => {
                // Unmatched opening marker: keep the text, drop the marker.
                if heading.is_empty() {
                    break;
                }
                push_plain(&mut sections, heading);
                break;
            }
        };
        if heading.is_empty() {
            // `****` or stray pair; fold the body into the previous section.
            if !lines.is_empty() {
                match sections.last_mut() {
                    Some(prev) => prev.lines.append(&mut lines),
                    None => sections.push(Section {
                        heading: None,
                        lines,
                    }),
                }
            }
        } else {
            sections.push(Section {
                heading: Some(heading.to_string()),
                lines,
            });
        }
        index += 2;
    }

    sections
}

fn normalize_breaks(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

fn body_lines(body: &str) -> Vec<String> {
    let mut lines: Vec<String> = body.lines().map(|line| line.trim_end().to_string()).collect();
    while lines.first().is_some_and(|line| line.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

fn push_plain(sections: &mut Vec<Section>, text: &str) {
    let lines = body_lines(text);
    if lines.is_empty() {
        return;
    }
    match sections.last_mut() {
        Some(prev) if prev.heading.is_none() && prev.lines.is_empty() => prev.lines = lines,
        _ => sections.push(Section {
            heading: None,
            lines,
        }),
    }
}
