use unicode_normalization::UnicodeNormalization;

/// A logical line of lyric text after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A trimmed, non-empty line.
    Text(String),
    /// One or more blank lines between two text lines.
    BlockBreak,
}

/// Drop everything at and after the first copyright mark.
pub fn truncate_at_copyright(input: &str) -> &str {
    match input.find('©') {
        Some(idx) => &input[..idx],
        None => input,
    }
}

/// Normalize Unicode text to NFC form and clean up whitespace.
///
/// Line terminators become `\n`, runs of tabs become a single space and
/// every line is trimmed. Blank lines are kept (as empty lines) so callers
/// can still see block boundaries.
pub fn normalize_text(input: &str) -> String {
    let nfc: String = input.nfc().collect();
    let unified = nfc.replace("\r\n", "\n").replace('\r', "\n");

    unified
        .split('\n')
        .map(|line| collapse_tabs(line).trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split normalized text into text lines and block breaks.
///
/// Blank runs collapse into a single [`Line::BlockBreak`]; leading and
/// trailing blanks are dropped.
pub fn logical_lines(input: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut pending_break = false;

    for line in input.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            pending_break = !lines.is_empty();
            continue;
        }
        if pending_break {
            lines.push(Line::BlockBreak);
            pending_break = false;
        }
        lines.push(Line::Text(line.to_string()));
    }

    lines
}

fn collapse_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut prev_tab = false;

    for c in line.chars() {
        if c == '\t' {
            if !prev_tab {
                out.push(' ');
            }
            prev_tab = true;
        } else {
            out.push(c);
            prev_tab = false;
        }
    }

    out
}
