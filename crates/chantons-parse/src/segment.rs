// Refrain / verse segmentation of catalogue lyric text.
//
// Lines are classified one by one and fed to a three-state machine
// (preamble, refrain, verse). Text before any marker is treated as the
// refrain. All refrain buffers are consolidated at the end.

use chantons_model::Lyrics;

use crate::classify::{classify_line, LineKind};
use crate::normalize::{self, Line};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Preamble,
    Refrain,
    Couplet,
}

/// Lines collected under one marker.
#[derive(Debug, Default)]
struct Buffer {
    lines: Vec<String>,
    saw_content: bool,
    saw_metadata: bool,
}

impl Buffer {
    fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
        self.saw_content = true;
    }

    /// Record a block break. Only refrain buffers keep them.
    fn block_break(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    /// A buffer opened under a marker that only ever received metadata.
    fn is_metadata_only(&self) -> bool {
        self.saw_metadata && !self.saw_content
    }
}

#[derive(Debug)]
struct Segmenter {
    state: State,
    refrains: Vec<Buffer>,
    verse: Option<Buffer>,
    couplets: Vec<Buffer>,
}

impl Segmenter {
    fn new() -> Self {
        Self {
            state: State::Preamble,
            refrains: Vec::new(),
            verse: None,
            couplets: Vec::new(),
        }
    }

    fn feed(&mut self, line: &Line) {
        let text = match line {
            Line::BlockBreak => {
                if self.state != State::Couplet {
                    if let Some(buf) = self.refrains.last_mut() {
                        buf.block_break();
                    }
                }
                return;
            }
            Line::Text(text) => text,
        };

        match classify_line(text) {
            LineKind::Metadata => {
                if let Some(buf) = self.open_buffer(false) {
                    buf.saw_metadata = true;
                }
            }
            LineKind::RefrainMarker { rest } => {
                self.commit_verse();
                self.state = State::Refrain;
                let mut buf = Buffer::default();
                if !rest.is_empty() {
                    buf.push(rest);
                }
                self.refrains.push(buf);
            }
            LineKind::CoupletMarker { rest } => {
                self.commit_verse();
                self.state = State::Couplet;
                let mut buf = Buffer::default();
                if !rest.is_empty() {
                    buf.push(rest);
                }
                self.verse = Some(buf);
            }
            LineKind::Content => {
                if let Some(buf) = self.open_buffer(true) {
                    buf.push(text);
                }
            }
        }
    }

    /// The buffer content currently flows into. In the preamble the
    /// implicit refrain buffer is created on demand when `create` is set.
    fn open_buffer(&mut self, create: bool) -> Option<&mut Buffer> {
        match self.state {
            State::Preamble => {
                if self.refrains.is_empty() && create {
                    self.refrains.push(Buffer::default());
                }
                self.refrains.last_mut()
            }
            State::Refrain => self.refrains.last_mut(),
            State::Couplet => self.verse.as_mut(),
        }
    }

    fn commit_verse(&mut self) {
        if let Some(buf) = self.verse.take() {
            if !buf.is_metadata_only() {
                self.couplets.push(buf);
            }
        }
    }

    fn finish(mut self) -> Lyrics {
        self.commit_verse();

        let refrain = consolidate_refrains(&self.refrains);
        let couplets = self
            .couplets
            .iter()
            .map(|buf| buf.lines.join("\n").trim_end().to_string())
            .collect();

        Lyrics { refrain, couplets }
    }
}

/// Split raw lyric text into a refrain and an ordered list of verses.
///
/// Never fails: empty or unstructured input yields an empty or
/// refrain-only result.
pub fn segment(raw: &str) -> Lyrics {
    let text = normalize::truncate_at_copyright(raw);
    let text = normalize::normalize_text(text);

    let mut segmenter = Segmenter::new();
    for line in normalize::logical_lines(&text) {
        segmenter.feed(&line);
    }

    let lyrics = segmenter.finish();
    tracing::debug!(
        refrain_lines = lyrics.refrain.lines().count(),
        couplets = lyrics.couplets.len(),
        "Segmented lyrics"
    );
    lyrics
}

/// Merge every refrain buffer into one text.
///
/// Each buffer drops consecutive repeated lines. Buffers whose lines all
/// appear in an earlier kept variant are dropped; the remaining variants
/// are joined by a blank line in first-seen order.
fn consolidate_refrains(buffers: &[Buffer]) -> String {
    let mut kept: Vec<Vec<String>> = Vec::new();

    for buf in buffers {
        let lines = dedup_lines(&buf.lines);
        if lines.is_empty() {
            continue;
        }

        let covered = lines
            .iter()
            .filter(|l| !l.is_empty())
            .all(|l| kept.iter().any(|k| k.contains(l)));
        if covered {
            continue;
        }

        kept.push(lines);
    }

    kept.iter()
        .map(|lines| lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn dedup_lines(lines: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for line in lines {
        if line.is_empty() {
            if out.last().is_some_and(|l| !l.is_empty()) {
                out.push(String::new());
            }
            continue;
        }
        if out.last() == Some(line) {
            continue;
        }
        out.push(line.clone());
    }

    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }

    out
}
