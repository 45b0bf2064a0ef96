//! Best-effort line numbers for diagnostics.
//!
//! [`SourceLines`] holds the text of one loaded config file and answers "on
//! which line was this option set?" by scanning the raw lines rather than the
//! parsed store. The search is a substring match inside the section's line
//! range: a key whose text also appears inside an earlier value, or as part of
//! a longer key in the same section, can match the wrong line.

/// The raw lines of a loaded config file, line terminators stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLines {
    lines: Vec<String>,
}

impl SourceLines {
    pub fn new(content: &str) -> Self {
        Self {
            lines: content.lines().map(|l| l.replace('\r', "")).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the 1-indexed line where `key` is set inside `[section]`.
    ///
    /// The section starts after the first line exactly equal to `[section]` and
    /// ends before the next header-looking line. The first line in that range
    /// that does not start with `#` and contains `key` wins.
    pub fn locate(&self, section: &str, key: &str) -> Option<usize> {
        let begin = self.section_begin(section)?;
        let end = self.section_end(begin);

        (begin..end)
            .find(|&i| {
                let line = &self.lines[i];
                !line.starts_with('#') && line.contains(key)
            })
            .map(|i| i + 1)
    }

    /// Index of the line after `[section]`.
    fn section_begin(&self, section: &str) -> Option<usize> {
        let header = format!("[{section}]");
        self.lines.iter().position(|l| *l == header).map(|i| i + 1)
    }

    /// Exclusive end of the section starting at `begin`.
    fn section_end(&self, begin: usize) -> usize {
        self.lines[begin..]
            .iter()
            .position(|l| is_header(l))
            .map_or(self.lines.len(), |i| begin + i)
    }
}

/// `[` followed by at least one character and a later `]`.
fn is_header(line: &str) -> bool {
    line.strip_prefix('[')
        .and_then(|rest| rest.rfind(']'))
        .is_some_and(|pos| pos > 0)
}
