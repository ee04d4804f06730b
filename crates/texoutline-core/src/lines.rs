//! Byte offset to line number mapping.

/// Line start table for a source text.
///
/// Parsers work on byte offsets; the element tree speaks in zero-based line
/// numbers. `LineIndex` converts between the two in `O(log n)`.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the first character of every line. Always starts with 0.
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Build the index for `source`. Only `\n` terminates a line.
    pub fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self {
            starts,
            len: source.len(),
        }
    }

    /// Zero-based line containing `offset`.
    ///
    /// Offsets past the end of the source map to the last line.
    pub fn line_of(&self, offset: usize) -> u32 {
        let offset = offset.min(self.len);
        let line = self.starts.partition_point(|&start| start <= offset) - 1;
        u32::try_from(line).unwrap_or(u32::MAX)
    }

    /// Index of the last line. A trailing newline opens one more (empty) line.
    pub fn last_line(&self) -> u32 {
        u32::try_from(self.starts.len() - 1).unwrap_or(u32::MAX)
    }
}
