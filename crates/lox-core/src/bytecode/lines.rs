//! Run-length encoded line table
//!
//! Maps instruction byte offsets to source lines. One `record` call is made
//! per appended code byte; consecutive bytes from the same line share a run.

use crate::memory::GrowableArray;

/// A source line and the number of consecutive code bytes it produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRun {
    pub line: u32,
    pub length: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LineTable {
    runs: GrowableArray<LineRun>,
    total: usize,
}

impl LineTable {
    pub fn new() -> Self {
        LineTable {
            runs: GrowableArray::new(),
            total: 0,
        }
    }

    /// Record the line of the next code byte
    pub fn record(&mut self, line: u32) {
        self.total += 1;
        if let Some(run) = self.runs.last_mut() {
            if run.line == line {
                run.length += 1;
                return;
            }
        }
        self.runs.push(LineRun { line, length: 1 });
    }

    /// Source line of the byte at `offset`, or `None` if no such byte was recorded
    pub fn line_for(&self, offset: usize) -> Option<u32> {
        let mut end = 0;
        for run in &self.runs {
            end += run.length;
            if offset < end {
                return Some(run.line);
            }
        }
        None
    }

    /// Sum of all run lengths
    pub fn total_recorded(&self) -> usize {
        self.total
    }

    pub fn runs(&self) -> &[LineRun] {
        self.runs.as_slice()
    }

    pub fn capacity(&self) -> usize {
        self.runs.capacity()
    }

    /// Release storage; idempotent
    pub fn free(&mut self) {
        self.runs.free();
        self.total = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_lines_share_a_run() {
        let mut table = LineTable::new();
        for line in [1, 1, 2, 2, 2, 3, 4] {
            table.record(line);
        }
        assert_eq!(
            table.runs(),
            &[
                LineRun { line: 1, length: 2 },
                LineRun { line: 2, length: 3 },
                LineRun { line: 3, length: 1 },
                LineRun { line: 4, length: 1 },
            ]
        );
        assert_eq!(table.total_recorded(), 7);
    }

    #[test]
    fn lookup_by_offset() {
        let mut table = LineTable::new();
        for line in [1, 1, 2, 2, 2, 3, 4] {
            table.record(line);
        }
        assert_eq!(table.line_for(0), Some(1));
        assert_eq!(table.line_for(1), Some(1));
        assert_eq!(table.line_for(2), Some(2));
        assert_eq!(table.line_for(4), Some(2));
        assert_eq!(table.line_for(5), Some(3));
        assert_eq!(table.line_for(6), Some(4));
        assert_eq!(table.line_for(7), None);
    }

    #[test]
    fn returning_to_an_earlier_line_starts_a_new_run() {
        let mut table = LineTable::new();
        for line in [5, 6, 5] {
            table.record(line);
        }
        assert_eq!(table.runs().len(), 3);
        assert_eq!(table.line_for(2), Some(5));
    }

    #[test]
    fn empty_table_has_no_lines() {
        let mut table = LineTable::new();
        assert_eq!(table.line_for(0), None);
        table.free();
        assert_eq!(table.total_recorded(), 0);
    }
}
