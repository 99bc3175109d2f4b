// crates/shared-kernel/src/value_objects/compact_stats.rs
use super::counts::{BreakCount, ByteCount};

/// Counters gathered during a single compaction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactStats {
    pub bytes_read: ByteCount,
    pub bytes_written: ByteCount,
    /// Line-break units seen, LF and CRLF alike.
    pub line_breaks: BreakCount,
    /// Runs of two or more units, each of which lost one break.
    pub runs_collapsed: BreakCount,
    /// `\r` bytes passed through as ordinary bytes.
    pub lone_carriage_returns: BreakCount,
}

impl CompactStats {
    /// True when the output is byte-for-byte identical to the input.
    pub const fn is_unchanged(&self) -> bool {
        self.runs_collapsed.is_zero() && self.bytes_read.value() == self.bytes_written.value()
    }

    /// Bytes removed by the pass (CRLF normalisation included).
    pub const fn bytes_removed(&self) -> u64 {
        self.bytes_read.value().saturating_sub(self.bytes_written.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unchanged() {
        let stats = CompactStats::default();
        assert!(stats.is_unchanged());
        assert_eq!(stats.bytes_removed(), 0);
    }

    #[test]
    fn crlf_normalisation_alone_counts_as_change() {
        let stats = CompactStats {
            bytes_read: ByteCount::new(4),
            bytes_written: ByteCount::new(3),
            line_breaks: BreakCount::new(1),
            ..CompactStats::default()
        };
        assert!(!stats.is_unchanged());
        assert_eq!(stats.bytes_removed(), 1);
    }
}
