/// Length of the current run of line-break units.
///
/// Lives only for one compaction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewlineRun {
    len: u64,
}

impl NewlineRun {
    pub const fn new() -> Self {
        Self { len: 0 }
    }

    #[inline]
    pub fn push(&mut self) {
        self.len = self.len.saturating_add(1);
    }

    pub const fn len(&self) -> u64 {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of `\n` bytes a run of `len` units compacts to.
    pub const fn output_len(len: u64) -> u64 {
        match len {
            0 | 1 => len,
            n => n - 1,
        }
    }

    /// Resets the run and returns how many `\n` bytes it compacts to.
    pub fn take_flush_len(&mut self) -> u64 {
        let out = Self::output_len(self.len);
        self.len = 0;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_len_drops_one_break_from_multi_runs() {
        assert_eq!(NewlineRun::output_len(0), 0);
        assert_eq!(NewlineRun::output_len(1), 1);
        assert_eq!(NewlineRun::output_len(2), 1);
        assert_eq!(NewlineRun::output_len(3), 2);
        assert_eq!(NewlineRun::output_len(10), 9);
    }

    #[test]
    fn take_resets() {
        let mut run = NewlineRun::new();
        run.push();
        run.push();
        run.push();
        assert_eq!(run.len(), 3);
        assert_eq!(run.take_flush_len(), 2);
        assert!(run.is_empty());
        assert_eq!(run.take_flush_len(), 0);
    }
}
