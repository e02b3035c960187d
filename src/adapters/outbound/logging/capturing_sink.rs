use std::sync::{Arc, Mutex};

use crate::ports::LogSink;

/// In-memory sink for tests and embedding. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CapturingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl LogSink for CapturingSink {
    fn write_line(&self, line: &str) {
        let mut lines = self
            .lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        lines.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let sink = CapturingSink::new();
        let writer = sink.clone();
        writer.write_line("first");
        writer.write_line("second");
        assert_eq!(sink.lines(), vec!["first", "second"]);
    }
}
