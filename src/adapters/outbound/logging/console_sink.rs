use crate::ports::LogSink;

/// Writes each line to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write_line(&self, line: &str) {
        println!("{}", line);
    }
}
