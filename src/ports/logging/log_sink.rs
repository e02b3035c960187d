/// Port for operator-facing output lines.
///
/// Components receive a sink at construction instead of writing to a global
/// console, so tests can capture exactly what a run reported.
pub trait LogSink: Send + Sync + 'static {
    fn write_line(&self, line: &str);
}
