mod capturing_sink;
mod console_sink;

pub use capturing_sink::CapturingSink;
pub use console_sink::ConsoleSink;
