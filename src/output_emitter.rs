//! Output accumulator
//!
//! Every handler writes through one append-only [`OutputEmitter`]. Each
//! emitted line is terminated with `\n`.

#[derive(Debug, Clone, Default)]
pub struct OutputEmitter {
    buffer: String,
}

impl OutputEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line; trailing whitespace is dropped
    pub fn line(&mut self, text: &str) {
        self.buffer.push_str(text.trim_end());
        self.buffer.push('\n');
    }

    /// Append every line of an already rendered, possibly multi-line text
    pub fn lines(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}
