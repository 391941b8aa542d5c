//! Indentation-aware line writer used by the emitters.

/// Accumulates lines of Rust source at the current indentation level.
///
/// # Examples
///
/// ```
/// use specgen_codegen::common::CodeWriter;
///
/// let mut w = CodeWriter::new();
/// w.open("fn main()");
/// w.line("run();");
/// w.close("}");
///
/// assert_eq!(w.finish(), "fn main() {\n    run();\n}\n");
/// ```
#[derive(Debug, Default)]
pub struct CodeWriter {
    out: String,
    level: usize,
}

impl CodeWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one line; an empty line carries no indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.level {
                self.out.push_str("    ");
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Writes `text {` and indents.
    pub fn open(&mut self, text: impl AsRef<str>) {
        self.line(format!("{} {{", text.as_ref()));
        self.indent();
    }

    /// Dedents and writes `text`, usually a closing brace.
    pub fn close(&mut self, text: impl AsRef<str>) {
        self.dedent();
        self.line(text);
    }

    /// Increases the indentation by one level.
    pub const fn indent(&mut self) {
        self.level += 1;
    }

    /// Decreases the indentation by one level.
    pub const fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Writes a `///` comment block; empty descriptions write nothing.
    pub fn doc(&mut self, text: Option<&str>) {
        let Some(text) = text else {
            return;
        };
        for line in text.trim().lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.line("///");
            } else {
                self.line(format!("/// {line}"));
            }
        }
    }

    /// Returns the accumulated source.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}
