use std::io::Write;

/// Append-only destination for glyphs produced by the output instruction.
pub trait OutputSink {
    fn emit(&mut self, glyph: char) -> std::io::Result<()>;

    /// Everything emitted so far, in order.
    fn transcript(&self) -> &str;
}

/// In-memory sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    glyphs: String,
}

impl Transcript {
    pub fn as_str(&self) -> &str {
        &self.glyphs
    }

    pub fn into_string(self) -> String {
        self.glyphs
    }
}

impl OutputSink for Transcript {
    fn emit(&mut self, glyph: char) -> std::io::Result<()> {
        self.glyphs.push(glyph);
        Ok(())
    }

    fn transcript(&self) -> &str {
        &self.glyphs
    }
}

/// Writes every glyph through to `W` as soon as it is emitted, keeping a copy.
#[derive(Debug)]
pub struct StreamSink<W: Write> {
    writer: W,
    copy: Transcript,
}

impl<W: Write> StreamSink<W> {
    pub fn new(writer: W) -> Self {
        StreamSink {
            writer,
            copy: Transcript::default(),
        }
    }

    pub fn into_inner(self) -> (W, Transcript) {
        (self.writer, self.copy)
    }
}

impl<W: Write> OutputSink for StreamSink<W> {
    fn emit(&mut self, glyph: char) -> std::io::Result<()> {
        let mut buf = [0u8; 4];
        self.writer.write_all(glyph.encode_utf8(&mut buf).as_bytes())?;
        self.writer.flush()?;
        self.copy.emit(glyph)
    }

    fn transcript(&self) -> &str {
        self.copy.as_str()
    }
}
