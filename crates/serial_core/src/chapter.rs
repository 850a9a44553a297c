/// One discovered chapter of the serial.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chapter {
    pub title: String,
    pub url: String,
    /// Zero-based position in discovery order; the only sort key.
    pub index: usize,
}

impl Chapter {
    pub fn new(title: impl Into<String>, url: impl Into<String>, index: usize) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            index,
        }
    }

    /// One-based number shown to readers.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}
