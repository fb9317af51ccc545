use crate::layout::{Column, FULL_LINE_LEN};

/// Space filled line buffer that B3 fields are written into.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    inner: [u8; FULL_LINE_LEN],
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    /// Allocates a new blank [LineBuffer].
    pub fn new() -> Self {
        Self {
            inner: [b' '; FULL_LINE_LEN],
        }
    }

    /// Blanks the whole line.
    pub fn clear(&mut self) {
        self.inner = [b' '; FULL_LINE_LEN];
    }

    /// Writes `content` into `column`. Content is encoded upstream
    /// at the exact column width.
    pub fn put(&mut self, column: Column, content: &str) {
        debug_assert_eq!(content.len(), column.width(), "{}", column.name);
        let bytes = content.as_bytes();
        let n = bytes.len().min(column.width());
        self.inner[column.start..column.start + n].copy_from_slice(&bytes[..n]);
    }

    /// Writes a single character into a one character column.
    pub fn put_char(&mut self, column: Column, c: char) {
        debug_assert_eq!(column.width(), 1);
        if c.is_ascii() {
            self.inner[column.start] = c as u8;
        }
    }

    /// Returns the first `len` characters.
    pub fn to_line(&self, len: usize) -> String {
        self.inner[..len.min(FULL_LINE_LEN)]
            .iter()
            .map(|b| *b as char)
            .collect()
    }
}
