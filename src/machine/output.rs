// Program-visible output

use crate::memory::value::Value;

/// Accumulates everything the running program prints until the host drains it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    text: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value using its display form
    pub fn print(&mut self, value: &Value) {
        self.text.push_str(&value.to_string());
    }

    /// Append raw text
    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Return everything accumulated so far and empty the buffer
    pub fn drain(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_returns_and_clears() {
        let mut out = OutputBuffer::new();
        out.print(&Value::Float(3.0));
        out.push_str(" ");
        out.print(&Value::Int(3));
        assert_eq!(out.drain(), "3.0 3");
        assert!(out.is_empty());
        assert_eq!(out.drain(), "");
    }
}
