pub mod export;
pub mod format;
pub mod inspect;
pub mod preview;

#[cfg(test)]
mod testing;

use std::io::{self, Write};

pub use export::Exporter;
pub use inspect::Inspector;

pub const RULE_WIDTH: usize = 80;

/// A title framed by two rules
pub fn banner<W: Write>(out: &mut W, rule: char, title: &str) -> io::Result<()> {
    let line: String = std::iter::repeat(rule).take(RULE_WIDTH).collect();
    writeln!(out, "\n{}", line)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", line)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn banner_layout() -> io::Result<()> {
        let mut out = Vec::new();
        banner(&mut out, '#', "USER DATA")?;

        let text = String::from_utf8_lossy(&out);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "#".repeat(RULE_WIDTH));
        assert_eq!(lines[2], "USER DATA");
        assert_eq!(lines[3], lines[1]);

        Ok(())
    }

    #[test]
    fn banner_reports_write_errors() {
        let err = banner(&mut Closed, '=', "EXPORTING").err();
        assert_eq!(err.map(|e| e.kind()), Some(io::ErrorKind::BrokenPipe));
    }
}
