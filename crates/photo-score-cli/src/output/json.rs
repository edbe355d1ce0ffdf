//! JSON output adapter.

use anyhow::Result;
use photo_score_core::{ReportOutput, ScoreReport};
use std::io::{self, Write};
use std::sync::Mutex;

/// How reports are laid out on the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonLayout {
    /// One compact object per line, written as reports arrive.
    Lines,
    /// A single array, written on flush.
    Array {
        /// Pretty-print the array.
        pretty: bool,
    },
}

/// JSON output adapter.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    layout: JsonLayout,
    pending: Mutex<Vec<ScoreReport>>,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout(layout: JsonLayout) -> Self {
        Self::new(Box::new(io::stdout()), layout)
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, layout: JsonLayout) -> Self {
        Self {
            writer: Mutex::new(writer),
            layout,
            pending: Mutex::new(Vec::new()),
        }
    }

    #[allow(clippy::significant_drop_tightening)]
    fn write_line(&self, json: &str) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl ReportOutput for JsonOutput {
    fn write(&self, report: &ScoreReport) -> Result<()> {
        match self.layout {
            JsonLayout::Lines => self.write_line(&serde_json::to_string(report)?),
            JsonLayout::Array { .. } => {
                self.pending
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?
                    .push(report.clone());
                Ok(())
            }
        }
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        if let JsonLayout::Array { pretty } = self.layout {
            let reports = std::mem::take(
                &mut *self
                    .pending
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?,
            );
            let json = if pretty {
                serde_json::to_string_pretty(&reports)?
            } else {
                serde_json::to_string(&reports)?
            };
            self.write_line(&json)?;
        }

        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use photo_score_core::{Assessment, Metrics, QualityBand};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn report(label: &str) -> ScoreReport {
        let assessment = Assessment {
            quality: 60.0,
            band: QualityBand::Acceptable,
            fallback_used: false,
            activations: Vec::new(),
        };
        ScoreReport::success(
            label,
            "2024-01-01T00:00:00Z",
            Metrics::new(5.0, 5.0, 5.0),
            assessment,
            false,
        )
    }

    #[test]
    fn test_lines_written_immediately() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()), JsonLayout::Lines);

        output.write(&report("a")).unwrap();
        output.write(&report("b")).unwrap();

        let text = buf.contents();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("{\"label\":\"a\""));
    }

    #[test]
    fn test_array_written_on_flush() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()), JsonLayout::Array { pretty: false });

        output.write(&report("a")).unwrap();
        output.write(&report("b")).unwrap();
        assert!(buf.contents().is_empty());

        output.flush().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&buf.contents()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[1]["label"], "b");
    }

    #[test]
    fn test_empty_array() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()), JsonLayout::Array { pretty: true });
        output.flush().unwrap();
        assert_eq!(buf.contents().trim(), "[]");
    }
}
