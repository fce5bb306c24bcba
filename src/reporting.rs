// Reporting and progress output for wordfuzz
// Every console write and counter update goes through one lock

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Width blanked out before a report overwrites the progress line.
const CLEAR_WIDTH: usize = 80;

/// Processed vs. total jobs for the current run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressState {
    pub processed: usize,
    pub total: usize,
}

impl ProgressState {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.processed as f64 / self.total as f64 * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.processed == self.total
    }
}

/// Render the status line, without the leading carriage return.
pub fn render_progress(state: &ProgressState) -> String {
    format!(
        "[+] Progress: {}/{} ({:.2}%)",
        state.processed,
        state.total,
        state.percent()
    )
}

struct SinkInner {
    progress: ProgressState,
    // Whether a progress line is currently on screen.
    drawn: bool,
    out: Box<dyn Write + Send>,
}

impl SinkInner {
    fn draw_progress(&mut self) -> io::Result<()> {
        let line = render_progress(&self.progress);
        write!(self.out, "\r{}", line)?;
        self.out.flush()?;
        self.drawn = true;
        Ok(())
    }

    fn clear_progress(&mut self) -> io::Result<()> {
        if self.drawn {
            write!(self.out, "\r{}\r", " ".repeat(CLEAR_WIDTH))?;
        }
        Ok(())
    }

    fn write_report(&mut self, line: &str, post_data: Option<&str>) -> io::Result<()> {
        self.clear_progress()?;
        writeln!(self.out, "{}", line)?;
        if let Some(data) = post_data {
            writeln!(self.out, "    - POST Data: {}", data)?;
        }
        self.draw_progress()
    }
}

/// Serializes progress updates and match reports onto one output.
pub struct ReportSink {
    inner: Mutex<SinkInner>,
}

impl ReportSink {
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            inner: Mutex::new(SinkInner {
                progress: ProgressState::default(),
                drawn: false,
                out: Box::new(out),
            }),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    fn lock(&self) -> MutexGuard<'_, SinkInner> {
        // A panicked writer leaves the counters intact; keep going.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reset the counters for a new run and draw the 0/total line.
    pub fn begin(&self, total: usize) {
        let mut inner = self.lock();
        inner.progress = ProgressState { processed: 0, total };
        inner.drawn = false;
        if total > 0 {
            log_write_error(inner.draw_progress());
        }
    }

    /// Count one processed job and redraw.
    pub fn tick(&self) {
        let mut inner = self.lock();
        if inner.progress.processed < inner.progress.total {
            inner.progress.processed += 1;
        } else {
            log::warn!("progress tick past total {}", inner.progress.total);
        }
        log_write_error(inner.draw_progress());
    }

    pub fn report_match(&self, url: &str, status: u16, size: usize, post_data: Option<&str>) {
        let line = format!(
            "[+] Found: {} - Status: {} - Size: {} bytes",
            url, status, size
        );
        log_write_error(self.lock().write_report(&line, post_data));
    }

    pub fn report_redirect(&self, url: &str, status: u16, location: &str, post_data: Option<&str>) {
        let line = format!(
            "[+] Found Redirect: {} - Status: {} - Redirected to: {}",
            url, status, location
        );
        log_write_error(self.lock().write_report(&line, post_data));
    }

    /// Print a free-standing status line such as the run banner.
    ///
    /// A progress line still on screen is ended first, so the notice
    /// starts on its own line without a blank line when nothing is drawn.
    pub fn notice(&self, line: &str) {
        let mut inner = self.lock();
        let lead = if inner.drawn { "\n" } else { "" };
        let result = write!(inner.out, "{}{}\n", lead, line).and_then(|_| inner.out.flush());
        inner.drawn = false;
        log_write_error(result);
    }

    pub fn progress(&self) -> ProgressState {
        self.lock().progress
    }
}

fn log_write_error(result: io::Result<()>) {
    if let Err(e) = result {
        log::warn!("console write failed: {}", e);
    }
}

/// In-memory output shared between a sink and whoever inspects it.
#[derive(Clone, Default)]
pub struct CapturedOutput {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(|p| p.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self.buf.lock().unwrap_or_else(|p| p.into_inner());
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
