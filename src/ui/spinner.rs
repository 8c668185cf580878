use std::io::{self, Write};
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

/// The spinner currently drawing on stderr, if any.
static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// 进度指示器（旋转动画）
///
/// Drawn on stderr; indicatif hides it automatically when stderr is not a
/// terminal.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// 创建新的 spinner
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        set_active(Some(pb.clone()));
        Self { pb }
    }

    /// 完成并清除
    pub fn finish_and_clear(&self) {
        set_active(None);
        self.pb.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        set_active(None);
        self.pb.finish_and_clear();
    }
}

fn set_active(pb: Option<ProgressBar>) {
    if let Ok(mut active) = ACTIVE.lock() {
        *active = pb;
    }
}

fn active() -> Option<ProgressBar> {
    ACTIVE.lock().ok().and_then(|active| active.clone())
}

/// stderr writer for the log subscriber.
///
/// A running spinner is suspended while each line is written so log output
/// does not interleave with the animation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogWriter;

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match active() {
            Some(pb) => pb.suspend(|| io::stderr().write(buf)),
            None => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}
