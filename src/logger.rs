//! Terminal output: colored `[stage]` prefixes and in-place progress bars.
//!
//! ```ignore
//! log!("pages"; "{} post pages", count);
//!
//! let progress = ProgressBars::new(&[("render", pages.len())]);
//! progress.inc_by_name("render");
//! progress.finish();
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stdout},
    sync::{
        Mutex, OnceLock,
        atomic::{AtomicUsize, Ordering},
    },
};

static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Rows currently reserved by live progress bars.
static BAR_ROWS: AtomicUsize = AtomicUsize::new(0);

// "[stage] [████░░░░] 42/100"
const BAR_MIN: usize = 10;
const BAR_MAX: usize = 40;

/// `"[stage] "` is the name plus brackets plus one space.
#[inline]
const fn prefix_width(name_len: usize) -> usize {
    name_len + 3
}

fn terminal_width() -> usize {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120)) as usize
}

/// Log a message with a colored stage prefix.
///
/// ```ignore
/// log!("annotate"; "{} slugs attached", n);
/// ```
#[macro_export]
macro_rules! log {
    ($stage:expr; $($arg:tt)*) => {{
        $crate::logger::log($stage, &format!($($arg)*))
    }};
}

/// Print one prefixed line, keeping any live progress bars below it.
#[allow(clippy::cast_possible_truncation)]
pub fn log(stage: &str, message: &str) {
    let prefix = stage_prefix(stage);
    let mut out = stdout().lock();

    let rows = BAR_ROWS.load(Ordering::SeqCst);
    if rows > 0 {
        execute!(out, cursor::MoveUp(rows as u16), Clear(ClearType::FromCursorDown)).ok();
    }

    // Multi-line messages (error chains) are printed whole.
    let message = if message.contains('\n') {
        message
    } else {
        truncate_str(message, terminal_width().saturating_sub(prefix_width(stage.len())))
    };
    writeln!(out, "{prefix} {message}").ok();

    for _ in 0..rows {
        writeln!(out).ok();
    }
    out.flush().ok();
}

fn stage_prefix(stage: &str) -> ColoredString {
    let prefix = format!("[{stage}]");
    match stage.to_ascii_lowercase().as_str() {
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        "annotate" | "pages" => prefix.bright_cyan().bold(),
        "render" | "feed" => prefix.bright_green().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Cut `s` to at most `max` bytes on a char boundary.
fn truncate_str(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Progress Bars
// ============================================================================

/// One bar per named stage, each on its own terminal row.
///
/// Counters are atomic so rayon workers can bump them directly; redraws
/// are serialized through a mutex.
pub struct ProgressBars {
    bars: Vec<Bar>,
    draw: Mutex<()>,
}

struct Bar {
    name: &'static str,
    prefix: ColoredString,
    total: usize,
    done: AtomicUsize,
}

impl ProgressBars {
    pub fn new(stages: &[(&'static str, usize)]) -> Self {
        let mut out = stdout().lock();
        for _ in stages {
            writeln!(out).ok();
        }
        out.flush().ok();
        BAR_ROWS.store(stages.len(), Ordering::SeqCst);

        let bars = stages
            .iter()
            .map(|&(name, total)| Bar {
                name,
                prefix: stage_prefix(name),
                total,
                done: AtomicUsize::new(0),
            })
            .collect();

        Self {
            bars,
            draw: Mutex::new(()),
        }
    }

    /// Advance the bar registered as `name`. Unknown names are ignored.
    pub fn inc_by_name(&self, name: &str) {
        if let Some((row, bar)) = self.bars.iter().enumerate().find(|(_, b)| b.name == name) {
            let done = bar.done.fetch_add(1, Ordering::Relaxed) + 1;
            self.redraw(row, bar, done);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn redraw(&self, row: usize, bar: &Bar, done: usize) {
        let _guard = self.draw.lock().ok();

        let count = format!("{done}/{}", bar.total);
        let line = render_bar(bar.name.len(), done, bar.total, &count, terminal_width());

        let mut out = stdout().lock();
        let up = (self.bars.len() - row) as u16;
        execute!(out, cursor::MoveUp(up), Clear(ClearType::CurrentLine)).ok();
        write!(out, "{} {line}", bar.prefix).ok();
        execute!(out, cursor::MoveDown(up)).ok();
        write!(out, "\r").ok();
        out.flush().ok();
    }

    /// Erase every bar row and give the rows back to `log`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn finish(&self) {
        if BAR_ROWS.swap(0, Ordering::SeqCst) == 0 {
            return;
        }
        let _guard = self.draw.lock().ok();

        let mut out = stdout().lock();
        let rows = self.bars.len() as u16;
        execute!(out, cursor::MoveUp(rows)).ok();
        for _ in &self.bars {
            execute!(out, Clear(ClearType::CurrentLine), cursor::MoveDown(1)).ok();
        }
        execute!(out, cursor::MoveUp(rows)).ok();
        out.flush().ok();
    }
}

impl Drop for ProgressBars {
    fn drop(&mut self) {
        self.finish();
    }
}

/// `"[████░░░░] 42/100"` sized to whatever width is left after the prefix.
fn render_bar(name_len: usize, done: usize, total: usize, count: &str, width: usize) -> String {
    let overhead = prefix_width(name_len) + 3 + 1 + count.len();
    let bar_width = width.saturating_sub(overhead).clamp(BAR_MIN, BAR_MAX);
    let filled = if total > 0 {
        (done.min(total) * bar_width) / total
    } else {
        0
    };
    format!(
        "[{}{}] {count}",
        "█".repeat(filled),
        "░".repeat(bar_width - filled)
    )
}
