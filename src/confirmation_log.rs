use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;

/// One confirmed order, as it appears in the log.
#[derive(Debug, Clone)]
pub struct ConfirmationEntry {
    pub order_id: String,
    pub client_name: String,
    pub client_email: String,
    pub design_price: String,
    pub confirmed_on: NaiveDate,
}

/// Flat-file projection of confirmed orders, one line per order:
///
/// `OrderID: <id>, Name: <name>, Email: <email>, DesignPrice: <price>, ConfirmedAt: <YYYY-MM-DD>`
///
/// The database is the source of truth; this file feeds downstream
/// reporting. Confirming an order writes its line (replacing any stale one,
/// so an order never owns two), rejecting removes it. A process-wide mutex
/// serializes mutations so concurrent confirm/reject calls cannot interleave
/// partial rewrites.
pub struct ConfirmationLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ConfirmationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a confirmation. Any existing line for the same order id is
    /// replaced, keeping re-confirmation idempotent.
    pub fn record(&self, entry: &ConfirmationEntry) -> io::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut lines = self.load()?;
        lines.retain(|line| !line_matches_order(line, &entry.order_id));
        lines.push(format_line(entry));
        self.persist(&lines)
    }

    /// Remove the line for `order_id`, if present. Returns whether a line
    /// was removed. Matching is on the exact id token, so withdrawing "12"
    /// leaves "1" and "123" untouched.
    pub fn withdraw(&self, order_id: &str) -> io::Result<bool> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut lines = self.load()?;
        let before = lines.len();
        lines.retain(|line| !line_matches_order(line, order_id));

        if lines.len() == before {
            return Ok(false);
        }
        self.persist(&lines)?;
        Ok(true)
    }

    /// All current log lines, oldest first.
    pub fn entries(&self) -> io::Result<Vec<String>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load()
    }

    fn load(&self) -> io::Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    fn persist(&self, lines: &[String]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut contents = lines.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        fs::write(&self.path, contents)
    }
}

fn format_line(entry: &ConfirmationEntry) -> String {
    format!(
        "OrderID: {}, Name: {}, Email: {}, DesignPrice: {}, ConfirmedAt: {}",
        entry.order_id,
        entry.client_name,
        entry.client_email,
        entry.design_price,
        entry.confirmed_on.format("%Y-%m-%d"),
    )
}

/// Whether a log line belongs to `order_id`. The id token runs from the
/// `OrderID: ` prefix to the first comma, and must match exactly; a prefix
/// of a longer id is not a match.
fn line_matches_order(line: &str, order_id: &str) -> bool {
    line.strip_prefix("OrderID: ")
        .and_then(|rest| rest.split(',').next())
        .map(str::trim)
        == Some(order_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(order_id: &str) -> ConfirmationEntry {
        ConfirmationEntry {
            order_id: order_id.to_string(),
            client_name: "Amira Ben Salah".to_string(),
            client_email: "amira@example.com".to_string(),
            design_price: "19.99".to_string(),
            confirmed_on: NaiveDate::from_ymd_opt(2026, 8, 8).unwrap(),
        }
    }

    #[test]
    fn line_format_matches_the_reporting_contract() {
        let line = format_line(&entry("42"));
        assert_eq!(
            line,
            "OrderID: 42, Name: Amira Ben Salah, Email: amira@example.com, \
             DesignPrice: 19.99, ConfirmedAt: 2026-08-08"
        );
    }

    #[test]
    fn id_matching_requires_the_exact_token() {
        let line = format_line(&entry("12"));
        assert!(line_matches_order(&line, "12"));
        assert!(!line_matches_order(&line, "1"));
        assert!(!line_matches_order(&line, "123"));
        assert!(!line_matches_order(&line, "2"));
    }

    #[test]
    fn garbage_lines_never_match() {
        assert!(!line_matches_order("not a log line", "1"));
        assert!(!line_matches_order("", "1"));
    }
}
