//! Output formatting for CLI commands
//!
//! Every command renders through one of three formats: labeled text for
//! people, pretty JSON behind `--json`, and bare IDs behind `--quiet` for
//! scripts to consume.

use sitetrack_core::Projected;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Labeled text for people (the default)
    Human,
    /// Pretty-printed JSON
    Json,
    /// Bare IDs only
    Quiet,
}

impl OutputFormat {
    /// Determine format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Handles formatted output for commands
pub struct Output {
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Whether quiet mode is active
    pub fn is_quiet(&self) -> bool {
        self.format == OutputFormat::Quiet
    }

    /// Whether interactive prompts should be shown
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print a success message (suppressed in quiet and JSON modes)
    pub fn success(&self, message: &str) {
        if self.format == OutputFormat::Human {
            println!("{}", message);
        }
    }

    /// Print an informational message (suppressed in quiet and JSON modes)
    pub fn message(&self, message: &str) {
        if self.format == OutputFormat::Human {
            println!("{}", message);
        }
    }

    /// Print full details for a single task
    pub fn print_task(&self, projected: &Projected<'_>) {
        match self.format {
            OutputFormat::Json => match serde_json::to_string_pretty(projected) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Error serializing to JSON: {}", e),
            },
            OutputFormat::Quiet => {
                println!("{}", projected.task.id);
            }
            OutputFormat::Human => {
                let task = projected.task;
                println!("ID:        {}", task.id);
                println!("Name:      {}", task.name);
                println!("Category:  {}", task.category.label());
                println!("Status:    {}", task.status);
                println!("Priority:  {}", task.priority);
                println!("Start:     {}", task.start_date);
                println!("End:       {}", task.end_date);
                println!("Assigned:  {}", task.assigned_to);
                if !task.floor.is_empty() {
                    println!("Floor:     {}", task.floor);
                }
                if !task.remarks.is_empty() {
                    println!("Remarks:   {}", task.remarks);
                }
                if !task.created_at.is_empty() {
                    println!("Created:   {}", task.created_at);
                }
                let flags = flag_chips(projected);
                if !flags.is_empty() {
                    println!("Flags:     {}", flags);
                }
            }
        }
    }
}

/// One-line row for lane listings
pub fn task_row(projected: &Projected<'_>) -> String {
    let task = projected.task;
    let due = if task.end_date.is_empty() {
        "-"
    } else {
        task.end_date.as_str()
    };
    let mut row = format!(
        "{}  {}  [{}]  due {}",
        short_id(task.id.as_str()),
        truncate(&task.name, 32),
        task.priority,
        due,
    );
    let flags = flag_chips(projected);
    if !flags.is_empty() {
        row.push_str(&format!("  ({})", flags));
    }
    row
}

/// Deadline and Today markers for a task
fn flag_chips(projected: &Projected<'_>) -> String {
    let mut chips = Vec::new();
    if projected.task.is_today {
        chips.push("Today");
    }
    if projected.overdue {
        chips.push("Overdue");
    } else if projected.due_soon {
        chips.push("Due soon");
    }
    chips.join(", ")
}

/// Shortened ID for display
///
/// Imported IDs are arbitrary strings, so the cut is char-safe.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((index, _)) => &id[..index],
        None => id,
    }
}

/// Truncate a string, appending "..." if shortened
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitetrack_core::{projection, Task};

    fn sample_task() -> Task {
        Task {
            name: "Pour slab".to_string(),
            end_date: "2024-06-09".to_string(),
            is_today: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_from_flags_quiet_wins() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        let s = "укладка бетона на третьем этаже";
        let cut = truncate(s, 10);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 10);
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("abcdefghij"), "abcdefgh");
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("яяяяяяяяяя"), "яяяяяяяя");
    }

    #[test]
    fn test_task_row_shows_flags() {
        let task = sample_task();
        let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let projected = projection::project(&task, today);

        let row = task_row(&projected);
        assert!(row.contains("Pour slab"));
        assert!(row.contains("Today"));
        assert!(row.contains("Overdue"));
    }
}
