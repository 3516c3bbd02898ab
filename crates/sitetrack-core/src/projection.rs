//! Board and Today view projection
//!
//! Pure read-side functions over a task snapshot. Nothing here mutates or
//! persists; callers pass the snapshot and the date that counts as "today",
//! which keeps rendering deterministic and testable.
//!
//! Task dates are plain strings and are only interpreted here. A date that
//! does not parse simply produces no deadline flags.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Category, Status, Task};

/// Date format used by task start/end dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How many days ahead (inclusive) a deadline counts as due soon
const DUE_SOON_WINDOW_DAYS: i64 = 2;

/// A task as it appears in a rendered view
///
/// The deadline flags are display-only: computed per projection, never
/// persisted.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Projected<'a> {
    /// The underlying task
    #[serde(flatten)]
    pub task: &'a Task,
    /// Deadline passed and the task is not completed
    pub overdue: bool,
    /// Deadline within the next two days (today inclusive), not completed
    #[serde(rename = "dueSoon")]
    pub due_soon: bool,
}

/// Board lane: tasks matching `category` and `status` exactly, ordered by
/// priority weight, then end date ascending
pub fn tasks_for<'a>(
    tasks: &'a [Task],
    category: &Category,
    status: &Status,
    today: NaiveDate,
) -> Vec<Projected<'a>> {
    let mut lane: Vec<&Task> = tasks
        .iter()
        .filter(|task| &task.category == category && &task.status == status)
        .collect();
    lane.sort_by(|a, b| board_ordering(a, b));
    lane.into_iter().map(|task| project(task, today)).collect()
}

/// Today view for `category`: flagged tasks that are not completed, ordered
/// by floor number, then by the board ordering
pub fn today_tasks_for<'a>(
    tasks: &'a [Task],
    category: &Category,
    today: NaiveDate,
) -> Vec<Projected<'a>> {
    let mut lane: Vec<&Task> = tasks
        .iter()
        .filter(|task| &task.category == category && task.is_today && !task.status.is_completed())
        .collect();
    lane.sort_by(|a, b| {
        parse_floor(&a.floor)
            .cmp(&parse_floor(&b.floor))
            .then_with(|| board_ordering(a, b))
    });
    lane.into_iter().map(|task| project(task, today)).collect()
}

/// Compute the deadline flags for a single task
pub fn project(task: &Task, today: NaiveDate) -> Projected<'_> {
    let end = NaiveDate::parse_from_str(&task.end_date, DATE_FORMAT).ok();
    let completed = task.status.is_completed();

    let overdue = !completed && end.is_some_and(|end| end < today);
    let due_soon = !completed
        && !overdue
        && end.is_some_and(|end| {
            let days = (end - today).num_days();
            (0..=DUE_SOON_WINDOW_DAYS).contains(&days)
        });

    Projected {
        task,
        overdue,
        due_soon,
    }
}

// Priority weight ascending (High first), ties broken by plain string
// comparison on the end date. `YYYY-MM-DD` strings compare correctly as
// bytes, an empty end date sorts first, and anything else lands wherever
// the bytes say. The sort is stable, so full ties keep insertion order.
fn board_ordering(a: &Task, b: &Task) -> Ordering {
    a.priority
        .weight()
        .cmp(&b.priority.weight())
        .then_with(|| a.end_date.cmp(&b.end_date))
}

/// Lenient floor number: optional sign plus leading decimal digits, anything
/// else (including empty) counts as 0.
///
/// "3rd" parses as 3 and "B2" as 0. This matches how the Today view has
/// always ordered floors, so it is kept rather than tightened.
pub fn parse_floor(floor: &str) -> i64 {
    let trimmed = floor.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<i64>().map_or(0, |n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn task(name: &str, priority: Priority, end_date: &str) -> Task {
        Task {
            id: crate::models::TaskId::generate(),
            category: Category::Site,
            name: name.to_string(),
            start_date: "2024-06-01".to_string(),
            end_date: end_date.to_string(),
            assigned_to: "Crew A".to_string(),
            priority,
            status: Status::Open,
            floor: String::new(),
            remarks: String::new(),
            is_today: false,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_board_sorts_priority_then_end_date() {
        let tasks = vec![
            task("Pour slab", Priority::High, "2024-06-20"),
            task("Order rebar", Priority::Medium, "2024-06-01"),
            task("Strip formwork", Priority::High, "2024-06-25"),
        ];

        let lane = tasks_for(&tasks, &Category::Site, &Status::Open, today());
        let names: Vec<&str> = lane.iter().map(|p| p.task.name.as_str()).collect();
        assert_eq!(names, ["Pour slab", "Strip formwork", "Order rebar"]);
    }

    #[test]
    fn test_board_empty_end_date_sorts_first_within_priority() {
        let tasks = vec![
            task("Dated", Priority::High, "2024-06-05"),
            task("Undated", Priority::High, ""),
        ];

        let lane = tasks_for(&tasks, &Category::Site, &Status::Open, today());
        assert_eq!(lane[0].task.name, "Undated");
        assert_eq!(lane[1].task.name, "Dated");
    }

    #[test]
    fn test_board_unknown_priority_sorts_with_low() {
        let tasks = vec![
            task("Low", Priority::Low, "2024-06-01"),
            task("Odd", Priority::Other("Urgent".to_string()), "2024-06-01"),
            task("High", Priority::High, "2024-06-30"),
        ];

        let lane = tasks_for(&tasks, &Category::Site, &Status::Open, today());
        let names: Vec<&str> = lane.iter().map(|p| p.task.name.as_str()).collect();
        // Unknown priority weighs the same as Low; the tie keeps insertion order
        assert_eq!(names, ["High", "Low", "Odd"]);
    }

    #[test]
    fn test_board_full_tie_keeps_insertion_order() {
        let tasks = vec![
            task("First", Priority::Medium, "2024-06-15"),
            task("Second", Priority::Medium, "2024-06-15"),
            task("Third", Priority::Medium, "2024-06-15"),
        ];

        let lane = tasks_for(&tasks, &Category::Site, &Status::Open, today());
        let names: Vec<&str> = lane.iter().map(|p| p.task.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_board_filters_category_and_status_exactly() {
        let mut other_category = task("Tender item", Priority::High, "2024-06-11");
        other_category.category = Category::Tender;

        let mut completed = task("Done already", Priority::High, "2024-06-11");
        completed.status = Status::Completed;

        let tasks = vec![
            task("Site open", Priority::High, "2024-06-11"),
            other_category,
            completed,
        ];

        let lane = tasks_for(&tasks, &Category::Site, &Status::Open, today());
        assert_eq!(lane.len(), 1);
        assert_eq!(lane[0].task.name, "Site open");

        let completed_lane = tasks_for(&tasks, &Category::Site, &Status::Completed, today());
        assert_eq!(completed_lane.len(), 1);
        assert_eq!(completed_lane[0].task.name, "Done already");
    }

    #[test]
    fn test_overdue_flag() {
        let t = task("Late", Priority::High, "2024-06-09");
        let projected = project(&t, today());
        assert!(projected.overdue);
        assert!(!projected.due_soon);
    }

    #[test]
    fn test_due_soon_flag() {
        // Due tomorrow
        let t = task("Tomorrow", Priority::High, "2024-06-11");
        let projected = project(&t, today());
        assert!(!projected.overdue);
        assert!(projected.due_soon);

        // Due today counts as due soon, not overdue
        let t = task("Today", Priority::High, "2024-06-10");
        let projected = project(&t, today());
        assert!(!projected.overdue);
        assert!(projected.due_soon);

        // Two days out is the edge of the window
        let t = task("Edge", Priority::High, "2024-06-12");
        assert!(project(&t, today()).due_soon);

        // Three days out is not
        let t = task("Beyond", Priority::High, "2024-06-13");
        let projected = project(&t, today());
        assert!(!projected.overdue);
        assert!(!projected.due_soon);
    }

    #[test]
    fn test_completed_tasks_never_flagged() {
        let mut t = task("Finished late", Priority::High, "2024-06-01");
        t.status = Status::Completed;
        let projected = project(&t, today());
        assert!(!projected.overdue);
        assert!(!projected.due_soon);
    }

    #[test]
    fn test_unparseable_end_date_never_flagged() {
        for end in ["", "06/10/2024", "soon", "2024-6-1"] {
            let t = task("Odd date", Priority::High, end);
            let projected = project(&t, today());
            assert!(!projected.overdue, "end date {end:?}");
            assert!(!projected.due_soon, "end date {end:?}");
        }
    }

    #[test]
    fn test_today_view_orders_by_floor() {
        let mut tasks = vec![
            task("Third floor", Priority::High, "2024-06-20"),
            task("First floor", Priority::Low, "2024-06-20"),
            task("Second floor", Priority::High, "2024-06-20"),
        ];
        tasks[0].floor = "3".to_string();
        tasks[1].floor = "1".to_string();
        tasks[2].floor = "2".to_string();
        for t in &mut tasks {
            t.is_today = true;
        }

        let lane = today_tasks_for(&tasks, &Category::Site, today());
        let names: Vec<&str> = lane.iter().map(|p| p.task.name.as_str()).collect();
        // Floor order wins even though "First floor" has the weakest priority
        assert_eq!(names, ["First floor", "Second floor", "Third floor"]);
    }

    #[test]
    fn test_today_view_lenient_floor_parsing() {
        let mut tasks = vec![
            task("Basement", Priority::High, "2024-06-20"),
            task("Third", Priority::High, "2024-06-20"),
            task("Ground", Priority::High, "2024-06-20"),
        ];
        tasks[0].floor = "B2".to_string(); // parses as 0
        tasks[1].floor = "3rd".to_string(); // parses as 3
        tasks[2].floor = String::new(); // parses as 0
        for t in &mut tasks {
            t.is_today = true;
        }

        let lane = today_tasks_for(&tasks, &Category::Site, today());
        let names: Vec<&str> = lane.iter().map(|p| p.task.name.as_str()).collect();
        // B2 and empty both count as floor 0 and keep insertion order
        assert_eq!(names, ["Basement", "Ground", "Third"]);
    }

    #[test]
    fn test_today_view_floor_tie_falls_back_to_board_ordering() {
        let mut tasks = vec![
            task("Low prio", Priority::Low, "2024-06-20"),
            task("High prio", Priority::High, "2024-06-20"),
        ];
        for t in &mut tasks {
            t.floor = "2".to_string();
            t.is_today = true;
        }

        let lane = today_tasks_for(&tasks, &Category::Site, today());
        assert_eq!(lane[0].task.name, "High prio");
        assert_eq!(lane[1].task.name, "Low prio");
    }

    #[test]
    fn test_today_view_excludes_completed_and_unflagged() {
        let mut flagged = task("Flagged", Priority::High, "2024-06-20");
        flagged.is_today = true;

        let mut completed = task("Completed", Priority::High, "2024-06-20");
        completed.is_today = true;
        completed.status = Status::Completed;

        let unflagged = task("Unflagged", Priority::High, "2024-06-20");

        let mut wrong_category = task("Elsewhere", Priority::High, "2024-06-20");
        wrong_category.is_today = true;
        wrong_category.category = Category::Cost;

        let tasks = vec![flagged, completed, unflagged, wrong_category];
        let lane = today_tasks_for(&tasks, &Category::Site, today());
        assert_eq!(lane.len(), 1);
        assert_eq!(lane[0].task.name, "Flagged");
    }

    #[test]
    fn test_parse_floor() {
        assert_eq!(parse_floor(""), 0);
        assert_eq!(parse_floor("12"), 12);
        assert_eq!(parse_floor("-2"), -2);
        assert_eq!(parse_floor("+4"), 4);
        assert_eq!(parse_floor("3rd floor"), 3);
        assert_eq!(parse_floor("floor 3"), 0);
        assert_eq!(parse_floor("  7  "), 7);
        assert_eq!(parse_floor("2.9"), 2);
        assert_eq!(parse_floor("B2"), 0);
    }

    #[test]
    fn test_projected_serializes_flags_alongside_task() {
        let t = task("Late", Priority::High, "2024-06-09");
        let projected = project(&t, today());
        let value = serde_json::to_value(projected).unwrap();
        assert_eq!(value["name"], "Late");
        assert_eq!(value["overdue"], true);
        assert_eq!(value["dueSoon"], false);
    }
}
