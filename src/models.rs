use crate::drops::DayDropSet;
use crate::errors::CoreError;
use serde::{Deserialize, Serialize};

/// Fixed display palette. Serialized as the lowercase hue name, e.g.
/// "emerald". Anything outside the enum is rejected when the request is
/// deserialized, before it can reach the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Color {
    Rose,
    Pink,
    Fuchsia,
    Purple,
    Violet,
    Indigo,
    Blue,
    Sky,
    Cyan,
    Teal,
    Emerald,
    Green,
    Lime,
    Yellow,
    Amber,
    Orange,
    Red,
    Stone,
    Neutral,
    Zinc,
    Gray,
    Slate,
}

impl Color {
    pub fn hex(self) -> &'static str {
        match self {
            Color::Rose => "#f43f5e",
            Color::Pink => "#ec4899",
            Color::Fuchsia => "#d946ef",
            Color::Purple => "#a855f7",
            Color::Violet => "#8b5cf6",
            Color::Indigo => "#6366f1",
            Color::Blue => "#3b82f6",
            Color::Sky => "#0ea5e9",
            Color::Cyan => "#06b6d4",
            Color::Teal => "#14b8a6",
            Color::Emerald => "#10b981",
            Color::Green => "#22c55e",
            Color::Lime => "#84cc16",
            Color::Yellow => "#eab308",
            Color::Amber => "#f59e0b",
            Color::Orange => "#f97316",
            Color::Red => "#ef4444",
            Color::Stone => "#78716c",
            Color::Neutral => "#737373",
            Color::Zinc => "#71717a",
            Color::Gray => "#6b7280",
            Color::Slate => "#64748b",
        }
    }
}

/// One completed day, as stored and as served by the service contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDropRecord {
    pub id: String,
    pub habit_id: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: Color,
    #[serde(default)]
    pub day_drops: Vec<DayDropRecord>,
}

/// The persisted state file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HabitFile {
    pub habits: Vec<HabitRecord>,
}

/// Cached habit as held by the collection store: the record's identity
/// plus its drops folded into a `DayDropSet`.
#[derive(Debug, Clone, PartialEq)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub color: Color,
    pub drops: DayDropSet,
}

impl Habit {
    pub fn from_record(record: &HabitRecord) -> Result<Self, CoreError> {
        let drops = DayDropSet::from_dates(
            record.day_drops.iter().map(|d| (d.year, d.month, d.day)),
        )?;
        Ok(Self {
            id: record.id.clone(),
            name: record.name.clone(),
            color: record.color,
            drops,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
    pub color: Color,
}

#[derive(Debug, Deserialize)]
pub struct EditHabitRequest {
    pub name: String,
    pub color: Color,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Serialize)]
pub struct DayDropDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Serialize)]
pub struct HabitResponse {
    pub id: String,
    pub name: String,
    pub color: Color,
    pub day_drops: Vec<DayDropDate>,
}

impl HabitResponse {
    pub fn from_habit(habit: &Habit) -> Self {
        Self {
            id: habit.id.clone(),
            name: habit.name.clone(),
            color: habit.color,
            day_drops: habit
                .drops
                .iter_dates()
                .map(|(year, month, day)| DayDropDate { year, month, day })
                .collect(),
        }
    }

    pub fn from_record(record: &HabitRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            color: record.color,
            day_drops: record
                .day_drops
                .iter()
                .map(|d| DayDropDate {
                    year: d.year,
                    month: d.month,
                    day: d.day,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub habit_id: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub marked: bool,
}

/// Everything a UI needs to lay out one habit's grid for one year.
#[derive(Debug, Serialize)]
pub struct GridResponse {
    pub habit_id: String,
    pub name: String,
    pub color: Color,
    pub year: i32,
    pub days_in_year: u32,
    /// Weekday of January 1, 1 = Sunday .. 7 = Saturday.
    pub first_weekday: u32,
    /// Empty cells before January 1 in a Sunday-first column layout.
    pub leading_blanks: u32,
    /// Set when `year` is the current year; later days render as future.
    pub today_day_of_year: Option<u32>,
    pub marked_days: Vec<u32>,
    pub total: usize,
    pub streak: u32,
    pub years: Vec<i32>,
}
