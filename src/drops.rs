//! In-memory set of marked days for one habit, keyed by year.

use crate::calendar;
use crate::errors::CalendarError;
use std::collections::{BTreeMap, BTreeSet};

/// Which days of which years are marked as completed. Marking a marked
/// day and unmarking an absent day are both no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayDropSet {
    years: BTreeMap<i32, BTreeSet<u32>>,
}

impl DayDropSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from (year, month, day) triples, rejecting any triple
    /// that is not a real calendar date.
    pub fn from_dates<I>(dates: I) -> Result<Self, CalendarError>
    where
        I: IntoIterator<Item = (i32, u32, u32)>,
    {
        let mut set = Self::new();
        for (year, month, day) in dates {
            set.mark_date(year, month, day)?;
        }
        Ok(set)
    }

    pub fn is_marked(&self, day_of_year: u32, year: i32) -> bool {
        self.years
            .get(&year)
            .is_some_and(|days| days.contains(&day_of_year))
    }

    pub fn is_marked_date(&self, year: i32, month: u32, day: u32) -> Result<bool, CalendarError> {
        let day_of_year = calendar::month_day_to_day_of_year(month, day, year)?;
        Ok(self.is_marked(day_of_year, year))
    }

    pub fn mark(&mut self, day_of_year: u32, year: i32) -> Result<(), CalendarError> {
        calendar::day_of_year_to_month_day(day_of_year, year)?;
        self.years.entry(year).or_default().insert(day_of_year);
        Ok(())
    }

    pub fn unmark(&mut self, day_of_year: u32, year: i32) -> Result<(), CalendarError> {
        calendar::day_of_year_to_month_day(day_of_year, year)?;
        if let Some(days) = self.years.get_mut(&year) {
            days.remove(&day_of_year);
            if days.is_empty() {
                self.years.remove(&year);
            }
        }
        Ok(())
    }

    pub fn mark_date(&mut self, year: i32, month: u32, day: u32) -> Result<(), CalendarError> {
        let day_of_year = calendar::month_day_to_day_of_year(month, day, year)?;
        self.mark(day_of_year, year)
    }

    pub fn unmark_date(&mut self, year: i32, month: u32, day: u32) -> Result<(), CalendarError> {
        let day_of_year = calendar::month_day_to_day_of_year(month, day, year)?;
        self.unmark(day_of_year, year)
    }

    /// Years with at least one drop, ascending, plus `current_year` so a
    /// year selector always offers "this year".
    pub fn distinct_years(&self, current_year: i32) -> Vec<i32> {
        let mut years: BTreeSet<i32> = self.years.keys().copied().collect();
        years.insert(current_year);
        years.into_iter().collect()
    }

    pub fn count_in_year(&self, year: i32) -> usize {
        self.years.get(&year).map_or(0, BTreeSet::len)
    }

    /// Sorted day-of-year values marked in `year`.
    pub fn marked_days(&self, year: i32) -> Vec<u32> {
        self.years
            .get(&year)
            .map(|days| days.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Consecutive marked days ending at `as_of_day_of_year`, inclusive.
    /// Stops at January 1: streaks do not wrap into the previous year, so
    /// a run crossing Dec 31 -> Jan 1 counts only the days of the later
    /// year. Known limitation of the per-year view.
    pub fn current_streak(&self, as_of_day_of_year: u32, year: i32) -> u32 {
        let Some(days) = self.years.get(&year) else {
            return 0;
        };
        let mut streak = 0;
        let mut day = as_of_day_of_year;
        while day >= 1 && days.contains(&day) {
            streak += 1;
            if day == 1 {
                break;
            }
            day -= 1;
        }
        streak
    }

    /// All marked dates as (year, month, day) triples, ascending.
    pub fn iter_dates(&self) -> impl Iterator<Item = (i32, u32, u32)> + '_ {
        self.years.iter().flat_map(|(&year, days)| {
            days.iter().filter_map(move |&day_of_year| {
                calendar::day_of_year_to_month_day(day_of_year, year)
                    .ok()
                    .map(|(month, day)| (year, month, day))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_and_unmark_are_idempotent() {
        let mut drops = DayDropSet::new();
        drops.mark(75, 2024).unwrap();
        drops.mark(75, 2024).unwrap();
        assert_eq!(drops.count_in_year(2024), 1);
        assert!(drops.is_marked(75, 2024));

        drops.unmark(75, 2024).unwrap();
        drops.unmark(75, 2024).unwrap();
        assert_eq!(drops.count_in_year(2024), 0);
        assert!(!drops.is_marked(75, 2024));

        // Unmarking an absent date leaves the set unchanged.
        let before = drops.clone();
        drops.unmark(100, 2023).unwrap();
        assert_eq!(drops, before);
    }

    #[test]
    fn invalid_days_are_rejected() {
        let mut drops = DayDropSet::new();
        assert!(drops.mark(366, 2023).is_err());
        assert!(drops.mark(0, 2024).is_err());
        assert!(drops.mark_date(2023, 2, 29).is_err());
        assert_eq!(drops, DayDropSet::new());
    }

    #[test]
    fn streak_counts_consecutive_days_backward() {
        let mut drops = DayDropSet::new();
        for day in [1, 2, 3, 5] {
            drops.mark(day, 2024).unwrap();
        }
        assert_eq!(drops.current_streak(3, 2024), 3);
        assert_eq!(drops.current_streak(5, 2024), 1);
        assert_eq!(drops.current_streak(4, 2024), 0);
        assert_eq!(drops.current_streak(1, 2024), 1);
        assert_eq!(drops.current_streak(10, 2024), 0);
    }

    #[test]
    fn streak_does_not_wrap_into_previous_year() {
        let mut drops = DayDropSet::new();
        drops.mark_date(2023, 12, 30).unwrap();
        drops.mark_date(2023, 12, 31).unwrap();
        drops.mark_date(2024, 1, 1).unwrap();
        drops.mark_date(2024, 1, 2).unwrap();
        assert_eq!(drops.current_streak(2, 2024), 2);
    }

    #[test]
    fn distinct_years_are_ascending_and_deduplicated() {
        let mut drops = DayDropSet::new();
        drops.mark_date(2024, 1, 5).unwrap();
        drops.mark_date(2022, 6, 1).unwrap();
        drops.mark_date(2022, 6, 2).unwrap();

        assert_eq!(drops.distinct_years(2024), vec![2022, 2024]);
        assert_eq!(drops.distinct_years(2023), vec![2022, 2023, 2024]);

        // Unmarking the last drop of a year removes it from the list.
        drops.unmark_date(2024, 1, 5).unwrap();
        assert_eq!(drops.distinct_years(2025), vec![2022, 2025]);
    }

    #[test]
    fn dates_round_trip_through_records() {
        let drops =
            DayDropSet::from_dates([(2024, 2, 29), (2024, 1, 1), (2022, 12, 31)]).unwrap();
        let dates: Vec<_> = drops.iter_dates().collect();
        assert_eq!(dates, vec![(2022, 12, 31), (2024, 1, 1), (2024, 2, 29)]);
        assert_eq!(drops.marked_days(2024), vec![1, 60]);
        assert_eq!(drops.count_in_year(2022), 1);
    }
}
