use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;

use crate::models::venue_models::{Area, VenueListItem, VenueRow};

/// A show's temporal bucket is derived from the clock at query time, never
/// stored.
pub fn is_upcoming(start_time: NaiveDateTime, now: NaiveDateTime) -> bool {
    start_time > now
}

/// Renders a start time the way detail and listing pages display it.
pub fn format_start_time(start_time: NaiveDateTime) -> String {
    start_time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Splits rows into (upcoming, past) against `now`. Both halves are always
/// produced, whatever the other one holds.
pub fn split_by_start_time<T>(
    rows: Vec<T>,
    now: NaiveDateTime,
    start_time: impl Fn(&T) -> NaiveDateTime,
) -> (Vec<T>, Vec<T>) {
    rows.into_iter()
        .partition(|row| is_upcoming(start_time(row), now))
}

/// Tallies upcoming shows per owning entity id. Input is the raw id column of
/// the upcoming-show query, one element per show.
pub fn upcoming_counts(owner_ids: &[i32]) -> HashMap<i32, i64> {
    let mut counts = HashMap::new();
    for id in owner_ids {
        *counts.entry(*id).or_insert(0) += 1;
    }
    counts
}

/// Groups venues by exact (city, state) match, no normalization. Groups come
/// out ordered by (state, city) and venues within a group by id.
pub fn group_venues_by_area(mut rows: Vec<VenueRow>, counts: &HashMap<i32, i64>) -> Vec<Area> {
    rows.sort_by_key(|row| row.id);

    let mut grouped: BTreeMap<(String, String), Vec<VenueListItem>> = BTreeMap::new();
    for row in rows {
        grouped
            .entry((row.state.clone(), row.city.clone()))
            .or_default()
            .push(VenueListItem {
                id: row.id,
                name: row.name,
                num_upcoming_shows: counts.get(&row.id).copied().unwrap_or(0),
            });
    }

    grouped
        .into_iter()
        .map(|((state, city), venues)| Area {
            city,
            state,
            venues,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    fn venue(id: i32, name: &str, city: &str, state: &str) -> VenueRow {
        VenueRow {
            id,
            name: name.into(),
            city: city.into(),
            state: state.into(),
        }
    }

    #[test]
    fn bucket_follows_the_clock_supplied_per_call() {
        let start = at(2026, 6, 1);
        // Same show flips bucket once the clock passes its start time.
        assert!(is_upcoming(start, at(2026, 5, 31)));
        assert!(!is_upcoming(start, at(2026, 6, 2)));
    }

    #[test]
    fn split_produces_both_halves_independently() {
        let rows = vec![at(2025, 1, 1), at(2027, 1, 1), at(2024, 3, 15)];
        let (upcoming, past) = split_by_start_time(rows, at(2026, 1, 1), |t| *t);
        assert_eq!(upcoming, vec![at(2027, 1, 1)]);
        assert_eq!(past, vec![at(2025, 1, 1), at(2024, 3, 15)]);

        // Zero upcoming shows must not suppress the past list.
        let rows = vec![at(2020, 1, 1)];
        let (upcoming, past) = split_by_start_time(rows, at(2026, 1, 1), |t| *t);
        assert!(upcoming.is_empty());
        assert_eq!(past.len(), 1);
    }

    #[test]
    fn same_city_and_state_share_one_group() {
        let rows = vec![
            venue(2, "The Dueling Pianos Bar", "New York", "NY"),
            venue(1, "The Musical Hop", "San Francisco", "CA"),
            venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
        ];
        let counts = upcoming_counts(&[1, 1, 3]);
        let areas = group_venues_by_area(rows, &counts);

        assert_eq!(areas.len(), 2);
        assert_eq!((areas[0].state.as_str(), areas[0].city.as_str()), ("CA", "San Francisco"));
        assert_eq!(areas[0].venues.len(), 2);
        assert_eq!(areas[0].venues[0].id, 1);
        assert_eq!(areas[0].venues[0].num_upcoming_shows, 2);
        assert_eq!(areas[0].venues[1].num_upcoming_shows, 1);
        assert_eq!(areas[1].venues[0].num_upcoming_shows, 0);
    }

    #[test]
    fn same_city_different_state_stays_separate() {
        let rows = vec![
            venue(1, "Hall A", "Springfield", "IL"),
            venue(2, "Hall B", "Springfield", "MO"),
        ];
        let areas = group_venues_by_area(rows, &HashMap::new());
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].state, "IL");
        assert_eq!(areas[1].state, "MO");
    }

    #[test]
    fn grouping_key_is_exact_match() {
        // Case differences are distinct areas by design.
        let rows = vec![
            venue(1, "Hall A", "san francisco", "CA"),
            venue(2, "Hall B", "San Francisco", "CA"),
        ];
        let areas = group_venues_by_area(rows, &HashMap::new());
        assert_eq!(areas.len(), 2);
    }

    #[test]
    fn start_time_renders_as_timestamp_string() {
        assert_eq!(format_start_time(at(2026, 6, 1)), "2026-06-01 20:00:00");
    }
}
