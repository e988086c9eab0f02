//! End-to-end flows through the application facade: streaks across real
//! day boundaries, the freeze mechanic, and history bookkeeping.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use mealdeck_core::storage::HISTORY_CAP;
use mealdeck_core::{
    Event, FixedClock, MealDeck, MemoryStore, SelectionSource, Stats, StreakNotice,
};
use rand::rngs::mock::StepRng;

fn app() -> (MealDeck<MemoryStore, FixedClock, StepRng>, FixedClock) {
    // 05:00 UTC is noon in the civil zone; advancing whole days keeps
    // the civil date in step.
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 10, 5, 0, 0).unwrap());
    let app = MealDeck::new(MemoryStore::new(), clock.clone(), StepRng::new(0, 0));
    (app, clock)
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[test]
fn daily_selections_grow_the_streak() {
    let (mut app, clock) = app();
    for i in 0..5 {
        if i > 0 {
            clock.advance(Duration::days(1));
        }
        app.select("Phở bò", SelectionSource::Suggestion).unwrap();
    }
    let stats = app.stats().unwrap();
    assert_eq!(stats.streak, 5);
    assert_eq!(stats.total_suggestions, 5);
    assert_eq!(stats.last_suggestion_date, Some(day(14)));
}

#[test]
fn one_missed_day_is_frozen_when_points_allow() {
    let (mut app, clock) = app();
    app.state()
        .set_stats(&Stats {
            streak: 5,
            points: 60,
            total_suggestions: 12,
            last_suggestion_date: Some(day(10)),
        })
        .unwrap();

    clock.advance(Duration::days(2));
    let events = app.select("Phở bò", SelectionSource::Suggestion).unwrap();
    assert!(matches!(
        events[0],
        Event::StreakFrozen { streak: 6, cost: 50, .. }
    ));

    let stats = app.stats().unwrap();
    assert_eq!(stats.streak, 6);
    // 60 - 50 freeze + base 5 + new food 3 + streak bonus 1.
    assert_eq!(stats.points, 19);
}

#[test]
fn one_missed_day_resets_when_points_are_short() {
    let (mut app, clock) = app();
    app.state()
        .set_stats(&Stats {
            streak: 5,
            points: 40,
            total_suggestions: 12,
            last_suggestion_date: Some(day(10)),
        })
        .unwrap();

    clock.advance(Duration::days(2));
    let events = app.select("Phở bò", SelectionSource::Suggestion).unwrap();
    assert!(matches!(
        events[0],
        Event::StreakReset {
            notice: StreakNotice::MissedOneShortOnPoints { shortfall: 10 },
            ..
        }
    ));

    let stats = app.stats().unwrap();
    assert_eq!(stats.streak, 1);
    // No freeze spend; the selection still earns 5 + 3.
    assert_eq!(stats.points, 48);
}

#[test]
fn long_gap_resets_and_reports_missed_days() {
    let (mut app, clock) = app();
    app.state()
        .set_stats(&Stats {
            streak: 5,
            points: 200,
            total_suggestions: 12,
            last_suggestion_date: Some(day(10)),
        })
        .unwrap();

    clock.advance(Duration::days(5));
    let events = app.select("Phở bò", SelectionSource::Suggestion).unwrap();
    assert!(matches!(
        events[0],
        Event::StreakReset {
            notice: StreakNotice::MissedMany { missed_days: 4 },
            ..
        }
    ));
    assert_eq!(app.stats().unwrap().streak, 1);
}

#[test]
fn history_is_capped_and_evicts_oldest() {
    let (mut app, clock) = app();
    app.add_food("Bánh bao").unwrap();
    for i in 0..(HISTORY_CAP + 3) {
        let food = if i == 0 { "Bánh bao" } else { "Phở bò" };
        app.select(food, SelectionSource::Suggestion).unwrap();
        clock.advance(Duration::hours(1));
    }
    let history = app.history().unwrap();
    assert_eq!(history.len(), HISTORY_CAP);
    assert!(history.iter().all(|e| e.food != "Bánh bao"));
}

#[test]
fn deleting_a_history_entry_keeps_earned_points() {
    let (mut app, _clock) = app();
    app.select("Phở bò", SelectionSource::Suggestion).unwrap();
    let points_before = app.stats().unwrap().points;

    let id = app.history().unwrap()[0].id.clone();
    assert!(app.delete_history_entry(&id).unwrap());
    assert!(!app.delete_history_entry(&id).unwrap());

    assert!(app.history().unwrap().is_empty());
    assert_eq!(app.stats().unwrap().points, points_before);
}

#[test]
fn achievements_accumulate_over_a_week() {
    let (mut app, clock) = app();
    for i in 0..7 {
        if i > 0 {
            clock.advance(Duration::days(1));
        }
        app.select("Phở bò", SelectionSource::Suggestion).unwrap();
    }

    let unlocked: Vec<&str> = app
        .achievements()
        .unwrap()
        .into_iter()
        .filter(|(_, unlocked)| *unlocked)
        .map(|(def, _)| def.name)
        .collect();
    // First, streak 3, streak 7, explorer 7 and a perfect week.
    assert_eq!(unlocked.len(), 5);
}
