// ═══════════════════════════════════════════════════════════════════
// Service Tests — EventService, PriceService, ChartService
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;

use eth_event_chart_core::errors::CoreError;
use eth_event_chart_core::models::chart::Hue;
use eth_event_chart_core::models::event::{Event, Impact};
use eth_event_chart_core::models::price::PricePoint;
use eth_event_chart_core::models::settings::{DecodeMode, GeneratorConfig};
use eth_event_chart_core::models::time_range::TimeRange;
use eth_event_chart_core::services::chart_service::ChartService;
use eth_event_chart_core::services::event_service::{EventService, BUNDLED_EVENTS};
use eth_event_chart_core::services::price_service::PriceService;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn record(name: &str, date: &str, impact: &str) -> String {
    format!(
        r#"{{"name":"{name}","date":"{date}","impact":"{impact}","news_example":"{name} news"}}"#
    )
}

fn document(past: &[String], upcoming: &[String]) -> Vec<u8> {
    format!(
        r#"{{"past_events":[{}],"upcoming_events":[{}]}}"#,
        past.join(","),
        upcoming.join(",")
    )
    .into_bytes()
}

/// Flat daily series over [from, to] with a recognizable price per day.
fn daily_series(from: NaiveDate, to: NaiveDate) -> Vec<PricePoint> {
    from.iter_days()
        .take_while(|day| *day <= to)
        .enumerate()
        .map(|(i, day)| PricePoint::new(day, 1500.0 + i as f64, 5000.0))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════
// EventService
// ═══════════════════════════════════════════════════════════════════

mod event_service {
    use super::*;

    #[test]
    fn parse_returns_past_then_upcoming() {
        let bytes = document(
            &[
                record("Late", "2024-08-05", "Downward"),
                record("Early", "2023-04-12", "Upward"),
            ],
            &[record("Future", "2025-05-07", "Potential Upward")],
        );
        let events = EventService::parse(&bytes).unwrap();
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Late", "Early", "Future"]);
        assert_eq!(events[2].impact, Impact::PotentialUpward);
    }

    #[test]
    fn parse_empty_groups() {
        let events = EventService::parse(&document(&[], &[])).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn one_bad_date_fails_whole_document() {
        let bytes = document(
            &[
                record("Good", "2024-01-10", "Upward"),
                record("Bad", "2024-13-40", "Upward"),
            ],
            &[record("Future", "2025-05-07", "Mixed")],
        );
        let err = EventService::parse(&bytes).unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
        assert!(EventService::new().load(&bytes).is_empty());
    }

    #[test]
    fn loosely_formatted_date_fails_whole_document() {
        for bad in ["2024-6-5", "+2024-06-15", " 2024-06-15", "2024- 6-15"] {
            let bytes = document(
                &[
                    record("Good", "2024-01-10", "Upward"),
                    record("Loose", bad, "Upward"),
                ],
                &[record("Future", "2025-05-07", "Mixed")],
            );
            assert!(EventService::parse(&bytes).is_err(), "accepted {bad:?}");
            assert!(EventService::new().load(&bytes).is_empty());
            assert_eq!(EventService::parse_lenient(&bytes).unwrap().len(), 2);
        }
    }

    #[test]
    fn unknown_impact_fails_whole_document() {
        let bytes = document(
            &[record("Good", "2024-01-10", "Upward")],
            &[record("Odd", "2025-05-07", "Sideways")],
        );
        assert!(EventService::parse(&bytes).is_err());
        assert!(EventService::new().load(&bytes).is_empty());
    }

    #[test]
    fn missing_group_is_an_error() {
        let bytes = br#"{"past_events":[]}"#;
        assert!(EventService::parse(bytes).is_err());
        assert!(EventService::parse_lenient(bytes).is_err());
    }

    #[test]
    fn malformed_json_loads_nothing() {
        let service = EventService::new();
        assert!(service.load(b"{\"past_events\": [").is_empty());
        assert!(service.load(b"").is_empty());
    }

    #[test]
    fn lenient_skips_only_bad_records() {
        let bytes = document(
            &[
                record("Good", "2024-01-10", "Upward"),
                record("BadDate", "2024-13-40", "Upward"),
            ],
            &[
                record("BadImpact", "2025-05-07", "Sideways"),
                record("Future", "2025-12-03", "Potential Upward"),
            ],
        );
        let events = EventService::parse_lenient(&bytes).unwrap();
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Good", "Future"]);
    }

    #[test]
    fn mode_selects_decoder() {
        let bytes = document(
            &[
                record("Good", "2024-01-10", "Upward"),
                record("Bad", "nope", "Upward"),
            ],
            &[],
        );
        assert!(EventService::with_mode(DecodeMode::Strict).load(&bytes).is_empty());
        assert_eq!(EventService::with_mode(DecodeMode::SkipInvalid).load(&bytes).len(), 1);
        assert_eq!(EventService::new().mode(), DecodeMode::Strict);
    }

    #[test]
    fn missing_file_is_resource_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        let service = EventService::new();
        let err = service.read_file(&path).unwrap_err();
        assert!(matches!(err, CoreError::ResourceNotFound(_)));
        assert!(service.load_file(&path).is_empty());
    }

    #[test]
    fn reads_events_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&document(&[record("A", "2024-01-10", "Upward")], &[]))
            .unwrap();
        let events = EventService::new().load_file(file.path());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, d(2024, 1, 10));
    }

    #[test]
    fn bundled_document_decodes_strictly() {
        let raw: serde_json::Value = serde_json::from_str(BUNDLED_EVENTS).unwrap();
        let expected = raw["past_events"].as_array().unwrap().len()
            + raw["upcoming_events"].as_array().unwrap().len();
        let events = EventService::parse(BUNDLED_EVENTS.as_bytes()).unwrap();
        assert_eq!(events.len(), expected);
        assert!(expected > 0);
        assert_eq!(EventService::new().load_bundled().len(), expected);
    }
}

// ═══════════════════════════════════════════════════════════════════
// PriceService
// ═══════════════════════════════════════════════════════════════════

mod price_service {
    use super::*;

    #[test]
    fn covers_trailing_year_inclusive_across_leap_day() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = PriceService::new().generate(d(2024, 6, 15), &mut rng);
        assert_eq!(series.len(), 367);
        assert_eq!(series.first().unwrap().date, d(2023, 6, 15));
        assert_eq!(series.last().unwrap().date, d(2024, 6, 15));
        for pair in series.windows(2) {
            assert_eq!(pair[0].date.succ_opt().unwrap(), pair[1].date);
        }
    }

    #[test]
    fn non_leap_year_has_366_points() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = PriceService::new().generate(d(2023, 6, 15), &mut rng);
        assert_eq!(series.len(), 366);
    }

    #[test]
    fn first_price_is_start_price() {
        let mut rng = StdRng::seed_from_u64(99);
        let series = PriceService::new().generate(d(2024, 6, 15), &mut rng);
        assert_eq!(series[0].price, 1500.0);
    }

    #[test]
    fn prices_and_volumes_stay_in_bounds() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let series = PriceService::new().generate(d(2024, 6, 15), &mut rng);
            for p in &series {
                assert!((1000.0..=4000.0).contains(&p.price), "price {}", p.price);
                assert!(p.volume >= 1000.0 && p.volume < 10000.0, "volume {}", p.volume);
            }
            for pair in series.windows(2) {
                assert!((pair[1].price - pair[0].price).abs() <= 50.0 + 1e-9);
            }
        }
    }

    #[test]
    fn clamping_holds_at_tight_bounds() {
        let config = GeneratorConfig {
            start_price: 1000.0,
            min_price: 1000.0,
            max_price: 1010.0,
            ..GeneratorConfig::default()
        };
        let service = PriceService::with_config(config).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let series = service.generate(d(2024, 6, 15), &mut rng);
        assert!(series.iter().all(|p| (1000.0..=1010.0).contains(&p.price)));
        // ±50 against a 10-wide band must hit both edges at some point.
        assert!(series.iter().any(|p| p.price == 1010.0));
    }

    #[test]
    fn same_seed_replays_same_values() {
        let service = PriceService::new();
        let a = service.generate(d(2024, 6, 15), &mut StdRng::seed_from_u64(42));
        let b = service.generate(d(2024, 6, 15), &mut StdRng::seed_from_u64(42));
        let prices_a: Vec<(f64, f64)> = a.iter().map(|p| (p.price, p.volume)).collect();
        let prices_b: Vec<(f64, f64)> = b.iter().map(|p| (p.price, p.volume)).collect();
        assert_eq!(prices_a, prices_b);
        // ids are per point, not derived from the seed
        assert_ne!(a[0].id, b[0].id);
    }

    #[test]
    fn different_seeds_differ() {
        let service = PriceService::new();
        let a = service.generate(d(2024, 6, 15), &mut StdRng::seed_from_u64(1));
        let b = service.generate(d(2024, 6, 15), &mut StdRng::seed_from_u64(2));
        assert_ne!(a[10].price, b[10].price);
    }

    #[test]
    fn inverted_range_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let series = PriceService::new().generate_range(d(2024, 6, 2), d(2024, 6, 1), &mut rng);
        assert!(series.is_empty());
    }

    #[test]
    fn single_day_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let series = PriceService::new().generate_range(d(2024, 6, 1), d(2024, 6, 1), &mut rng);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].price, 1500.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GeneratorConfig {
            min_price: 4000.0,
            max_price: 1000.0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            PriceService::with_config(config),
            Err(CoreError::InvalidSettings(_))
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartService
// ═══════════════════════════════════════════════════════════════════

mod chart_service {
    use super::*;

    fn year_to(today: NaiveDate) -> Vec<PricePoint> {
        daily_series(today.checked_sub_months(chrono::Months::new(12)).unwrap(), today)
    }

    #[test]
    fn one_month_starts_at_calendar_cutoff() {
        let today = d(2024, 6, 15);
        let series = year_to(today);
        let filtered = ChartService::new().filter_by_range(&series, TimeRange::OneMonth, today);
        assert_eq!(filtered.first().unwrap().date, d(2024, 5, 15));
        assert_eq!(filtered.last().unwrap().date, today);
        assert_eq!(filtered.len(), 32);
        assert!(filtered.iter().all(|p| p.date >= d(2024, 5, 15)));
    }

    #[test]
    fn each_range_cutoff() {
        let today = d(2024, 6, 15);
        let series = year_to(today);
        let svc = ChartService::new();
        let len = |r| svc.filter_by_range(&series, r, today).len();
        assert_eq!(len(TimeRange::OneDay), 2);
        assert_eq!(len(TimeRange::OneWeek), 8);
        assert_eq!(len(TimeRange::ThreeMonths), 93);
        assert_eq!(len(TimeRange::OneYear), 367);
    }

    #[test]
    fn all_returns_input_unchanged() {
        let today = d(2024, 6, 15);
        let series = daily_series(d(2020, 1, 1), today);
        let filtered = ChartService::new().filter_by_range(&series, TimeRange::All, today);
        assert_eq!(filtered, series.as_slice());
    }

    #[test]
    fn stale_series_filters_to_empty() {
        let series = daily_series(d(2023, 1, 1), d(2023, 1, 31));
        let filtered =
            ChartService::new().filter_by_range(&series, TimeRange::OneWeek, d(2024, 6, 15));
        assert!(filtered.is_empty());
    }

    #[test]
    fn events_inside_window_inclusive() {
        let series = daily_series(d(2024, 5, 15), d(2024, 6, 15));
        let events = vec![
            Event::new("before", d(2024, 5, 14), Impact::Upward, ""),
            Event::new("first", d(2024, 5, 15), Impact::Upward, ""),
            Event::new("middle", d(2024, 6, 1), Impact::Mixed, ""),
            Event::new("last", d(2024, 6, 15), Impact::Downward, ""),
            Event::new("after", d(2024, 6, 16), Impact::Upward, ""),
        ];
        let visible = ChartService::new().filter_events_to_window(&events, &series);
        let names: Vec<&str> = visible.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["first", "middle", "last"]);
    }

    #[test]
    fn empty_series_shows_no_events() {
        let events = vec![Event::new("x", d(2024, 6, 1), Impact::Upward, "")];
        let visible = ChartService::new().filter_events_to_window(&events, &[]);
        assert!(visible.is_empty());
    }

    #[test]
    fn window_keeps_source_order() {
        let series = daily_series(d(2024, 1, 1), d(2024, 12, 31));
        let events = vec![
            Event::new("later", d(2024, 9, 1), Impact::Upward, ""),
            Event::new("earlier", d(2024, 2, 1), Impact::Upward, ""),
        ];
        let visible = ChartService::new().filter_events_to_window(&events, &series);
        assert_eq!(visible[0].name, "later");
        assert_eq!(visible[1].name, "earlier");
    }

    #[test]
    fn price_lookup_by_day() {
        let series = daily_series(d(2024, 6, 1), d(2024, 6, 10));
        let svc = ChartService::new();
        assert_eq!(svc.price_at_date(&series, d(2024, 6, 1)), Some(1500.0));
        assert_eq!(svc.price_at_date(&series, d(2024, 6, 4)), Some(1503.0));
        assert_eq!(svc.price_at_date(&series, d(2024, 6, 11)), None);
        assert_eq!(svc.price_at_date(&[], d(2024, 6, 1)), None);
    }

    #[test]
    fn markers_carry_price_and_marker_hue() {
        let series = daily_series(d(2024, 6, 1), d(2024, 6, 10));
        let events = vec![
            Event::new("mixed", d(2024, 6, 3), Impact::Mixed, ""),
            Event::new("outside", d(2024, 7, 1), Impact::Upward, ""),
            Event::new("up", d(2024, 6, 10), Impact::PotentialUpward, ""),
        ];
        let markers = ChartService::new().build_markers(&events, &series);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].event.name, "mixed");
        assert_eq!(markers[0].price, Some(1502.0));
        assert_eq!(markers[0].hue, Hue::Yellow);
        assert_eq!(markers[1].hue, Hue::Green);
    }

    #[test]
    fn range_options_mark_selection() {
        let options = ChartService::new().range_options(TimeRange::ThreeMonths);
        assert_eq!(options.len(), 6);
        let selected: Vec<&str> = options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(selected, ["3M"]);
        assert_eq!(options[0].label, "1D");
        assert_eq!(options[5].range, TimeRange::All);
    }
}
