use schedule_tui::schedule::{
    expand, export::encode_png, parse_schedule, project, ClassRecord, Customization, DayName,
    HourLabel, ScheduleState,
};

fn class(id: &str, code: &str, schedule: &str) -> ClassRecord {
    ClassRecord {
        id: id.to_string(),
        code: code.to_string(),
        name: format!("{code} course"),
        schedule: Some(schedule.to_string()),
        instructor: "Staff".to_string(),
        room: "Room 1".to_string(),
    }
}

fn hour(h: u8) -> HourLabel {
    HourLabel::new(h).unwrap()
}

#[test]
fn mwf_morning_class_occupies_three_nine_o_clock_cells() {
    let outcome = parse_schedule("MWF 9:00 AM - 10:30 AM");
    assert_eq!(outcome.ranges.len(), 1);
    let range = &outcome.ranges[0];
    assert_eq!(range.days, vec![DayName::Monday, DayName::Wednesday, DayName::Friday]);
    assert_eq!((range.start_hour, range.end_hour), (9, 10));

    let mut state = ScheduleState::new();
    let report = state.add_class(&ClassRecord::samples()[0]);
    assert_eq!(report.placed, 3);
    assert_eq!(state.len(), 3);
    assert!(state.iter().all(|e| e.hour == hour(9)));
    assert!(state.iter().all(|e| e.hour.to_string() == "09:00"));
}

#[test]
fn tth_afternoon_class_occupies_two_one_pm_cells() {
    let outcome = parse_schedule("TTH 1:00 PM - 2:30 PM");
    let range = &outcome.ranges[0];
    assert_eq!(range.days, vec![DayName::Tuesday, DayName::Thursday]);
    assert_eq!((range.start_hour, range.end_hour), (13, 14));

    let mut state = ScheduleState::new();
    state.add_class(&ClassRecord::samples()[1]);
    let cells: Vec<_> = state.iter().map(|e| (e.day, e.hour.to_string())).collect();
    assert_eq!(
        cells,
        vec![
            (DayName::Tuesday, "13:00".to_string()),
            (DayName::Thursday, "13:00".to_string()),
        ]
    );
}

#[test]
fn overwrite_leaves_exactly_one_entry_referencing_newest_class() {
    let mut state = ScheduleState::new();
    state.add_class(&class("a", "A", "W 10:00 AM - 11:00 AM"));
    state.add_class(&class("b", "B", "W 10:00 AM - 11:00 AM"));

    let at_cell: Vec<_> = state
        .iter()
        .filter(|e| e.day == DayName::Wednesday && e.hour == hour(10))
        .collect();
    assert_eq!(at_cell.len(), 1);
    assert_eq!(at_cell[0].class.code, "B");
}

#[test]
fn remove_twice_equals_remove_once() {
    let mut once = ScheduleState::new();
    once.add_class(&ClassRecord::samples()[0]);
    let mut twice = once.clone();

    once.remove_cell(DayName::Friday, hour(9));
    twice.remove_cell(DayName::Friday, hour(9));
    twice.remove_cell(DayName::Friday, hour(9));
    assert_eq!(once, twice);
}

#[test]
fn removing_missing_cell_changes_nothing() {
    let mut state = ScheduleState::new();
    state.add_class(&ClassRecord::samples()[1]);
    let before = state.clone();
    state.remove_cell(DayName::Monday, hour(13));
    assert_eq!(state.len(), before.len());
    assert_eq!(state, before);
}

#[test]
fn range_starting_before_window_places_only_eight_o_clock() {
    let mut state = ScheduleState::new();
    state.add_class(&class("early", "EARLY", "MW 7:00 AM - 9:00 AM"));
    let hours: Vec<_> = state.iter().map(|e| e.hour.hour()).collect();
    assert_eq!(hours, vec![8, 8]);
}

#[test]
fn expansion_count_matches_duration_for_every_valid_range() {
    let summary = ClassRecord::samples()[0].summary();
    for start in 8..=21u8 {
        for end in (start + 1)..=22u8 {
            let range = schedule_tui::schedule::TimeRange {
                days: DayName::ALL.to_vec(),
                start_hour: start,
                end_hour: end,
            };
            assert_eq!(expand(&range, &summary).len(), 7 * (end - start) as usize);
        }
    }
}

#[test]
fn full_week_projects_and_exports() {
    let mut state = ScheduleState::new();
    state.add_class(&class("x", "LAB", "MTWTHFSASU 8:00 AM - 10:00 PM"));
    assert_eq!(state.len(), 7 * 14);

    let view = project(&state);
    assert_eq!(view.occupied(), 98);
    let png = encode_png(&view, &Customization::default()).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}
