use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use timetable::modules::schedule::builder::{OFF_DAY, build_schedule};
use timetable_models::{
    Building, Classroom, DateRange, GroupId, GroupPart, LessonRecord, LessonTime, Teacher,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn slot(number: i32) -> LessonTime {
    LessonTime {
        number,
        start: NaiveTime::from_hms_opt(7 + number as u32, 30, 0),
        end: NaiveTime::from_hms_opt(9 + number as u32, 0, 0),
    }
}

fn lesson(day: NaiveDate, number: i32, part: GroupPart, subject: &str) -> LessonRecord {
    LessonRecord {
        group_id: GroupId::new(1),
        lesson_date: day,
        weekday_name: None,
        time: slot(number),
        group_part: part,
        subject: Some(subject.to_string()),
        teacher: Some(Teacher {
            last_name: "Sidorov".into(),
            first_name: "Pavel".into(),
            middle_name: None,
            position: Some("Lecturer".into()),
        }),
        classroom: Some(Classroom {
            room_number: "204".into(),
            building: Some(Building {
                name: "North".into(),
                address: Some("5 River Rd".into()),
            }),
        }),
    }
}

#[test]
fn test_day_count_excludes_off_day() {
    let start = date(2024, 1, 1);
    for length in 0..40 {
        let end = start + chrono::Duration::days(length);
        let range = DateRange::new(start, end);
        let expected = range.days().filter(|d| d.weekday() != Weekday::Sun).count();

        let schedule = build_schedule(range, &[]);

        assert_eq!(schedule.len(), expected);
        assert!(schedule.iter().all(|d| d.lesson_date.weekday() != OFF_DAY));
        assert!(schedule.windows(2).all(|w| w[0].lesson_date < w[1].lesson_date));
    }
}

#[test]
fn test_reversed_range_builds_nothing() {
    let range = DateRange::new(date(2024, 9, 7), date(2024, 9, 2));
    assert!(build_schedule(range, &[]).is_empty());
}

#[test]
fn test_input_order_does_not_matter() {
    let monday = date(2024, 9, 2);
    let tuesday = date(2024, 9, 3);
    let records = vec![
        lesson(monday, 2, GroupPart::Sub2, "Chemistry"),
        lesson(tuesday, 1, GroupPart::Full, "History"),
        lesson(monday, 1, GroupPart::Full, "Mathematics"),
        lesson(monday, 2, GroupPart::Sub1, "Physics"),
    ];
    let mut reversed = records.clone();
    reversed.reverse();

    let range = DateRange::new(monday, tuesday);
    assert_eq!(build_schedule(range, &records), build_schedule(range, &reversed));
}

#[test]
fn test_every_lesson_lists_all_group_parts() {
    let monday = date(2024, 9, 2);
    let records = vec![
        lesson(monday, 1, GroupPart::Full, "Mathematics"),
        lesson(monday, 2, GroupPart::Sub2, "Chemistry"),
    ];

    let schedule = build_schedule(DateRange::new(monday, monday), &records);

    for lesson in &schedule[0].lessons {
        let keys: Vec<GroupPart> = lesson.group_parts.keys().copied().collect();
        assert_eq!(keys, GroupPart::ALL.to_vec());
    }
    let present: usize = schedule[0]
        .lessons
        .iter()
        .map(|l| l.group_parts.values().filter(|p| p.is_some()).count())
        .sum();
    assert_eq!(present, records.len());
}

#[test]
fn test_slot_fields_are_flattened() {
    let monday = date(2024, 9, 2);
    let records = vec![lesson(monday, 1, GroupPart::Full, "Mathematics")];

    let schedule = build_schedule(DateRange::new(monday, monday), &records);
    let lesson = &schedule[0].lessons[0];

    assert_eq!(schedule[0].weekday, "Monday");
    assert_eq!(lesson.time.as_deref(), Some("08:30-10:00"));
    assert_eq!(lesson.teacher.as_deref(), Some("Sidorov Pavel"));
    assert_eq!(lesson.teacher_position.as_deref(), Some("Lecturer"));
    assert_eq!(lesson.classroom.as_deref(), Some("204"));
    assert_eq!(lesson.building.as_deref(), Some("North"));
    assert_eq!(lesson.address.as_deref(), Some("5 River Rd"));
}

#[test]
fn test_full_part_is_canonical() {
    let monday = date(2024, 9, 2);
    let records = vec![
        lesson(monday, 1, GroupPart::Sub1, "Lab"),
        lesson(monday, 1, GroupPart::Full, "Lecture"),
    ];

    let schedule = build_schedule(DateRange::new(monday, monday), &records);

    assert_eq!(schedule[0].lessons.len(), 1);
    assert_eq!(schedule[0].lessons[0].subject.as_deref(), Some("Lecture"));
}

#[test]
fn test_same_number_different_times_are_separate_slots() {
    let monday = date(2024, 9, 2);
    let mut shifted = lesson(monday, 1, GroupPart::Sub2, "Chemistry");
    shifted.time.start = NaiveTime::from_hms_opt(9, 0, 0);
    let records = vec![lesson(monday, 1, GroupPart::Sub1, "Physics"), shifted];

    let schedule = build_schedule(DateRange::new(monday, monday), &records);

    let lessons = &schedule[0].lessons;
    assert_eq!(lessons.len(), 2);
    assert_eq!(lessons[0].subject.as_deref(), Some("Physics"));
    assert_eq!(lessons[1].subject.as_deref(), Some("Chemistry"));
}

#[test]
fn test_database_weekday_label_wins() {
    let monday = date(2024, 9, 2);
    let mut record = lesson(monday, 1, GroupPart::Full, "Mathematics");
    record.weekday_name = Some("Понедельник".into());

    let schedule = build_schedule(DateRange::new(monday, monday), &[record]);

    assert_eq!(schedule[0].weekday, "Понедельник");
}

#[test]
fn test_off_day_and_out_of_range_records_are_ignored() {
    let sunday = date(2024, 9, 8);
    let records = vec![
        lesson(sunday, 1, GroupPart::Full, "Sunday Lesson"),
        lesson(date(2024, 9, 20), 1, GroupPart::Full, "Later"),
    ];

    let schedule = build_schedule(DateRange::new(date(2024, 9, 7), sunday), &records);

    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule[0].lesson_date, date(2024, 9, 7));
    assert!(schedule[0].lessons.is_empty());
}
