#![allow(dead_code)]

use chrono::NaiveDate;
use newteam::{Member, MemberRole, PlayerStats, Position, Specialty};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn player(first: &str, last: &str, number: i32, salary: f64) -> Member {
    Member::new(
        first,
        last,
        date(1996, 4, 12),
        date(2019, 7, 1),
        salary,
        "España",
        MemberRole::Player(PlayerStats {
            position: Position::Forward,
            number,
            height: 1.82,
            weight: 78.5,
            goals: 12,
            matches_played: 30,
            minutes_played: 2400,
        }),
    )
}

pub fn coach(first: &str, last: &str, salary: f64) -> Member {
    Member::new(
        first,
        last,
        date(1968, 11, 2),
        date(2020, 1, 15),
        salary,
        "Argentina",
        MemberRole::Coach(Specialty::HeadCoach),
    )
}

pub fn squad() -> Vec<Member> {
    vec![
        player("Rodolfo", "Suárez", 18, 45000.0).with_id(1),
        coach("Marcelo", "Bielsa", 90000.0).with_id(2),
        player("Lucía", "García", 7, 38000.5)
            .with_id(3)
            .with_image("images/3-lucia.png"),
    ]
}

/// Compares everything a squad file carries (timestamps are not part of any format).
pub fn assert_same_members(expected: &[Member], actual: &[Member]) {
    assert_eq!(expected.len(), actual.len(), "member count differs");
    for (e, a) in expected.iter().zip(actual) {
        assert_eq!(e.id(), a.id());
        assert_eq!(e.first_name(), a.first_name());
        assert_eq!(e.last_name(), a.last_name());
        assert_eq!(e.birth_date(), a.birth_date());
        assert_eq!(e.joined_on(), a.joined_on());
        assert_eq!(e.salary(), a.salary());
        assert_eq!(e.country(), a.country());
        assert_eq!(e.image(), a.image());
        assert_eq!(e.role(), a.role());
    }
}
