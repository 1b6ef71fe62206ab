use serde::{Deserialize, Serialize};

use super::Member;

/// Aggregate figures for a squad. Averages are taken over players only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TeamStats {
    pub member_count: usize,
    pub player_count: usize,
    pub coach_count: usize,
    pub total_salary: f64,
    pub average_goals: f64,
    pub average_minutes: f64,
}

impl TeamStats {
    pub fn from_members(members: &[Member]) -> Self {
        let mut stats = TeamStats {
            member_count: members.len(),
            ..Default::default()
        };

        let mut goals: i64 = 0;
        let mut minutes: i64 = 0;

        for member in members {
            stats.total_salary += member.salary();
            match member.player_stats() {
                Some(player) => {
                    stats.player_count += 1;
                    goals += i64::from(player.goals);
                    minutes += i64::from(player.minutes_played);
                }
                None => stats.coach_count += 1,
            }
        }

        if stats.player_count > 0 {
            stats.average_goals = goals as f64 / stats.player_count as f64;
            stats.average_minutes = minutes as f64 / stats.player_count as f64;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{MemberRole, PlayerStats, Position, Specialty};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn player(goals: i32, minutes: i32, salary: f64) -> Member {
        Member::new(
            "P",
            "Player",
            date(1999, 1, 1),
            date(2021, 1, 1),
            salary,
            "Perú",
            MemberRole::Player(PlayerStats {
                position: Position::Midfielder,
                number: 10,
                height: 1.75,
                weight: 70.0,
                goals,
                matches_played: 10,
                minutes_played: minutes,
            }),
        )
    }

    #[test]
    fn test_empty_squad() {
        let stats = TeamStats::from_members(&[]);
        assert_eq!(stats, TeamStats::default());
    }

    #[test]
    fn test_averages_ignore_coaches() {
        let coach = Member::new(
            "C",
            "Coach",
            date(1970, 1, 1),
            date(2010, 1, 1),
            10000.0,
            "Perú",
            MemberRole::Coach(Specialty::AssistantCoach),
        );
        let members = vec![player(4, 900, 1000.0), player(2, 300, 2000.0), coach];

        let stats = TeamStats::from_members(&members);

        assert_eq!(stats.member_count, 3);
        assert_eq!(stats.player_count, 2);
        assert_eq!(stats.coach_count, 1);
        assert!((stats.total_salary - 13000.0).abs() < f64::EPSILON);
        assert!((stats.average_goals - 3.0).abs() < f64::EPSILON);
        assert!((stats.average_minutes - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_only_coaches_has_zero_averages() {
        let coach = Member::new(
            "C",
            "Coach",
            date(1970, 1, 1),
            date(2010, 1, 1),
            500.0,
            "Perú",
            MemberRole::Coach(Specialty::GoalkeeperCoach),
        );

        let stats = TeamStats::from_members(&[coach]);

        assert_eq!(stats.player_count, 0);
        assert_eq!(stats.average_goals, 0.0);
        assert_eq!(stats.average_minutes, 0.0);
    }
}
