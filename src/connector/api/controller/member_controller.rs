use std::path::PathBuf;

use anyhow::Result;

use crate::cli::{CoachArgs, MemberArgs, PlayerArgs};
use crate::{Member, MemberRole, PlayerStats, Position, Specialty};

use super::super::Container;

pub struct MemberController<'a> {
    container: &'a Container,
}

impl<'a> MemberController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn show(&self, id: i64) -> Result<String> {
        let member = self.container.manage_members_use_case().get_by_id(id).await?;
        Ok(format_member(&member))
    }

    pub async fn add_player(&self, args: PlayerArgs) -> Result<String> {
        let member = player_from_args(args, None)?;
        let stored = self.container.manage_members_use_case().save(&member).await?;
        Ok(format!("Added player #{}: {}", stored.id(), stored.summary()))
    }

    pub async fn add_coach(&self, args: CoachArgs) -> Result<String> {
        let member = coach_from_args(args, None)?;
        let stored = self.container.manage_members_use_case().save(&member).await?;
        Ok(format!("Added coach #{}: {}", stored.id(), stored.summary()))
    }

    pub async fn update_player(&self, id: i64, args: PlayerArgs) -> Result<String> {
        let use_case = self.container.manage_members_use_case();
        let current = use_case.get_by_id(id).await?;
        let member = player_from_args(args, Some(current.image()))?;
        let updated = use_case.update(id, &member).await?;
        Ok(format!("Updated #{}: {}", updated.id(), updated.summary()))
    }

    pub async fn update_coach(&self, id: i64, args: CoachArgs) -> Result<String> {
        let use_case = self.container.manage_members_use_case();
        let current = use_case.get_by_id(id).await?;
        let member = coach_from_args(args, Some(current.image()))?;
        let updated = use_case.update(id, &member).await?;
        Ok(format!("Updated #{}: {}", updated.id(), updated.summary()))
    }

    pub async fn delete(&self, id: i64) -> Result<String> {
        let deleted = self.container.manage_members_use_case().delete(id).await?;
        Ok(format!("Deleted #{}: {}", deleted.id(), deleted.summary()))
    }

    pub async fn set_image(&self, id: i64, file: PathBuf) -> Result<String> {
        let updated = self
            .container
            .manage_members_use_case()
            .update_image(id, &file)
            .await?;
        Ok(format!("Member #{} image set to {}", id, updated.image()))
    }
}

/// Without `--image`, an update keeps `current_image`.
fn member_from_args(args: MemberArgs, role: MemberRole, current_image: Option<&str>) -> Member {
    let member = Member::new(
        args.first_name,
        args.last_name,
        args.birth_date,
        args.joined_on,
        args.salary,
        args.country,
        role,
    );

    match args.image.as_deref().or(current_image) {
        Some(image) => member.with_image(image),
        None => member,
    }
}

fn player_from_args(args: PlayerArgs, current_image: Option<&str>) -> Result<Member> {
    let stats = PlayerStats {
        position: Position::parse(&args.position)?,
        number: args.number,
        height: args.height,
        weight: args.weight,
        goals: args.goals,
        matches_played: args.matches,
        minutes_played: args.minutes,
    };
    Ok(member_from_args(
        args.member,
        MemberRole::Player(stats),
        current_image,
    ))
}

fn coach_from_args(args: CoachArgs, current_image: Option<&str>) -> Result<Member> {
    let specialty = Specialty::parse(&args.specialty)?;
    Ok(member_from_args(
        args.member,
        MemberRole::Coach(specialty),
        current_image,
    ))
}

fn format_member(member: &Member) -> String {
    let mut output = format!("#{} {}\n", member.id(), member.full_name());
    output.push_str(&format!("  Role:    {}\n", member.kind().as_str()));

    match member.role() {
        MemberRole::Player(stats) => {
            output.push_str(&format!(
                "  Position: {} #{}\n",
                stats.position, stats.number
            ));
            output.push_str(&format!(
                "  Height:  {:.2} m, Weight: {:.1} kg\n",
                stats.height, stats.weight
            ));
            output.push_str(&format!(
                "  Goals:   {}, Matches: {}, Minutes: {}\n",
                stats.goals, stats.matches_played, stats.minutes_played
            ));
        }
        MemberRole::Coach(specialty) => {
            output.push_str(&format!("  Specialty: {}\n", specialty));
        }
    }

    output.push_str(&format!("  Born:    {}\n", member.birth_date()));
    output.push_str(&format!("  Joined:  {}\n", member.joined_on()));
    output.push_str(&format!("  Salary:  {:.2}\n", member.salary()));
    output.push_str(&format!("  Country: {}\n", member.country()));
    output.push_str(&format!("  Image:   {}", member.image()));
    output
}
