use anyhow::Result;

use crate::cli::{KindArg, SortArg};
use crate::{Member, MemberKind, MemberQuery, SortKey, SortOrder, TeamStats};

use super::super::Container;

pub struct ListController<'a> {
    container: &'a Container,
}

impl<'a> ListController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn list(
        &self,
        role: Option<KindArg>,
        name: Option<String>,
        sort: Option<SortArg>,
        desc: bool,
    ) -> Result<String> {
        let query = build_query(role, name, sort, desc);
        let members = self.container.list_use_case().execute(&query).await?;
        Ok(format_member_list(&members))
    }

    pub async fn stats(&self) -> Result<String> {
        let stats = self
            .container
            .list_use_case()
            .stats(&MemberQuery::new())
            .await?;
        Ok(self.format_stats(&stats))
    }

    fn format_stats(&self, stats: &TeamStats) -> String {
        format!(
            "Squad Statistics\n================\nMembers:         {}\nPlayers:         {}\nCoaches:         {}\nSquad cost:      {:.2}\nAverage goals:   {:.2}\nAverage minutes: {:.1}\nData Dir:        {}",
            stats.member_count,
            stats.player_count,
            stats.coach_count,
            stats.total_salary,
            stats.average_goals,
            stats.average_minutes,
            self.container.data_dir().display()
        )
    }
}

fn build_query(
    role: Option<KindArg>,
    name: Option<String>,
    sort: Option<SortArg>,
    desc: bool,
) -> MemberQuery {
    let mut query = MemberQuery::new();

    if let Some(role) = role {
        query = query.with_kind(match role {
            KindArg::Players => MemberKind::Player,
            KindArg::Coaches => MemberKind::Coach,
        });
    }

    if let Some(name) = name {
        query = query.with_name(name);
    }

    if let Some(sort) = sort {
        let key = match sort {
            SortArg::Salary => SortKey::Salary,
            SortArg::Name => SortKey::Name,
        };
        let order = if desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        query = query.with_sort(key, order);
    }

    query
}

fn format_member_list(members: &[Member]) -> String {
    if members.is_empty() {
        return "No members found.".to_string();
    }

    let mut output = format!("{} members:\n\n", members.len());
    for member in members {
        output.push_str(&format!(
            "  {:>4}  {:<10}  {}  ({:.2})\n",
            member.id(),
            member.kind().as_str(),
            member.summary(),
            member.salary()
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_maps_flags() {
        let query = build_query(
            Some(KindArg::Coaches),
            Some(" Del ".into()),
            Some(SortArg::Salary),
            true,
        );
        assert_eq!(query.kind(), Some(MemberKind::Coach));
        assert_eq!(query.name(), Some("del"));
        assert_eq!(query.sort(), Some((SortKey::Salary, SortOrder::Descending)));

        let plain = build_query(None, None, None, true);
        assert!(plain.kind().is_none());
        assert!(plain.sort().is_none());
    }

    #[test]
    fn test_empty_list_message() {
        assert_eq!(format_member_list(&[]), "No members found.");
    }
}
