use std::sync::Arc;

use crate::application::MemberRepository;
use crate::domain::{DomainError, Member, MemberQuery, TeamStats};

pub struct ListMembersUseCase {
    member_repo: Arc<dyn MemberRepository>,
}

impl ListMembersUseCase {
    pub fn new(member_repo: Arc<dyn MemberRepository>) -> Self {
        Self { member_repo }
    }

    pub async fn execute(&self, query: &MemberQuery) -> Result<Vec<Member>, DomainError> {
        let members = self.member_repo.find_all().await?;
        Ok(query.apply(members))
    }

    /// Figures for the members matching `query`.
    pub async fn stats(&self, query: &MemberQuery) -> Result<TeamStats, DomainError> {
        let members = self.execute(query).await?;
        Ok(TeamStats::from_members(&members))
    }
}
