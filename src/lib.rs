pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    AuthenticateUserUseCase, ExportMembersUseCase, ImportMembersUseCase, ListMembersUseCase,
    ManageMembersUseCase, MemberCache, MemberRepository, MemberStorage, UserRepository,
};

pub use cli::{Commands, Credentials};

pub use connector::{
    DuckdbMemberRepository, DuckdbUserRepository, FileFormat, FileMemberStorage,
    InMemoryMemberRepository, InMemoryUserRepository, MemberRecord, MokaMemberCache,
};

pub use domain::{
    DomainError, Member, MemberKind, MemberQuery, MemberRole, MemberValidator, PlayerStats,
    Position, Session, SortKey, SortOrder, Specialty, TeamStats, User, UserRole, DEFAULT_IMAGE,
};
