mod member;
mod member_query;
mod position;
mod team_stats;
mod user;

pub use member::*;
pub use member_query::*;
pub use position::*;
pub use team_stats::*;
pub use user::*;
