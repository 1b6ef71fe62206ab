mod authenticate_user;
mod list_members;
mod manage_members;
mod transfer_members;

pub use authenticate_user::*;
pub use list_members::*;
pub use manage_members::*;
pub use transfer_members::*;
