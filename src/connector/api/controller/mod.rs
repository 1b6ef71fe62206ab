pub mod list_controller;
pub mod member_controller;
pub mod transfer_controller;
pub mod user_controller;

pub use list_controller::ListController;
pub use member_controller::MemberController;
pub use transfer_controller::TransferController;
pub use user_controller::UserController;
