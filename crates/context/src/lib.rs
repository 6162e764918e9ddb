mod group;
mod session_user;

pub use group::Group;
pub use session_user::SessionUser;
