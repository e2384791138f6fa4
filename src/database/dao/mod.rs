pub mod blogs;
pub mod users;

pub use blogs::BlogsDao;
pub use users::UsersDao;
