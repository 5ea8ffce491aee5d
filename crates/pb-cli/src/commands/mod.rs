pub mod apply;
pub mod change_password;
pub mod configure;
pub mod delete;
pub mod dispatch;
pub mod get;
pub mod login;
pub mod schema;
pub mod shared;
