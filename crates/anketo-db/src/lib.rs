pub mod bulk;
pub mod question;
pub mod response;
pub mod response_date;
pub mod response_text;

pub use sea_orm;
