pub mod group_member;
pub mod question;
pub mod response;
pub mod response_date;
pub mod response_other;
pub mod response_text;
pub mod user;
