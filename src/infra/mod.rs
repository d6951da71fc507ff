pub mod gcc;
pub mod jira;
