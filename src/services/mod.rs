pub mod issue_publisher;
pub mod ticket_source;

pub use issue_publisher::IssuePublisherService;
pub use ticket_source::TicketSourceService;
