use serde::Deserialize;

/// A support ticket as returned by the GCC `getmytickets` call.
///
/// Only `tickID` matters for correctness; every other field is display
/// material copied into the Jira issue. GCC omits fields freely, so all of
/// them are optional and unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ticket {
    #[serde(rename = "tickID")]
    pub id: Option<String>,
    #[serde(rename = "tickSender")]
    pub sender: Option<String>,
    #[serde(rename = "tickShMesdagh")]
    pub subject: Option<String>,
    #[serde(rename = "tickDescription")]
    pub description: Option<String>,
    #[serde(rename = "contactName")]
    pub contact_name: Option<String>,
    #[serde(rename = "contactCellPhone")]
    pub contact_phone: Option<String>,
    #[serde(rename = "nationalCode")]
    pub national_code: Option<String>,
}

impl Ticket {
    /// Identifier used for dedup, if the record has one. IDs are trimmed
    /// because the store file is line-delimited.
    pub fn dedup_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

/// The issue created in Jira for a ticket.
#[derive(Debug, Clone)]
pub struct CreatedIssue {
    pub key: String,
}
