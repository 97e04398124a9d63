//! Event creation input and output types.

use serde_json::{Value, json};

/// Banner asset supplied at event-creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerUpload {
    /// Original file name (used by the storage bucket).
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl BannerUpload {
    /// Create a banner upload from a file name and its contents.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// All caller-supplied fields of a new event.
///
/// Field names here are Rust-idiomatic; [`EventDraft::document_payload`]
/// maps them onto the wire names the deployed event collection already uses
/// (`eventname`, `eventdate`, `type`, `created`), so stored documents stay
/// compatible with existing readers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    /// Event name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Host or organizer name.
    pub hostname: String,
    /// Event date, as entered by the form.
    pub date: String,
    /// Contact email.
    pub email: String,
    /// Venue country.
    pub country: String,
    /// Venue street address.
    pub address: String,
    /// Venue city.
    pub city: String,
    /// Venue state or region.
    pub state: String,
    /// Venue postal code.
    pub postal: String,
    /// Intended audience.
    pub audience: String,
    /// Event type (conference, meetup, ...).
    pub kind: String,
    /// Expected attendee count.
    pub attendees: u32,
    /// Ticket price, in the application's display currency.
    pub price: f64,
    /// Free-text technology/topics field.
    pub tech: String,
    /// Free-text agenda.
    pub agenda: String,
    /// Whether registrations require approval.
    pub approval: String,
    /// Twitter link.
    pub twitter: String,
    /// Website link.
    pub website: String,
    /// LinkedIn link.
    pub linkedin: String,
    /// Instagram link.
    pub instagram: String,
}

impl EventDraft {
    /// Build the document payload for the events collection.
    ///
    /// `banner_url` is the derived viewer URL of the uploaded banner and
    /// `created_by` the creator's user id. The registrations list starts
    /// empty; the attendee flow appends to it.
    #[must_use]
    pub fn document_payload(&self, banner_url: &str, created_by: &str) -> Value {
        json!({
            "eventname": self.name,
            "description": self.description,
            "url": banner_url,
            "hostname": self.hostname,
            "eventdate": self.date,
            "email": self.email,
            "country": self.country,
            "address": self.address,
            "city": self.city,
            "state": self.state,
            "postal": self.postal,
            "audience": self.audience,
            "type": self.kind,
            "attendees": self.attendees,
            "price": self.price,
            "tech": self.tech,
            "agenda": self.agenda,
            "approval": self.approval,
            "created": created_by,
            "twitter": self.twitter,
            "website": self.website,
            "linkedin": self.linkedin,
            "instagram": self.instagram,
            "registrations": [],
        })
    }
}

/// What a successful event creation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Id of the event document.
    pub event_id: String,
    /// Id of the uploaded banner file.
    pub banner_file_id: String,
    /// Derived viewer URL stored on the document.
    pub banner_url: String,
    /// User id of the creator.
    pub created_by: String,
    /// Id of the provisioned registration sub-collection (`reg_<id>`).
    pub registrations_collection_id: String,
    /// Id of the provisioned sponsor sub-collection (`spon_<id>`).
    pub sponsors_collection_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_uses_wire_field_names() {
        let draft = EventDraft {
            name: "RustConf".to_string(),
            kind: "conference".to_string(),
            date: "2026-09-12".to_string(),
            attendees: 300,
            price: 99.0,
            ..EventDraft::default()
        };

        let payload = draft.document_payload("https://cdn.example.com/b.png", "u1");
        assert_eq!(payload["eventname"], "RustConf");
        assert_eq!(payload["type"], "conference");
        assert_eq!(payload["eventdate"], "2026-09-12");
        assert_eq!(payload["created"], "u1");
        assert_eq!(payload["url"], "https://cdn.example.com/b.png");
        assert_eq!(payload["attendees"], 300);
        assert!(payload["registrations"].as_array().is_some_and(Vec::is_empty));
    }
}
