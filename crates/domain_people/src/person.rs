use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::PersonId;

/// Someone expenses can be shared with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier
    pub id: PersonId,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Person {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PersonId::new(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the contact details
    pub fn update(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) {
        self.name = name.into();
        self.email = email.into();
        self.phone = phone.into();
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_replaces_contact_details() {
        let mut person = Person::new("Ana", "ana@example.com", "+55 11 91234-0000");
        let id = person.id;

        person.update("Ana Souza", "ana.souza@example.com", "+55 11 91234-0001");

        assert_eq!(person.id, id);
        assert_eq!(person.name, "Ana Souza");
        assert_eq!(person.email, "ana.souza@example.com");
        assert!(person.updated_at >= person.created_at);
    }

    #[test]
    fn test_person_roundtrips_through_json() {
        let person = Person::new("Ana", "ana@example.com", "");
        let json = serde_json::to_string(&person).unwrap();
        let back: Person = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, person.id);
        assert_eq!(back.email, person.email);
    }
}
