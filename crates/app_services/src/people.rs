//! Person use cases

use std::sync::Arc;

use core_kernel::PersonId;
use domain_people::{Person, PersonPort};

use crate::error::ServiceError;

/// Management of the people expenses are shared with
pub struct PersonService {
    people: Arc<dyn PersonPort>,
}

impl PersonService {
    pub fn new(people: Arc<dyn PersonPort>) -> Self {
        Self { people }
    }

    pub async fn create_person(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Person, ServiceError> {
        let person = Person::new(name, email, phone);
        self.people.create(&person).await?;
        Ok(person)
    }

    pub async fn get_person(&self, id: PersonId) -> Result<Person, ServiceError> {
        Ok(self.people.find_by_id(id).await?)
    }

    pub async fn list_people(&self) -> Result<Vec<Person>, ServiceError> {
        Ok(self.people.find_all().await?)
    }

    pub async fn update_person(
        &self,
        id: PersonId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Person, ServiceError> {
        let mut person = self.people.find_by_id(id).await?;
        person.update(name, email, phone);
        self.people.update(&person).await?;
        Ok(person)
    }

    /// Deletes a person. Transactions keep any shares pointing at the
    /// deleted id; reports skip ids that no longer resolve.
    pub async fn delete_person(&self, id: PersonId) -> Result<(), ServiceError> {
        Ok(self.people.delete(id).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Person>, ServiceError> {
        Ok(self.people.find_by_email(email).await?)
    }
}
