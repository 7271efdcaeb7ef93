//! People Domain Ports

use async_trait::async_trait;

use core_kernel::{DomainPort, PersonId, PortError};

use crate::person::Person;

/// Persistence port for people
#[async_trait]
pub trait PersonPort: DomainPort {
    async fn create(&self, person: &Person) -> Result<(), PortError>;
    async fn update(&self, person: &Person) -> Result<(), PortError>;
    async fn delete(&self, id: PersonId) -> Result<(), PortError>;
    async fn find_by_id(&self, id: PersonId) -> Result<Person, PortError>;
    async fn find_all(&self) -> Result<Vec<Person>, PortError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Person>, PortError>;
}

/// In-memory mock adapter for testing without a document store
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of PersonPort
    #[derive(Debug, Default)]
    pub struct MockPersonPort {
        people: Arc<RwLock<HashMap<PersonId, Person>>>,
    }

    impl MockPersonPort {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl DomainPort for MockPersonPort {}

    #[async_trait]
    impl PersonPort for MockPersonPort {
        async fn create(&self, person: &Person) -> Result<(), PortError> {
            let mut people = self.people.write().await;
            if people.contains_key(&person.id) {
                return Err(PortError::conflict(format!(
                    "person already exists: {}",
                    person.id
                )));
            }
            people.insert(person.id, person.clone());
            Ok(())
        }

        async fn update(&self, person: &Person) -> Result<(), PortError> {
            let mut people = self.people.write().await;
            if !people.contains_key(&person.id) {
                return Err(PortError::not_found("Person", person.id));
            }
            people.insert(person.id, person.clone());
            Ok(())
        }

        async fn delete(&self, id: PersonId) -> Result<(), PortError> {
            self.people
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Person", id))
        }

        async fn find_by_id(&self, id: PersonId) -> Result<Person, PortError> {
            self.people
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Person", id))
        }

        async fn find_all(&self) -> Result<Vec<Person>, PortError> {
            Ok(self.people.read().await.values().cloned().collect())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Person>, PortError> {
            Ok(self
                .people
                .read()
                .await
                .values()
                .find(|p| p.email == email)
                .cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockPersonPort;
    use super::*;

    #[tokio::test]
    async fn test_mock_person_crud() {
        let port = MockPersonPort::new();
        let mut person = Person::new("Ana", "ana@example.com", "");
        port.create(&person).await.unwrap();

        person.update("Ana Souza", "ana@example.com", "");
        port.update(&person).await.unwrap();
        assert_eq!(port.find_by_id(person.id).await.unwrap().name, "Ana Souza");

        port.delete(person.id).await.unwrap();
        assert!(port.find_by_id(person.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_person_find_by_email() {
        let port = MockPersonPort::new();
        port.create(&Person::new("Ana", "ana@example.com", ""))
            .await
            .unwrap();

        let found = port.find_by_email("ana@example.com").await.unwrap();
        assert!(found.is_some());
        let missing = port.find_by_email("nobody@example.com").await.unwrap();
        assert!(missing.is_none());
    }
}
