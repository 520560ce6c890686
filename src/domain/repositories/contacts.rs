use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::contacts::Contact;

/// Storage seam for the standalone contacts list. The whole list is read and
/// written as one unit; backends must leave the previous state intact when a
/// write fails.
#[async_trait]
#[automock]
pub trait ContactStore {
    async fn load(&self) -> Result<Vec<Contact>>;
    async fn save(&self, contacts: &[Contact]) -> Result<()>;
}
