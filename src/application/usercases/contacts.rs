use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    application::usercases::vcard::{bulk_export_filename, contact_vcard, vcard_document},
    domain::{
        repositories::contacts::ContactStore,
        value_objects::contacts::{Contact, InsertContactModel, UpdateContactModel},
    },
};

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("contact not found")]
    NotFound,
    #[error("invalid request: {0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ContactError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ContactError::NotFound => StatusCode::NOT_FOUND,
            ContactError::Validation(_) => StatusCode::BAD_REQUEST,
            ContactError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, ContactError>;

/// CRUD over the standalone contacts list. Every mutation loads the whole
/// list, applies the change and writes the whole list back; a failed write
/// leaves the stored state as it was.
pub struct ContactsUseCase<S>
where
    S: ContactStore + Send + Sync + 'static,
{
    store: Arc<S>,
}

impl<S> ContactsUseCase<S>
where
    S: ContactStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn load(&self) -> UseCaseResult<Vec<Contact>> {
        self.store.load().await.map_err(|err| {
            error!(storage_error = ?err, "contacts: failed to load contact list");
            ContactError::Storage(err)
        })
    }

    async fn save(&self, contacts: &[Contact]) -> UseCaseResult<()> {
        self.store.save(contacts).await.map_err(|err| {
            error!(storage_error = ?err, "contacts: failed to persist contact list");
            ContactError::Storage(err)
        })
    }

    pub async fn list(&self) -> UseCaseResult<Vec<Contact>> {
        self.load().await
    }

    pub async fn create(&self, insert_contact_model: InsertContactModel) -> UseCaseResult<Contact> {
        if insert_contact_model.name.trim().is_empty() {
            return Err(ContactError::Validation("name is required".to_string()));
        }
        if insert_contact_model.phone.trim().is_empty() {
            return Err(ContactError::Validation("phone is required".to_string()));
        }

        let contact = Contact {
            id: Uuid::new_v4(),
            name: insert_contact_model.name,
            phone: insert_contact_model.phone,
            email: insert_contact_model.email,
            notes: insert_contact_model.notes,
        };

        let mut contacts = self.load().await?;
        contacts.push(contact.clone());
        self.save(&contacts).await?;

        info!(contact_id = %contact.id, "contacts: contact created");
        Ok(contact)
    }

    pub async fn update(
        &self,
        contact_id: Uuid,
        update_contact_model: UpdateContactModel,
    ) -> UseCaseResult<Contact> {
        let mut contacts = self.load().await?;
        let contact = contacts
            .iter_mut()
            .find(|contact| contact.id == contact_id)
            .ok_or(ContactError::NotFound)?;

        if let Some(name) = update_contact_model.name {
            contact.name = name;
        }
        if let Some(phone) = update_contact_model.phone {
            contact.phone = phone;
        }
        if let Some(email) = update_contact_model.email {
            contact.email = Some(email);
        }
        if let Some(notes) = update_contact_model.notes {
            contact.notes = Some(notes);
        }

        let updated = contact.clone();
        self.save(&contacts).await?;

        info!(contact_id = %contact_id, "contacts: contact updated");
        Ok(updated)
    }

    pub async fn delete(&self, contact_id: Uuid) -> UseCaseResult<()> {
        let mut contacts = self.load().await?;
        let before = contacts.len();
        contacts.retain(|contact| contact.id != contact_id);
        if contacts.len() == before {
            return Err(ContactError::NotFound);
        }

        self.save(&contacts).await?;
        info!(contact_id = %contact_id, "contacts: contact deleted");
        Ok(())
    }

    /// Bulk vCard download: `(filename, document)`.
    pub async fn export_vcards(&self) -> UseCaseResult<(String, String)> {
        let contacts = self.load().await?;
        let cards: Vec<String> = contacts.iter().map(contact_vcard).collect();
        let filename = bulk_export_filename(Utc::now().date_naive());
        Ok((filename, vcard_document(&cards)))
    }
}
