use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::domain::{repositories::contacts::ContactStore, value_objects::contacts::Contact};

/// In-memory [`ContactStore`] used in tests and ephemeral deployments.
#[derive(Default)]
pub struct InMemoryContactStore {
    contacts: Mutex<Vec<Contact>>,
    fail_next_save: AtomicBool,
}

impl InMemoryContactStore {
    /// Makes the next `save` fail, for exercising write-failure paths.
    pub fn fail_next_save(&self) {
        self.fail_next_save.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn load(&self) -> Result<Vec<Contact>> {
        Ok(self
            .contacts
            .lock()
            .map_err(|_| anyhow::anyhow!("contact store mutex poisoned"))?
            .clone())
    }

    async fn save(&self, contacts: &[Contact]) -> Result<()> {
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            bail!("simulated storage failure");
        }

        *self
            .contacts
            .lock()
            .map_err(|_| anyhow::anyhow!("contact store mutex poisoned"))? = contacts.to_vec();
        Ok(())
    }
}
