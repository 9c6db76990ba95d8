//! Broker session persistence. The authenticated broker's id and profile are
//! written under fixed keys and read back verbatim on the next activation; no
//! expiry is enforced. Controllers receive this context by injection instead
//! of reading an ambient global store.

use anyhow::{Context, Result};
use shared::{domain::BrokerId, protocol::BrokerSummary};
use storage::Storage;

const KEY_BROKER_ID: &str = "broker_id";
const KEY_BROKER_PROFILE: &str = "broker_profile";

#[derive(Debug, Clone)]
pub struct BrokerSession {
    pub broker_id: BrokerId,
    pub profile: BrokerSummary,
}

#[derive(Clone)]
pub struct SessionContext {
    store: Storage,
}

impl SessionContext {
    pub fn new(store: Storage) -> Self {
        Self { store }
    }

    /// Both keys must be present and well-formed for a session to load; a
    /// half-written session reads as logged out.
    pub async fn load(&self) -> Result<Option<BrokerSession>> {
        let Some(raw_id) = self.store.get_value(KEY_BROKER_ID).await? else {
            return Ok(None);
        };
        let Some(raw_profile) = self.store.get_value(KEY_BROKER_PROFILE).await? else {
            return Ok(None);
        };

        let broker_id = BrokerId(
            raw_id
                .parse()
                .context("stored broker id is not a number")?,
        );
        let profile: BrokerSummary =
            serde_json::from_str(&raw_profile).context("stored broker profile is not valid")?;

        Ok(Some(BrokerSession { broker_id, profile }))
    }

    pub async fn set(&self, profile: &BrokerSummary) -> Result<()> {
        self.store
            .set_value(KEY_BROKER_ID, &profile.id.0.to_string())
            .await?;
        self.store
            .set_value(KEY_BROKER_PROFILE, &serde_json::to_string(profile)?)
            .await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.delete_value(KEY_BROKER_ID).await?;
        self.store.delete_value(KEY_BROKER_PROFILE).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
