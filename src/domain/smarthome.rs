//! Smart-home device registry
//!
//! Devices register themselves (the caller is the device account) on behalf of
//! an owner. Only the owner may switch a device on or off. Every successful
//! state change is recorded as a [`StateChange`] event.

use std::collections::HashMap;

use sp_core::crypto::AccountId32;
use thiserror::Error;

pub type DevId = AccountId32;
pub type DevState = bool;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmarthomeError {
    #[error("device does not exist")]
    DevDoesNotExist,
    #[error("device already registered")]
    DevExists,
    #[error("caller is not the device owner")]
    NotDevOwner,
}

pub type Result<T> = std::result::Result<T, SmarthomeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Dev {
    state: DevState,
    owner: Option<AccountId32>,
}

/// Emitted when a device is switched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    pub device: DevId,
    pub new_state: DevState,
}

#[derive(Debug, Clone)]
pub struct Smarthome {
    devs: HashMap<DevId, Dev>,
    /// (owner, index) -> device, index is dense per owner
    owner_to_dev: HashMap<(AccountId32, u32), DevId>,
    owner_devs_count: HashMap<AccountId32, u32>,
    ceo: AccountId32,
    events: Vec<StateChange>,
}

impl Smarthome {
    pub fn new(ceo: AccountId32) -> Self {
        Self {
            devs: HashMap::new(),
            owner_to_dev: HashMap::new(),
            owner_devs_count: HashMap::new(),
            ceo,
            events: Vec::new(),
        }
    }

    pub fn ceo(&self) -> &AccountId32 {
        &self.ceo
    }

    /// Register the calling device for `owner`
    pub fn add_new_device(&mut self, caller: &AccountId32, owner: AccountId32) -> Result<()> {
        if self.devs.contains_key(caller) {
            return Err(SmarthomeError::DevExists);
        }
        self.mint_device(caller.clone(), owner);
        Ok(())
    }

    pub fn change_state(
        &mut self,
        caller: &AccountId32,
        dev_id: &DevId,
        new_state: DevState,
    ) -> Result<()> {
        let dev = self
            .devs
            .get_mut(dev_id)
            .ok_or(SmarthomeError::DevDoesNotExist)?;
        if dev.owner.as_ref() != Some(caller) {
            return Err(SmarthomeError::NotDevOwner);
        }
        dev.state = new_state;
        self.events.push(StateChange {
            device: dev_id.clone(),
            new_state,
        });
        Ok(())
    }

    pub fn get_state(&self, dev_id: &DevId) -> Result<DevState> {
        self.devs
            .get(dev_id)
            .map(|dev| dev.state)
            .ok_or(SmarthomeError::DevDoesNotExist)
    }

    /// Number of devices registered for `owner`
    pub fn device_count(&self, owner: &AccountId32) -> u32 {
        self.owner_devs_count.get(owner).copied().unwrap_or(0)
    }

    pub fn device_of_owner_by_index(&self, owner: &AccountId32, index: u32) -> Option<&DevId> {
        self.owner_to_dev.get(&(owner.clone(), index))
    }

    pub fn events(&self) -> &[StateChange] {
        &self.events
    }

    fn mint_device(&mut self, dev_id: DevId, owner: AccountId32) {
        let count = self.device_count(&owner);
        self.devs.insert(
            dev_id.clone(),
            Dev {
                state: false,
                owner: Some(owner.clone()),
            },
        );
        self.owner_to_dev.insert((owner.clone(), count), dev_id);
        self.owner_devs_count.insert(owner, count + 1);
    }
}
