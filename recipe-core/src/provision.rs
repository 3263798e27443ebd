//! Provisional identifiers and clock
//!
//! New entities get a client-side id until the store answers with the
//! canonical one.

use chrono::{DateTime, Utc};
use rand::Rng;

pub trait Provisioner {
    /// Unique id for an entity the store has not seen yet
    fn provisional_id(&mut self) -> String;

    fn now(&self) -> DateTime<Utc>;
}

/// Millisecond timestamp plus a random suffix
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProvisioner;

impl Provisioner for SystemProvisioner {
    fn provisional_id(&mut self) -> String {
        let suffix: u32 = rand::thread_rng().gen_range(0..0x100_0000);
        format!("tmp-{}-{:06x}", Utc::now().timestamp_millis(), suffix)
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic ids (`tmp-1`, `tmp-2`, ...) at a fixed instant
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct StepProvisioner {
    pub next: u32,
    pub at: DateTime<Utc>,
}

#[cfg(test)]
impl StepProvisioner {
    pub fn new() -> Self {
        Self {
            next: 1,
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
impl Provisioner for StepProvisioner {
    fn provisional_id(&mut self) -> String {
        let id = format!("tmp-{}", self.next);
        self.next += 1;
        id
    }

    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}
