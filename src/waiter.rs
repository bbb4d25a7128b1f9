//! Resource state waiter
//!
//! Turns the service's asynchronous state transitions into one awaitable
//! call. Every wait runs the same tick: sleep one interval, read the
//! resource, then decide:
//!
//! 1. state in the accepted set → done, return what was read
//! 2. state contains `error` → [`WaitError::BuildError`]
//! 3. elapsed ≥ timeout → [`WaitError::Timeout`] with the last state seen
//! 4. otherwise tick again
//!
//! A resource that answers "not found" while a state wait is running fails
//! the wait at once with [`WaitError::Vanished`]. Access rules are the one
//! exception before they are first listed: a rule not yet in the share's
//! list counts as pending.
//!
//! A timed-out wait lets the in-flight read finish and issues no further
//! reads, so a wait that never settles performs `timeout / interval` reads,
//! rounded up.
//! Waits are plain futures; dropping one cancels it between reads.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::client::{Resource, SharesClient};
use crate::config::WaitsConfig;
use crate::error::ClientError;
use crate::resource::ResourceKind;

/// Status a resource enters when its deletion failed
const ERROR_DELETING: &str = "error_deleting";

#[derive(Error, Debug)]
pub enum WaitError {
    #[error("{resource} {id} reached error state {state:?}")]
    BuildError {
        resource: String,
        id: String,
        state: String,
    },

    #[error("{resource} {id} failed to delete (status {state:?})")]
    ReleaseFailed {
        resource: String,
        id: String,
        state: String,
    },

    #[error("{resource} {id} disappeared waiting for {expected:?}; last state {last_state:?}")]
    Vanished {
        resource: String,
        id: String,
        expected: Vec<String>,
        last_state: Option<String>,
    },

    #[error(
        "{resource} {id} did not reach {expected:?} within {waited:?}; last state {last_state:?}"
    )]
    Timeout {
        resource: String,
        id: String,
        expected: Vec<String>,
        last_state: Option<String>,
        waited: Duration,
    },

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl WaitError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout { .. })
    }

    pub fn is_build_error(&self) -> bool {
        matches!(self, WaitError::BuildError { .. })
    }

    pub fn is_vanished(&self) -> bool {
        matches!(self, WaitError::Vanished { .. })
    }
}

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tick {
    Settled,
    Failed,
    TimedOut,
    Pending,
}

fn is_error_state(state: &str) -> bool {
    state.to_ascii_lowercase().contains("error")
}

fn evaluate(state: Option<&str>, accepted: &[&str], elapsed: Duration, timeout: Duration) -> Tick {
    match state {
        Some(state) if accepted.contains(&state) => Tick::Settled,
        Some(state) if is_error_state(state) => Tick::Failed,
        _ if elapsed >= timeout => Tick::TimedOut,
        _ => Tick::Pending,
    }
}

/// What a wait reads on each tick
#[derive(Debug, Clone, Copy)]
enum Probe<'a> {
    Resource(ResourceKind, &'a str),
    AccessRule { share_id: &'a str, access_id: &'a str },
    Migration(&'a str),
    SubnetCheck { network_id: &'a str, availability_zone: Option<&'a str> },
}

impl Probe<'_> {
    fn label(&self) -> String {
        match self {
            Probe::Resource(kind, _) => kind.name().to_string(),
            Probe::AccessRule { .. } => "access rule".to_string(),
            Probe::Migration(_) => "share migration".to_string(),
            Probe::SubnetCheck { .. } => "subnet create check".to_string(),
        }
    }

    /// Whether a missing view may still appear on a later read
    fn may_appear_later(&self) -> bool {
        matches!(self, Probe::AccessRule { .. })
    }

    fn id(&self) -> &str {
        match self {
            Probe::Resource(_, id) | Probe::Migration(id) => *id,
            Probe::AccessRule { access_id, .. } => *access_id,
            Probe::SubnetCheck { network_id, .. } => *network_id,
        }
    }

    /// Read the current view; `None` when the resource is gone
    async fn read(&self, client: &SharesClient) -> Result<Option<Resource>, ClientError> {
        let result = match *self {
            Probe::Resource(kind, id) => kind.get(client, id).await,
            Probe::Migration(share_id) => ResourceKind::Share.get(client, share_id).await,
            Probe::AccessRule { share_id, access_id } => {
                let rules = client.list_access_rules(share_id).await?.resources("access_list")?;
                return Ok(rules.into_iter().find(|rule| rule.id().ok() == Some(access_id)));
            }
            Probe::SubnetCheck {
                network_id,
                availability_zone,
            } => {
                let response = client
                    .subnet_create_check(network_id, availability_zone, false)
                    .await?;
                return Resource::from_value(response.into_body()).map(Some);
            }
        };
        match result {
            Ok(resource) => Ok(Some(resource)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// String view of a state field. Booleans count, so `compatible` can be
/// awaited like any status.
fn state_of(resource: &Resource, field: &str) -> Option<String> {
    match resource.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Polls resources through one client until they settle
#[derive(Clone)]
pub struct Waiter {
    client: SharesClient,
    interval: Duration,
    timeout: Duration,
}

impl Waiter {
    pub fn new(client: SharesClient, interval: Duration, timeout: Duration) -> Self {
        Self {
            client,
            interval,
            timeout,
        }
    }

    pub fn from_config(client: SharesClient, waits: &WaitsConfig) -> Self {
        Self::new(client, waits.build_interval, waits.build_timeout)
    }

    pub fn client(&self) -> &SharesClient {
        &self.client
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Wait for the kind's default state field to reach one of `accepted`
    pub async fn wait_for_status(
        &self,
        kind: ResourceKind,
        id: &str,
        accepted: &[&str],
    ) -> Result<Resource, WaitError> {
        let field = kind.state_field().unwrap_or("status");
        self.poll(Probe::Resource(kind, id), field, accepted).await
    }

    /// Wait for an arbitrary field, e.g. `replica_state`
    pub async fn wait_for_field(
        &self,
        kind: ResourceKind,
        id: &str,
        field: &str,
        accepted: &[&str],
    ) -> Result<Resource, WaitError> {
        self.poll(Probe::Resource(kind, id), field, accepted).await
    }

    /// Wait for an access rule's `state`, found through the share's rule list
    pub async fn wait_for_access_rule(
        &self,
        share_id: &str,
        access_id: &str,
        accepted: &[&str],
    ) -> Result<Resource, WaitError> {
        self.poll(Probe::AccessRule { share_id, access_id }, "state", accepted)
            .await
    }

    /// Wait for a share's `task_state`
    pub async fn wait_for_migration(
        &self,
        share_id: &str,
        accepted: &[&str],
    ) -> Result<Resource, WaitError> {
        self.poll(Probe::Migration(share_id), "task_state", accepted).await
    }

    /// Repeat a subnet create check until it yields a verdict in `compatible`
    pub async fn wait_for_subnet_check(
        &self,
        network_id: &str,
        availability_zone: Option<&str>,
    ) -> Result<Resource, WaitError> {
        let probe = Probe::SubnetCheck {
            network_id,
            availability_zone,
        };
        self.poll(probe, "compatible", &["true", "false"]).await
    }

    /// Wait until reading the resource answers "not found"
    pub async fn wait_for_deletion(&self, kind: ResourceKind, id: &str) -> Result<(), WaitError> {
        let probe = Probe::Resource(kind, id);
        let field = kind.state_field().unwrap_or("status");
        let start = Instant::now();
        let mut reads = 0u32;

        loop {
            sleep(self.interval).await;
            let current = probe.read(&self.client).await?;
            reads += 1;

            let Some(resource) = current else {
                debug!(resource = %kind, id, reads, "Resource is gone");
                return Ok(());
            };

            let state = state_of(&resource, field);
            if state.as_deref() == Some(ERROR_DELETING) {
                return Err(WaitError::ReleaseFailed {
                    resource: probe.label(),
                    id: id.to_string(),
                    state: ERROR_DELETING.to_string(),
                });
            }

            let elapsed = start.elapsed();
            if elapsed >= self.timeout {
                return Err(WaitError::Timeout {
                    resource: probe.label(),
                    id: id.to_string(),
                    expected: vec!["deleted".to_string()],
                    last_state: state,
                    waited: elapsed,
                });
            }
            debug!(resource = %kind, id, reads, state = ?state, "Waiting for deletion");
        }
    }

    async fn poll(
        &self,
        probe: Probe<'_>,
        field: &str,
        accepted: &[&str],
    ) -> Result<Resource, WaitError> {
        let start = Instant::now();
        let mut reads = 0u32;
        let mut seen = false;
        let mut last_state: Option<String> = None;

        loop {
            sleep(self.interval).await;
            let current = probe.read(&self.client).await?;
            reads += 1;

            if current.is_none() && (seen || !probe.may_appear_later()) {
                info!(resource = %probe.label(), id = probe.id(), reads, "Resource disappeared");
                return Err(WaitError::Vanished {
                    resource: probe.label(),
                    id: probe.id().to_string(),
                    expected: accepted.iter().map(|s| s.to_string()).collect(),
                    last_state,
                });
            }
            seen |= current.is_some();

            let state = current.as_ref().and_then(|resource| state_of(resource, field));
            if state.is_some() {
                last_state = state.clone();
            }
            let elapsed = start.elapsed();

            match evaluate(state.as_deref(), accepted, elapsed, self.timeout) {
                Tick::Settled => {
                    info!(
                        resource = %probe.label(),
                        id = probe.id(),
                        field,
                        state = ?state,
                        reads,
                        "Resource settled"
                    );
                    // Settled implies a state was read, which implies a resource
                    return current
                        .ok_or_else(|| ClientError::MissingField(field.to_string()).into());
                }
                Tick::Failed => {
                    return Err(WaitError::BuildError {
                        resource: probe.label(),
                        id: probe.id().to_string(),
                        state: state.unwrap_or_default(),
                    });
                }
                Tick::TimedOut => {
                    return Err(WaitError::Timeout {
                        resource: probe.label(),
                        id: probe.id().to_string(),
                        expected: accepted.iter().map(|s| s.to_string()).collect(),
                        last_state,
                        waited: elapsed,
                    });
                }
                Tick::Pending => {
                    debug!(
                        resource = %probe.label(),
                        id = probe.id(),
                        field,
                        state = ?state,
                        reads,
                        "Waiting"
                    );
                }
            }
        }
    }
}
