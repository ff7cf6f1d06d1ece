// Copyright (c) 2025 - Cowboy AI, Inc.
//! Bridge interface reconciler

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{ImportId, Resource};
use crate::api::MaasApi;
use crate::domain::{BridgeParams, BridgeSpec, BridgeState};
use crate::errors::{BridgeError, BridgeResult};
use crate::resolver::{find_bridge_in, find_parent_in, Resolver};

/// Manages one bridge interface per `(machine, mac_address)`
pub struct BridgeReconciler<A> {
    api: A,
}

impl<A: MaasApi> BridgeReconciler<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn resolver(&self) -> Resolver<'_, A> {
        Resolver::new(&self.api)
    }

    async fn system_id(&self, machine: &str) -> BridgeResult<String> {
        Ok(self.api.resolve_machine(machine).await?.system_id)
    }
}

#[async_trait]
impl<A: MaasApi> Resource for BridgeReconciler<A> {
    type Desired = BridgeSpec;
    type State = BridgeState;

    async fn create(&self, desired: &BridgeSpec, state: &mut BridgeState) -> BridgeResult<()> {
        let system_id = self.system_id(&desired.machine).await?;
        let interfaces = self.api.list_interfaces(&system_id).await?;

        let bridge = match find_bridge_in(&interfaces, &desired.mac_address) {
            Some(existing) => {
                warn!(
                    system_id = %system_id,
                    mac_address = %desired.mac_address,
                    id = existing.id,
                    "Adopting existing bridge"
                );
                existing.clone()
            }
            None => {
                let parent = find_parent_in(&interfaces, &desired.mac_address).ok_or_else(|| {
                    BridgeError::ParentNotFound {
                        mac_address: desired.mac_address.clone(),
                        machine: system_id.clone(),
                    }
                })?;
                let params = BridgeParams::from_spec(desired).with_parent(parent.id);
                let created = self.api.create_bridge(&system_id, &params).await?;
                info!(
                    system_id = %system_id,
                    parent = %parent.name,
                    id = created.id,
                    "Created bridge {}",
                    created.name
                );
                created
            }
        };

        *state = BridgeState::adopt(desired.machine.clone(), &bridge);

        self.update(desired, state).await
    }

    async fn read(&self, state: &mut BridgeState) -> BridgeResult<()> {
        let system_id = self.system_id(&state.machine).await?;
        let id = state.interface_id()?;

        let iface = self.api.get_interface(&system_id, id).await?;
        debug!(system_id = %system_id, id, "Read bridge {}", iface.name);
        state.refresh(&iface);

        Ok(())
    }

    async fn update(&self, desired: &BridgeSpec, state: &mut BridgeState) -> BridgeResult<()> {
        let system_id = self.system_id(&desired.machine).await?;
        let id = state.interface_id()?;

        let params = BridgeParams::from_spec(desired);
        self.api.update_interface(&system_id, id, &params).await?;
        info!(system_id = %system_id, id, "Updated bridge");

        self.read(state).await
    }

    async fn delete(&self, state: &BridgeState) -> BridgeResult<()> {
        let system_id = self.system_id(&state.machine).await?;
        let id = state.interface_id()?;

        self.api.delete_interface(&system_id, id).await?;
        info!(system_id = %system_id, id, "Deleted bridge");

        Ok(())
    }

    async fn import(&self, id: &str) -> BridgeResult<BridgeState> {
        let import = ImportId::parse(id)?;
        let system_id = self.system_id(&import.machine).await?;

        let bridge = self
            .resolver()
            .require_bridge(&system_id, &import.interface)
            .await?;
        info!(system_id = %system_id, id = bridge.id, "Imported bridge {}", import);

        Ok(BridgeState::adopt(system_id, &bridge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryMaas;
    use crate::domain::{InterfaceType, Mtu};

    fn fixture() -> InMemoryMaas {
        let maas = InMemoryMaas::new();
        maas.add_machine("abc123", "node1", "node1.maas");
        maas.add_interface("abc123", InterfaceType::Physical, "eth0", "52:54:00:00:00:01");
        maas
    }

    #[tokio::test]
    async fn test_create_sets_id_and_converges() {
        let maas = fixture();
        let reconciler = BridgeReconciler::new(maas.clone());
        let spec = BridgeSpec::new("node1", "52:54:00:00:00:01")
            .with_name("br-ext")
            .with_tags(["uplink"])
            .with_mtu(Mtu::new(9000).unwrap());

        let mut state = BridgeState::default();
        reconciler.create(&spec, &mut state).await.unwrap();

        assert!(state.is_created());
        assert_eq!(state.machine, "node1");
        assert_eq!(state.parents, vec!["eth0".to_string()]);
        assert_eq!(state.name.as_deref(), Some("br-ext"));
        assert_eq!(state.mtu, Some(9000));
        assert_eq!(maas.create_calls(), 1);
        assert_eq!(maas.update_calls(), 1);
    }

    #[tokio::test]
    async fn test_create_without_parent_fails() {
        let reconciler = BridgeReconciler::new(fixture());
        let spec = BridgeSpec::new("node1", "52:54:00:00:00:99");

        let mut state = BridgeState::default();
        let err = reconciler.create(&spec, &mut state).await.unwrap_err();
        assert!(matches!(err, BridgeError::ParentNotFound { .. }));
        assert!(!state.is_created());
    }

    #[tokio::test]
    async fn test_unknown_machine() {
        let reconciler = BridgeReconciler::new(fixture());
        let spec = BridgeSpec::new("ghost", "52:54:00:00:00:01");

        let mut state = BridgeState::default();
        let err = reconciler.create(&spec, &mut state).await.unwrap_err();
        assert!(matches!(err, BridgeError::MachineNotFound(ref m) if m == "ghost"));
    }

    #[tokio::test]
    async fn test_read_rejects_malformed_id() {
        let reconciler = BridgeReconciler::new(fixture());
        let mut state = BridgeState {
            id: "br0".to_string(),
            machine: "node1".to_string(),
            ..Default::default()
        };

        let err = reconciler.read(&mut state).await.unwrap_err();
        assert!(matches!(err, BridgeError::MalformedId { .. }));
    }
}
