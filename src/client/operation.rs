//! Operation catalogue
//!
//! Every request the client can issue is an [`Operation`]. The table below
//! fixes, per operation, its wire name, the single success status the service
//! documents for it, and the experimental area it belongs to (if any).

use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;
use crate::policy::Area;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Shares
    CreateShare,
    ListShares,
    ListSharesDetail,
    GetShare,
    UpdateShare,
    DeleteShare,
    ExtendShare,
    ShrinkShare,
    ResetShareStatus,
    ForceDeleteShare,
    ManageShare,
    UnmanageShare,
    RevertShare,
    ListExportLocations,
    GetExportLocation,
    GetShareMetadata,
    SetShareMetadata,
    UpdateShareMetadata,
    DeleteShareMetadataItem,

    // Snapshots
    CreateSnapshot,
    ListSnapshots,
    ListSnapshotsDetail,
    GetSnapshot,
    UpdateSnapshot,
    DeleteSnapshot,
    ResetSnapshotStatus,
    ForceDeleteSnapshot,
    ManageSnapshot,
    UnmanageSnapshot,

    // Access rules
    AllowAccess,
    DenyAccess,
    ListAccessRules,
    GetAccessRule,
    UpdateAccessMetadata,
    DeleteAccessMetadata,

    // Share networks, subnets, security services
    CreateShareNetwork,
    ListShareNetworks,
    GetShareNetwork,
    UpdateShareNetwork,
    DeleteShareNetwork,
    AddSecurityService,
    RemoveSecurityService,
    CreateSubnet,
    GetSubnet,
    DeleteSubnet,
    SubnetCreateCheck,
    CreateSecurityService,
    ListSecurityServices,
    GetSecurityService,
    UpdateSecurityService,
    DeleteSecurityService,

    // Share types
    CreateShareType,
    ListShareTypes,
    GetShareType,
    DeleteShareType,
    GetExtraSpecs,
    SetExtraSpecs,
    DeleteExtraSpec,
    ListTypeAccess,
    AddTypeAccess,
    RemoveTypeAccess,

    // Quotas
    GetQuotas,
    GetDefaultQuotas,
    GetQuotaDetail,
    UpdateQuotas,
    ResetQuotas,

    // Share replicas
    CreateReplica,
    ListReplicas,
    GetReplica,
    DeleteReplica,
    PromoteReplica,
    ResyncReplica,
    ResetReplicaStatus,
    ResetReplicaState,
    ForceDeleteReplica,
    ListReplicaExportLocations,

    // Share groups
    CreateShareGroup,
    ListShareGroups,
    GetShareGroup,
    UpdateShareGroup,
    DeleteShareGroup,
    ResetShareGroupStatus,
    CreateShareGroupSnapshot,
    GetShareGroupSnapshot,
    DeleteShareGroupSnapshot,
    CreateShareGroupType,
    ListShareGroupTypes,
    GetShareGroupType,
    DeleteShareGroupType,

    // Share servers
    ListShareServers,
    GetShareServer,
    DeleteShareServer,
    ResetShareServerStatus,
    ManageShareServer,
    UnmanageShareServer,

    // Migration
    MigrationStart,
    MigrationComplete,
    MigrationCancel,
    MigrationProgress,
    ResetTaskState,

    // Admin and read-only APIs
    ListServices,
    ListAvailabilityZones,
    ListPools,
    GetLimits,
    ListMessages,
    GetMessage,
    DeleteMessage,
    GetApiVersion,
}

use Operation::*;

/// (operation, wire name, expected status, experimental area)
const OPERATIONS: &[(Operation, &str, u16, Option<Area>)] = &[
    (CreateShare, "create_share", 200, None),
    (ListShares, "list_shares", 200, None),
    (ListSharesDetail, "list_shares_with_detail", 200, None),
    (GetShare, "get_share", 200, None),
    (UpdateShare, "update_share", 200, None),
    (DeleteShare, "delete_share", 202, None),
    (ExtendShare, "extend_share", 202, None),
    (ShrinkShare, "shrink_share", 202, None),
    (ResetShareStatus, "reset_state", 202, None),
    (ForceDeleteShare, "force_delete", 202, None),
    (ManageShare, "manage_share", 200, None),
    (UnmanageShare, "unmanage_share", 202, None),
    (RevertShare, "revert_to_snapshot", 202, None),
    (ListExportLocations, "list_share_export_locations", 200, None),
    (GetExportLocation, "get_share_export_location", 200, None),
    (GetShareMetadata, "get_metadata", 200, None),
    (SetShareMetadata, "set_metadata", 200, None),
    (UpdateShareMetadata, "update_all_metadata", 200, None),
    (DeleteShareMetadataItem, "delete_metadata", 200, None),
    (CreateSnapshot, "create_snapshot", 202, None),
    (ListSnapshots, "list_snapshots", 200, None),
    (ListSnapshotsDetail, "list_snapshots_with_detail", 200, None),
    (GetSnapshot, "get_snapshot", 200, None),
    (UpdateSnapshot, "rename_snapshot", 200, None),
    (DeleteSnapshot, "delete_snapshot", 202, None),
    (ResetSnapshotStatus, "reset_snapshot_status", 202, None),
    (ForceDeleteSnapshot, "force_delete_snapshot", 202, None),
    (ManageSnapshot, "manage_snapshot", 202, None),
    (UnmanageSnapshot, "unmanage_snapshot", 202, None),
    (AllowAccess, "create_access_rule", 200, None),
    (DenyAccess, "delete_access_rule", 202, None),
    (ListAccessRules, "list_access_rules", 200, None),
    (GetAccessRule, "get_access_rule", 200, None),
    (UpdateAccessMetadata, "update_access_metadata", 200, None),
    (DeleteAccessMetadata, "delete_access_metadata", 200, None),
    (CreateShareNetwork, "create_share_network", 200, None),
    (ListShareNetworks, "list_share_networks_with_detail", 200, None),
    (GetShareNetwork, "get_share_network", 200, None),
    (UpdateShareNetwork, "update_share_network", 200, None),
    (DeleteShareNetwork, "delete_share_network", 202, None),
    (AddSecurityService, "add_sec_service_to_share_network", 200, None),
    (RemoveSecurityService, "remove_sec_service_from_share_network", 200, None),
    (CreateSubnet, "create_subnet", 200, None),
    (GetSubnet, "get_subnet", 200, None),
    (DeleteSubnet, "delete_subnet", 202, None),
    (SubnetCreateCheck, "subnet_create_check", 202, None),
    (CreateSecurityService, "create_security_service", 200, None),
    (ListSecurityServices, "list_security_services", 200, None),
    (GetSecurityService, "get_security_service", 200, None),
    (UpdateSecurityService, "update_security_service", 200, None),
    (DeleteSecurityService, "delete_security_service", 202, None),
    (CreateShareType, "create_share_type", 200, None),
    (ListShareTypes, "list_share_types", 200, None),
    (GetShareType, "get_share_type", 200, None),
    (DeleteShareType, "delete_share_type", 202, None),
    (GetExtraSpecs, "get_share_type_extra_specs", 200, None),
    (SetExtraSpecs, "create_share_type_extra_specs", 200, None),
    (DeleteExtraSpec, "delete_share_type_extra_spec", 202, None),
    (ListTypeAccess, "list_access_to_share_type", 200, None),
    (AddTypeAccess, "add_access_to_share_type", 202, None),
    (RemoveTypeAccess, "remove_access_from_share_type", 202, None),
    (GetQuotas, "show_quotas", 200, None),
    (GetDefaultQuotas, "default_quotas", 200, None),
    (GetQuotaDetail, "detail_quotas", 200, None),
    (UpdateQuotas, "update_quotas", 200, None),
    (ResetQuotas, "reset_quotas", 202, None),
    (CreateReplica, "create_share_replica", 202, Some(Area::Replicas)),
    (ListReplicas, "list_share_replicas", 200, Some(Area::Replicas)),
    (GetReplica, "get_share_replica", 200, Some(Area::Replicas)),
    (DeleteReplica, "delete_share_replica", 202, Some(Area::Replicas)),
    (PromoteReplica, "promote_share_replica", 202, Some(Area::Replicas)),
    (ResyncReplica, "resync_share_replica", 202, Some(Area::Replicas)),
    (ResetReplicaStatus, "reset_share_replica_status", 202, Some(Area::Replicas)),
    (ResetReplicaState, "reset_share_replica_state", 202, Some(Area::Replicas)),
    (ForceDeleteReplica, "force_delete_share_replica", 202, Some(Area::Replicas)),
    (ListReplicaExportLocations, "list_share_replica_export_locations", 200, Some(Area::Replicas)),
    (CreateShareGroup, "create_share_group", 202, Some(Area::ShareGroups)),
    (ListShareGroups, "list_share_groups", 200, Some(Area::ShareGroups)),
    (GetShareGroup, "get_share_group", 200, Some(Area::ShareGroups)),
    (UpdateShareGroup, "update_share_group", 200, Some(Area::ShareGroups)),
    (DeleteShareGroup, "delete_share_group", 202, Some(Area::ShareGroups)),
    (ResetShareGroupStatus, "reset_share_group_status", 202, Some(Area::ShareGroups)),
    (CreateShareGroupSnapshot, "create_share_group_snapshot", 202, Some(Area::ShareGroups)),
    (GetShareGroupSnapshot, "get_share_group_snapshot", 200, Some(Area::ShareGroups)),
    (DeleteShareGroupSnapshot, "delete_share_group_snapshot", 202, Some(Area::ShareGroups)),
    (CreateShareGroupType, "create_share_group_type", 202, Some(Area::ShareGroups)),
    (ListShareGroupTypes, "list_share_group_types", 200, Some(Area::ShareGroups)),
    (GetShareGroupType, "get_share_group_type", 200, Some(Area::ShareGroups)),
    (DeleteShareGroupType, "delete_share_group_type", 204, Some(Area::ShareGroups)),
    (ListShareServers, "list_share_servers", 200, None),
    (GetShareServer, "show_share_server", 200, None),
    (DeleteShareServer, "delete_share_server", 202, None),
    (ResetShareServerStatus, "reset_share_server_status", 202, None),
    (ManageShareServer, "manage_share_server", 202, None),
    (UnmanageShareServer, "unmanage_share_server", 202, None),
    (MigrationStart, "migrate_share", 202, Some(Area::Migration)),
    (MigrationComplete, "migration_complete", 202, Some(Area::Migration)),
    (MigrationCancel, "migration_cancel", 202, Some(Area::Migration)),
    (MigrationProgress, "migration_get_progress", 200, Some(Area::Migration)),
    (ResetTaskState, "reset_task_state", 202, Some(Area::Migration)),
    (ListServices, "list_services", 200, None),
    (ListAvailabilityZones, "list_availability_zones", 200, None),
    (ListPools, "list_pools", 200, None),
    (GetLimits, "get_limits", 200, None),
    (ListMessages, "list_messages", 200, None),
    (GetMessage, "get_message", 200, None),
    (DeleteMessage, "delete_message", 204, None),
    (GetApiVersion, "get_api_version", 200, None),
];

impl Operation {
    fn row(self) -> (&'static str, u16, Option<Area>) {
        OPERATIONS
            .iter()
            .find(|(op, ..)| *op == self)
            .map(|(_, name, status, area)| (*name, *status, *area))
            // Every variant has a row
            .unwrap_or(("unknown", 0, None))
    }

    /// Wire name, as used by test helpers and the CLI
    pub fn name(self) -> &'static str {
        self.row().0
    }

    /// The one success status the service documents for this operation
    pub fn expected_status(self) -> u16 {
        self.row().1
    }

    /// Experimental area the operation belongs to
    pub fn area(self) -> Option<Area> {
        self.row().2
    }

    /// Every operation, in table order
    pub fn all() -> impl Iterator<Item = Operation> {
        OPERATIONS.iter().map(|(op, ..)| *op)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OPERATIONS
            .iter()
            .find(|(_, name, ..)| *name == s)
            .map(|(op, ..)| *op)
            .ok_or_else(|| ClientError::UnknownName {
                kind: "operation",
                name: s.to_string(),
            })
    }
}
