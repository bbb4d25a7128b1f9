//! Microversion capability tables
//!
//! Every version-dependent choice the client makes is looked up here rather
//! than written inline in an operation:
//!
//! - [`Capability`]: a behavior and the first microversion that has it.
//! - [`Variant`]: a wire element (action name, path segment, body key) that
//!   has a legacy spelling and a current spelling, gated on a capability.
//! - [`Area`]: API areas that were introduced behind the experimental header
//!   and the version at which each graduated.

use crate::version::ApiVersion;

/// Header carrying the requested microversion
pub const VERSION_HEADER: &str = "x-openstack-manila-api-version";

/// Header marking a request as using an experimental API
pub const EXPERIMENTAL_HEADER: &str = "x-openstack-manila-api-experimental";

/// Request correlation header every successful response must carry
pub const REQUEST_ID_HEADER: &str = "x-openstack-request-id";

/// Behaviors introduced at a specific microversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `os-` prefixes dropped from action names and admin paths (> 2.6)
    UnprefixedActions,
    /// `/shares/{id}/export_locations` sub-resource
    ExportLocationsApi,
    /// Share replicas (experimental until [`Area::Replicas`] graduates)
    ShareReplicas,
    /// `snapshots/manage` and snapshot unmanage
    SnapshotManage,
    /// Two-phase share migration API
    ShareMigration,
    /// `quota-sets/{id}/detail`
    QuotaDetail,
    /// `revert` share action
    RevertToSnapshot,
    /// `migration_start` takes the full mandatory parameter set
    MigrationParams,
    /// Share groups (experimental until [`Area::ShareGroups`] graduates)
    ShareGroups,
    /// Quotas scoped by share type
    ShareTypeQuotas,
    /// Share group and share group snapshot quotas
    ShareGroupQuotas,
    /// `/share-access-rules` collection and access rule metadata
    AccessRulesApi,
    /// `/share-replicas/{id}/export-locations`
    ReplicaExportLocations,
    /// Manage/unmanage of share servers
    ShareServerManage,
    /// Share network subnets
    ShareNetworkSubnets,
    /// Replica and replica gigabytes quotas
    ReplicaQuotas,
    /// Per-share gigabytes quota
    PerShareGigabytesQuota,
    /// `share_network_subnet_create_check` share network action
    SubnetCreateCheck,
}

/// Capability → first microversion offering it
const CAPABILITIES: &[(Capability, ApiVersion)] = &[
    (Capability::UnprefixedActions, ApiVersion::new(2, 7)),
    (Capability::ExportLocationsApi, ApiVersion::new(2, 9)),
    (Capability::ShareReplicas, ApiVersion::new(2, 11)),
    (Capability::SnapshotManage, ApiVersion::new(2, 12)),
    (Capability::ShareMigration, ApiVersion::new(2, 22)),
    (Capability::QuotaDetail, ApiVersion::new(2, 25)),
    (Capability::RevertToSnapshot, ApiVersion::new(2, 27)),
    (Capability::MigrationParams, ApiVersion::new(2, 29)),
    (Capability::ShareGroups, ApiVersion::new(2, 31)),
    (Capability::ShareTypeQuotas, ApiVersion::new(2, 39)),
    (Capability::ShareGroupQuotas, ApiVersion::new(2, 40)),
    (Capability::AccessRulesApi, ApiVersion::new(2, 45)),
    (Capability::ReplicaExportLocations, ApiVersion::new(2, 47)),
    (Capability::ShareServerManage, ApiVersion::new(2, 49)),
    (Capability::ShareNetworkSubnets, ApiVersion::new(2, 51)),
    (Capability::ReplicaQuotas, ApiVersion::new(2, 53)),
    (Capability::PerShareGigabytesQuota, ApiVersion::new(2, 62)),
    (Capability::SubnetCreateCheck, ApiVersion::new(2, 70)),
];

impl Capability {
    /// First microversion offering this capability
    pub fn since(self) -> ApiVersion {
        CAPABILITIES
            .iter()
            .find(|(cap, _)| *cap == self)
            .map(|(_, version)| *version)
            // Every variant has a row; covered by test_every_capability_has_a_row
            .unwrap_or(ApiVersion::new(u32::MAX, 0))
    }

    pub fn supported_at(self, version: ApiVersion) -> bool {
        version >= self.since()
    }
}

/// A wire element whose spelling changed at a microversion boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    ResetStatusAction,
    ForceDeleteAction,
    AllowAccessAction,
    DenyAccessAction,
    AccessListAction,
    ExtendAction,
    ShrinkAction,
    QuotaSetsPath,
    QuotaClassSetsPath,
    ServicesPath,
    AvailabilityZonesPath,
    ShareManagePath,
    TypeAccessPath,
    TypeIsPublicKey,
}

/// (variant, legacy spelling, current spelling, gate)
const VARIANTS: &[(Variant, &str, &str, Capability)] = &[
    (Variant::ResetStatusAction, "os-reset_status", "reset_status", Capability::UnprefixedActions),
    (Variant::ForceDeleteAction, "os-force_delete", "force_delete", Capability::UnprefixedActions),
    (Variant::AllowAccessAction, "os-allow_access", "allow_access", Capability::UnprefixedActions),
    (Variant::DenyAccessAction, "os-deny_access", "deny_access", Capability::UnprefixedActions),
    (Variant::AccessListAction, "os-access_list", "access_list", Capability::UnprefixedActions),
    (Variant::ExtendAction, "os-extend", "extend", Capability::UnprefixedActions),
    (Variant::ShrinkAction, "os-shrink", "shrink", Capability::UnprefixedActions),
    (Variant::QuotaSetsPath, "os-quota-sets", "quota-sets", Capability::UnprefixedActions),
    (
        Variant::QuotaClassSetsPath,
        "os-quota-class-sets",
        "quota-class-sets",
        Capability::UnprefixedActions,
    ),
    (Variant::ServicesPath, "os-services", "services", Capability::UnprefixedActions),
    (
        Variant::AvailabilityZonesPath,
        "os-availability-zone",
        "availability-zones",
        Capability::UnprefixedActions,
    ),
    (Variant::ShareManagePath, "os-share-manage", "shares/manage", Capability::UnprefixedActions),
    (
        Variant::TypeAccessPath,
        "os-share-type-access",
        "share_type_access",
        Capability::UnprefixedActions,
    ),
    (
        Variant::TypeIsPublicKey,
        "os-share-type-access:is_public",
        "share_type_access:is_public",
        Capability::UnprefixedActions,
    ),
];

impl Variant {
    fn row(self) -> (&'static str, &'static str, Capability) {
        VARIANTS
            .iter()
            .find(|(variant, ..)| *variant == self)
            .map(|(_, legacy, current, gate)| (*legacy, *current, *gate))
            // Every variant has a row; covered by test_every_variant_has_a_row
            .unwrap_or(("", "", Capability::UnprefixedActions))
    }

    pub fn legacy(self) -> &'static str {
        self.row().0
    }

    pub fn current(self) -> &'static str {
        self.row().1
    }

    pub fn gate(self) -> Capability {
        self.row().2
    }

    /// The spelling to send at `version`
    pub fn select(self, version: ApiVersion) -> &'static str {
        let (legacy, current, gate) = self.row();
        if gate.supported_at(version) {
            current
        } else {
            legacy
        }
    }
}

/// API areas that shipped behind the experimental header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    ShareGroups,
    Replicas,
    Migration,
}

/// (area, version at which the experimental header is no longer required)
const EXPERIMENTAL_AREAS: &[(Area, Option<ApiVersion>)] = &[
    (Area::ShareGroups, Some(ApiVersion::new(2, 55))),
    (Area::Replicas, Some(ApiVersion::new(2, 56))),
    (Area::Migration, None),
];

impl Area {
    /// Version at which the area left experimental status, if it has
    pub fn graduated_at(self) -> Option<ApiVersion> {
        EXPERIMENTAL_AREAS
            .iter()
            .find(|(area, _)| *area == self)
            .and_then(|(_, version)| *version)
    }

    /// Whether requests in this area must carry the experimental header
    pub fn is_experimental_at(self, version: ApiVersion) -> bool {
        match self.graduated_at() {
            Some(graduated) => version < graduated,
            None => true,
        }
    }
}
