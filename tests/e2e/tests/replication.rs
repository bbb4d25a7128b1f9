//! Share replication tests
//!
//! Needs a share type with `replication_type` that the backend honors; the
//! type is created here with `readable` replication.

mod common;

use anyhow::Result;
use common::*;

use manila_conformance::client::NewShareType;
use manila_conformance::resource::ResourceKind;
use manila_conformance::roles::Role;
use manila_conformance::skip::{require_feature, Feature};

async fn replicated_share(ctx: &TestContext<'_>) -> Result<manila_conformance::Resource> {
    let admin = ctx.admin()?;
    let request = NewShareType::new(ctx.name("repl-type"), ctx.config().multitenancy.enabled)
        .spec("replication_type", "readable");
    let share_type = admin.create_share_type(&request).await?.resource("share_type")?;
    ctx.track(Cleanup::ShareType(share_type.id()?.to_string()));

    let request = share_request(ctx, "replicated")?.of_type(share_type.id()?);
    create_share(ctx, Role::Member, &request).await
}

#[tokio::test]
async fn test_replica_reaches_in_sync() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        ctx.require(require_feature(ctx.config(), Feature::Replication))?;
        let share = replicated_share(&ctx).await?;
        let client = ctx.member()?;

        let network = ctx.config().multitenancy.share_network_id.as_deref();
        let replica = client
            .create_replica(share.id()?, None, network)
            .await?
            .resource("share_replica")?;
        let replica_id = replica.id()?;
        ctx.track_resource(ResourceKind::ShareReplica, replica_id, Role::Member);

        let waiter = ctx.waiter(Role::Member)?;
        waiter
            .wait_for_status(ResourceKind::ShareReplica, replica_id, &["available"])
            .await?;
        let synced = waiter
            .wait_for_field(ResourceKind::ShareReplica, replica_id, "replica_state", &["in_sync"])
            .await?;
        assert_field(&synced, "share_id", share.id()?);

        let replicas = client.list_replicas(Some(share.id()?)).await?.resources("share_replicas")?;
        assert_listed(&replicas, replica_id);
        assert_eq!(replicas.len(), 2, "Expected the active replica and the new one");
        Ok(())
    }
    .await;
    ctx.finish("test_replica_reaches_in_sync", result).await
}

#[tokio::test]
async fn test_promote_replica() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        ctx.require(require_feature(ctx.config(), Feature::Replication))?;
        let share = replicated_share(&ctx).await?;
        let client = ctx.member()?;

        let network = ctx.config().multitenancy.share_network_id.as_deref();
        let replica = client
            .create_replica(share.id()?, None, network)
            .await?
            .resource("share_replica")?;
        let replica_id = replica.id()?;
        ctx.track_resource(ResourceKind::ShareReplica, replica_id, Role::Member);

        let waiter = ctx.waiter(Role::Member)?;
        waiter
            .wait_for_field(ResourceKind::ShareReplica, replica_id, "replica_state", &["in_sync"])
            .await?;

        client.promote_replica(replica_id).await?;
        waiter
            .wait_for_field(ResourceKind::ShareReplica, replica_id, "replica_state", &["active"])
            .await?;
        Ok(())
    }
    .await;
    ctx.finish("test_promote_replica", result).await
}
