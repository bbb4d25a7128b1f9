//! Share group tests

mod common;

use anyhow::Result;
use common::*;

use manila_conformance::resource::ResourceKind;
use manila_conformance::roles::Role;
use manila_conformance::skip::{require_feature, Feature};

#[tokio::test]
async fn test_share_group_lifecycle() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        ctx.require(require_feature(ctx.config(), Feature::ShareGroups))?;

        let share_type = create_share_type(&ctx, "group-member-type", false).await?;
        let group = create_share_group(&ctx, share_type.id()?).await?;
        let group_id = group.id()?;

        let client = ctx.member()?;
        let groups = client.list_share_groups(&[]).await?.resources("share_groups")?;
        assert_listed(&groups, group_id);

        client.delete_share_group(group_id).await?;
        ctx.waiter(Role::Member)?
            .wait_for_deletion(ResourceKind::ShareGroup, group_id)
            .await?;
        Ok(())
    }
    .await;
    ctx.finish("test_share_group_lifecycle", result).await
}

#[tokio::test]
async fn test_share_group_snapshot() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        ctx.require(require_feature(ctx.config(), Feature::ShareGroups))?;
        ctx.require(require_feature(ctx.config(), Feature::Snapshots))?;

        let share_type = create_share_type(&ctx, "group-snap-type", false).await?;
        let group = create_share_group(&ctx, share_type.id()?).await?;

        let client = ctx.member()?;
        let snapshot = client
            .create_share_group_snapshot(group.id()?, Some(&ctx.name("group-snap")))
            .await?
            .resource("share_group_snapshot")?;
        let snapshot_id = snapshot.id()?;
        ctx.track_resource(ResourceKind::ShareGroupSnapshot, snapshot_id, Role::Member);

        let ready = ctx
            .waiter(Role::Member)?
            .wait_for_status(ResourceKind::ShareGroupSnapshot, snapshot_id, &["available"])
            .await?;
        assert_field(&ready, "share_group_id", group.id()?);
        Ok(())
    }
    .await;
    ctx.finish("test_share_group_snapshot", result).await
}
