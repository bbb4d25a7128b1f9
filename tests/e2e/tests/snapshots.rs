//! Snapshot tests

mod common;

use anyhow::Result;
use common::*;
use serde_json::json;

use manila_conformance::resource::ResourceKind;
use manila_conformance::roles::Role;
use manila_conformance::skip::{require_feature, Feature};

#[tokio::test]
async fn test_snapshot_lifecycle() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        ctx.require(require_feature(ctx.config(), Feature::Snapshots))?;

        let share = member_share(&ctx, "snap-src").await?;
        let snapshot = create_snapshot(&ctx, Role::Member, share.id()?).await?;
        let snapshot_id = snapshot.id()?;
        assert_field(&snapshot, "share_id", share.id()?);

        let client = ctx.member()?;
        let listed = client.list_snapshots(&[]).await?.resources("snapshots")?;
        assert_listed(&listed, snapshot_id);

        let detailed = client
            .list_snapshots_detail(&[("share_id", share.id()?)])
            .await?
            .resources("snapshots")?;
        assert_listed(&detailed, snapshot_id);

        let new_name = ctx.name("snap-renamed");
        let updated = client
            .update_snapshot(snapshot_id, json!({ "display_name": new_name }))
            .await?
            .resource("snapshot")?;
        assert_field(&updated, "name", &new_name);

        client.delete_snapshot(snapshot_id).await?;
        ctx.waiter(Role::Member)?
            .wait_for_deletion(ResourceKind::Snapshot, snapshot_id)
            .await?;
        Ok(())
    }
    .await;
    ctx.finish("test_snapshot_lifecycle", result).await
}

#[tokio::test]
async fn test_create_share_from_snapshot() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        ctx.require(require_feature(ctx.config(), Feature::CreateFromSnapshot))?;

        let share = member_share(&ctx, "parent").await?;
        let snapshot = create_snapshot(&ctx, Role::Member, share.id()?).await?;

        let request = share_request(&ctx, "child")?.from_snapshot(snapshot.id()?);
        let child = create_share(&ctx, Role::Member, &request).await?;
        assert_field(&child, "snapshot_id", snapshot.id()?);
        Ok(())
    }
    .await;
    ctx.finish("test_create_share_from_snapshot", result).await
}

#[tokio::test]
async fn test_revert_share_to_snapshot() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        ctx.require(require_feature(ctx.config(), Feature::RevertToSnapshot))?;

        let share = member_share(&ctx, "revert").await?;
        let share_id = share.id()?;
        let snapshot = create_snapshot(&ctx, Role::Member, share_id).await?;

        ctx.member()?.revert_to_snapshot(share_id, snapshot.id()?).await?;
        ctx.waiter(Role::Member)?
            .wait_for_status(ResourceKind::Share, share_id, &["available"])
            .await?;
        Ok(())
    }
    .await;
    ctx.finish("test_revert_share_to_snapshot", result).await
}

#[tokio::test]
async fn test_admin_reset_snapshot_status() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        ctx.require(require_feature(ctx.config(), Feature::Snapshots))?;
        let admin = ctx.admin()?;

        let share = member_share(&ctx, "reset").await?;
        let snapshot = create_snapshot(&ctx, Role::Member, share.id()?).await?;
        let snapshot_id = snapshot.id()?;

        admin.reset_snapshot_status(snapshot_id, "error").await?;
        let errored = admin.get_snapshot(snapshot_id).await?.resource("snapshot")?;
        assert_field(&errored, "status", "error");

        // Leave it deletable for cleanup
        admin.reset_snapshot_status(snapshot_id, "available").await?;
        Ok(())
    }
    .await;
    ctx.finish("test_admin_reset_snapshot_status", result).await
}

#[tokio::test]
async fn test_member_cannot_reset_snapshot_status() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        ctx.require(require_feature(ctx.config(), Feature::Snapshots))?;

        let share = member_share(&ctx, "noreset").await?;
        let snapshot = create_snapshot(&ctx, Role::Member, share.id()?).await?;

        assert_forbidden(ctx.member()?.reset_snapshot_status(snapshot.id()?, "error").await);
        Ok(())
    }
    .await;
    ctx.finish("test_member_cannot_reset_snapshot_status", result).await
}
