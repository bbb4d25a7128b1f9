//! Microversion tests
//!
//! The same call is issued across the configured range; every response must
//! be accepted and carry a request id, and version-gated shapes must be
//! understood on both sides of their boundary.

mod common;

use anyhow::Result;
use common::*;
use test_case::test_case;

use manila_conformance::client::NewShareType;
use manila_conformance::resource::ResourceKind;
use manila_conformance::roles::Role;
use manila_conformance::skip::require_version;
use manila_conformance::ApiVersion;

#[tokio::test]
async fn test_configured_range_is_served() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let server = ctx.member()?.supported_versions().await?;
        let api = &ctx.config().api;

        assert!(server.contains(api.min_version), "{} not served", api.min_version);
        assert!(server.contains(api.max_version), "{} not served", api.max_version);
        Ok(())
    }
    .await;
    ctx.finish("test_configured_range_is_served", result).await
}

#[tokio::test]
async fn test_every_version_lists_shares() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let range = ctx.config().api.range().ok_or_else(|| anyhow::anyhow!("Empty API range"))?;
        let client = ctx.member()?;

        for version in range.iter() {
            let response = client.at(version).list_shares(&[]).await?;
            assert!(!response.request_id.is_empty());
        }
        Ok(())
    }
    .await;
    ctx.finish("test_every_version_lists_shares", result).await
}

#[test_case(2, 6 ; "prefixed action")]
#[test_case(2, 7 ; "unprefixed action")]
#[tokio::test]
async fn test_reset_share_status_at_version(major: u32, minor: u32) -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let version = ApiVersion::new(major, minor);
        ctx.require(require_version(ctx.config(), version))?;
        let admin = ctx.admin()?.at(version);

        let share = member_share(&ctx, "reset").await?;
        let share_id = share.id()?;

        admin.reset_share_status(share_id, "error").await?;
        let errored = admin.get_share(share_id).await?.resource("share")?;
        assert_field(&errored, "status", "error");

        admin.reset_share_status(share_id, "available").await?;
        ctx.waiter(Role::Member)?
            .wait_for_status(ResourceKind::Share, share_id, &["available"])
            .await?;
        Ok(())
    }
    .await;
    ctx.finish("test_reset_share_status_at_version", result).await
}

#[test_case(2, 6 ; "legacy public key")]
#[test_case(2, 7 ; "current public key")]
#[tokio::test]
async fn test_private_share_type_at_version(major: u32, minor: u32) -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let version = ApiVersion::new(major, minor);
        ctx.require(require_version(ctx.config(), version))?;
        let admin = ctx.admin()?.at(version);

        let request =
            NewShareType::new(ctx.name("type"), ctx.config().multitenancy.enabled).private();
        let share_type = admin.create_share_type(&request).await?.resource("share_type")?;
        let type_id = share_type.id()?;
        ctx.track(Cleanup::ShareType(type_id.to_string()));

        let fetched = admin.get_share_type(type_id).await?.resource("share_type")?;
        let is_public = fetched
            .get("share_type_access:is_public")
            .or_else(|| fetched.get("os-share-type-access:is_public"));
        assert_eq!(is_public, Some(&serde_json::Value::Bool(false)));

        let access = admin.list_type_access(type_id).await?;
        assert!(access.body.get("share_type_access").is_some());
        Ok(())
    }
    .await;
    ctx.finish("test_private_share_type_at_version", result).await
}
