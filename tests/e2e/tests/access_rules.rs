//! Access rule tests
//!
//! Rules are listed through three different request shapes depending on the
//! version; each shape must report the same rule.

mod common;

use std::collections::BTreeMap;

use anyhow::Result;
use common::*;
use serde_json::json;
use test_case::test_case;

use manila_conformance::client::AccessRequest;
use manila_conformance::roles::Role;
use manila_conformance::skip::require_version;
use manila_conformance::ApiVersion;

const TEST_CIDR: &str = "10.254.0.0/24";

#[tokio::test]
async fn test_allow_and_deny_ip_rule() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let share = member_share(&ctx, "access").await?;
        let share_id = share.id()?;

        let rule = allow_ip(&ctx, Role::Member, share_id, TEST_CIDR).await?;
        assert_field(&rule, "access_to", TEST_CIDR);
        assert_field(&rule, "access_level", "rw");

        let client = ctx.member()?;
        client.deny_access(share_id, rule.id()?).await?;
        Ok(())
    }
    .await;
    ctx.finish("test_allow_and_deny_ip_rule", result).await
}

#[test_case(2, 0 ; "legacy action")]
#[test_case(2, 7 ; "current action")]
#[test_case(2, 45 ; "access rules api")]
#[tokio::test]
async fn test_list_rules_at_version(major: u32, minor: u32) -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let version = ApiVersion::new(major, minor);
        ctx.require(require_version(ctx.config(), version))?;

        let share = member_share(&ctx, "list-rules").await?;
        let share_id = share.id()?;
        let rule = allow_ip(&ctx, Role::Member, share_id, TEST_CIDR).await?;

        let rules = ctx
            .member()?
            .at(version)
            .list_access_rules(share_id)
            .await?
            .resources("access_list")?;
        assert_listed(&rules, rule.id()?);
        Ok(())
    }
    .await;
    ctx.finish("test_list_rules_at_version", result).await
}

#[tokio::test]
async fn test_access_rule_metadata() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        ctx.require(require_version(ctx.config(), ApiVersion::new(2, 45)))?;

        let share = member_share(&ctx, "access-meta").await?;
        let rule = allow_ip(&ctx, Role::Member, share.id()?, TEST_CIDR).await?;
        let access_id = rule.id()?;
        let client = ctx.member()?;

        let mut metadata = BTreeMap::new();
        metadata.insert("owner".to_string(), "conformance".to_string());
        client.update_access_metadata(access_id, &metadata).await?;

        let fetched = client.get_access_rule(access_id).await?.resource("access")?;
        let owner = fetched.get("metadata").and_then(|m| m.get("owner"));
        assert_eq!(owner, Some(&json!("conformance")));

        client.delete_access_metadata(access_id, "owner").await?;
        Ok(())
    }
    .await;
    ctx.finish("test_access_rule_metadata", result).await
}

#[tokio::test]
async fn test_invalid_access_level_rejected() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let share = member_share(&ctx, "bad-level").await?;
        let request = AccessRequest::ip(TEST_CIDR).level("superuser");

        assert_bad_request(ctx.member()?.allow_access(share.id()?, &request).await);
        Ok(())
    }
    .await;
    ctx.finish("test_invalid_access_level_rejected", result).await
}
