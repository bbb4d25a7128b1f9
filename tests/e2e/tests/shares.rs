//! Share lifecycle tests
//!
//! Create, read, list, update, metadata, export locations, extend and
//! delete, as the member role.

mod common;

use std::collections::BTreeMap;

use anyhow::Result;
use common::*;
use futures::TryStreamExt;
use serde_json::json;

use manila_conformance::resource::ResourceKind;
use manila_conformance::roles::Role;

#[tokio::test]
async fn test_create_get_list_share() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let share = member_share(&ctx, "basic").await?;
        let id = share.id()?;
        assert_field(&share, "status", "available");
        assert_eq!(share.get("size"), Some(&json!(SHARE_SIZE_GB)));

        let client = ctx.member()?;
        let fetched = client.get_share(id).await?.resource("share")?;
        assert_field(&fetched, "name", &ctx.name("basic"));

        let listed = client.list_shares(&[]).await?.resources("shares")?;
        assert_listed(&listed, id);

        let name = ctx.name("basic");
        let detailed = client
            .list_shares_detail(&[("name", name.as_str())])
            .await?
            .resources("shares")?;
        assert_eq!(detailed.len(), 1);
        assert_field(&detailed[0], "share_proto", &protocol(&ctx)?.to_ascii_uppercase());
        Ok(())
    }
    .await;
    ctx.finish("test_create_get_list_share", result).await
}

#[tokio::test]
async fn test_paginated_listing_reaches_share() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let share = member_share(&ctx, "paged").await?;
        let id = share.id()?.to_string();

        let client = ctx.member()?;
        let all: Vec<_> = client.share_pages(1, Vec::new()).try_collect().await?;
        assert_listed(&all, &id);
        Ok(())
    }
    .await;
    ctx.finish("test_paginated_listing_reaches_share", result).await
}

#[tokio::test]
async fn test_update_share_name_and_description() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let share = member_share(&ctx, "update").await?;
        let id = share.id()?;
        let client = ctx.member()?;

        let new_name = ctx.name("renamed");
        let updated = client
            .update_share(
                id,
                json!({ "display_name": new_name, "display_description": "conformance" }),
            )
            .await?
            .resource("share")?;
        assert_field(&updated, "name", &new_name);
        assert_field(&updated, "description", "conformance");
        Ok(())
    }
    .await;
    ctx.finish("test_update_share_name_and_description", result).await
}

#[tokio::test]
async fn test_share_metadata_roundtrip() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let share = member_share(&ctx, "metadata").await?;
        let id = share.id()?;
        let client = ctx.member()?;

        let mut metadata = BTreeMap::new();
        metadata.insert("purpose".to_string(), "conformance".to_string());
        metadata.insert("tier".to_string(), "gold".to_string());
        client.set_share_metadata(id, &metadata).await?;

        let stored = client.get_share_metadata(id).await?.body;
        assert_eq!(stored["metadata"]["purpose"], "conformance");
        assert_eq!(stored["metadata"]["tier"], "gold");

        client.delete_share_metadata(id, "tier").await?;
        let stored = client.get_share_metadata(id).await?.body;
        assert!(stored["metadata"].get("tier").is_none());
        assert_eq!(stored["metadata"]["purpose"], "conformance");

        let mut replacement = BTreeMap::new();
        replacement.insert("only".to_string(), "key".to_string());
        let replaced = client.update_all_share_metadata(id, &replacement).await?.body;
        assert_eq!(replaced["metadata"], json!({ "only": "key" }));
        Ok(())
    }
    .await;
    ctx.finish("test_share_metadata_roundtrip", result).await
}

#[tokio::test]
async fn test_export_locations() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let share = member_share(&ctx, "exports").await?;
        let id = share.id()?;
        let client = ctx.member()?;

        let locations = client.list_export_locations(id).await?.resources("export_locations")?;
        assert!(!locations.is_empty(), "Available share has no export locations");

        let first = locations[0].id()?;
        let location = client.get_export_location(id, first).await?.resource("export_location")?;
        assert!(location.str_field("path").is_some_and(|p| !p.is_empty()));
        Ok(())
    }
    .await;
    ctx.finish("test_export_locations", result).await
}

#[tokio::test]
async fn test_extend_share() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let share = member_share(&ctx, "extend").await?;
        let id = share.id()?;
        let client = ctx.member()?;

        client.extend_share(id, SHARE_SIZE_GB + 1).await?;
        let extended = ctx
            .waiter(Role::Member)?
            .wait_for_status(ResourceKind::Share, id, &["available"])
            .await?;
        assert_eq!(extended.get("size"), Some(&json!(SHARE_SIZE_GB + 1)));
        Ok(())
    }
    .await;
    ctx.finish("test_extend_share", result).await
}

#[tokio::test]
async fn test_delete_share_waits_for_removal() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let share = member_share(&ctx, "delete").await?;
        let id = share.id()?;
        let client = ctx.member()?;

        client.delete_share(id).await?;
        ctx.waiter(Role::Member)?
            .wait_for_deletion(ResourceKind::Share, id)
            .await?;
        assert_not_found(client.get_share(id).await);
        Ok(())
    }
    .await;
    ctx.finish("test_delete_share_waits_for_removal", result).await
}
