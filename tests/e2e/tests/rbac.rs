//! Role-based access tests
//!
//! A member's share is visible to its own project, invisible to another
//! project, and read-only to the reader role.

mod common;

use anyhow::Result;
use common::*;
use serde_json::json;
use test_case::test_case;

use manila_conformance::roles::Role;

#[test_case(Role::Admin, true ; "admin")]
#[test_case(Role::Member, true ; "member")]
#[test_case(Role::Reader, true ; "reader")]
#[test_case(Role::AltMember, false ; "alt member")]
#[tokio::test]
async fn test_share_visibility(role: Role, visible: bool) -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        ctx.require_role(role)?;
        let share = member_share(&ctx, "visibility").await?;
        let client = ctx.client(role)?;

        if visible {
            client.get_share(share.id()?).await?;
        } else {
            assert_not_found(client.get_share(share.id()?).await);
            let listed = client.list_shares(&[]).await?.resources("shares")?;
            assert_not_listed(&listed, share.id()?);
        }
        Ok(())
    }
    .await;
    ctx.finish("test_share_visibility", result).await
}

#[tokio::test]
async fn test_reader_cannot_create_share() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        ctx.require_role(Role::Reader)?;
        let request = share_request(&ctx, "reader")?;

        assert_forbidden(ctx.client(Role::Reader)?.create_share(&request).await);
        Ok(())
    }
    .await;
    ctx.finish("test_reader_cannot_create_share", result).await
}

#[tokio::test]
async fn test_reader_cannot_update_share() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        ctx.require_role(Role::Reader)?;
        let share = member_share(&ctx, "reader-update").await?;

        let reader = ctx.client(Role::Reader)?;
        assert_forbidden(
            reader
                .update_share(share.id()?, json!({ "display_name": "taken-over" }))
                .await,
        );
        Ok(())
    }
    .await;
    ctx.finish("test_reader_cannot_update_share", result).await
}

#[tokio::test]
async fn test_alt_member_cannot_delete_share() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        ctx.require_role(Role::AltMember)?;
        let share = member_share(&ctx, "alt-delete").await?;

        assert_not_found(ctx.client(Role::AltMember)?.delete_share(share.id()?).await);
        Ok(())
    }
    .await;
    ctx.finish("test_alt_member_cannot_delete_share", result).await
}

#[tokio::test]
async fn test_member_cannot_create_share_type() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let request = manila_conformance::client::NewShareType::new(ctx.name("type"), false);
        assert_forbidden(ctx.member()?.create_share_type(&request).await);
        Ok(())
    }
    .await;
    ctx.finish("test_member_cannot_create_share_type", result).await
}
