//! Negative share tests
//!
//! Each request here must be rejected with a specific status.

mod common;

use anyhow::Result;
use common::*;

use manila_conformance::client::NewShare;
use manila_conformance::policy::VERSION_HEADER;
use manila_conformance::transport::Headers;

const MISSING_ID: &str = "00000000-0000-0000-0000-000000000000";

#[tokio::test]
async fn test_get_missing_share() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        assert_not_found(ctx.member()?.get_share(MISSING_ID).await);
        Ok(())
    }
    .await;
    ctx.finish("test_get_missing_share", result).await
}

#[tokio::test]
async fn test_delete_missing_share() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        assert_not_found(ctx.member()?.delete_share(MISSING_ID).await);
        Ok(())
    }
    .await;
    ctx.finish("test_delete_missing_share", result).await
}

#[tokio::test]
async fn test_create_share_with_zero_size() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let request = NewShare::new(protocol(&ctx)?, 0).named(ctx.name("zero"));
        assert_bad_request(ctx.member()?.create_share(&request).await);
        Ok(())
    }
    .await;
    ctx.finish("test_create_share_with_zero_size", result).await
}

#[tokio::test]
async fn test_create_share_with_unknown_protocol() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let request = NewShare::new("not-a-protocol", 1).named(ctx.name("proto"));
        assert_bad_request(ctx.member()?.create_share(&request).await);
        Ok(())
    }
    .await;
    ctx.finish("test_create_share_with_unknown_protocol", result).await
}

#[tokio::test]
async fn test_shrink_below_used_size_rejected() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let share = member_share(&ctx, "shrink").await?;
        // Zero is never a valid size
        assert_bad_request(ctx.member()?.shrink_share(share.id()?, 0).await);
        Ok(())
    }
    .await;
    ctx.finish("test_shrink_below_used_size_rejected", result).await
}

#[tokio::test]
async fn test_malformed_version_header_rejected() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let mut headers = Headers::new();
        headers.insert(VERSION_HEADER.to_string(), "2.x".to_string());
        let client = ctx.member()?.with_headers(headers, false);

        assert_bad_request(client.list_shares(&[]).await);
        Ok(())
    }
    .await;
    ctx.finish("test_malformed_version_header_rejected", result).await
}

#[tokio::test]
async fn test_version_above_maximum_rejected() -> Result<()> {
    let Some(ctx) = context().await? else { return Ok(()) };
    let result: Result<()> = async {
        let client = ctx.member()?;
        let server = client.supported_versions().await?;
        let beyond = client.at(server.max().next_minor());

        assert_status_in(beyond.list_shares(&[]).await, &[404, 406]);
        Ok(())
    }
    .await;
    ctx.finish("test_version_above_maximum_rejected", result).await
}
