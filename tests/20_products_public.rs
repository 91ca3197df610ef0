mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn list_products_returns_count_and_array() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/products", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], json!(true));
    assert!(body["data"].is_array(), "data should be an array: {}", body);
    assert_eq!(
        body["count"].as_u64().unwrap() as usize,
        body["data"].as_array().unwrap().len()
    );
    Ok(())
}

#[tokio::test]
async fn get_with_malformed_id_is_400_not_404_or_500() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    for bad in ["abc", "123", "not-a-uuid"] {
        let res = client
            .get(format!("{}/products/{}", server.base_url, bad))
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "id {:?}", bad);
        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("MalformedIdentifier"));
        assert_eq!(body["id"], json!(bad));
    }
    Ok(())
}

#[tokio::test]
async fn get_with_absent_id_is_404_with_echoed_id() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let absent = "00000000-0000-0000-0000-000000000000";
    let res = client
        .get(format!("{}/products/{}", server.base_url, absent))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], json!("NotFound"));
    assert_eq!(body["id"], json!(absent));
    Ok(())
}
