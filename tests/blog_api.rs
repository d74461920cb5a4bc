use std::fs;
use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use folio::Folio;

fn write_post(dir: &Path, slug: &str, content: &str) {
    fs::write(dir.join(format!("{}.mdx", slug)), content).unwrap();
}

/// A site with four published posts, one draft and one broken file
fn site() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    fs::create_dir_all(&data).unwrap();

    write_post(
        &data,
        "bsidestlv-2022-sev",
        "---\ntitle: BSidesTLV 2022 CTF – SEV\ndescription: Elliptic curve key theft\ndate: 2022-07-01\nauthor: radewoosh\ntags: [Crypto, ECC]\n---\n# SEV\n\nThe **curve** is weak.\n",
    );
    write_post(
        &data,
        "sekaictf-2024-processflipper",
        "---\ntitle: SekaiCTF 2024 – ProcessFlipper\ndate: 2024-09-19\nauthors: [nyancat0131]\ntags: [Pwn, CTF]\n---\nStory.\n",
    );
    write_post(
        &data,
        "hitcon-ctf-2024-lustrous",
        "---\ntitle: HITCON CTF 2024 Quals – Lustrous\nsummary: Vyper overflow\ndate: 2024-07-23\ntags: [Blockchain, CTF]\nincludeContent: true\n---\nShared body.\n",
    );
    write_post(
        &data,
        "intigriti-0724-xss-challenge",
        "---\ntitle: Intigriti 0724\ndate: 2024-07-06\ntags: [Web, XSS]\n---\nDOM clobbering.\n",
    );
    write_post(
        &data,
        "unreleased",
        "---\ntitle: Unreleased\ndate: 2025-01-01\ntags: [CTF]\npublished: false\n---\nSecret.\n",
    );
    write_post(&data, "broken", "---\ntitle: [oops\n---\nBody\n");

    let router = folio::server::router(Folio::new(dir.path()).unwrap());
    (dir, router)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn slugs(json: &Value) -> Vec<&str> {
    json["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_listing_defaults() {
    let (_dir, router) = site();
    let (status, json) = get_json(&router, "/api/blog").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 4);
    assert_eq!(json["limit"], 10);
    assert_eq!(json["offset"], 0);
    assert!(json.get("error").is_none());
    assert_eq!(
        slugs(&json),
        vec![
            "sekaictf-2024-processflipper",
            "hitcon-ctf-2024-lustrous",
            "intigriti-0724-xss-challenge",
            "bsidestlv-2022-sev",
        ]
    );

    let first = &json["posts"][0];
    assert_eq!(first["author"], "nyancat0131");
    assert_eq!(first["date"], "September 19, 2024");
    assert_eq!(first["readTime"], "1 min read");
    assert!(first.get("content").is_none());

    // Opted in through includeContent
    assert_eq!(json["posts"][1]["content"], "Shared body.\n");
    assert_eq!(json["posts"][1]["description"], "Vyper overflow");
}

#[tokio::test]
async fn test_listing_search_tag_and_pagination() {
    let (_dir, router) = site();

    let (_, json) = get_json(&router, "/api/blog?search=ecc").await;
    assert_eq!(slugs(&json), vec!["bsidestlv-2022-sev"]);

    let (_, json) = get_json(&router, "/api/blog?tag=ctf").await;
    assert_eq!(json["total"], 2);

    let (_, json) = get_json(&router, "/api/blog?limit=1&offset=1").await;
    assert_eq!(slugs(&json), vec!["hitcon-ctf-2024-lustrous"]);
    assert_eq!(json["total"], 4);

    let (status, json) = get_json(&router, "/api/blog?offset=99").await;
    assert_eq!(status, StatusCode::OK);
    assert!(slugs(&json).is_empty());
    assert_eq!(json["total"], 4);

    let (status, json) = get_json(&router, "/api/blog?limit=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["limit"], 10);
}

#[tokio::test]
async fn test_missing_data_directory_degrades() {
    let dir = TempDir::new().unwrap();
    let router = folio::server::router(Folio::new(dir.path()).unwrap());

    let (status, json) = get_json(&router, "/api/blog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["error"], "Data directory not found");
    assert_eq!(json["total"], 0);
    assert!(slugs(&json).is_empty());
}

#[tokio::test]
async fn test_single_post_json() {
    let (_dir, router) = site();
    let (status, json) = get_json(&router, "/api/blog/bsidestlv-2022-sev").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "BSidesTLV 2022 CTF – SEV");
    assert_eq!(json["date"], "July 1, 2022");
    assert!(json["content"].as_str().unwrap().contains("The **curve** is weak."));
    assert_eq!(json["blocks"][0]["type"], "heading");
    assert_eq!(json["blocks"][0]["level"], 1);
    assert!(json["html"]
        .as_str()
        .unwrap()
        .contains("<p>The <strong>curve</strong> is weak.</p>"));
}

#[tokio::test]
async fn test_unpublished_and_missing_are_indistinguishable() {
    let (_dir, router) = site();

    let unpublished = get(&router, "/api/blog/unreleased").await;
    let missing = get(&router, "/api/blog/never-written").await;
    assert_eq!(unpublished.0, StatusCode::NOT_FOUND);
    assert_eq!(unpublished, missing);

    let (_, json) = get_json(&router, "/api/blog?search=unreleased").await;
    assert_eq!(json["total"], 0);

    let (status, _) = get(&router, "/api/blog/broken").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_page() {
    let (_dir, router) = site();

    let (status, body) = get(&router, "/blog/bsidestlv-2022-sev").await;
    let html = String::from_utf8(body).unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>SEV</h1>"));
    assert!(html.contains("by radewoosh"));

    let (status, body) = get(&router, "/blog/unreleased").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(String::from_utf8(body).unwrap().contains("404"));
}

#[tokio::test]
async fn test_tag_summary() {
    let (_dir, router) = site();
    let (status, json) = get_json(&router, "/api/tags").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["name"], "CTF");
    assert_eq!(json[0]["count"], 2);
}

#[tokio::test]
async fn test_post_named_tags_is_reachable() {
    let (dir, router) = site();
    write_post(
        &dir.path().join("data"),
        "tags",
        "---\ntitle: On Tagging\ndate: 2023-03-03\n---\nBody\n",
    );

    let (status, json) = get_json(&router, "/api/blog/tags").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "On Tagging");
}

#[tokio::test]
async fn test_repeated_params_use_first_value() {
    let (_dir, router) = site();
    let (status, json) = get_json(&router, "/api/blog?limit=1&limit=2&tag=CTF&tag=Web").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["limit"], 1);
    assert_eq!(json["total"], 2);
    assert_eq!(slugs(&json), vec!["sekaictf-2024-processflipper"]);
}

#[tokio::test]
async fn test_unusual_file_names_resolve() {
    let (dir, router) = site();
    write_post(
        &dir.path().join("data"),
        "my notes v1..2",
        "---\ntitle: Notes\ndate: 2020-01-01\n---\nBody\n",
    );

    let (_, json) = get_json(&router, "/api/blog?search=notes").await;
    assert_eq!(slugs(&json), vec!["my notes v1..2"]);

    let (status, json) = get_json(&router, "/api/blog/my%20notes%20v1..2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["slug"], "my notes v1..2");

    let (status, _) = get(&router, "/blog/my%20notes%20v1..2").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_blog_index_page() {
    let (_dir, router) = site();

    let (status, body) = get(&router, "/blog").await;
    let html = String::from_utf8(body).unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"href="/blog/sekaictf-2024-processflipper""#));
    assert!(html.contains("BSidesTLV 2022 CTF – SEV"));
    assert!(!html.contains("Unreleased"));

    let (status, body) = get(&router, "/blog?tag=ecc").await;
    let html = String::from_utf8(body).unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"href="/blog/bsidestlv-2022-sev""#));
    assert!(!html.contains(r#"href="/blog/sekaictf-2024-processflipper""#));

    let (_, body) = get(&router, "/blog?search=nothing-matches").await;
    assert!(String::from_utf8(body).unwrap().contains("No posts found."));
}
