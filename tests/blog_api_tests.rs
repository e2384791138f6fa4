mod common;

use axum::http::StatusCode;
use common::{RequestBuilder, TestHarness};
use serde_json::json;

#[tokio::test]
async fn all_blogs_are_returned_as_json() {
    let harness = TestHarness::new().await;
    harness.seed_initial_blogs().await;

    let response = harness.send(RequestBuilder::get("/api/blogs")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("application/json"));

    let (_, body) = harness.send_json(RequestBuilder::get("/api/blogs")).await;
    assert_eq!(body.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn blogs_have_an_id_field() {
    let harness = TestHarness::new().await;
    harness.seed_initial_blogs().await;

    let (status, body) = harness.send_json(RequestBuilder::get("/api/blogs")).await;
    assert_eq!(status, StatusCode::OK);

    for blog in body.as_array().unwrap() {
        assert!(blog["id"].is_i64());
    }
}

#[tokio::test]
async fn a_blog_can_be_added() {
    let harness = TestHarness::new().await;
    harness.seed_initial_blogs().await;

    let new_blog = json!({
        "title": "Neuralink and the Brain's Magical Future",
        "author": "Tim Urban",
        "url": "https://waitbutwhy.com/2017/04/neuralink.html",
        "likes": 12
    });

    let (status, body) = harness
        .send_json(RequestBuilder::post_json("/api/blogs", &new_blog))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["likes"], 12);

    let blogs = harness.blogs_in_database().await;
    assert_eq!(blogs.len(), 7);
    assert!(
        blogs
            .iter()
            .any(|blog| blog.title == "Neuralink and the Brain's Magical Future")
    );
}

#[tokio::test]
async fn missing_likes_results_in_zero_likes() {
    let harness = TestHarness::new().await;

    let new_blog = json!({
        "title": "Neuralink and the Brain's Magical Future",
        "author": "Tim Urban",
        "url": "https://waitbutwhy.com/2017/04/neuralink.html"
    });

    let (status, body) = harness
        .send_json(RequestBuilder::post_json("/api/blogs", &new_blog))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["likes"], 0);

    let blogs = harness.blogs_in_database().await;
    assert_eq!(blogs[0].likes, Some(0));
}

#[tokio::test]
async fn missing_title_results_in_400() {
    let harness = TestHarness::new().await;

    let new_blog = json!({
        "author": "Tim Urban",
        "url": "https://waitbutwhy.com/2017/04/neuralink.html",
        "likes": 12
    });

    let (status, body) = harness
        .send_json(RequestBuilder::post_json("/api/blogs", &new_blog))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("title"));

    assert!(harness.blogs_in_database().await.is_empty());
}

#[tokio::test]
async fn missing_url_results_in_400() {
    let harness = TestHarness::new().await;

    let new_blog = json!({
        "title": "Neuralink and the Brain's Magical Future",
        "author": "Tim Urban",
        "likes": 12
    });

    let (status, body) = harness
        .send_json(RequestBuilder::post_json("/api/blogs", &new_blog))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("url"));

    assert!(harness.blogs_in_database().await.is_empty());
}

#[tokio::test]
async fn negative_likes_results_in_400() {
    let harness = TestHarness::new().await;

    let new_blog = json!({
        "title": "Below zero",
        "url": "https://example.com/below-zero",
        "likes": -1
    });

    let (status, _) = harness
        .send_json(RequestBuilder::post_json("/api/blogs", &new_blog))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn a_blog_can_be_deleted() {
    let harness = TestHarness::new().await;
    let seeded = harness.seed_initial_blogs().await;
    let to_delete = &seeded[0];

    let response = harness
        .send(RequestBuilder::delete(&format!(
            "/api/blogs/{}",
            to_delete.id
        )))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining = harness.blogs_in_database().await;
    assert_eq!(remaining.len(), seeded.len() - 1);
    assert!(remaining.iter().all(|blog| blog.title != to_delete.title));
}

#[tokio::test]
async fn deleting_an_unknown_blog_is_404() {
    let harness = TestHarness::new().await;
    harness.seed_initial_blogs().await;

    let (status, _) = harness
        .send_json(RequestBuilder::delete("/api/blogs/9999"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(harness.blogs_in_database().await.len(), 6);
}

#[tokio::test]
async fn likes_of_a_blog_can_be_updated() {
    let harness = TestHarness::new().await;
    let seeded = harness.seed_initial_blogs().await;
    let to_update = &seeded[0];

    let payload = json!({
        "title": to_update.title,
        "author": to_update.author,
        "url": to_update.url,
        "likes": 42
    });

    let (status, body) = harness
        .send_json(RequestBuilder::put_json(
            &format!("/api/blogs/{}", to_update.id),
            &payload,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["likes"], 42);

    let stored = harness.blog_by_id(to_update.id).await.unwrap();
    assert_eq!(stored.likes, Some(42));
}

#[tokio::test]
async fn update_replaces_fields_wholesale() {
    let harness = TestHarness::new().await;
    let seeded = harness.seed_initial_blogs().await;
    let to_update = &seeded[0];

    // author and likes not sent: both become absent on the stored record
    let payload = json!({
        "title": "Replaced title",
        "url": "https://example.com/replaced"
    });

    let (status, body) = harness
        .send_json(RequestBuilder::put_json(
            &format!("/api/blogs/{}", to_update.id),
            &payload,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Replaced title");
    assert!(body["author"].is_null());
    assert!(body["likes"].is_null());

    let stored = harness.blog_by_id(to_update.id).await.unwrap();
    assert_eq!(stored.author, None);
    assert_eq!(stored.likes, None);
}

#[tokio::test]
async fn update_without_title_is_400() {
    let harness = TestHarness::new().await;
    let seeded = harness.seed_initial_blogs().await;

    let payload = json!({ "url": "https://example.com/no-title" });

    let (status, _) = harness
        .send_json(RequestBuilder::put_json(
            &format!("/api/blogs/{}", seeded[0].id),
            &payload,
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn updating_an_unknown_blog_is_404() {
    let harness = TestHarness::new().await;

    let payload = json!({
        "title": "Ghost",
        "url": "https://example.com/ghost"
    });

    let (status, _) = harness
        .send_json(RequestBuilder::put_json("/api/blogs/9999", &payload))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_reflect_the_stored_blogs() {
    let harness = TestHarness::new().await;
    harness.seed_initial_blogs().await;

    let (status, body) = harness
        .send_json(RequestBuilder::get("/api/blogs/stats"))
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["total_likes"], 36);
    assert_eq!(body["favorite"]["title"], "Canonical string reduction");
    assert_eq!(body["favorite"]["likes"], 12);
    assert_eq!(body["most_blogs"]["author"], "Robert C. Martin");
    assert_eq!(body["most_blogs"]["blogs"], 3);
    assert_eq!(body["most_likes"]["author"], "Edsger W. Dijkstra");
    assert_eq!(body["most_likes"]["likes"], 17);
}

#[tokio::test]
async fn stats_over_an_empty_store_degrade_gracefully() {
    let harness = TestHarness::new().await;

    let (status, body) = harness
        .send_json(RequestBuilder::get("/api/blogs/stats"))
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["total_likes"], 0);
    assert!(body["favorite"].is_null());
    assert!(body["most_blogs"].is_null());
    assert!(body["most_likes"].is_null());
}

#[tokio::test]
async fn blog_created_with_token_gets_an_owner() {
    let harness = TestHarness::new().await;
    let user = harness.register_user("writer", "Writer", "salasana").await;
    let token = harness.token_for(&user);

    let new_blog = json!({
        "title": "Owned post",
        "url": "https://example.com/owned"
    });

    let (status, body) = harness
        .send_json(RequestBuilder::post_json_with_token(
            "/api/blogs",
            &new_blog,
            &token,
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_id"], user.id);
}

#[tokio::test]
async fn blog_created_without_token_is_anonymous() {
    let harness = TestHarness::new().await;

    let new_blog = json!({
        "title": "Anonymous post",
        "url": "https://example.com/anon"
    });

    let (status, body) = harness
        .send_json(RequestBuilder::post_json("/api/blogs", &new_blog))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["user_id"].is_null());
}

#[tokio::test]
async fn owned_blog_cannot_be_deleted_without_the_owners_token() {
    let harness = TestHarness::new().await;
    let owner = harness.register_user("owner", "Owner", "salasana").await;
    let intruder = harness
        .register_user("intruder", "Intruder", "salasana")
        .await;

    let blog = harness
        .insert_blog(&TestHarness::initial_blogs()[0].clone().with_owner(owner.id))
        .await;
    let path = format!("/api/blogs/{}", blog.id);

    // no token
    let (status, _) = harness.send_json(RequestBuilder::delete(&path)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // someone else's token
    let (status, _) = harness
        .send_json(RequestBuilder::delete_with_token(
            &path,
            &harness.token_for(&intruder),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(harness.blogs_in_database().await.len(), 1);

    // the owner's token
    let response = harness
        .send(RequestBuilder::delete_with_token(
            &path,
            &harness.token_for(&owner),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(harness.blogs_in_database().await.is_empty());
}
