use serde_json::json;

use crate::common::{TestApp, routes};

mod create_blog {
    use super::*;

    #[tokio::test]
    async fn author_can_create_a_blog() {
        let app = TestApp::spawn().await;
        let (token, user_id) = app.create_user("alice").await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "First post", "content": "Hello"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["title"], "First post");
        assert_eq!(res.body["content"], "Hello");
        assert_eq!(res.body["author_id"], user_id);
        assert!(res.body["created_at"].is_string());
    }

    #[tokio::test]
    async fn title_is_trimmed() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "  Spaced  ", "content": "Hello"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["title"], "Spaced");
    }

    #[tokio::test]
    async fn duplicate_title_is_a_conflict() {
        let app = TestApp::spawn().await;
        let (alice, _) = app.create_user("alice").await;
        let (bob, _) = app.create_user("bob").await;
        app.create_blog(&alice, "A").await;

        let res = app
            .post_with_token(routes::BLOGS, &json!({"title": "A", "content": "c2"}), &bob)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn creating_requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::BLOGS, &json!({"title": "A", "content": "c"}))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn empty_title_is_rejected() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;

        let res = app
            .post_with_token(routes::BLOGS, &json!({"title": "   ", "content": "c"}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod read_blogs {
    use super::*;

    #[tokio::test]
    async fn missing_blog_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::blog(999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn blog_detail_includes_its_images() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_id = app.create_blog(&token, "With pictures").await;
        let first = app.create_image(&token, blog_id, "one.png").await;
        let second = app.create_image(&token, blog_id, "two.png").await;

        let res = app.get_without_token(&routes::blog(blog_id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "With pictures");
        let images = res.body["images"].as_array().unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0]["id"], first);
        assert_eq!(images[1]["id"], second);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let first = app.create_blog(&token, "first").await;
        let second = app.create_blog(&token, "second").await;
        let third = app.create_blog(&token, "third").await;

        let res = app.get_without_token(routes::BLOGS).await;

        assert_eq!(res.status, 200);
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![third as i64, second as i64, first as i64]);
    }

    #[tokio::test]
    async fn list_defaults_to_ten_entries() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        for i in 0..12 {
            app.create_blog(&token, &format!("post {i}")).await;
        }

        let res = app.get_without_token(routes::BLOGS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn skip_and_limit_select_a_contiguous_window() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(app.create_blog(&token, &format!("post {i}")).await);
        }
        ids.reverse();

        let res = app.get_without_token(&routes::blogs_page(1, 2)).await;

        assert_eq!(res.status, 200);
        let page: Vec<i32> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["id"].as_i64().unwrap() as i32)
            .collect();
        assert_eq!(page, ids[1..3].to_vec());
    }

    #[tokio::test]
    async fn skip_past_the_end_is_empty() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        app.create_blog(&token, "only").await;

        let res = app.get_without_token(&routes::blogs_page(5, 10)).await;

        assert_eq!(res.status, 200);
        assert!(res.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn negative_skip_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token(&format!("{}?skip=-1", routes::BLOGS))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod update_blog {
    use super::*;

    #[tokio::test]
    async fn author_can_update_title_and_content() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_id = app.create_blog(&token, "Old").await;

        let res = app
            .put_with_token(
                &routes::blog(blog_id),
                &json!({"title": "New", "content": "Rewritten"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "New");
        assert_eq!(res.body["content"], "Rewritten");
    }

    #[tokio::test]
    async fn omitted_fields_are_left_unchanged() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_id = app.create_blog(&token, "Keep").await;

        let res = app
            .put_with_token(
                &routes::blog(blog_id),
                &json!({"content": "Only the body"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Keep");
        assert_eq!(res.body["content"], "Only the body");
    }

    #[tokio::test]
    async fn keeping_the_same_title_is_allowed() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_id = app.create_blog(&token, "A").await;

        let res = app
            .put_with_token(&routes::blog(blog_id), &json!({"title": "A"}), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "A");
    }

    #[tokio::test]
    async fn taking_another_blogs_title_is_a_conflict() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let a = app.create_blog(&token, "A").await;
        app.create_blog(&token, "B").await;

        let res = app
            .put_with_token(&routes::blog(a), &json!({"title": "B"}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "CONFLICT");

        let unchanged = app.get_without_token(&routes::blog(a)).await;
        assert_eq!(unchanged.body["title"], "A");
    }

    #[tokio::test]
    async fn non_author_cannot_update() {
        let app = TestApp::spawn().await;
        let (alice, _) = app.create_user("alice").await;
        let (bob, _) = app.create_user("bob").await;
        let blog_id = app.create_blog(&alice, "Mine").await;

        let res = app
            .put_with_token(&routes::blog(blog_id), &json!({"title": "Stolen"}), &bob)
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");

        let unchanged = app.get_without_token(&routes::blog(blog_id)).await;
        assert_eq!(unchanged.body["title"], "Mine");
    }

    #[tokio::test]
    async fn updating_a_missing_blog_is_not_found() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;

        let res = app
            .put_with_token(&routes::blog(999), &json!({"title": "X"}), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod delete_blog {
    use super::*;

    #[tokio::test]
    async fn author_can_delete_a_blog_with_its_images() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_id = app.create_blog(&token, "Doomed").await;
        app.create_image(&token, blog_id, "one.png").await;
        app.create_image(&token, blog_id, "two.png").await;

        let res = app.delete_with_token(&routes::blog(blog_id), &token).await;
        assert_eq!(res.status, 204);

        let gone = app.get_without_token(&routes::blog(blog_id)).await;
        assert_eq!(gone.status, 404);

        let images = app.get_without_token(&routes::images(blog_id)).await;
        assert_eq!(images.status, 404);
    }

    #[tokio::test]
    async fn non_author_delete_is_forbidden_and_blog_remains() {
        let app = TestApp::spawn().await;
        let (alice, _) = app.create_user("alice").await;
        let (bob, _) = app.create_user("bob").await;
        let blog_id = app.create_blog(&alice, "Protected").await;

        let res = app.delete_with_token(&routes::blog(blog_id), &bob).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
        assert_eq!(res.body["message"], "Not authorized to delete this blog");

        let still_there = app.get_without_token(&routes::blog(blog_id)).await;
        assert_eq!(still_there.status, 200);
    }

    #[tokio::test]
    async fn deleting_a_missing_blog_is_not_found() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;

        let res = app.delete_with_token(&routes::blog(999), &token).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn deleting_requires_a_token() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_id = app.create_blog(&token, "Guarded").await;

        let res = app.delete_without_token(&routes::blog(blog_id)).await;

        assert_eq!(res.status, 401);
    }
}
