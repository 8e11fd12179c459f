use ::common::storage::ImageStore;

use crate::common::{TestApp, routes};

mod upload_image {
    use super::*;

    #[tokio::test]
    async fn author_can_upload_an_image_with_description() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_id = app.create_blog(&token, "Gallery").await;

        let res = app
            .upload_with_token(
                &routes::images(blog_id),
                "cat.png",
                b"meow".to_vec(),
                Some("A cat"),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "upload failed: {}", res.text);
        assert_eq!(res.body["blog_id"], blog_id);
        assert_eq!(res.body["image_url"], "memory://cat.png");
        assert_eq!(res.body["description"], "A cat");

        let stored = app.images.load("memory://cat.png").await.unwrap();
        assert_eq!(stored, b"meow");
    }

    #[tokio::test]
    async fn description_is_optional() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_id = app.create_blog(&token, "Gallery").await;

        let res = app
            .upload_with_token(
                &routes::images(blog_id),
                "dog.png",
                b"woof".to_vec(),
                None,
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert!(res.body["description"].is_null());
    }

    #[tokio::test]
    async fn same_filename_overwrites_the_stored_file() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_id = app.create_blog(&token, "Gallery").await;

        for bytes in [b"v1".to_vec(), b"v2".to_vec()] {
            let res = app
                .upload_with_token(&routes::images(blog_id), "pic.png", bytes, None, &token)
                .await;
            assert_eq!(res.status, 201);
        }

        assert_eq!(app.images.len(), 1);
        let stored = app.images.load("memory://pic.png").await.unwrap();
        assert_eq!(stored, b"v2");

        let list = app.get_without_token(&routes::images(blog_id)).await;
        assert_eq!(list.body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn non_author_cannot_upload() {
        let app = TestApp::spawn().await;
        let (alice, _) = app.create_user("alice").await;
        let (bob, _) = app.create_user("bob").await;
        let blog_id = app.create_blog(&alice, "Gallery").await;

        let res = app
            .upload_with_token(&routes::images(blog_id), "x.png", b"x".to_vec(), None, &bob)
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
        assert!(app.images.is_empty());
    }

    #[tokio::test]
    async fn uploading_to_a_missing_blog_is_not_found() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;

        let res = app
            .upload_with_token(&routes::images(999), "x.png", b"x".to_vec(), None, &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn filename_with_path_traversal_is_rejected() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_id = app.create_blog(&token, "Gallery").await;

        let res = app
            .upload_with_token(&routes::images(blog_id), "..", b"x".to_vec(), None, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(app.images.is_empty());
    }

    #[tokio::test]
    async fn filename_with_surrounding_spaces_is_rejected_not_renamed() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_id = app.create_blog(&token, "Gallery").await;

        let res = app
            .upload_with_token(&routes::images(blog_id), " a.png", b"x".to_vec(), None, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(app.images.is_empty());
    }

    #[tokio::test]
    async fn upload_without_blog_id_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;

        let res = app
            .upload_with_token("/api/v1/image", "x.png", b"x".to_vec(), None, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod list_images {
    use super::*;

    #[tokio::test]
    async fn lists_only_the_blogs_images_in_upload_order() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_a = app.create_blog(&token, "A").await;
        let blog_b = app.create_blog(&token, "B").await;
        let first = app.create_image(&token, blog_a, "a1.png").await;
        app.create_image(&token, blog_b, "b1.png").await;
        let second = app.create_image(&token, blog_a, "a2.png").await;

        let res = app.get_without_token(&routes::images(blog_a)).await;

        assert_eq!(res.status, 200);
        let ids: Vec<i32> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["id"].as_i64().unwrap() as i32)
            .collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn blog_without_images_lists_nothing() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_id = app.create_blog(&token, "Empty").await;

        let res = app.get_without_token(&routes::images(blog_id)).await;

        assert_eq!(res.status, 200);
        assert!(res.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_blog_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::images(999)).await;

        assert_eq!(res.status, 404);
    }
}

mod delete_image {
    use super::*;

    #[tokio::test]
    async fn author_can_delete_an_image() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_id = app.create_blog(&token, "Gallery").await;
        let image_id = app.create_image(&token, blog_id, "pic.png").await;

        let res = app
            .delete_with_token(&routes::image(image_id, blog_id), &token)
            .await;
        assert_eq!(res.status, 204);

        let list = app.get_without_token(&routes::images(blog_id)).await;
        assert!(list.body.as_array().unwrap().is_empty());
        // The stored file is kept.
        assert_eq!(app.images.len(), 1);
    }

    #[tokio::test]
    async fn non_author_cannot_delete_an_image() {
        let app = TestApp::spawn().await;
        let (alice, _) = app.create_user("alice").await;
        let (bob, _) = app.create_user("bob").await;
        let blog_id = app.create_blog(&alice, "Gallery").await;
        let image_id = app.create_image(&alice, blog_id, "pic.png").await;

        let res = app
            .delete_with_token(&routes::image(image_id, blog_id), &bob)
            .await;

        assert_eq!(res.status, 403);
        let list = app.get_without_token(&routes::images(blog_id)).await;
        assert_eq!(list.body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn image_from_another_blog_is_not_found() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_a = app.create_blog(&token, "A").await;
        let blog_b = app.create_blog(&token, "B").await;
        let image_in_b = app.create_image(&token, blog_b, "b.png").await;

        let res = app
            .delete_with_token(&routes::image(image_in_b, blog_a), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Image not found in this blog");

        let list = app.get_without_token(&routes::images(blog_b)).await;
        assert_eq!(list.body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_image_is_not_found() {
        let app = TestApp::spawn().await;
        let (token, _) = app.create_user("alice").await;
        let blog_id = app.create_blog(&token, "Gallery").await;

        let res = app
            .delete_with_token(&routes::image(999, blog_id), &token)
            .await;

        assert_eq!(res.status, 404);
    }
}
