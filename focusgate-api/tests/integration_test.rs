/// Integration tests for the FocusGate server
///
/// These tests drive the full router end-to-end through `tower::Service`:
/// - Session gate behavior (deny-by-default, allow-list)
/// - Registration and login flows, including duplicate and bad credentials
/// - Todo CRUD with validation, progress, and ownership scoping
/// - Blocklist CRUD with normalization and ownership scoping
/// - Account deletion cascade
/// - The quote proxy endpoint

mod common;

use common::TestContext;
use focusgate_shared::models::{site::BlockedSite, todo::Todo, user::User};

/// Anonymous requests bounce to the login page, for registered and
/// unregistered paths alike
#[tokio::test]
async fn test_gate_redirects_anonymous() {
    let ctx = TestContext::new().await.unwrap();

    for path in ["/", "/todo", "/blocker", "/quotes", "/logout", "/admin"] {
        let response = ctx.send(common::get(path, None)).await;
        assert_eq!(response.status(), 303, "path {}", path);
        assert_eq!(common::location(&response), "/login", "path {}", path);
    }
}

/// A garbage session cookie counts as anonymous, not as an error
#[tokio::test]
async fn test_gate_rejects_invalid_cookie() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(common::get("/todo", Some("session=not-a-real-token")))
        .await;
    assert_eq!(response.status(), 303);
    assert_eq!(common::location(&response), "/login");
}

/// The health probe and auth pages are reachable without a session
#[tokio::test]
async fn test_public_routes() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.send(common::get("/health", None)).await;
    assert_eq!(response.status(), 200);
    let body = common::body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    for path in ["/login", "/register"] {
        let response = ctx.send(common::get(path, None)).await;
        assert_eq!(response.status(), 200, "path {}", path);
    }
}

/// Register → login round-trip with identical credentials succeeds and
/// yields a session cookie that passes the gate
#[tokio::test]
async fn test_register_login_roundtrip() {
    let ctx = TestContext::new().await.unwrap();

    let cookie = ctx.register_and_login("alice", "correct horse").await;

    let response = ctx.send(common::get("/", Some(&cookie))).await;
    assert_eq!(response.status(), 200);

    let body = common::body_json(response).await;
    assert_eq!(body["page"], "home");
    assert!(body["user_id"].is_i64());
}

/// Empty credentials are rejected before any store access
#[tokio::test]
async fn test_register_requires_credentials() {
    let ctx = TestContext::new().await.unwrap();

    for body in ["username=&password=x", "username=x&password=", "username=%20%20&password=x"] {
        let response = ctx.send(common::form_post("/register", None, body)).await;
        assert_eq!(response.status(), 303, "body {}", body);
        assert!(
            common::location(&response).starts_with("/register?notice="),
            "body {}",
            body
        );
    }

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&ctx.db)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

/// A second registration with a taken username bounces back with a notice
#[tokio::test]
async fn test_register_duplicate_username() {
    let ctx = TestContext::new().await.unwrap();
    let body = common::credentials_body("alice", "pw-one");

    let response = ctx.send(common::form_post("/register", None, &body)).await;
    assert!(common::location(&response).starts_with("/login?notice="));

    let other = common::credentials_body("alice", "pw-two");
    let response = ctx.send(common::form_post("/register", None, &other)).await;
    assert_eq!(response.status(), 303);
    assert!(common::location(&response).starts_with("/register?notice=Username%20already%20exists"));
}

/// Bad credentials redirect back to login without a cookie, and the
/// notice never says which field was wrong
#[tokio::test]
async fn test_login_bad_credentials() {
    let ctx = TestContext::new().await.unwrap();
    ctx.register_and_login("alice", "right-password").await;

    let wrong_password = common::credentials_body("alice", "wrong-password");
    let unknown_user = common::credentials_body("mallory", "whatever");

    for body in [wrong_password, unknown_user] {
        let response = ctx.send(common::form_post("/login", None, &body)).await;
        assert_eq!(response.status(), 303);
        assert!(common::location(&response)
            .starts_with("/login?notice=Invalid%20username%20or%20password"));
        assert!(common::set_cookie_token(&response).is_none());
    }
}

/// Logout clears the session cookie
#[tokio::test]
async fn test_logout_clears_cookie() {
    let ctx = TestContext::new().await.unwrap();
    let cookie = ctx.register_and_login("alice", "pw").await;

    let response = ctx.send(common::get("/logout", Some(&cookie))).await;
    assert_eq!(response.status(), 303);
    assert_eq!(common::location(&response), "/");

    let set_cookie = response.headers()["set-cookie"].to_str().unwrap();
    assert!(set_cookie.contains("Max-Age=0"));
}

/// Add/list/complete/undo/delete, with validation notices and progress
#[tokio::test]
async fn test_todo_lifecycle() {
    let ctx = TestContext::new().await.unwrap();
    let cookie = ctx.register_and_login("alice", "pw").await;

    // Too short after trimming.
    let response = ctx
        .send(common::form_post("/todo", Some(&cookie), "task=ab"))
        .await;
    assert!(common::location(&response).starts_with("/todo?notice=Please%20enter%20a%20valid%20task"));

    // Valid task.
    let response = ctx
        .send(common::form_post("/todo", Some(&cookie), "task=write%20tests"))
        .await;
    assert!(common::location(&response).starts_with("/todo?notice=Task%20added%20successfully"));

    // Duplicate of the same text.
    let response = ctx
        .send(common::form_post("/todo", Some(&cookie), "task=write%20tests"))
        .await;
    assert!(common::location(&response).starts_with("/todo?notice=Task%20already%20exists"));

    let body = common::body_json(ctx.send(common::get("/todo", Some(&cookie))).await).await;
    assert_eq!(body["todos"].as_array().unwrap().len(), 1);
    assert_eq!(body["progress"], 0);
    let id = body["todos"][0]["id"].as_i64().unwrap();

    // Complete it: 1 of 1 done = 100.
    let response = ctx
        .send(common::form_post(
            &format!("/todo/complete/{}", id),
            Some(&cookie),
            "",
        ))
        .await;
    assert_eq!(common::location(&response), "/todo");

    let body = common::body_json(ctx.send(common::get("/todo", Some(&cookie))).await).await;
    assert_eq!(body["progress"], 100);
    assert_eq!(body["todos"][0]["completed"], true);

    // Undo brings it back to 0.
    ctx.send(common::form_post(
        &format!("/todo/undo/{}", id),
        Some(&cookie),
        "",
    ))
    .await;
    let body = common::body_json(ctx.send(common::get("/todo", Some(&cookie))).await).await;
    assert_eq!(body["progress"], 0);

    // Delete empties the list.
    ctx.send(common::form_post(
        &format!("/todo/delete/{}", id),
        Some(&cookie),
        "",
    ))
    .await;
    let body = common::body_json(ctx.send(common::get("/todo", Some(&cookie))).await).await;
    assert!(body["todos"].as_array().unwrap().is_empty());
}

/// Mutating another user's task is a silent no-op
#[tokio::test]
async fn test_todo_ownership_scoping() {
    let ctx = TestContext::new().await.unwrap();
    let alice = ctx.register_and_login("alice", "pw").await;
    let bob = ctx.register_and_login("bob", "pw").await;

    ctx.send(common::form_post("/todo", Some(&alice), "task=read%20a%20book"))
        .await;
    let body = common::body_json(ctx.send(common::get("/todo", Some(&alice))).await).await;
    let id = body["todos"][0]["id"].as_i64().unwrap();

    // Bob completing Alice's task redirects like a hit but changes nothing.
    let response = ctx
        .send(common::form_post(
            &format!("/todo/complete/{}", id),
            Some(&bob),
            "",
        ))
        .await;
    assert_eq!(response.status(), 303);

    let body = common::body_json(ctx.send(common::get("/todo", Some(&alice))).await).await;
    assert_eq!(body["todos"][0]["completed"], false);

    // The same text is allowed on Bob's own list.
    let response = ctx
        .send(common::form_post("/todo", Some(&bob), "task=read%20a%20book"))
        .await;
    assert!(common::location(&response).starts_with("/todo?notice=Task%20added%20successfully"));
}

/// Add/list/remove blocked sites, with normalization and notices
#[tokio::test]
async fn test_blocker_lifecycle() {
    let ctx = TestContext::new().await.unwrap();
    let cookie = ctx.register_and_login("alice", "pw").await;

    // Input is normalized before storage.
    let response = ctx
        .send(common::form_post(
            "/blocker",
            Some(&cookie),
            "site=HTTPS%3A%2F%2FExample.com%2F",
        ))
        .await;
    assert!(common::location(&response).starts_with("/blocker?notice=example.com%20has%20been%20blocked"));

    // Another spelling of the same domain is a duplicate.
    let response = ctx
        .send(common::form_post("/blocker", Some(&cookie), "site=example.com"))
        .await;
    assert!(common::location(&response).starts_with("/blocker?notice=This%20site%20is%20already%20blocked"));

    // Rejected inputs.
    let response = ctx
        .send(common::form_post("/blocker", Some(&cookie), "site=%20%20"))
        .await;
    assert!(common::location(&response).starts_with("/blocker?notice=Please%20enter%20a%20site"));

    let response = ctx
        .send(common::form_post(
            "/blocker",
            Some(&cookie),
            "site=not%20a%20domain",
        ))
        .await;
    assert!(common::location(&response).starts_with("/blocker?notice=Invalid%20website%20address"));

    let body = common::body_json(ctx.send(common::get("/blocker", Some(&cookie))).await).await;
    let sites = body["sites"].as_array().unwrap();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0]["url"], "example.com");
    let site_id = sites[0]["id"].as_i64().unwrap();

    // Remove it.
    let response = ctx
        .send(common::form_post(
            "/remove_site",
            Some(&cookie),
            &format!("site_id={}", site_id),
        ))
        .await;
    assert!(common::location(&response).starts_with("/blocker?notice=Site%20removed%20successfully"));

    // Removing again reports not-found-or-unauthorized.
    let response = ctx
        .send(common::form_post(
            "/remove_site",
            Some(&cookie),
            &format!("site_id={}", site_id),
        ))
        .await;
    assert!(common::location(&response).starts_with("/blocker?notice=Could%20not%20remove%20site"));

    // Missing id is its own notice.
    let response = ctx
        .send(common::form_post("/remove_site", Some(&cookie), ""))
        .await;
    assert!(common::location(&response).starts_with("/blocker?notice=Invalid%20request"));
}

/// Removing another user's site fails and leaves the row intact
#[tokio::test]
async fn test_remove_site_ownership_scoping() {
    let ctx = TestContext::new().await.unwrap();
    let alice = ctx.register_and_login("alice", "pw").await;
    let bob = ctx.register_and_login("bob", "pw").await;

    ctx.send(common::form_post("/blocker", Some(&alice), "site=example.com"))
        .await;
    let body = common::body_json(ctx.send(common::get("/blocker", Some(&alice))).await).await;
    let site_id = body["sites"][0]["id"].as_i64().unwrap();

    let response = ctx
        .send(common::form_post(
            "/remove_site",
            Some(&bob),
            &format!("site_id={}", site_id),
        ))
        .await;
    assert!(common::location(&response).starts_with("/blocker?notice=Could%20not%20remove%20site"));

    let body = common::body_json(ctx.send(common::get("/blocker", Some(&alice))).await).await;
    assert_eq!(body["sites"].as_array().unwrap().len(), 1);
}

/// Account deletion removes the user's rows and ends the session; the
/// credentials stop working
#[tokio::test]
async fn test_delete_account_cascades() {
    let ctx = TestContext::new().await.unwrap();
    let cookie = ctx.register_and_login("alice", "pw").await;

    ctx.send(common::form_post("/todo", Some(&cookie), "task=water%20plants"))
        .await;
    ctx.send(common::form_post("/blocker", Some(&cookie), "site=example.com"))
        .await;

    let user = User::find_by_username(&ctx.db, "alice")
        .await
        .unwrap()
        .expect("alice should exist");

    let response = ctx
        .send(common::form_post("/delete_account", Some(&cookie), ""))
        .await;
    assert_eq!(response.status(), 303);
    assert_eq!(common::location(&response), "/register");
    assert!(response.headers()["set-cookie"]
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));

    assert!(User::find_by_id(&ctx.db, user.id).await.unwrap().is_none());
    assert!(Todo::list(&ctx.db, user.id).await.unwrap().is_empty());
    assert!(BlockedSite::list(&ctx.db, user.id).await.unwrap().is_empty());

    // The old credentials no longer authenticate.
    let body = common::credentials_body("alice", "pw");
    let response = ctx.send(common::form_post("/login", None, &body)).await;
    assert!(common::location(&response).starts_with("/login?notice=Invalid%20username"));
}

/// The quote endpoint serves whatever the configured source returns
#[tokio::test]
async fn test_quotes_endpoint() {
    let ctx = TestContext::new().await.unwrap();
    let cookie = ctx.register_and_login("alice", "pw").await;

    let response = ctx.send(common::get("/quotes", Some(&cookie))).await;
    assert_eq!(response.status(), 200);

    let body = common::body_json(response).await;
    assert_eq!(body["text"], common::TEST_QUOTE);
    assert_eq!(body["author"], "FocusGate");
}

/// A session minted directly (no login flow) also passes the gate
#[tokio::test]
async fn test_direct_session_cookie() {
    let ctx = TestContext::new().await.unwrap();

    let user = User::create(&ctx.db, "carol", "unused-hash").await.unwrap();
    let cookie = ctx.session_cookie_for(user.id);

    let response = ctx.send(common::get("/", Some(&cookie))).await;
    assert_eq!(response.status(), 200);

    let body = common::body_json(response).await;
    assert_eq!(body["user_id"], user.id);
}
