mod common;

use poseidon_backend::config::AdminSeed;
use poseidon_backend::error::ApiError;
use poseidon_backend::models::dto::{LoginRequest, UserRegistration};
use poseidon_backend::services::identity::UserStore;
use poseidon_backend::services::identity_service::IdentityService;
use poseidon_backend::utils::jwt::JwtService;

use common::{user, FakeUserStore};

fn registration(username: &str) -> UserRegistration {
    UserRegistration {
        username: username.to_string(),
        full_name: "Jane Doe".to_string(),
        email: format!("{}@example.com", username),
        password: "P@ssw0rd!".to_string(),
    }
}

#[tokio::test]
async fn test_register_assigns_user_role() {
    let store = FakeUserStore::default();

    let created = IdentityService::register(&store, registration("jane"))
        .await
        .unwrap();

    assert_eq!(store.user_count(), 1);
    assert_eq!(store.roles_of(&created).await.unwrap(), vec!["User".to_string()]);
    assert_eq!(store.deletes(), 0);
}

#[tokio::test]
async fn test_role_failure_removes_account() {
    let store = FakeUserStore {
        fail_role: Some("Role User does not exist.".to_string()),
        ..Default::default()
    };

    let err = IdentityService::register(&store, registration("jane"))
        .await
        .unwrap_err();

    match err {
        ApiError::Problem { title, detail } => {
            assert_eq!(title, "User registration failed");
            assert!(detail.contains("Role User does not exist."));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(store.user_count(), 0);
    assert_eq!(store.deletes(), 1);
}

#[tokio::test]
async fn test_role_and_delete_failures_are_joined() {
    let store = FakeUserStore {
        fail_role: Some("role failure".to_string()),
        fail_delete: Some("delete failure".to_string()),
        ..Default::default()
    };

    let err = IdentityService::register(&store, registration("jane"))
        .await
        .unwrap_err();

    match err {
        ApiError::Problem { detail, .. } => assert_eq!(detail, "role failure; delete failure"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(store.deletes(), 1);
}

#[tokio::test]
async fn test_create_failure_skips_role() {
    let store = FakeUserStore {
        fail_create: Some("Passwords must be at least 6 characters.".to_string()),
        ..Default::default()
    };

    let err = IdentityService::register(&store, registration("jane"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Problem { .. }));
    assert_eq!(store.user_count(), 0);
    assert_eq!(store.deletes(), 0);
    assert!(store.roles.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_registration_never_reaches_store() {
    let store = FakeUserStore::default();
    let mut invalid = registration("jane");
    invalid.email = "nope".to_string();
    invalid.full_name = String::new();

    let err = IdentityService::register(&store, invalid).await.unwrap_err();

    match err {
        ApiError::Validation(errors) => {
            assert!(errors.contains_key("email"));
            assert!(errors.contains_key("fullName"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(store.user_count(), 0);
}

#[tokio::test]
async fn test_list_and_get_project_users() {
    let store = FakeUserStore::with_users(vec![
        user("1", "jane", "Jane Doe", "jane@example.com"),
        user("2", "john", "John Doe", "john@example.com"),
    ]);

    let users = IdentityService::list(&store).await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].user_name, "john");

    let jane = IdentityService::get(&store, "1").await.unwrap();
    assert_eq!(jane.email, "jane@example.com");

    let missing = IdentityService::get(&store, "3").await.unwrap_err();
    assert!(matches!(missing, ApiError::UserNotFound));
}

#[tokio::test]
async fn test_update_keeps_password() {
    let store = FakeUserStore::with_users(vec![user("1", "jane", "Jane Doe", "jane@example.com")]);
    let mut changes = registration("jane.smith");
    changes.password = "something-else".to_string();

    IdentityService::update(&store, "1", changes).await.unwrap();

    let stored = store.find_by_id("1").await.unwrap().unwrap();
    assert_eq!(stored.user_name, "jane.smith");
    assert_eq!(stored.email, "jane.smith@example.com");
    assert!(store.check_password(&stored, "P@ssw0rd!").await.unwrap());
}

#[tokio::test]
async fn test_update_errors() {
    let store = FakeUserStore {
        fail_update: Some("Username 'john' is already taken.".to_string()),
        ..FakeUserStore::with_users(vec![user("1", "jane", "Jane Doe", "jane@example.com")])
    };

    let missing = IdentityService::update(&store, "9", registration("x"))
        .await
        .unwrap_err();
    assert!(matches!(missing, ApiError::UserNotFound));

    let refused = IdentityService::update(&store, "1", registration("john"))
        .await
        .unwrap_err();
    match refused {
        ApiError::Problem { title, detail } => {
            assert_eq!(title, "User update failed");
            assert_eq!(detail, "Username 'john' is already taken.");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_delete() {
    let store = FakeUserStore::with_users(vec![user("1", "jane", "Jane Doe", "jane@example.com")]);

    let missing = IdentityService::delete(&store, "9").await.unwrap_err();
    assert!(matches!(missing, ApiError::UserNotFound));
    assert_eq!(store.deletes(), 0);

    IdentityService::delete(&store, "1").await.unwrap();
    assert_eq!(store.user_count(), 0);

    let failing = FakeUserStore {
        fail_delete: Some("locked".to_string()),
        ..FakeUserStore::with_users(vec![user("1", "jane", "Jane Doe", "jane@example.com")])
    };
    let err = IdentityService::delete(&failing, "1").await.unwrap_err();
    assert!(matches!(err, ApiError::Problem { .. }));
    assert_eq!(failing.user_count(), 1);
}

#[tokio::test]
async fn test_login() {
    let store = FakeUserStore::default();
    let jwt = JwtService::new("secret", chrono::Duration::hours(1));
    let created = IdentityService::register(&store, registration("jane"))
        .await
        .unwrap();

    let token = IdentityService::login(
        &store,
        &jwt,
        LoginRequest {
            username: "jane".to_string(),
            password: "P@ssw0rd!".to_string(),
        },
    )
    .await
    .unwrap();
    let claims = jwt.verify_token(&token).unwrap();
    assert_eq!(claims.sub, created.id);
    assert_eq!(claims.roles, vec!["User".to_string()]);

    for (username, password) in [("jane", "bad"), ("ghost", "P@ssw0rd!")] {
        let err = IdentityService::login(
            &store,
            &jwt,
            LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials));
    }
}

#[tokio::test]
async fn test_seed_admin_is_idempotent() {
    let store = FakeUserStore::default();
    let seed = AdminSeed {
        username: "admin".to_string(),
        password: "Adm1n!pass".to_string(),
        email: "admin@localhost".to_string(),
    };

    IdentityService::seed_admin(&store, &seed).await.unwrap();
    IdentityService::seed_admin(&store, &seed).await.unwrap();

    assert_eq!(store.user_count(), 1);
    let admin = store.find_by_name("admin").await.unwrap().unwrap();
    assert_eq!(store.roles_of(&admin).await.unwrap(), vec!["Admin".to_string()]);
}
