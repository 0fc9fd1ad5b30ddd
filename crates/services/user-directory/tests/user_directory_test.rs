//! End-to-end tests of the assembled directory service.

mod support;

use common::{AppError, PaginationParams};
use domain::{ExternalIdentity, UserChanges};
use user_directory_lib::{
    directory,
    repository::{UserOrder, UserSortKey},
    UserService,
};

use support::{alice, new_user, test_database};

fn github_identity(email: &str) -> ExternalIdentity {
    ExternalIdentity {
        email: email.to_string(),
        name: Some("Octo".to_string()),
        auth_provider: "github".to_string(),
    }
}

#[tokio::test]
async fn test_register_find_delete_lifecycle() {
    let db = test_database().await;
    let users = directory(db.get_connection());

    let alice = users.register(alice()).await.unwrap();
    assert_eq!(users.get_user_by_email("a@example.com").await.unwrap().id, alice.id);

    let duplicate = users
        .register(new_user("a@example.com", Some("Alice Again"), "github"))
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    users.delete_user(alice.id).await.unwrap();
    assert!(matches!(users.get_user(alice.id).await, Err(AppError::NotFound)));
    assert!(users.delete_user(alice.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_register_rejects_invalid_input_without_writing() {
    let db = test_database().await;
    let users = directory(db.get_connection());

    let result = users.register(new_user("not-an-email", None, "google")).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let result = users.register(new_user("a@example.com", None, "")).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let page = users
        .list_users(PaginationParams::default(), UserOrder::default())
        .await
        .unwrap();
    assert_eq!(page.meta.total, 0);
}

#[tokio::test]
async fn test_update_user_changes_email_and_frees_old_one() {
    let db = test_database().await;
    let users = directory(db.get_connection());

    let alice = users.register(alice()).await.unwrap();
    let moved = users
        .update_user(alice.id, UserChanges::change_email("alice@example.org"))
        .await
        .unwrap();

    assert_eq!(moved.id, alice.id);
    assert_eq!(moved.email, "alice@example.org");
    assert!(users.get_user_by_email("a@example.com").await.unwrap_err().is_not_found());

    // The released address is available to someone else
    let other = users
        .register(new_user("a@example.com", None, "github"))
        .await
        .unwrap();
    assert_ne!(other.id, alice.id);
}

#[tokio::test]
async fn test_update_user_rejects_invalid_email() {
    let db = test_database().await;
    let users = directory(db.get_connection());

    let alice = users.register(alice()).await.unwrap();
    let result = users
        .update_user(alice.id, UserChanges::change_email("nope"))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(users.get_user(alice.id).await.unwrap().email, "a@example.com");
}

#[tokio::test]
async fn test_list_users_reports_page_metadata() {
    let db = test_database().await;
    let users = directory(db.get_connection());

    for email in ["c@example.com", "a@example.com", "b@example.com"] {
        users.register(new_user(email, None, "google")).await.unwrap();
    }

    let page = users
        .list_users(PaginationParams::new(2, 2), UserOrder::asc(UserSortKey::Email))
        .await
        .unwrap();

    assert_eq!(page.meta.page, 2);
    assert_eq!(page.meta.per_page, 2);
    assert_eq!(page.meta.total, 3);
    assert_eq!(page.meta.total_pages, 2);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].email, "c@example.com");
}

#[tokio::test]
async fn test_list_users_defaults_to_registration_order() {
    let db = test_database().await;
    let users = directory(db.get_connection());

    let mut registered = Vec::new();
    for email in ["z@example.com", "m@example.com", "a@example.com"] {
        registered.push(users.register(new_user(email, None, "google")).await.unwrap());
    }

    let page = users
        .list_users(PaginationParams::default(), UserOrder::default())
        .await
        .unwrap();

    let mut expected = registered.clone();
    expected.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    let listed: Vec<_> = page.data.iter().map(|u| u.id).collect();
    let expected: Vec<_> = expected.iter().map(|u| u.id).collect();
    assert_eq!(listed, expected);
}

#[tokio::test]
async fn test_sign_in_registers_once_then_resolves_same_account() {
    let db = test_database().await;
    let users = directory(db.get_connection());

    let first = users.sign_in(github_identity("o@example.com")).await.unwrap();
    let second = users.sign_in(github_identity("o@example.com")).await.unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.user.id, second.user.id);
    assert_eq!(second.user.created_at, first.user.created_at);
    assert!(second.user.updated_at >= first.user.updated_at);
}

#[tokio::test]
async fn test_sign_in_with_other_provider_keeps_original_provider() {
    let db = test_database().await;
    let users = directory(db.get_connection());

    let alice = users.register(alice()).await.unwrap();
    let signed_in = users.sign_in(github_identity("a@example.com")).await.unwrap();

    assert!(!signed_in.created);
    assert_eq!(signed_in.user.id, alice.id);
    assert_eq!(signed_in.user.auth_provider, "google");
    assert_eq!(signed_in.user.name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn test_concurrent_first_sign_ins_share_one_account() {
    let db = test_database().await;
    let users = directory(db.get_connection());

    let (left, right) = tokio::join!(
        users.sign_in(github_identity("race@example.com")),
        users.sign_in(github_identity("race@example.com")),
    );
    let (left, right) = (left.unwrap(), right.unwrap());

    assert_eq!(left.user.id, right.user.id);
    assert_eq!(u8::from(left.created) + u8::from(right.created), 1);
}
