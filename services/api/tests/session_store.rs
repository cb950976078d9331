//! Integration tests for the in-memory admin session store.

use planner_api::adapters::{AdminCredential, InMemorySessionStore};
use std::collections::HashSet;
use std::sync::Arc;
use weekly_planner_core::domain::SessionToken;
use weekly_planner_core::ports::{PortError, SessionStore};

fn store() -> InMemorySessionStore {
    InMemorySessionStore::new(AdminCredential::new("admin", "plan123").unwrap())
}

#[tokio::test]
async fn correct_credentials_issue_a_valid_token() {
    let store = store();
    let token = store.login("admin", "plan123").await.unwrap();
    assert!(!token.as_str().is_empty());
    assert!(store.validate(&token).await);
    assert_eq!(store.active_sessions().await, 1);
}

#[tokio::test]
async fn wrong_credentials_are_all_unauthorized() {
    let store = store();
    for (username, password) in [("admin", "wrong"), ("Admin", "plan123"), ("", ""), ("admin", "")] {
        assert_eq!(
            store.login(username, password).await,
            Err(PortError::Unauthorized),
            "{}:{}",
            username,
            password
        );
    }
    assert_eq!(store.active_sessions().await, 0);
}

#[tokio::test]
async fn every_login_gets_its_own_token() {
    let store = store();
    let mut seen = HashSet::new();
    for _ in 0..5 {
        let token = store.login("admin", "plan123").await.unwrap();
        assert!(seen.insert(token));
    }
    assert_eq!(store.active_sessions().await, 5);
    for token in &seen {
        assert!(store.validate(token).await);
    }
}

#[tokio::test]
async fn unknown_tokens_are_not_valid() {
    let store = store();
    store.login("admin", "plan123").await.unwrap();
    assert!(!store.validate(&SessionToken::new("")).await);
    assert!(!store.validate(&SessionToken::new("guess")).await);
}

#[tokio::test]
async fn logout_revokes_only_that_token_and_is_idempotent() {
    let store = store();
    let first = store.login("admin", "plan123").await.unwrap();
    let second = store.login("admin", "plan123").await.unwrap();

    store.logout(&first).await;
    assert!(!store.validate(&first).await);
    assert!(store.validate(&second).await);

    store.logout(&first).await;
    store.logout(&SessionToken::new("never-issued")).await;
    assert_eq!(store.active_sessions().await, 1);
}

#[tokio::test(flavor = "current_thread")]
async fn password_checks_do_not_stall_the_runtime() {
    let store = Arc::new(store());
    let logins: Vec<_> = (0..4)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                let password = if i == 0 { "wrong" } else { "plan123" };
                store.login("admin", password).await
            })
        })
        .collect();

    // This task keeps getting polled while the hashes are verified elsewhere.
    let mut ticks = 0;
    while logins.iter().any(|login| !login.is_finished()) {
        tokio::task::yield_now().await;
        ticks += 1;
    }
    assert!(ticks > 1);

    let mut outcomes = Vec::new();
    for login in logins {
        outcomes.push(login.await.unwrap());
    }
    assert_eq!(outcomes[0], Err(PortError::Unauthorized));
    let tokens: HashSet<_> = outcomes[1..].iter().cloned().map(Result::unwrap).collect();
    assert_eq!(tokens.len(), 3);
    assert_eq!(store.active_sessions().await, 3);
}
