mod common;

use std::sync::Arc;

use common::{coach, player};
use newteam::{
    DuckdbMemberRepository, DuckdbUserRepository, MemberRepository, User, UserRepository,
    UserRole,
};
use tempfile::tempdir;

#[tokio::test]
async fn duckdb_member_repository_save_assigns_ids_and_timestamps() {
    let repo = DuckdbMemberRepository::in_memory().expect("duckdb init");

    let first = repo
        .save(&player("Ana", "Pérez", 9, 1000.0).with_id(77))
        .await
        .expect("save first");
    let second = repo
        .save(&coach("Luis", "Díaz", 2000.0))
        .await
        .expect("save second");

    assert!(first.id() > 0, "incoming id must be ignored");
    assert_ne!(first.id(), 77);
    assert!(second.id() > first.id());
    assert_eq!(first.created_at(), first.updated_at());

    let found = repo
        .find_by_id(first.id())
        .await
        .expect("find_by_id")
        .expect("member exists");
    assert_eq!(found.full_name(), "Ana Pérez");
    assert_eq!(found.player_stats(), first.player_stats());
    assert_eq!(found.created_at(), first.created_at());

    let coach = repo
        .find_by_id(second.id())
        .await
        .expect("find_by_id")
        .expect("coach exists");
    assert!(coach.is_coach());
    assert_eq!(coach.specialty(), second.specialty());

    assert_eq!(repo.count().await.expect("count"), 2);
}

#[tokio::test]
async fn duckdb_member_repository_missing_ids_yield_none() {
    let repo = DuckdbMemberRepository::in_memory().expect("duckdb init");

    assert!(repo.find_by_id(42).await.expect("find").is_none());
    assert!(repo
        .update(42, &coach("X", "Y", 1.0))
        .await
        .expect("update")
        .is_none());
    assert!(repo.delete(42).await.expect("delete").is_none());
}

#[tokio::test]
async fn duckdb_member_repository_update_keeps_created_at() {
    let repo = DuckdbMemberRepository::in_memory().expect("duckdb init");
    let stored = repo
        .save(&player("Iván", "Rakitić", 4, 5000.0))
        .await
        .expect("save");

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    // A player may be turned into a coach
    let updated = repo
        .update(stored.id(), &coach("Iván", "Rakitić", 7000.0))
        .await
        .expect("update")
        .expect("member exists");

    assert_eq!(updated.id(), stored.id());
    assert_eq!(updated.created_at(), stored.created_at());
    assert!(updated.updated_at() > stored.updated_at());
    assert!(updated.is_coach());
    assert_eq!(updated.salary(), 7000.0);
    assert!(updated.player_stats().is_none());
}

#[tokio::test]
async fn duckdb_member_repository_delete_returns_removed_member() {
    let repo = DuckdbMemberRepository::in_memory().expect("duckdb init");
    let stored = repo.save(&coach("Zinedine", "Zidane", 1.0)).await.expect("save");

    let deleted = repo
        .delete(stored.id())
        .await
        .expect("delete")
        .expect("member existed");
    assert_eq!(deleted.full_name(), "Zinedine Zidane");
    assert!(repo.find_by_id(stored.id()).await.expect("find").is_none());
    assert_eq!(repo.count().await.expect("count"), 0);
}

#[tokio::test]
async fn duckdb_member_repository_batch_and_find_all_ordering() {
    let repo = DuckdbMemberRepository::in_memory().expect("duckdb init");

    let stored = repo
        .save_batch(&[
            player("A", "One", 1, 1.0),
            coach("B", "Two", 2.0),
            player("C", "Three", 3, 3.0),
        ])
        .await
        .expect("save_batch");
    assert_eq!(stored.len(), 3);

    let all = repo.find_all().await.expect("find_all");
    let ids: Vec<i64> = all.iter().map(|m| m.id()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(all[1].last_name(), "Two");

    assert!(repo.save_batch(&[]).await.expect("empty batch").is_empty());
}

#[tokio::test]
async fn duckdb_member_repository_persists_across_reopen() {
    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("newteam.duckdb");

    let id = {
        let repo = DuckdbMemberRepository::new(&db_path, true).expect("duckdb init");
        repo.save(&player("Marta", "Vieira", 10, 9000.0).with_image("images/m.png"))
            .await
            .expect("save")
            .id()
    };

    let repo = DuckdbMemberRepository::new(&db_path, true).expect("duckdb reopen");
    let found = repo
        .find_by_id(id)
        .await
        .expect("find")
        .expect("member persisted");
    assert_eq!(found.image(), "images/m.png");
    assert_eq!(found.birth_date(), common::date(1996, 4, 12));
}

#[tokio::test]
async fn duckdb_user_repository_shares_connection_and_rejects_duplicates() {
    let members = DuckdbMemberRepository::in_memory().expect("duckdb init");
    let users = Arc::new(
        DuckdbUserRepository::with_connection(members.shared_connection(), true)
            .await
            .expect("user repo"),
    );

    assert_eq!(users.count().await.expect("count"), 0);

    users
        .save(&User::new("admin", "$2b$04$hash", UserRole::Admin))
        .await
        .expect("save");

    let err = users
        .save(&User::new("admin", "other", UserRole::User))
        .await
        .unwrap_err();
    assert!(err.is_already_exists());

    let found = users
        .find_by_username("admin")
        .await
        .expect("find")
        .expect("user exists");
    assert_eq!(found.role(), UserRole::Admin);
    assert!(users.find_by_username("nobody").await.expect("find").is_none());
    assert_eq!(users.count().await.expect("count"), 1);
}
