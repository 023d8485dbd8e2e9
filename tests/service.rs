use chrono::{Duration, Utc};
use uuid::Uuid;

use todolist::entities::todo;
use todolist::services::{TodoService, UserService};
use todolist::storage::Storage;
use todolist::user;

async fn setup(name: &str) -> (Storage, todolist::user::Model) {
    let storage = Storage::open_in_memory(name).await.unwrap();
    let owner = UserService::create_user(&storage.conn, "alice@example.com", Some("Alice"))
        .await
        .unwrap();
    (storage, owner)
}

fn new_item(title: &str) -> todo::Model {
    todo::Model {
        id: Uuid::new_v4(),
        user_id: Uuid::nil(), // overwritten by add_item
        title: title.to_string(),
        content: None,
        done: false,
        tag: None,
        added_at: Utc::now(),
        due_to: None,
    }
}

#[tokio::test]
async fn test_add_and_get_item() {
    let (storage, owner) = setup("svc_add_get").await;

    let item = new_item("Buy milk");
    let id = item.id;
    assert!(TodoService::add_item(&storage.conn, item, owner.id).await.unwrap());

    let stored = TodoService::get_item(&storage.conn, id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Buy milk");
    assert_eq!(stored.user_id, owner.id);
    assert!(!stored.done);

    assert!(TodoService::exists(&storage.conn, id).await.unwrap());
    assert!(!TodoService::exists(&storage.conn, Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn test_add_item_rejects_invalid_payloads() {
    let (storage, owner) = setup("svc_add_invalid").await;

    let short_title = new_item("ab");
    assert!(!TodoService::add_item(&storage.conn, short_title, owner.id).await.unwrap());

    let mut short_content = new_item("Valid title");
    short_content.content = Some("too short".to_string());
    assert!(!TodoService::add_item(&storage.conn, short_content, owner.id).await.unwrap());

    // Nothing was written
    let items = TodoService::get_incomplete_items(&storage.conn, owner.id).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_complete_incomplete_split() {
    let (storage, owner) = setup("svc_split").await;

    let open_item = new_item("Open task");
    let open_id = open_item.id;
    TodoService::add_item(&storage.conn, open_item, owner.id).await.unwrap();

    let mut done_item = new_item("Done task");
    done_item.done = true;
    let done_id = done_item.id;
    TodoService::add_item(&storage.conn, done_item, owner.id).await.unwrap();

    let incomplete = TodoService::get_incomplete_items(&storage.conn, owner.id).await.unwrap();
    assert_eq!(incomplete.len(), 1);
    assert_eq!(incomplete[0].id, open_id);

    let complete = TodoService::get_complete_items(&storage.conn, owner.id).await.unwrap();
    assert_eq!(complete.len(), 1);
    assert_eq!(complete[0].id, done_id);
}

#[tokio::test]
async fn test_listings_are_scoped_to_owner() {
    let (storage, owner) = setup("svc_scoped").await;
    let other = UserService::create_user(&storage.conn, "bob@example.com", None)
        .await
        .unwrap();

    TodoService::add_item(&storage.conn, new_item("Mine"), owner.id).await.unwrap();
    TodoService::add_item(&storage.conn, new_item("Theirs"), other.id).await.unwrap();

    let mine = TodoService::get_incomplete_items(&storage.conn, owner.id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].title, "Mine");
}

#[tokio::test]
async fn test_recently_added_is_capped_and_newest_first() {
    let (storage, owner) = setup("svc_recent").await;

    for i in 0..7 {
        let mut item = new_item(&format!("Task {i}"));
        item.added_at = Utc::now() - Duration::minutes(60 - i);
        TodoService::add_item(&storage.conn, item, owner.id).await.unwrap();
    }

    let recent = TodoService::get_recently_added_items(&storage.conn, owner.id).await.unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].title, "Task 6");
    assert_eq!(recent[4].title, "Task 2");
}

#[tokio::test]
async fn test_due_soon_window() {
    let (storage, owner) = setup("svc_due_soon").await;

    let mut due_tomorrow = new_item("Due tomorrow");
    due_tomorrow.due_to = Some(Utc::now() + Duration::hours(24));
    let due_id = due_tomorrow.id;
    TodoService::add_item(&storage.conn, due_tomorrow, owner.id).await.unwrap();

    let mut due_next_week = new_item("Due next week");
    due_next_week.due_to = Some(Utc::now() + Duration::hours(24 * 7));
    TodoService::add_item(&storage.conn, due_next_week, owner.id).await.unwrap();

    let mut done_but_due = new_item("Done already");
    done_but_due.due_to = Some(Utc::now() + Duration::hours(12));
    done_but_due.done = true;
    TodoService::add_item(&storage.conn, done_but_due, owner.id).await.unwrap();

    TodoService::add_item(&storage.conn, new_item("No due date"), owner.id).await.unwrap();

    let due_soon = TodoService::get_due_soon_items(&storage.conn, owner.id).await.unwrap();
    assert_eq!(due_soon.len(), 1);
    assert_eq!(due_soon[0].id, due_id);
}

#[tokio::test]
async fn test_items_by_tag() {
    let (storage, owner) = setup("svc_bytag").await;

    let mut tagged = new_item("Tagged task");
    tagged.tag = Some("errands".to_string());
    TodoService::add_item(&storage.conn, tagged, owner.id).await.unwrap();

    TodoService::add_item(&storage.conn, new_item("Untagged task"), owner.id).await.unwrap();

    let items = TodoService::get_items_by_tag(&storage.conn, owner.id, "errands").await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Tagged task");

    let none = TodoService::get_items_by_tag(&storage.conn, owner.id, "work").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_update_done_is_idempotent() {
    let (storage, owner) = setup("svc_done_idempotent").await;

    let item = new_item("Finish report");
    let id = item.id;
    TodoService::add_item(&storage.conn, item, owner.id).await.unwrap();

    assert!(TodoService::update_done(&storage.conn, id, owner.id).await.unwrap());
    assert!(TodoService::update_done(&storage.conn, id, owner.id).await.unwrap());

    let stored = TodoService::get_item(&storage.conn, id).await.unwrap().unwrap();
    assert!(stored.done);
}

#[tokio::test]
async fn test_update_done_requires_ownership() {
    let (storage, owner) = setup("svc_done_owner").await;
    let other = UserService::create_user(&storage.conn, "bob@example.com", None)
        .await
        .unwrap();

    let item = new_item("Private task");
    let id = item.id;
    TodoService::add_item(&storage.conn, item, owner.id).await.unwrap();

    assert!(!TodoService::update_done(&storage.conn, id, other.id).await.unwrap());
    assert!(!TodoService::update_done(&storage.conn, Uuid::new_v4(), owner.id).await.unwrap());
}

#[tokio::test]
async fn test_update_todo_full_update() {
    let (storage, owner) = setup("svc_update").await;

    let item = new_item("Initial title");
    let id = item.id;
    TodoService::add_item(&storage.conn, item, owner.id).await.unwrap();

    let mut changed = TodoService::get_item(&storage.conn, id).await.unwrap().unwrap();
    changed.title = "Renamed title".to_string();
    changed.tag = Some("errands".to_string());
    changed.due_to = Some(Utc::now() + Duration::hours(3));

    assert!(TodoService::update_todo(&storage.conn, changed, owner.id).await.unwrap());

    let stored = TodoService::get_item(&storage.conn, id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Renamed title");
    assert_eq!(stored.tag.as_deref(), Some("errands"));
    assert!(stored.due_to.is_some());
}

#[tokio::test]
async fn test_update_todo_rejects_done_missing_and_foreign_items() {
    let (storage, owner) = setup("svc_update_reject").await;
    let other = UserService::create_user(&storage.conn, "bob@example.com", None)
        .await
        .unwrap();

    let item = new_item("Owned task");
    let id = item.id;
    TodoService::add_item(&storage.conn, item, owner.id).await.unwrap();

    let stored = TodoService::get_item(&storage.conn, id).await.unwrap().unwrap();

    // Wrong user
    assert!(!TodoService::update_todo(&storage.conn, stored.clone(), other.id).await.unwrap());

    // Missing item
    let mut missing = stored.clone();
    missing.id = Uuid::new_v4();
    assert!(!TodoService::update_todo(&storage.conn, missing, owner.id).await.unwrap());

    // Done items cannot be fully updated
    TodoService::update_done(&storage.conn, id, owner.id).await.unwrap();
    assert!(!TodoService::update_todo(&storage.conn, stored, owner.id).await.unwrap());
}

#[tokio::test]
async fn test_last_write_wins_on_sequential_updates() {
    let (storage, owner) = setup("svc_last_write").await;

    let item = new_item("Contested task");
    let id = item.id;
    TodoService::add_item(&storage.conn, item, owner.id).await.unwrap();

    let base = TodoService::get_item(&storage.conn, id).await.unwrap().unwrap();

    let mut first = base.clone();
    first.title = "First writer".to_string();
    let mut second = base;
    second.title = "Second writer".to_string();

    TodoService::update_todo(&storage.conn, first, owner.id).await.unwrap();
    TodoService::update_todo(&storage.conn, second, owner.id).await.unwrap();

    let stored = TodoService::get_item(&storage.conn, id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Second writer");
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let (storage, owner) = setup("svc_delete").await;

    let item = new_item("Doomed task");
    let id = item.id;
    TodoService::add_item(&storage.conn, item, owner.id).await.unwrap();

    assert!(TodoService::delete_todo(&storage.conn, id, owner.id).await.unwrap());
    assert!(TodoService::get_item(&storage.conn, id).await.unwrap().is_none());

    // Second delete reports the miss
    assert!(!TodoService::delete_todo(&storage.conn, id, owner.id).await.unwrap());
}

#[tokio::test]
async fn test_delete_requires_ownership() {
    let (storage, owner) = setup("svc_delete_owner").await;
    let other = UserService::create_user(&storage.conn, "bob@example.com", None)
        .await
        .unwrap();

    let item = new_item("Protected task");
    let id = item.id;
    TodoService::add_item(&storage.conn, item, owner.id).await.unwrap();

    assert!(!TodoService::delete_todo(&storage.conn, id, other.id).await.unwrap());
    assert!(TodoService::get_item(&storage.conn, id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_save_file_attach_replace_and_cascade() {
    let (storage, owner) = setup("svc_files").await;

    let item = new_item("Task with attachment");
    let id = item.id;
    TodoService::add_item(&storage.conn, item, owner.id).await.unwrap();

    assert!(
        TodoService::save_file(&storage.conn, id, owner.id, "uploads/a.txt", 42)
            .await
            .unwrap()
    );
    let file = TodoService::get_file(&storage.conn, id).await.unwrap().unwrap();
    assert_eq!(file.path, "uploads/a.txt");
    assert_eq!(file.size, 42);

    // Saving again replaces the metadata
    assert!(
        TodoService::save_file(&storage.conn, id, owner.id, "uploads/b.txt", 1024)
            .await
            .unwrap()
    );
    let file = TodoService::get_file(&storage.conn, id).await.unwrap().unwrap();
    assert_eq!(file.path, "uploads/b.txt");
    assert_eq!(file.size, 1024);

    // Unknown todo and foreign owner both fail
    assert!(
        !TodoService::save_file(&storage.conn, Uuid::new_v4(), owner.id, "x", 1)
            .await
            .unwrap()
    );

    // Deleting the todo removes the file row
    TodoService::delete_todo(&storage.conn, id, owner.id).await.unwrap();
    assert!(TodoService::get_file(&storage.conn, id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_user_token_resolution() {
    let (storage, owner) = setup("svc_users").await;

    let resolved = UserService::find_by_token(&storage.conn, &owner.api_token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.id, owner.id);
    assert_eq!(resolved.email, "alice@example.com");

    assert!(UserService::find_by_token(&storage.conn, "bogus").await.unwrap().is_none());

    let by_id: Option<user::Model> = UserService::find_by_id(&storage.conn, owner.id).await.unwrap();
    assert!(by_id.is_some());
}
