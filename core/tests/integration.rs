//! View flows against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port and drives every view over real
//! HTTP using ureq. Each test plays the host: it executes the `Pending` and
//! hands the response back to the view.

use bookstore_core::{
    ApiError, BookClient, BookEdit, BookId, CollectionView, CreatorView, Effect, EditorView,
    HttpMethod, HttpRequest, HttpResponse, Notice, Pending, Route, ViewState,
};
use serde_json::json;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
    }
    .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

fn round_trip(pending: &Pending) -> Result<HttpResponse, ApiError> {
    execute(pending.request.clone())
}

/// Start a mock server on a random port and return the API base URL.
fn spawn_server(books: Vec<mock_server::BookInput>) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, books).await
        })
        .unwrap();
    });

    format!("http://{addr}/api/v1")
}

fn book_input(title: &str) -> mock_server::BookInput {
    serde_json::from_value(json!({
        "title": title,
        "author": "Anon",
        "price": 100,
        "isbn": "978-0000000001",
        "description": "plain",
        "category": "novel",
        "year": 2000,
        "status": "available"
    }))
    .unwrap()
}

fn mount_collection(client: &BookClient) -> CollectionView {
    let (mut view, pending) = CollectionView::mount(client.clone());
    let effects = view.on_response(pending.ticket, round_trip(&pending));
    assert!(effects.is_empty());
    view
}

fn mount_editor(client: &BookClient, id: BookId) -> EditorView {
    let (mut view, pending) = EditorView::mount(client.clone(), id);
    view.on_response(pending.ticket, round_trip(&pending));
    view
}

#[test]
fn collection_mirrors_server_order() {
    let base = spawn_server(vec![book_input("A"), book_input("B"), book_input("C")]);
    let client = BookClient::new(&base);

    let view = mount_collection(&client);
    let titles: Vec<&str> = view.books().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, ["A", "B", "C"]);
}

#[test]
fn single_row_then_delete_shows_empty_state() {
    let base = spawn_server(vec![book_input("A")]);
    let client = BookClient::new(&base);

    let mut view = mount_collection(&client);
    let text = view.to_string();
    assert!(text.contains("ID: 1\n  A\n"), "{text}");

    let confirmation = view.request_delete(BookId(1), "A");
    assert!(confirmation.prompt().contains("\"A\" (ID: 1)"));
    let pending = view.confirm_delete(confirmation).unwrap();
    let effects = view.on_response(pending.ticket, round_trip(&pending));
    assert!(effects.is_empty());
    assert_eq!(view.to_string(), "No books found.\n");

    // The resource agrees.
    assert!(mount_collection(&client).books().is_empty());
}

#[test]
fn deleting_a_missing_book_reports_and_keeps_list() {
    let base = spawn_server(vec![book_input("A")]);
    let client = BookClient::new(&base);

    let mut view = mount_collection(&client);
    let pending = view.confirm_delete(view.request_delete(BookId(42), "ghost")).unwrap();
    let effects = view.on_response(pending.ticket, round_trip(&pending));

    assert_eq!(
        effects,
        vec![Effect::Notify(Notice::Error(
            "Failed to delete book: book not found".to_string()
        ))]
    );
    assert_eq!(view.books().len(), 1);
}

#[test]
fn editor_not_found_for_unknown_id() {
    let base = spawn_server(Vec::new());
    let client = BookClient::new(&base);

    let mut view = mount_editor(&client, BookId(7));
    assert!(view.state().is_failed());
    assert_eq!(view.to_string(), "Book not found.\n");
    assert!(view.save().is_err());
}

#[test]
fn edit_title_then_save_replaces_full_record() {
    let base = spawn_server(vec![book_input("A")]);
    let client = BookClient::new(&base);

    let mut editor = mount_editor(&client, BookId(1));
    let before = editor.book().cloned().unwrap();
    editor.set_field(BookEdit::Title("B".to_string())).unwrap();

    let pending = editor.save().unwrap();
    let effects = editor.on_response(pending.ticket, round_trip(&pending));
    assert_eq!(effects.last(), Some(&Effect::Navigate(Route::Collection)));
    drop(editor);

    let after = mount_collection(&client).books()[0].clone();
    assert_eq!(after.title, "B");
    assert_eq!(after.author, before.author);
    assert_eq!(after.price, before.price);
    assert_eq!(after.description, before.description);
    assert_eq!(after.category, before.category);
    assert_eq!(after.year, before.year);
    assert_eq!(after.status, before.status);
}

#[test]
fn save_sends_isbn_and_server_fields_back_unchanged() {
    let base = spawn_server(vec![book_input("A")]);
    let client = BookClient::new(&base);

    let mut editor = mount_editor(&client, BookId(1));
    let loaded = editor.book().cloned().unwrap();
    assert_eq!(loaded.isbn, "978-0000000001");
    let created_at = loaded.extra["created_at"].clone();
    assert!(created_at.is_string());

    editor.set_field(BookEdit::Price(150.0)).unwrap();
    let pending = editor.save().unwrap();
    let body: serde_json::Value =
        serde_json::from_str(pending.request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["isbn"], "978-0000000001");
    assert_eq!(body["created_at"], created_at);
    assert_eq!(body["price"], 150.0);

    let effects = editor.on_response(pending.ticket, round_trip(&pending));
    assert_eq!(effects.last(), Some(&Effect::Navigate(Route::Collection)));

    let reloaded = mount_editor(&client, BookId(1));
    let after = reloaded.book().unwrap();
    assert_eq!(after.isbn, loaded.isbn);
    assert_eq!(after.extra["created_at"], created_at);
    assert_eq!(after.price, 150.0);
}

#[test]
fn collection_does_not_see_edits_until_reloaded() {
    let base = spawn_server(vec![book_input("A")]);
    let client = BookClient::new(&base);

    let mut collection = mount_collection(&client);

    let mut editor = mount_editor(&client, BookId(1));
    editor.set_field(BookEdit::Title("Changed".to_string())).unwrap();
    let pending = editor.save().unwrap();
    editor.on_response(pending.ticket, round_trip(&pending));

    assert_eq!(collection.books()[0].title, "A");

    let pending = collection.load().unwrap();
    collection.on_response(pending.ticket, round_trip(&pending));
    assert_eq!(collection.books()[0].title, "Changed");
}

#[test]
fn create_then_list() {
    let base = spawn_server(Vec::new());
    let client = BookClient::new(&base);

    let mut creator = CreatorView::new(client.clone());
    creator.set_field(BookEdit::Title("Dune".to_string()));
    creator.set_field(BookEdit::Author("Frank Herbert".to_string()));
    creator.set_field(BookEdit::Price(420.0));
    creator.set_field(BookEdit::Isbn("978-0441013593".to_string()));
    creator.set_field(BookEdit::Year(1965));

    let pending = creator.submit().unwrap();
    let effects = creator.on_response(pending.ticket, round_trip(&pending));
    assert_eq!(
        effects,
        vec![
            Effect::Notify(Notice::Info("Book #1 created".to_string())),
            Effect::Navigate(Route::Collection),
        ]
    );

    let view = mount_collection(&client);
    assert_eq!(view.books().len(), 1);
    assert_eq!(view.books()[0].year, 1965);
    assert_eq!(view.books()[0].isbn, "978-0441013593");
}

#[test]
fn unreachable_server_is_a_load_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = BookClient::new(&format!("http://{addr}/api/v1"));

    let view = mount_collection(&client);
    match view.state() {
        ViewState::Failed(message) => assert!(message.starts_with("transport failure")),
        other => panic!("expected failure, got {other:?}"),
    }
}
