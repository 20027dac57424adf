use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub isbn: String,
    pub description: String,
    pub category: String,
    pub year: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /books` and `PUT /books/{id}`.
#[derive(Clone, Debug, Deserialize)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub price: f64,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub status: String,
}

impl BookInput {
    fn into_book(self, id: i64, created_at: DateTime<Utc>) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            price: self.price,
            isbn: self.isbn,
            description: self.description,
            category: self.category,
            year: self.year,
            status: self.status,
            created_at,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    fn json(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub year: Option<i32>,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    books: BTreeMap<i64, Book>,
}

impl Store {
    pub fn insert(&mut self, input: BookInput) -> Book {
        self.next_id += 1;
        let book = input.into_book(self.next_id, Utc::now());
        self.books.insert(book.id, book.clone());
        book
    }
}

pub type Db = Arc<RwLock<Store>>;

type NotFound = (StatusCode, Json<Message>);

fn not_found() -> NotFound {
    (StatusCode::NOT_FOUND, Message::json("book not found"))
}

/// Router with an empty collection.
pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router whose collection starts with `books`, ids assigned from 1.
pub fn app_with(books: Vec<BookInput>) -> Router {
    let mut store = Store::default();
    for input in books {
        store.insert(input);
    }
    let db: Db = Arc::new(RwLock::new(store));

    let api = Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/{id}", get(get_book).put(update_book).delete(delete_book))
        .with_state(db);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
}

/// Catalog used when the server runs as a binary.
pub fn seed() -> Vec<BookInput> {
    let book = |title: &str, author: &str, price: f64, isbn: &str, category: &str, year: i32| {
        BookInput {
            title: title.to_string(),
            author: author.to_string(),
            price,
            isbn: isbn.to_string(),
            description: String::new(),
            category: category.to_string(),
            year,
            status: "available".to_string(),
        }
    };
    vec![
        book("The Great Gatsby", "F. Scott Fitzgerald", 299.0, "978-0743273565", "novel", 1925),
        book("1984", "George Orwell", 350.0, "978-0451524935", "novel", 1949),
        book("To Kill a Mockingbird", "Harper Lee", 320.0, "978-0061120084", "novel", 1960),
    ]
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Vec::new()).await
}

pub async fn run_with(listener: TcpListener, books: Vec<BookInput>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(books)).await
}

async fn health() -> Json<Message> {
    Message::json("healthy")
}

async fn list_books(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Vec<Book>> {
    let store = db.read().await;
    let books: Vec<Book> = store
        .books
        .values()
        .filter(|book| params.year.map_or(true, |year| book.year == year))
        .cloned()
        .collect();
    tracing::debug!(count = books.len(), year = ?params.year, "listed books");
    Json(books)
}

async fn create_book(
    State(db): State<Db>,
    Json(input): Json<BookInput>,
) -> (StatusCode, Json<Book>) {
    let book = db.write().await.insert(input);
    tracing::info!(book_id = book.id, "created book");
    (StatusCode::CREATED, Json(book))
}

async fn get_book(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Book>, NotFound> {
    let store = db.read().await;
    store.books.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_book(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<BookInput>,
) -> Result<Json<Book>, NotFound> {
    let mut store = db.write().await;
    let slot = store.books.get_mut(&id).ok_or_else(not_found)?;
    *slot = input.into_book(id, slot.created_at);
    tracing::info!(book_id = id, "replaced book");
    Ok(Json(slot.clone()))
}

async fn delete_book(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Message>, NotFound> {
    let mut store = db.write().await;
    store.books.remove(&id).ok_or_else(not_found)?;
    tracing::info!(book_id = id, "deleted book");
    Ok(Message::json("book deleted successfully"))
}
