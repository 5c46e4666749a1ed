//! Document store adapter.
//!
//! The document collection is owned by an external administration
//! process; the pipeline only ever reads the active subset. A SQLite
//! adapter is provided for deployments, an in-memory one for tests.

use crate::types::Document;
use guichet_core::{AppError, AppResult};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

/// Read-only query capability over the document collection.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document flagged active, in stable store order.
    async fn active_documents(&self) -> AppResult<Vec<Document>>;
}

/// SQLite-backed document store.
pub struct SqliteDocumentStore {
    conn: Mutex<Connection>,
}

impl SqliteDocumentStore {
    /// Open (and initialize if needed) the documents database.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Store(format!("Failed to create database directory: {}", e))
                })?;
            }
        }

        let conn = Connection::open(db_path)
            .map_err(|e| AppError::Store(format!("Failed to open documents database: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                language TEXT NOT NULL DEFAULT 'fr',
                category TEXT,
                source TEXT,
                active INTEGER NOT NULL DEFAULT 1
            );

            CREATE INDEX IF NOT EXISTS idx_documents_active ON documents(active);
            "#,
        )
        .map_err(|e| AppError::Store(format!("Failed to create documents table: {}", e)))?;

        tracing::debug!("Opened documents database at {:?}", db_path);
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert a document. This is the administration side of the store,
    /// not part of the pipeline's read-only contract.
    pub fn insert_document(
        &self,
        title: &str,
        content: &str,
        language: &str,
        category: Option<&str>,
        source: Option<&str>,
    ) -> AppResult<i64> {
        let conn = self.conn.lock().expect("store connection poisoned");
        conn.execute(
            "INSERT INTO documents (title, content, language, category, source, active)
             VALUES (?1, ?2, ?3, ?4, ?5, 1)",
            params![title, content, language, category, source],
        )
        .map_err(|e| AppError::Store(format!("Failed to insert document: {}", e)))?;

        Ok(conn.last_insert_rowid())
    }

    /// Number of documents in the store, active or not.
    pub fn count_documents(&self) -> AppResult<usize> {
        let conn = self.conn.lock().expect("store connection poisoned");
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
            .map_err(|e| AppError::Store(format!("Failed to count documents: {}", e)))?;
        Ok(count as usize)
    }
}

#[async_trait::async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn active_documents(&self) -> AppResult<Vec<Document>> {
        let conn = self.conn.lock().expect("store connection poisoned");

        let mut stmt = conn
            .prepare(
                "SELECT id, title, content, language, category, source, active
                 FROM documents WHERE active = 1 ORDER BY id",
            )
            .map_err(|e| AppError::Store(format!("Failed to prepare query: {}", e)))?;

        let documents = stmt
            .query_map([], |row| {
                Ok(Document {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    content: row.get(2)?,
                    language: row.get(3)?,
                    category: row.get(4)?,
                    source: row.get(5)?,
                    active: row.get::<_, i64>(6)? != 0,
                })
            })
            .map_err(|e| AppError::Store(format!("Failed to query documents: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::Store(format!("Failed to read document row: {}", e)))?;

        tracing::debug!("Fetched {} active documents", documents.len());
        Ok(documents)
    }
}

/// In-memory document store for tests and embedded use.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Vec<Document>,
}

impl MemoryDocumentStore {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn active_documents(&self) -> AppResult<Vec<Document>> {
        Ok(self
            .documents
            .iter()
            .filter(|d| d.active)
            .cloned()
            .collect())
    }
}
