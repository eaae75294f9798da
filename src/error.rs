use thiserror::Error;

/// Errors raised while editing a canvas graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node '{0}' already exists in the graph")]
    DuplicateNode(String),

    #[error("Node '{0}' not found in the graph")]
    NodeNotFound(String),

    #[error("Edge '{0}' not found in the graph")]
    EdgeNotFound(String),

    #[error("Nodes '{source_id}' and '{target_id}' are already connected")]
    DuplicateEdge {
        source_id: String,
        target_id: String,
    },

    #[error("Unknown node kind '{0}'")]
    UnknownKind(String),
}

/// Errors that can occur while generating code from a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error("No template registered for language '{0}'")]
    UnknownLanguage(String),

    #[error("Unknown indentation strategy '{0}'")]
    UnknownIndentStrategy(String),
}

/// Errors from the SQLite-backed canvas blob store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Stored blob is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Blob must be a JSON object with a string 'id' field")]
    MissingId,

    #[error("Invalid {kind} payload: {message}")]
    InvalidBlob { kind: &'static str, message: String },

    #[error("Nodes '{source_id}' and '{target_id}' are already connected")]
    DuplicateConnection {
        source_id: String,
        target_id: String,
    },

    #[error("Blocking store task failed: {0}")]
    Task(String),
}

/// Errors surfaced by storefront operations. Most of them end up as flash messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("Username and password are required")]
    MissingFields,

    #[error("Please log in to check out")]
    NotLoggedIn,

    #[error("Your cart is empty")]
    EmptyCart,
}

/// Errors when converting a custom user format into a rigboard `Graph`.
#[derive(Error, Debug, Clone)]
pub enum GraphConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
