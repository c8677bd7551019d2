//! The document database client boundary.
//!
//! The parameter-building layer never talks to a database directly. It hands
//! finished [`RequestFragment`]s to a [`DocumentClient`] and passes whatever
//! error the client reports back to its caller untouched.
//!
//! # Object safety
//!
//! The trait uses `#[async_trait]` so that a collection can hold an
//! `Arc<dyn DocumentClient>` chosen at runtime.

use std::sync::Arc;

use async_trait::async_trait;
use dynaparams_model::{ClientError, GetOutput, PageOutput, RequestFragment};

/// A database client exposing the operation shapes this crate needs.
///
/// Implementations must be safe to share between concurrent callers; the
/// parameter layer keeps no per-call state in the client.
#[async_trait]
pub trait DocumentClient: Send + Sync {
    /// Point lookup. An absent item is an empty envelope, not an error.
    async fn get(&self, request: RequestFragment) -> Result<GetOutput, ClientError>;

    /// Unconditional (or `ConditionExpression`-guarded) upsert.
    async fn put(&self, request: RequestFragment) -> Result<(), ClientError>;

    /// Field or list mutation via `UpdateExpression`.
    async fn update(&self, request: RequestFragment) -> Result<(), ClientError>;

    /// One page of a full or filtered table scan.
    async fn scan(&self, request: RequestFragment) -> Result<PageOutput, ClientError>;

    /// One page of a key-condition query.
    async fn query(&self, request: RequestFragment) -> Result<PageOutput, ClientError>;
}

#[async_trait]
impl<C: DocumentClient + ?Sized> DocumentClient for Arc<C> {
    async fn get(&self, request: RequestFragment) -> Result<GetOutput, ClientError> {
        (**self).get(request).await
    }

    async fn put(&self, request: RequestFragment) -> Result<(), ClientError> {
        (**self).put(request).await
    }

    async fn update(&self, request: RequestFragment) -> Result<(), ClientError> {
        (**self).update(request).await
    }

    async fn scan(&self, request: RequestFragment) -> Result<PageOutput, ClientError> {
        (**self).scan(request).await
    }

    async fn query(&self, request: RequestFragment) -> Result<PageOutput, ClientError> {
        (**self).query(request).await
    }
}

/// Which paged operation a listing drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListOperation {
    /// Table scan.
    Scan,
    /// Key-condition query.
    Query,
}

impl ListOperation {
    /// Operation name for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scan => "Scan",
            Self::Query => "Query",
        }
    }

    /// Submit one page request with `client`.
    pub async fn submit<C: DocumentClient + ?Sized>(
        self,
        client: &C,
        request: RequestFragment,
    ) -> Result<PageOutput, ClientError> {
        match self {
            Self::Scan => client.scan(request).await,
            Self::Query => client.query(request).await,
        }
    }
}

impl std::fmt::Display for ListOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
