//! Resource Collections
//! Mission: Uniform CRUD over the student and product tables
//!
//! Each collection is a [`Resource`]: a typed field set plus the table it
//! lives in. [`ResourceStore`] and the handlers in [`api`] are written once
//! against the trait.

pub mod api;
pub mod pagination;
pub mod product;
pub mod store;
pub mod student;

pub use api::ResourceState;
pub use pagination::{Page, PageParams, PageRequest};
pub use product::Product;
pub use store::ResourceStore;
pub use student::Student;

use rusqlite::{types::ToSql, Row};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A record kind stored in its own table, keyed by an integer `id`
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Table name
    const TABLE: &'static str;
    /// Data columns, excluding `id`, in the order `from_row`/`to_params` use
    const COLUMNS: &'static [&'static str];
    /// Message for a read of a missing id
    const NOT_FOUND: &'static str;

    /// Read the data columns starting at `offset`
    fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self>;

    /// Bound parameters matching `COLUMNS`
    fn to_params(&self) -> Vec<&dyn ToSql>;
}

/// A stored row: the key plus the flattened field set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<R> {
    pub id: i64,
    #[serde(flatten)]
    pub fields: R,
}
