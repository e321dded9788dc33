use super::Resource;
use rusqlite::{types::ToSql, Row};
use serde::{Deserialize, Serialize};

/// Row of `dataproduk`. Price and stock are expected to be non-negative but
/// nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "namaproduk")]
    pub name: String,
    #[serde(rename = "kategori")]
    pub category: String,
    #[serde(rename = "harga")]
    pub price: f64,
    #[serde(rename = "stok")]
    pub stock: i64,
    pub status: String,
}

impl Resource for Product {
    const TABLE: &'static str = "dataproduk";
    const COLUMNS: &'static [&'static str] = &["namaproduk", "kategori", "harga", "stok", "status"];
    const NOT_FOUND: &'static str = "Product not found";

    fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(offset)?,
            category: row.get(offset + 1)?,
            price: row.get(offset + 2)?,
            stock: row.get(offset + 3)?,
            status: row.get(offset + 4)?,
        })
    }

    fn to_params(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.name as &dyn ToSql,
            &self.category as &dyn ToSql,
            &self.price as &dyn ToSql,
            &self.stock as &dyn ToSql,
            &self.status as &dyn ToSql,
        ]
    }
}
