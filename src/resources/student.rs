use super::Resource;
use rusqlite::{types::ToSql, Row};
use serde::{Deserialize, Serialize};

/// Row of `api_siswa`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "alamat")]
    pub address: String,
    pub status: String,
}

impl Resource for Student {
    const TABLE: &'static str = "api_siswa";
    const COLUMNS: &'static [&'static str] = &["nama", "alamat", "status"];
    const NOT_FOUND: &'static str = "Student not found";

    fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(offset)?,
            address: row.get(offset + 1)?,
            status: row.get(offset + 2)?,
        })
    }

    fn to_params(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.name as &dyn ToSql,
            &self.address as &dyn ToSql,
            &self.status as &dyn ToSql,
        ]
    }
}
