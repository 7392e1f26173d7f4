use crate::error::ClimosimError;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

pub use self::{
    metric::Metric,
    query::ClimateQueryInterface,
    station::{Observation, Station},
};

mod metric;
mod query;
mod station;

/// Read-only handle to a climate archive database.
pub struct ClimateDb {
    conn: Connection,
}

impl ClimateDb {
    pub const CLIMATE_DB: &'static str = "climate.db";

    pub fn path_to_db(root: &Path) -> PathBuf {
        root.join(Self::CLIMATE_DB)
    }

    /// Open the archive at `root` read-only. The database must already exist;
    /// this crate never creates, populates, or modifies it.
    pub fn connect(root: &Path) -> Result<Self, ClimosimError> {
        let db_file = Self::path_to_db(root);

        let conn = Connection::open_with_flags(db_file, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

        Ok(ClimateDb { conn })
    }
}
