//! In-memory SQLite layer registry for vector attribute tables.
//!
//! The hosting GIS environment keeps its layer registry as process-wide
//! state. Here the registry is an explicitly constructed value instead: an
//! in-memory SQLite database that callers load with CSV attribute dumps
//! and hand to the pipeline. That keeps the filtering and sorting logic
//! testable without a live GIS session.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper, cheaply cloneable in a
//!   single-threaded run
//! - in-memory SQLite via `rusqlite`
//! - CSV data loaded from strings (callers may `include_str!` fixtures or
//!   read files at startup)
//! - typed query methods returning [`models`] structs and loosely typed
//!   feature attribute maps
//!
//! # Usage
//!
//! ```rust
//! use ndvi_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_layers("NAME,SOURCE,REGION\nse_kanha_table,landsat,Kanha\n").unwrap();
//! db.load_features("layer,year,month,day,median_ndvi\nse_kanha_table,2001,4,1,0.52\n").unwrap();
//!
//! let layers = db.query_layers().unwrap();
//! let features = db.query_features("se_kanha_table").unwrap();
//! assert_eq!(features.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`]: `layers` holds registry metadata keyed
//! by name, `features` holds one row per (feature, field) so attribute
//! access stays loosely typed by field name.

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite registry of layers and their feature attributes.
///
/// Cheaply cloneable (via `Rc`); clones share the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory registry with the schema applied.
    ///
    /// The registry is empty after creation; use the `load_*` methods to
    /// populate it with CSV data.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}
