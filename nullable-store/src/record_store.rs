//! Record persistence with saving hooks.

use crate::sql::{column_type, from_sql, quote_identifier, to_sql};
use crate::{StorageError, StorageResult};
use nullable_model::{Attributes, Model, Record};
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OptionalExtension, params_from_iter};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

const ID_COLUMN: &str = "id";

/// Persistent store for records backed by SQLite.
pub struct RecordStore {
    conn: Arc<Mutex<Connection>>,
}

impl RecordStore {
    /// Opens (or creates) a record store at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens an in-memory record store (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn connection(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Creates the model's table if it does not exist yet.
    pub fn create_table(&self, model: &Model) -> StorageResult<()> {
        let schema = model.schema();
        let table = quote_identifier(&schema.name)?;

        let mut columns = vec![format!("{ID_COLUMN} INTEGER PRIMARY KEY AUTOINCREMENT")];
        for field in &schema.fields {
            if field.name == ID_COLUMN {
                return Err(StorageError::InvalidIdentifier(format!(
                    "`{ID_COLUMN}` is reserved (model `{}`)",
                    schema.name
                )));
            }
            columns.push(format!(
                "{} {}",
                quote_identifier(&field.name)?,
                column_type(field.kind)
            ));
        }

        let conn = self.connection()?;
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} ({})",
            columns.join(", ")
        ))?;

        info!("Ensured table {} ({} field(s))", schema.name, schema.fields.len());
        Ok(())
    }

    /// Fires the record's saving hooks, then inserts or updates it.
    ///
    /// A failing hook aborts the save before anything is written. New
    /// records are assigned the id of the inserted row.
    pub fn save(&self, record: &mut Record) -> StorageResult<()> {
        record.fire_saving()?;

        let model = Arc::clone(record.model());
        let schema = model.schema();
        let table = quote_identifier(&schema.name)?;

        let mut columns = Vec::with_capacity(record.attributes().len());
        let mut values = Vec::with_capacity(record.attributes().len() + 1);
        for (key, value) in record.attributes() {
            let kind = schema.kind_of(key).ok_or_else(|| {
                StorageError::InvalidData(format!(
                    "field `{key}` is not declared on model `{}`",
                    schema.name
                ))
            })?;
            columns.push(quote_identifier(key)?);
            values.push(to_sql(key, kind, value)?);
        }

        let conn = self.connection()?;
        match record.id() {
            None => {
                let sql = if columns.is_empty() {
                    format!("INSERT INTO {table} DEFAULT VALUES")
                } else {
                    let placeholders: Vec<String> =
                        (1..=columns.len()).map(|i| format!("?{i}")).collect();
                    format!(
                        "INSERT INTO {table} ({}) VALUES ({})",
                        columns.join(", "),
                        placeholders.join(", ")
                    )
                };
                conn.execute(&sql, params_from_iter(values.iter()))?;
                let id = conn.last_insert_rowid();
                record.mark_persisted(id);
                debug!("Inserted {} record {}", schema.name, id);
            }
            Some(id) => {
                if columns.is_empty() {
                    return Ok(());
                }
                let assignments: Vec<String> = columns
                    .iter()
                    .enumerate()
                    .map(|(i, column)| format!("{column} = ?{}", i + 1))
                    .collect();
                let sql = format!(
                    "UPDATE {table} SET {} WHERE {ID_COLUMN} = ?{}",
                    assignments.join(", "),
                    columns.len() + 1
                );
                values.push(SqlValue::Integer(id));

                let changed = conn.execute(&sql, params_from_iter(values.iter()))?;
                if changed == 0 {
                    return Err(StorageError::NotFound(format!("{} {id}", schema.name)));
                }
                debug!("Updated {} record {}", schema.name, id);
            }
        }

        Ok(())
    }

    /// Builds a record from `pairs` and saves it.
    pub fn create<I, K, V>(&self, model: &Arc<Model>, pairs: I) -> StorageResult<Record>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut record = Record::new(Arc::clone(model));
        record.fill(pairs)?;
        self.save(&mut record)?;
        Ok(record)
    }

    /// Assigns `pairs` to an existing record and saves it.
    pub fn update<I, K, V>(&self, record: &mut Record, pairs: I) -> StorageResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        record.fill(pairs)?;
        self.save(record)
    }

    /// Loads a record by id. Stored values are kept raw; mutators do not run.
    pub fn find(&self, model: &Arc<Model>, id: i64) -> StorageResult<Option<Record>> {
        let schema = model.schema();
        let table = quote_identifier(&schema.name)?;

        let mut columns = vec![ID_COLUMN.to_string()];
        for field in &schema.fields {
            columns.push(quote_identifier(&field.name)?);
        }
        let sql = format!(
            "SELECT {} FROM {table} WHERE {ID_COLUMN} = ?1",
            columns.join(", ")
        );

        let row = {
            let conn = self.connection()?;
            conn.query_row(&sql, [id], |row| {
                (1..columns.len())
                    .map(|i| row.get::<_, SqlValue>(i))
                    .collect::<Result<Vec<_>, _>>()
            })
            .optional()?
        };

        let Some(stored) = row else {
            return Ok(None);
        };

        let mut attributes = Attributes::new();
        for (field, value) in schema.fields.iter().zip(stored) {
            attributes.insert(field.name.clone(), from_sql(&field.name, field.kind, value)?);
        }

        Ok(Some(Record::hydrate(Arc::clone(model), id, attributes)))
    }

    /// Like [`RecordStore::find`], but a missing record is an error.
    pub fn find_or_fail(&self, model: &Arc<Model>, id: i64) -> StorageResult<Record> {
        self.find(model, id)?
            .ok_or_else(|| StorageError::NotFound(format!("{} {id}", model.name())))
    }

    /// Number of stored records of `model`.
    pub fn count(&self, model: &Model) -> StorageResult<usize> {
        let table = quote_identifier(&model.schema().name)?;
        let conn = self.connection()?;
        let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })?;
        Ok(count as usize)
    }
}
