//! # Department DAO
//!
//! SQLite implementation of [`DepartmentDao`] over `department (Id, Name)`.

use std::sync::Arc;

use async_trait::async_trait;
use salesdesk_core::Department;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use super::DepartmentDao;
use crate::connection::ConnectionProvider;
use crate::error::{DataAccessError, DataAccessResult};

const ENTITY: &str = "Department";

/// Department DAO backed by the provider's SQLite connection.
#[derive(Debug, Clone)]
pub struct SqliteDepartmentDao {
    provider: Arc<ConnectionProvider>,
}

impl SqliteDepartmentDao {
    pub fn new(provider: Arc<ConnectionProvider>) -> Self {
        SqliteDepartmentDao { provider }
    }

    fn hydrate(row: &SqliteRow) -> Result<Department, sqlx::Error> {
        Ok(Department {
            id: Some(row.try_get("Id")?),
            name: row.try_get("Name")?,
        })
    }
}

#[async_trait]
impl DepartmentDao for SqliteDepartmentDao {
    /// Inserts a department that has no id yet.
    ///
    /// ## Returns
    /// * `Ok(())` - `department.id` now holds the generated id
    /// * `Err(DataAccessError::InvalidEntity)` - Department already has an id
    /// * `Err(DataAccessError::NoRowsAffected)` - Nothing was stored
    async fn insert(&self, department: &mut Department) -> DataAccessResult<()> {
        if department.id.is_some() {
            return Err(DataAccessError::invalid(
                ENTITY,
                "insert requires a department without id",
            ));
        }

        debug!(name = %department.name, "Inserting department");

        let mut conn = self.provider.connection().await?;
        let result = sqlx::query("INSERT INTO department (Name) VALUES (?1)")
            .bind(&department.name)
            .persistent(false)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DataAccessError::no_rows(ENTITY, "Insert", None));
        }

        department.id = Some(result.last_insert_rowid());
        debug!(id = result.last_insert_rowid(), "Department inserted");

        Ok(())
    }

    async fn update(&self, department: &Department) -> DataAccessResult<()> {
        let id = department
            .id
            .ok_or_else(|| DataAccessError::invalid(ENTITY, "update requires an id"))?;

        debug!(id = id, "Updating department");

        let mut conn = self.provider.connection().await?;
        let result = sqlx::query("UPDATE department SET Name = ?1 WHERE Id = ?2")
            .bind(&department.name)
            .bind(id)
            .persistent(false)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DataAccessError::no_rows(ENTITY, "Update", Some(id)));
        }

        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> DataAccessResult<()> {
        debug!(id = id, "Deleting department");

        let mut conn = self.provider.connection().await?;
        let result = sqlx::query("DELETE FROM department WHERE Id = ?1")
            .bind(id)
            .persistent(false)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DataAccessError::no_rows(ENTITY, "Delete", Some(id)));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> DataAccessResult<Option<Department>> {
        let mut conn = self.provider.connection().await?;
        let row = sqlx::query("SELECT Id, Name FROM department WHERE Id = ?1")
            .bind(id)
            .persistent(false)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row.as_ref().map(Self::hydrate).transpose()?)
    }

    async fn find_all(&self) -> DataAccessResult<Vec<Department>> {
        let mut conn = self.provider.connection().await?;
        let rows = sqlx::query("SELECT Id, Name FROM department ORDER BY Id")
            .persistent(false)
            .fetch_all(&mut *conn)
            .await?;

        let departments = rows
            .iter()
            .map(Self::hydrate)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = departments.len(), "Loaded departments");
        Ok(departments)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    async fn setup() -> SqliteDepartmentDao {
        let provider = Arc::new(ConnectionProvider::in_memory());
        schema::install(&provider).await.unwrap();
        SqliteDepartmentDao::new(provider)
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let dao = setup().await;
        let mut books = Department::new("Books");
        let mut music = Department::new("Music");

        dao.insert(&mut books).await.unwrap();
        dao.insert(&mut music).await.unwrap();

        let books_id = books.id.unwrap();
        let music_id = music.id.unwrap();
        assert!(books_id > 0);
        assert_ne!(books_id, music_id);

        let found = dao.find_by_id(books_id).await.unwrap().unwrap();
        assert_eq!(found.name, "Books");
    }

    #[tokio::test]
    async fn test_insert_rejects_existing_id() {
        let dao = setup().await;
        let mut dep = Department::with_id(5, "Books");

        let err = dao.insert(&mut dep).await.unwrap_err();
        assert!(matches!(err, DataAccessError::InvalidEntity { .. }));
        assert!(dao.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update() {
        let dao = setup().await;
        let mut dep = Department::new("Computers");
        dao.insert(&mut dep).await.unwrap();

        dep.name = "Electronics".to_string();
        dao.update(&dep).await.unwrap();

        let found = dao.find_by_id(dep.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.name, "Electronics");
    }

    #[tokio::test]
    async fn test_update_missing_id_fails() {
        let dao = setup().await;

        let err = dao
            .update(&Department::with_id(999, "Ghost"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DataAccessError::NoRowsAffected { id: Some(999), .. }
        ));

        let err = dao.update(&Department::new("No id")).await.unwrap_err();
        assert!(matches!(err, DataAccessError::InvalidEntity { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let dao = setup().await;
        let mut dep = Department::new("Fashion");
        dao.insert(&mut dep).await.unwrap();
        let id = dep.id.unwrap();

        dao.delete_by_id(id).await.unwrap();
        assert!(dao.find_by_id(id).await.unwrap().is_none());

        let err = dao.delete_by_id(id).await.unwrap_err();
        assert!(matches!(err, DataAccessError::NoRowsAffected { .. }));
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let dao = setup().await;
        assert!(dao.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_id() {
        let dao = setup().await;
        for name in ["Zeta", "Alpha", "Mid"] {
            dao.insert(&mut Department::new(name)).await.unwrap();
        }

        let all = dao.find_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_statements_are_not_cached() {
        let provider = Arc::new(ConnectionProvider::in_memory());
        schema::install(&provider).await.unwrap();
        let dao = SqliteDepartmentDao::new(provider.clone());
        let before = provider.cached_statements().await;

        dao.insert(&mut Department::new("Books")).await.unwrap();
        dao.find_all().await.unwrap();
        let _ = dao.update(&Department::with_id(77, "Ghost")).await;

        assert_eq!(provider.cached_statements().await, before);
    }
}
