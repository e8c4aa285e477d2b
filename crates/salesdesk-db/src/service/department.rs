//! Department service.

use std::sync::Arc;

use salesdesk_core::Department;

use crate::dao::{DaoFactory, DepartmentDao};
use crate::error::{DataAccessError, DataAccessResult};

/// Front-end entry point for departments.
#[derive(Clone)]
pub struct DepartmentService {
    dao: Arc<dyn DepartmentDao>,
}

impl DepartmentService {
    pub fn new(dao: Arc<dyn DepartmentDao>) -> Self {
        DepartmentService { dao }
    }

    /// Service over the factory's department DAO.
    pub fn from_factory(factory: &DaoFactory) -> Self {
        DepartmentService::new(factory.department_dao())
    }

    pub async fn find_all(&self) -> DataAccessResult<Vec<Department>> {
        self.dao.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> DataAccessResult<Option<Department>> {
        self.dao.find_by_id(id).await
    }

    /// Inserts a new department or updates an existing one, by id presence.
    pub async fn save_or_update(&self, department: &mut Department) -> DataAccessResult<()> {
        match department.id {
            None => self.dao.insert(department).await,
            Some(_) => self.dao.update(department).await,
        }
    }

    pub async fn remove(&self, department: &Department) -> DataAccessResult<()> {
        let id = department
            .id
            .ok_or_else(|| DataAccessError::invalid("Department", "remove requires an id"))?;
        self.dao.delete_by_id(id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Records which DAO method each call reached.
    #[derive(Default)]
    struct RecordingDao {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingDao {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DepartmentDao for RecordingDao {
        async fn insert(&self, department: &mut Department) -> DataAccessResult<()> {
            self.record("insert".to_string());
            department.id = Some(100);
            Ok(())
        }

        async fn update(&self, department: &Department) -> DataAccessResult<()> {
            self.record(format!("update {}", department.id.unwrap_or_default()));
            Ok(())
        }

        async fn delete_by_id(&self, id: i64) -> DataAccessResult<()> {
            self.record(format!("delete {id}"));
            Ok(())
        }

        async fn find_by_id(&self, id: i64) -> DataAccessResult<Option<Department>> {
            self.record(format!("find_by_id {id}"));
            Ok(None)
        }

        async fn find_all(&self) -> DataAccessResult<Vec<Department>> {
            self.record("find_all".to_string());
            Ok(vec![Department::with_id(1, "Books")])
        }
    }

    fn service() -> (Arc<RecordingDao>, DepartmentService) {
        let dao = Arc::new(RecordingDao::default());
        (dao.clone(), DepartmentService::new(dao))
    }

    #[tokio::test]
    async fn test_save_without_id_inserts() {
        let (dao, service) = service();
        let mut dep = Department::new("Books");

        service.save_or_update(&mut dep).await.unwrap();

        assert_eq!(dao.calls(), vec!["insert"]);
        assert_eq!(dep.id, Some(100));
    }

    #[tokio::test]
    async fn test_save_with_id_updates() {
        let (dao, service) = service();
        let mut dep = Department::with_id(7, "Books");

        service.save_or_update(&mut dep).await.unwrap();

        assert_eq!(dao.calls(), vec!["update 7"]);
    }

    #[tokio::test]
    async fn test_remove_and_queries_delegate() {
        let (dao, service) = service();

        service.remove(&Department::with_id(3, "Music")).await.unwrap();
        assert_eq!(service.find_all().await.unwrap().len(), 1);
        assert!(service.find_by_id(9).await.unwrap().is_none());

        assert_eq!(dao.calls(), vec!["delete 3", "find_all", "find_by_id 9"]);
    }

    #[tokio::test]
    async fn test_remove_without_id_fails() {
        let (dao, service) = service();

        let err = service.remove(&Department::new("Unsaved")).await.unwrap_err();
        assert!(matches!(err, DataAccessError::InvalidEntity { .. }));
        assert!(dao.calls().is_empty());
    }
}
