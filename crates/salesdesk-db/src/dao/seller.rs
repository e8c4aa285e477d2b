//! # Seller DAO
//!
//! SQLite implementation of [`SellerDao`].
//!
//! ## Department Hydration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 One Department per id per result                        │
//! │                                                                         │
//! │  SELECT seller.*, department.Name AS DepName                           │
//! │  FROM seller INNER JOIN department ON seller.DepartmentId = ...        │
//! │                                                                         │
//! │  Row 1: Bob   | DepartmentId 2 | DepName Electronics                   │
//! │         └── map has no 2 → build Arc<Department>, remember it          │
//! │  Row 2: Maria | DepartmentId 1 | DepName Computers                     │
//! │         └── map has no 1 → build Arc<Department>, remember it          │
//! │  Row 3: Alex  | DepartmentId 2 | DepName Electronics                   │
//! │         └── map has 2 → reuse Bob's Arc                                │
//! │                                                                         │
//! │  The map lives for one call and is dropped with it.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use salesdesk_core::{Department, Money, Seller};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use super::SellerDao;
use crate::connection::ConnectionProvider;
use crate::error::{DataAccessError, DataAccessResult};

const ENTITY: &str = "Seller";

const SELECT_BY_ID: &str = r#"
    SELECT seller.*, department.Name AS DepName
    FROM seller INNER JOIN department ON seller.DepartmentId = department.Id
    WHERE seller.Id = ?1
"#;

const SELECT_ALL: &str = r#"
    SELECT seller.*, department.Name AS DepName
    FROM seller INNER JOIN department ON seller.DepartmentId = department.Id
    ORDER BY seller.Id
"#;

const SELECT_BY_DEPARTMENT: &str = r#"
    SELECT seller.*, department.Name AS DepName
    FROM seller INNER JOIN department ON seller.DepartmentId = department.Id
    WHERE seller.DepartmentId = ?1
    ORDER BY seller.Name
"#;

/// Seller DAO backed by the provider's SQLite connection.
#[derive(Debug, Clone)]
pub struct SqliteSellerDao {
    provider: Arc<ConnectionProvider>,
}

impl SqliteSellerDao {
    pub fn new(provider: Arc<ConnectionProvider>) -> Self {
        SqliteSellerDao { provider }
    }

    fn hydrate_department(row: &SqliteRow) -> Result<Department, sqlx::Error> {
        Ok(Department {
            id: Some(row.try_get("DepartmentId")?),
            name: row.try_get("DepName")?,
        })
    }

    fn hydrate_seller(row: &SqliteRow, department: Arc<Department>) -> Result<Seller, sqlx::Error> {
        let birth_date: NaiveDate = row.try_get("BirthDate")?;

        Ok(Seller {
            id: Some(row.try_get("Id")?),
            name: row.try_get("Name")?,
            email: row.try_get("Email")?,
            birth_date,
            base_salary: Self::decode_salary(row)?,
            department,
        })
    }

    /// Reads BaseSalary whatever storage class SQLite picked for it.
    ///
    /// A column declared DECIMAL or NUMERIC stores whole amounts such as
    /// 1000.00 as INTEGER, which does not decode as `f64`.
    fn decode_salary(row: &SqliteRow) -> Result<Money, sqlx::Error> {
        match row.try_get::<f64, _>("BaseSalary") {
            Ok(amount) => Ok(Money::from_decimal(amount)),
            Err(sqlx::Error::ColumnDecode { .. }) => {
                let whole: i64 = row.try_get("BaseSalary")?;
                Ok(Money::from_major_minor(whole, 0))
            }
            Err(e) => Err(e),
        }
    }

    /// Hydrates rows, sharing one `Arc<Department>` per department id.
    fn hydrate_all(rows: &[SqliteRow]) -> Result<Vec<Seller>, sqlx::Error> {
        let mut departments: HashMap<i64, Arc<Department>> = HashMap::new();
        let mut sellers = Vec::with_capacity(rows.len());

        for row in rows {
            let department_id: i64 = row.try_get("DepartmentId")?;

            let department = match departments.get(&department_id) {
                Some(dep) => Arc::clone(dep),
                None => {
                    let dep = Arc::new(Self::hydrate_department(row)?);
                    departments.insert(department_id, Arc::clone(&dep));
                    dep
                }
            };

            sellers.push(Self::hydrate_seller(row, department)?);
        }

        Ok(sellers)
    }

    /// A seller can only be stored against a department that has an id.
    fn department_id(seller: &Seller) -> DataAccessResult<i64> {
        seller.department_id().ok_or_else(|| {
            DataAccessError::invalid(ENTITY, "department must be saved before its sellers")
        })
    }
}

#[async_trait]
impl SellerDao for SqliteSellerDao {
    /// Inserts a seller that has no id yet.
    ///
    /// ## Returns
    /// * `Ok(())` - `seller.id` now holds the generated id
    /// * `Err(DataAccessError::InvalidEntity)` - Seller already has an id, or
    ///   its department has none
    /// * `Err(DataAccessError::Driver)` - e.g. unknown department id
    ///   (FOREIGN KEY constraint failed)
    /// * `Err(DataAccessError::NoRowsAffected)` - Nothing was stored
    async fn insert(&self, seller: &mut Seller) -> DataAccessResult<()> {
        if seller.id.is_some() {
            return Err(DataAccessError::invalid(
                ENTITY,
                "insert requires a seller without id",
            ));
        }
        let department_id = Self::department_id(seller)?;

        debug!(name = %seller.name, department_id = department_id, "Inserting seller");

        let mut conn = self.provider.connection().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO seller (Name, Email, BirthDate, BaseSalary, DepartmentId)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&seller.name)
        .bind(&seller.email)
        .bind(seller.birth_date)
        .bind(seller.base_salary.to_decimal())
        .bind(department_id)
        .persistent(false)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DataAccessError::no_rows(ENTITY, "Insert", None));
        }

        seller.id = Some(result.last_insert_rowid());
        debug!(id = result.last_insert_rowid(), "Seller inserted");

        Ok(())
    }

    async fn update(&self, seller: &Seller) -> DataAccessResult<()> {
        let id = seller
            .id
            .ok_or_else(|| DataAccessError::invalid(ENTITY, "update requires an id"))?;
        let department_id = Self::department_id(seller)?;

        debug!(id = id, department_id = department_id, "Updating seller");

        let mut conn = self.provider.connection().await?;
        let result = sqlx::query(
            r#"
            UPDATE seller
            SET Name = ?1, Email = ?2, BirthDate = ?3, BaseSalary = ?4, DepartmentId = ?5
            WHERE Id = ?6
            "#,
        )
        .bind(&seller.name)
        .bind(&seller.email)
        .bind(seller.birth_date)
        .bind(seller.base_salary.to_decimal())
        .bind(department_id)
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
        debug!(id = id, "Deleting seller");

        let mut conn = self.provider.connection().await?;
        let result = sqlx::query("DELETE FROM seller WHERE Id = ?1")
            .bind(id)
            .persistent(false)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DataAccessError::no_rows(ENTITY, "Delete", Some(id)));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> DataAccessResult<Option<Seller>> {
        let mut conn = self.provider.connection().await?;
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id)
            .persistent(false)
            .fetch_optional(&mut *conn)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let department = Arc::new(Self::hydrate_department(&row)?);
        Ok(Some(Self::hydrate_seller(&row, department)?))
    }

    async fn find_all(&self) -> DataAccessResult<Vec<Seller>> {
        let mut conn = self.provider.connection().await?;
        let rows = sqlx::query(SELECT_ALL)
            .persistent(false)
            .fetch_all(&mut *conn)
            .await?;

        let sellers = Self::hydrate_all(&rows)?;
        debug!(count = sellers.len(), "Loaded sellers");
        Ok(sellers)
    }

    async fn find_all_by_department(
        &self,
        department: &Department,
    ) -> DataAccessResult<Vec<Seller>> {
        let department_id = department.id.ok_or_else(|| {
            DataAccessError::invalid("Department", "lookup requires a saved department")
        })?;

        let mut conn = self.provider.connection().await?;
        let rows = sqlx::query(SELECT_BY_DEPARTMENT)
            .bind(department_id)
            .persistent(false)
            .fetch_all(&mut *conn)
            .await?;

        let sellers = Self::hydrate_all(&rows)?;
        debug!(
            department_id = department_id,
            count = sellers.len(),
            "Loaded sellers of department"
        );
        Ok(sellers)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::{DepartmentDao, SqliteDepartmentDao};
    use crate::schema;

    struct Fixture {
        departments: SqliteDepartmentDao,
        sellers: SqliteSellerDao,
    }

    async fn setup() -> Fixture {
        let provider = Arc::new(ConnectionProvider::in_memory());
        schema::install(&provider).await.unwrap();
        Fixture {
            departments: SqliteDepartmentDao::new(provider.clone()),
            sellers: SqliteSellerDao::new(provider),
        }
    }

    async fn department(f: &Fixture, name: &str) -> Arc<Department> {
        let mut dep = Department::new(name);
        f.departments.insert(&mut dep).await.unwrap();
        Arc::new(dep)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seller(f: &Fixture, name: &str, dep: &Arc<Department>) -> Seller {
        let mut s = Seller::new(
            name,
            format!("{}@x.com", name.to_lowercase()),
            date(1988, 3, 14),
            Money::from_cents(250_000),
            Arc::clone(dep),
        );
        f.sellers.insert(&mut s).await.unwrap();
        s
    }

    #[tokio::test]
    async fn test_round_trip() {
        let f = setup().await;
        let dep = department(&f, "Computers").await;

        let mut bob = Seller::new(
            "Bob",
            "bob@x.com",
            date(1990, 1, 1),
            Money::from_decimal(1000.0),
            Arc::clone(&dep),
        );
        f.sellers.insert(&mut bob).await.unwrap();
        let id = bob.id.unwrap();
        assert!(id > 0);

        let found = f.sellers.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.id, Some(id));
        assert_eq!(found.name, "Bob");
        assert_eq!(found.email, "bob@x.com");
        assert_eq!(found.birth_date, date(1990, 1, 1));
        assert_eq!(found.base_salary, Money::from_cents(100_000));
        assert_eq!(found.department.id, dep.id);
        assert_eq!(found.department.name, "Computers");
    }

    #[tokio::test]
    async fn test_round_trip_on_decimal_salary_column() {
        let provider = Arc::new(ConnectionProvider::in_memory());
        {
            let mut conn = provider.connection().await.unwrap();
            for ddl in [
                "CREATE TABLE department (Id INTEGER PRIMARY KEY AUTOINCREMENT, Name VARCHAR(60))",
                "CREATE TABLE seller (Id INTEGER PRIMARY KEY AUTOINCREMENT, Name VARCHAR(60), \
                 Email VARCHAR(100), BirthDate DATE, BaseSalary DECIMAL(10,2), \
                 DepartmentId INTEGER REFERENCES department (Id))",
            ] {
                sqlx::query(ddl).execute(&mut *conn).await.unwrap();
            }
        }
        let departments = SqliteDepartmentDao::new(provider.clone());
        let sellers = SqliteSellerDao::new(provider);

        let mut dep = Department::new("Computers");
        departments.insert(&mut dep).await.unwrap();
        let dep = Arc::new(dep);

        let mut bob = Seller::new(
            "Bob",
            "bob@x.com",
            date(1990, 1, 1),
            Money::from_decimal(1000.0),
            Arc::clone(&dep),
        );
        sellers.insert(&mut bob).await.unwrap();
        let mut ann = Seller::new(
            "Ann",
            "ann@x.com",
            date(1991, 2, 2),
            Money::from_cents(123_456),
            Arc::clone(&dep),
        );
        sellers.insert(&mut ann).await.unwrap();

        let found = sellers.find_by_id(bob.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.base_salary, Money::from_cents(100_000));

        let all = sellers.find_all().await.unwrap();
        let salaries: Vec<i64> = all.iter().map(|s| s.base_salary.cents()).collect();
        assert_eq!(salaries, vec![100_000, 123_456]);
    }

    #[tokio::test]
    async fn test_insert_requires_saved_department() {
        let f = setup().await;
        let mut s = Seller::new(
            "Ann",
            "ann@x.com",
            date(1992, 5, 5),
            Money::zero(),
            Arc::new(Department::new("Unsaved")),
        );

        let err = f.sellers.insert(&mut s).await.unwrap_err();
        assert!(matches!(err, DataAccessError::InvalidEntity { .. }));
        assert!(s.id.is_none());
    }

    #[tokio::test]
    async fn test_insert_unknown_department_is_driver_error() {
        let f = setup().await;
        let mut s = Seller::new(
            "Ann",
            "ann@x.com",
            date(1992, 5, 5),
            Money::zero(),
            Arc::new(Department::with_id(404, "Nowhere")),
        );

        let err = f.sellers.insert(&mut s).await.unwrap_err();
        match err {
            DataAccessError::Driver { message, .. } => {
                assert!(message.contains("FOREIGN KEY"), "{message}")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_update_and_move_department() {
        let f = setup().await;
        let books = department(&f, "Books").await;
        let music = department(&f, "Music").await;
        let mut s = seller(&f, "Carl", &books).await;

        s.email = "carl@music.com".to_string();
        s.base_salary = Money::from_cents(310_050);
        s.department = Arc::clone(&music);
        f.sellers.update(&s).await.unwrap();

        let found = f.sellers.find_by_id(s.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.email, "carl@music.com");
        assert_eq!(found.base_salary.cents(), 310_050);
        assert_eq!(found.department.name, "Music");
    }

    #[tokio::test]
    async fn test_update_missing_id_fails() {
        let f = setup().await;
        let dep = department(&f, "Books").await;
        let mut ghost = Seller::new("Ghost", "g@x.com", date(1970, 1, 1), Money::zero(), dep);
        ghost.id = Some(12345);

        let err = f.sellers.update(&ghost).await.unwrap_err();
        assert!(matches!(
            err,
            DataAccessError::NoRowsAffected { id: Some(12345), .. }
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let f = setup().await;
        let dep = department(&f, "Books").await;
        let s = seller(&f, "Dina", &dep).await;
        let id = s.id.unwrap();

        f.sellers.delete_by_id(id).await.unwrap();
        assert!(f.sellers.find_by_id(id).await.unwrap().is_none());

        let err = f.sellers.delete_by_id(id).await.unwrap_err();
        assert!(matches!(err, DataAccessError::NoRowsAffected { .. }));
    }

    #[tokio::test]
    async fn test_find_all_shares_departments() {
        let f = setup().await;
        let electronics = department(&f, "Electronics").await;
        let computers = department(&f, "Computers").await;

        seller(&f, "Bob", &electronics).await;
        seller(&f, "Maria", &computers).await;
        seller(&f, "Alex", &electronics).await;

        let all = f.sellers.find_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));

        let names: Vec<_> = all.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Maria", "Alex"]);

        // Bob and Alex share one Department instance, not two equal copies.
        assert!(Arc::ptr_eq(&all[0].department, &all[2].department));
        assert!(!Arc::ptr_eq(&all[0].department, &all[1].department));
        assert_eq!(all[1].department.name, "Computers");
    }

    #[tokio::test]
    async fn test_find_all_by_department() {
        let f = setup().await;
        let books = department(&f, "Books").await;
        let music = department(&f, "Music").await;

        seller(&f, "Zoe", &books).await;
        seller(&f, "Paul", &music).await;
        seller(&f, "Amy", &books).await;
        seller(&f, "Mark", &books).await;

        let in_books = f.sellers.find_all_by_department(&books).await.unwrap();
        let names: Vec<_> = in_books.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Mark", "Zoe"]);
        assert!(in_books.iter().all(|s| s.department_id() == books.id));
        assert!(Arc::ptr_eq(&in_books[0].department, &in_books[2].department));

        let nobody = Department::new("Unsaved");
        assert!(f.sellers.find_all_by_department(&nobody).await.is_err());
    }

    #[tokio::test]
    async fn test_find_all_empty() {
        let f = setup().await;
        assert!(f.sellers.find_all().await.unwrap().is_empty());
    }
}
