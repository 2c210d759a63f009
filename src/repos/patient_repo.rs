/*
 * Responsibility
 * - patients テーブル向け SQLx 操作
 * - PgPool を受け取り CRUD を提供
 * - 削除は物理削除ではなく active = FALSE (soft delete)
 */
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

/// Sort order for the `name` column.
///
/// Request parsing rule: only `"desc"` (case-insensitive) selects descending;
/// anything else, including empty or malformed values, falls back to ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_param(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct PatientRow {
    #[sqlx(rename = "patientId")]
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[sqlx(rename = "birthDate")]
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub active: bool,
}

pub async fn list(
    db: &PgPool,
    limit: i64,
    offset: i64,
    direction: SortDirection,
) -> Result<Vec<PatientRow>, RepoError> {
    // ORDER BY direction cannot be bound as a parameter; `as_sql` only ever
    // yields "ASC" / "DESC".
    let sql = format!(
        r#"
        SELECT "patientId", name, email, phone, "birthDate", gender, active
        FROM patients
        ORDER BY name {}
        LIMIT $1 OFFSET $2
        "#,
        direction.as_sql()
    );

    let rows = sqlx::query_as::<_, PatientRow>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

    Ok(rows)
}

pub async fn count(db: &PgPool) -> Result<i64, RepoError> {
    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM patients
        "#,
    )
    .fetch_one(db)
    .await?;

    Ok(total)
}

pub async fn list_active(db: &PgPool) -> Result<Vec<PatientRow>, RepoError> {
    let rows = sqlx::query_as::<_, PatientRow>(
        r#"
        SELECT "patientId", name, email, phone, "birthDate", gender, active
        FROM patients
        WHERE active = TRUE
        ORDER BY name ASC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, id: i64) -> Result<Option<PatientRow>, RepoError> {
    // Inactive patients stay readable; soft delete only flips the flag.
    let row = sqlx::query_as::<_, PatientRow>(
        r#"
        SELECT "patientId", name, email, phone, "birthDate", gender, active
        FROM patients
        WHERE "patientId" = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn create(
    db: &PgPool,
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
    birth_date: Option<NaiveDate>,
    gender: Option<&str>,
) -> Result<PatientRow, RepoError> {
    let row = sqlx::query_as::<_, PatientRow>(
        r#"
        INSERT INTO patients (name, email, phone, "birthDate", gender)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING "patientId", name, email, phone, "birthDate", gender, active
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(birth_date)
    .bind(gender)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i64,
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
    birth_date: Option<NaiveDate>,
    gender: Option<&str>,
) -> Result<Option<PatientRow>, RepoError> {
    // Full replace semantics: every column is overwritten from the request.
    let row = sqlx::query_as::<_, PatientRow>(
        r#"
        UPDATE patients
        SET
            name = $2,
            email = $3,
            phone = $4,
            "birthDate" = $5,
            gender = $6,
            "updatedAt" = now()
        WHERE "patientId" = $1
        RETURNING "patientId", name, email, phone, "birthDate", gender, active
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(birth_date)
    .bind(gender)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn inactivate(db: &PgPool, id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        UPDATE patients
        SET active = FALSE, "updatedAt" = now()
        WHERE "patientId" = $1
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_desc_case_insensitively() {
        assert_eq!(SortDirection::from_param("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::from_param("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::from_param("Desc"), SortDirection::Desc);
    }

    #[test]
    fn direction_falls_back_to_asc() {
        assert_eq!(SortDirection::from_param("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::from_param(""), SortDirection::Asc);
        assert_eq!(SortDirection::from_param("ascending"), SortDirection::Asc);
        assert_eq!(SortDirection::from_param("descending"), SortDirection::Asc);
    }

    // The #[sqlx::test] cases below run against a per-test database with
    // ./migrations applied.

    async fn seed(pool: &PgPool, name: &str) -> PatientRow {
        match create(pool, name, None, None, None, None).await {
            Ok(row) => row,
            Err(e) => panic!("seed {name}: {e}"),
        }
    }

    #[sqlx::test]
    async fn create_then_get_round_trips(pool: PgPool) {
        let created = match create(
            &pool,
            "Ana",
            Some("ana@example.com"),
            Some("555-0100"),
            None,
            Some("female"),
        )
        .await
        {
            Ok(row) => row,
            Err(e) => panic!("create: {e}"),
        };

        assert!(created.id > 0);
        assert!(created.active);

        let fetched = match get(&pool, created.id).await {
            Ok(Some(row)) => row,
            Ok(None) => panic!("created patient not found"),
            Err(e) => panic!("get: {e}"),
        };

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "Ana");
        assert_eq!(fetched.email.as_deref(), Some("ana@example.com"));
        assert_eq!(fetched.phone.as_deref(), Some("555-0100"));
        assert_eq!(fetched.gender.as_deref(), Some("female"));
    }

    #[sqlx::test]
    async fn list_orders_by_name_in_both_directions(pool: PgPool) {
        for name in ["Bruno", "Ana", "Carla"] {
            seed(&pool, name).await;
        }

        let asc = match list(&pool, 10, 0, SortDirection::Asc).await {
            Ok(rows) => rows,
            Err(e) => panic!("list asc: {e}"),
        };
        let names: Vec<&str> = asc.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Ana", "Bruno", "Carla"]);

        let desc = match list(&pool, 2, 0, SortDirection::Desc).await {
            Ok(rows) => rows,
            Err(e) => panic!("list desc: {e}"),
        };
        let names: Vec<&str> = desc.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Carla", "Bruno"]);

        match count(&pool).await {
            Ok(total) => assert_eq!(total, 3),
            Err(e) => panic!("count: {e}"),
        }
    }

    #[sqlx::test]
    async fn update_is_full_replace(pool: PgPool) {
        let created = match create(
            &pool,
            "Ana",
            Some("ana@example.com"),
            Some("555-0100"),
            None,
            None,
        )
        .await
        {
            Ok(row) => row,
            Err(e) => panic!("create: {e}"),
        };

        // Omitted optional fields are erased, not kept.
        let updated = match update(&pool, created.id, "Ana Maria", None, None, None, None).await {
            Ok(Some(row)) => row,
            Ok(None) => panic!("patient vanished"),
            Err(e) => panic!("update: {e}"),
        };

        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.email, None);
        assert_eq!(updated.phone, None);

        match update(&pool, created.id + 999, "Nobody", None, None, None, None).await {
            Ok(row) => assert!(row.is_none()),
            Err(e) => panic!("update unknown: {e}"),
        }
    }

    #[sqlx::test]
    async fn inactivate_is_a_soft_delete(pool: PgPool) {
        let created = seed(&pool, "Ana").await;

        match inactivate(&pool, created.id).await {
            Ok(touched) => assert!(touched),
            Err(e) => panic!("inactivate: {e}"),
        }

        // The record is still readable, only the flag flipped.
        let row = match get(&pool, created.id).await {
            Ok(Some(row)) => row,
            Ok(None) => panic!("soft-deleted patient was removed"),
            Err(e) => panic!("get: {e}"),
        };
        assert!(!row.active);

        let active = match list_active(&pool).await {
            Ok(rows) => rows,
            Err(e) => panic!("list_active: {e}"),
        };
        assert!(active.iter().all(|r| r.id != created.id));

        // Repeating on an existing record still touches it; unknown ids don't.
        match inactivate(&pool, created.id).await {
            Ok(touched) => assert!(touched),
            Err(e) => panic!("inactivate again: {e}"),
        }
        match inactivate(&pool, created.id + 999).await {
            Ok(touched) => assert!(!touched),
            Err(e) => panic!("inactivate unknown: {e}"),
        }
    }
}
