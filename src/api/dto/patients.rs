/*
 * Responsibility
 * - Patients の request/response DTO とページング DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::repos::patient_repo::{PatientRow, SortDirection};

/// Patient payload for create and update.
///
/// Update is full-replace, so both operations share one request shape.
#[derive(Debug, Deserialize)]
pub struct PatientRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl PatientRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.name.len() > 120 {
            return Err("name must be <= 120 chars");
        }
        if let Some(email) = &self.email
            && (!email.contains('@') || email.len() > 254)
        {
            return Err("email is malformed");
        }
        if let Some(phone) = &self.phone
            && phone.len() > 32
        {
            return Err("phone must be <= 32 chars");
        }
        if let Some(gender) = &self.gender
            && gender.len() > 32
        {
            return Err("gender must be <= 32 chars");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct PatientResponse {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub active: bool,
}

impl From<PatientRow> for PatientResponse {
    fn from(row: PatientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            birth_date: row.birth_date,
            gender: row.gender,
            active: row.active,
        }
    }
}

fn default_limit() -> i64 {
    10
}

fn default_direction() -> String {
    "asc".to_string()
}

/// Query parameters for the paginated listing.
#[derive(Debug, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_direction")]
    pub direction: String,
}

impl PageRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.page < 0 {
            return Err("page must be >= 0");
        }
        Ok(())
    }

    /// Effective page size; out-of-range values are clamped rather than rejected.
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        // `page` is client-supplied and only bounded below; saturate instead
        // of overflowing. Postgres answers a huge OFFSET with an empty page.
        self.page.saturating_mul(self.limit())
    }

    pub fn sort_direction(&self) -> SortDirection {
        SortDirection::from_param(&self.direction)
    }
}

/// One page of results plus the totals clients need for paging UI.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: i64, limit: i64, total_elements: i64) -> Self {
        let total_pages = if limit > 0 {
            (total_elements + limit - 1) / limit
        } else {
            0
        };

        Self {
            content,
            page,
            limit,
            total_elements,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_request_defaults() {
        let req: PageRequest = match serde_json::from_value(json!({})) {
            Ok(r) => r,
            Err(e) => panic!("deserialize: {e}"),
        };

        assert_eq!(req.page, 0);
        assert_eq!(req.limit(), 10);
        assert_eq!(req.sort_direction(), SortDirection::Asc);
    }

    #[test]
    fn page_request_clamps_limit() {
        let req: PageRequest = match serde_json::from_value(json!({"limit": 0})) {
            Ok(r) => r,
            Err(e) => panic!("deserialize: {e}"),
        };
        assert_eq!(req.limit(), 1);

        let req: PageRequest = match serde_json::from_value(json!({"limit": 5000})) {
            Ok(r) => r,
            Err(e) => panic!("deserialize: {e}"),
        };
        assert_eq!(req.limit(), 100);
    }

    #[test]
    fn page_request_offset_saturates_on_huge_page() {
        let req: PageRequest =
            match serde_json::from_value(json!({"page": i64::MAX / 2, "limit": 100})) {
                Ok(r) => r,
                Err(e) => panic!("deserialize: {e}"),
            };

        assert!(req.validate().is_ok());
        // No overflow panic, and the offset stays non-negative.
        assert_eq!(req.offset(), i64::MAX);
    }

    #[test]
    fn page_request_rejects_negative_page() {
        let req: PageRequest = match serde_json::from_value(json!({"page": -1})) {
            Ok(r) => r,
            Err(e) => panic!("deserialize: {e}"),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn page_math_rounds_up() {
        let page = Page::new(vec![1, 2, 3], 0, 10, 25);
        assert_eq!(page.total_pages, 3);

        let page: Page<i64> = Page::new(vec![], 0, 10, 0);
        assert_eq!(page.total_pages, 0);

        let page: Page<i64> = Page::new(vec![], 0, 10, 10);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn patient_request_validation() {
        let ok: PatientRequest = match serde_json::from_value(json!({"name": "Ana"})) {
            Ok(r) => r,
            Err(e) => panic!("deserialize: {e}"),
        };
        assert!(ok.validate().is_ok());

        let blank: PatientRequest = match serde_json::from_value(json!({"name": "   "})) {
            Ok(r) => r,
            Err(e) => panic!("deserialize: {e}"),
        };
        assert!(blank.validate().is_err());

        let bad_email: PatientRequest =
            match serde_json::from_value(json!({"name": "Ana", "email": "not-an-email"})) {
                Ok(r) => r,
                Err(e) => panic!("deserialize: {e}"),
            };
        assert!(bad_email.validate().is_err());
    }
}
