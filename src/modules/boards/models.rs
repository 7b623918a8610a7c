use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for creating a board.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBoardRequest {
    /// Display name of the board
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: String,
    /// Optional free-form description
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,
    /// Category the board is displayed under
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub category: String,
}

/// Board summary returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub board_id: i64,
    pub name: String,
    pub category: String,
    pub fixed: bool,
}

/// Full board view returned by the single-board endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardDetail {
    pub board_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub fixed: bool,
}

/// Total number of boards owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCount {
    pub count: u64,
}

/// Pagination parameters (`?page=&size=&sort=`).
///
/// The endpoint layer forwards these to the service untouched; defaults are
/// the service's business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// `field,direction` ordering hint, e.g. `name,asc`
    pub sort: Option<String>,
}

/// Partial page of results: the requested window plus a flag telling the
/// caller whether more results exist beyond it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub has_next: bool,
}
