//! The board service seam and its in-memory reference implementation.
//!
//! Handlers only know the [`BoardService`] trait; deployments that keep
//! board data elsewhere implement the trait and register the module with
//! their own service.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use corkboard_http::error::AppError;

use super::models::{
    BoardCount, BoardDetail, BoardSummary, CreateBoardRequest, PageQuery, Slice,
};

/// Shared handle threaded into the boards router as state.
pub type SharedBoardService = Arc<dyn BoardService>;

/// Failures raised by a board service implementation.
///
/// The endpoint layer converts these into HTTP errors unchanged; it never
/// retries or falls back.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    #[error("board {board_id} not found")]
    NotFound { board_id: i64 },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<BoardServiceError> for AppError {
    fn from(err: BoardServiceError) -> Self {
        match err {
            BoardServiceError::NotFound { board_id } => {
                AppError::not_found(format!("board {board_id} not found"))
            }
            BoardServiceError::Conflict(message) => AppError::conflict(Vec::new(), message),
            BoardServiceError::Internal(e) => AppError::Internal(e),
        }
    }
}

/// Board management operations, always scoped to the acting owner.
#[async_trait]
pub trait BoardService: Send + Sync {
    async fn create_board(
        &self,
        owner: &str,
        request: CreateBoardRequest,
    ) -> Result<(), BoardServiceError>;

    async fn delete_board(&self, owner: &str, board_id: i64) -> Result<(), BoardServiceError>;

    /// Pin a board to the top of its category's display ordering.
    async fn fix_board(&self, owner: &str, board_id: i64) -> Result<(), BoardServiceError>;

    async fn list_boards(
        &self,
        owner: &str,
        page: PageQuery,
    ) -> Result<Slice<BoardSummary>, BoardServiceError>;

    async fn count_boards(&self, owner: &str) -> Result<BoardCount, BoardServiceError>;

    async fn get_board(&self, owner: &str, board_id: i64)
        -> Result<BoardDetail, BoardServiceError>;
}

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
struct BoardRecord {
    board_id: i64,
    name: String,
    description: Option<String>,
    category: String,
    fixed: bool,
}

impl BoardRecord {
    fn summary(&self) -> BoardSummary {
        BoardSummary {
            board_id: self.board_id,
            name: self.name.clone(),
            category: self.category.clone(),
            fixed: self.fixed,
        }
    }

    fn detail(&self) -> BoardDetail {
        BoardDetail {
            board_id: self.board_id,
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            fixed: self.fixed,
        }
    }
}

enum SortKey {
    Name,
    Id,
}

/// Parse a `field,direction` sort hint. Unknown fields fall back to the
/// default ordering.
fn parse_sort(sort: Option<&str>) -> Option<(SortKey, bool)> {
    let raw = sort?;
    let mut parts = raw.splitn(2, ',');
    let key = match parts.next().map(str::trim) {
        Some("name") => SortKey::Name,
        Some("id") => SortKey::Id,
        _ => return None,
    };
    let ascending = !matches!(parts.next().map(str::trim), Some("desc"));
    Some((key, ascending))
}

/// In-memory board store keyed by owner.
///
/// Fixed boards sort ahead of everything else; within each group the sort
/// hint applies, defaulting to newest first. Fixing a board unfixes any
/// other fixed board in the same category.
pub struct InMemoryBoardService {
    boards: RwLock<HashMap<String, Vec<BoardRecord>>>,
    next_id: AtomicI64,
}

impl InMemoryBoardService {
    pub fn new() -> Self {
        Self {
            boards: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryBoardService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BoardService for InMemoryBoardService {
    async fn create_board(
        &self,
        owner: &str,
        request: CreateBoardRequest,
    ) -> Result<(), BoardServiceError> {
        let board_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let record = BoardRecord {
            board_id,
            name: request.name,
            description: request.description,
            category: request.category,
            fixed: false,
        };

        let mut boards = self.boards.write().await;
        boards.entry(owner.to_string()).or_default().push(record);

        Ok(())
    }

    async fn delete_board(&self, owner: &str, board_id: i64) -> Result<(), BoardServiceError> {
        let mut boards = self.boards.write().await;
        let owned = boards
            .get_mut(owner)
            .ok_or(BoardServiceError::NotFound { board_id })?;

        let index = owned
            .iter()
            .position(|record| record.board_id == board_id)
            .ok_or(BoardServiceError::NotFound { board_id })?;
        owned.remove(index);

        Ok(())
    }

    async fn fix_board(&self, owner: &str, board_id: i64) -> Result<(), BoardServiceError> {
        let mut boards = self.boards.write().await;
        let owned = boards
            .get_mut(owner)
            .ok_or(BoardServiceError::NotFound { board_id })?;

        let category = owned
            .iter()
            .find(|record| record.board_id == board_id)
            .map(|record| record.category.clone())
            .ok_or(BoardServiceError::NotFound { board_id })?;

        // At most one fixed board per category.
        for record in owned.iter_mut() {
            if record.category == category {
                record.fixed = record.board_id == board_id;
            }
        }

        Ok(())
    }

    async fn list_boards(
        &self,
        owner: &str,
        page: PageQuery,
    ) -> Result<Slice<BoardSummary>, BoardServiceError> {
        let boards = self.boards.read().await;
        let mut owned: Vec<BoardRecord> = boards.get(owner).cloned().unwrap_or_default();

        let parsed = parse_sort(page.sort.as_deref());
        owned.sort_by(|a, b| {
            b.fixed.cmp(&a.fixed).then_with(|| match &parsed {
                Some((SortKey::Name, ascending)) => {
                    let ord = a.name.cmp(&b.name);
                    if *ascending {
                        ord
                    } else {
                        ord.reverse()
                    }
                }
                Some((SortKey::Id, ascending)) => {
                    let ord = a.board_id.cmp(&b.board_id);
                    if *ascending {
                        ord
                    } else {
                        ord.reverse()
                    }
                }
                None => b.board_id.cmp(&a.board_id),
            })
        });

        let page_number = page.page.unwrap_or(0);
        let size = page.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = page_number as usize * size as usize;

        let total = owned.len();
        let content: Vec<BoardSummary> = owned
            .iter()
            .skip(offset)
            .take(size as usize)
            .map(BoardRecord::summary)
            .collect();
        let has_next = offset + (size as usize) < total;

        Ok(Slice {
            content,
            page: page_number,
            size,
            has_next,
        })
    }

    async fn count_boards(&self, owner: &str) -> Result<BoardCount, BoardServiceError> {
        let boards = self.boards.read().await;
        let count = boards.get(owner).map_or(0, |owned| owned.len() as u64);

        Ok(BoardCount { count })
    }

    async fn get_board(
        &self,
        owner: &str,
        board_id: i64,
    ) -> Result<BoardDetail, BoardServiceError> {
        let boards = self.boards.read().await;
        boards
            .get(owner)
            .and_then(|owned| owned.iter().find(|record| record.board_id == board_id))
            .map(BoardRecord::detail)
            .ok_or(BoardServiceError::NotFound { board_id })
    }
}
