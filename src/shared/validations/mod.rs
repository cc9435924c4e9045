use super::types::PaginationParams;

/// Normalize optional page/limit query values: page >= 1, limit in 1..=100
pub fn validate_pagination(page: Option<u64>, limit: Option<u64>) -> PaginationParams {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(20).clamp(1, 100);
    PaginationParams::new(page, limit)
}
