use crate::ValidationError;

/// Page requests for orders, one record per page unless asked otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: u64 = 1;
    pub const MAX_PAGE_SIZE: u64 = 10;

    /// Applies defaults and caps `page_size` at [`Self::MAX_PAGE_SIZE`]
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Result<Self, ValidationError> {
        let page = match page {
            None => 1,
            Some(page) if page >= 1 => page as u64,
            Some(page) => {
                return Err(ValidationError::new(
                    "page",
                    format!("must be at least 1, got {page}"),
                ));
            }
        };

        let page_size = match page_size {
            None => Self::DEFAULT_PAGE_SIZE,
            Some(size) if size >= 1 => (size as u64).min(Self::MAX_PAGE_SIZE),
            Some(size) => {
                return Err(ValidationError::new(
                    "page_size",
                    format!("must be at least 1, got {size}"),
                ));
            }
        };

        let request = Self { page, page_size };
        if request.offset().is_none() {
            return Err(ValidationError::new(
                "page",
                format!("{page} is too large for a page size of {page_size}"),
            ));
        }

        Ok(request)
    }

    /// Rows skipped before this page, `None` when it does not fit a signed
    /// 64-bit store offset
    pub fn offset(&self) -> Option<u64> {
        self.index()
            .checked_mul(self.page_size)
            .filter(|&offset| i64::try_from(offset).is_ok())
    }

    /// 0-based index used by the store paginator
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Page metadata returned with every paginated listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl PageInfo {
    pub fn new(request: PageRequest, total_items: u64) -> Self {
        Self {
            page: request.page,
            page_size: request.page_size,
            total_items,
            total_pages: total_items.div_ceil(request.page_size),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}
