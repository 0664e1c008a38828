mod page_service;

pub use page_service::{filter_query, PageService, NOTICE_DELETED, NOTICE_SUBMITTED};
