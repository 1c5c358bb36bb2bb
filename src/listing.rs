use crate::{
    data::{ListPage, ListQuery, PageMeta},
    error::AdminResult,
};

///How many skeleton rows stand in for the table while a page is loading.
pub const PLACEHOLDER_ROWS: usize = 5;

///One issued fetch. Only the most recently issued ticket may update the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    pub query: ListQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView<'a, E> {
    Loading,
    Empty,
    Unavailable,
    Rows(&'a [E]),
}

#[derive(Debug, Clone)]
pub struct ListController<E> {
    search: String,
    page: u32,
    page_size: u32,
    loading: bool,
    failed: bool,
    records: Vec<E>,
    meta: PageMeta,
    latest: u64,
}

impl<E> ListController<E> {
    pub fn new(page_size: u32) -> Self {
        Self::restore(1, page_size, String::new())
    }

    ///Picks up where the browser says it was.
    pub fn restore(page: u32, page_size: u32, search: String) -> Self {
        Self {
            search,
            page: page.max(1),
            page_size: page_size.max(1),
            loading: false,
            failed: false,
            records: vec![],
            meta: PageMeta::default(),
            latest: 0,
        }
    }

    fn issue(&mut self) -> FetchTicket {
        self.latest += 1;
        self.loading = true;
        FetchTicket {
            seq: self.latest,
            query: ListQuery {
                page: self.page,
                page_size: self.page_size,
                search: self.search.clone(),
            },
        }
    }

    pub fn search(&mut self, term: impl Into<String>) -> FetchTicket {
        self.search = term.into();
        self.page = 1;
        self.issue()
    }

    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        if !self.has_next() {
            return None;
        }
        self.page += 1;
        Some(self.issue())
    }

    pub fn previous_page(&mut self) -> Option<FetchTicket> {
        if !self.has_previous() {
            return None;
        }
        self.page -= 1;
        Some(self.issue())
    }

    ///Returns whether the response was for the latest fetch; stale ones change nothing.
    pub fn complete(&mut self, ticket: &FetchTicket, result: AdminResult<ListPage<E>>) -> bool {
        if ticket.seq != self.latest {
            debug!(stale = ticket.seq, latest = self.latest, "Dropping stale list response");
            return false;
        }

        self.loading = false;
        match result {
            Ok(ListPage { mut records, meta }) => {
                records.truncate(usize::try_from(self.page_size).unwrap_or(usize::MAX));
                self.records = records;
                self.meta = meta;
                self.failed = false;
            }
            Err(e) => {
                warn!(?e, query = ?ticket.query, "Unable to fetch list page");
                self.failed = true;
            }
        }
        true
    }

    pub fn view(&self) -> ListView<'_, E> {
        if self.loading {
            ListView::Loading
        } else if !self.records.is_empty() {
            ListView::Rows(&self.records)
        } else if self.failed {
            ListView::Unavailable
        } else {
            ListView::Empty
        }
    }

    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub const fn has_next(&self) -> bool {
        self.page < self.meta.total_pages
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub const fn meta(&self) -> &PageMeta {
        &self.meta
    }
}
