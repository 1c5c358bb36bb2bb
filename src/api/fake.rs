use crate::{
    api::RecordApi,
    data::{Entity, ListPage, ListQuery, PageMeta, RecordId},
    error::AdminResult,
};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call<D> {
    FetchList(ListQuery),
    Get(RecordId),
    Create(D),
    Update(RecordId, D),
    Delete(RecordId),
}

///In-memory backend that remembers every call made against it.
#[derive(Debug)]
pub struct RecordingApi<E: Entity> {
    accept: bool,
    records: Vec<E>,
    total: u64,
    calls: Mutex<Vec<Call<E::Draft>>>,
}

impl<E: Entity> RecordingApi<E> {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            records: vec![],
            total: 0,
            calls: Mutex::new(vec![]),
        }
    }

    pub fn refusing() -> Self {
        Self {
            accept: false,
            ..Self::accepting()
        }
    }

    #[must_use]
    pub fn with_records(mut self, records: Vec<E>, total: u64) -> Self {
        self.records = records;
        self.total = total;
        self
    }

    pub fn calls(&self) -> Vec<Call<E::Draft>> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call<E::Draft>) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl<E: Entity> RecordApi<E> for RecordingApi<E> {
    async fn fetch_list(&self, query: &ListQuery) -> AdminResult<ListPage<E>> {
        self.record(Call::FetchList(query.clone()));
        let total_pages = self.total.div_ceil(u64::from(query.page_size.max(1)));

        Ok(ListPage {
            records: self.records.clone(),
            meta: PageMeta {
                page: query.page,
                page_size: query.page_size,
                total: self.total,
                total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
            },
        })
    }

    async fn get(&self, id: &RecordId) -> AdminResult<Option<E>> {
        self.record(Call::Get(id.clone()));
        Ok(self.records.iter().find(|r| r.id() == id).cloned())
    }

    async fn create(&self, draft: &E::Draft) -> bool {
        self.record(Call::Create(draft.clone()));
        self.accept
    }

    async fn update(&self, id: &RecordId, draft: &E::Draft) -> bool {
        self.record(Call::Update(id.clone(), draft.clone()));
        self.accept
    }

    async fn delete(&self, id: &RecordId) -> bool {
        self.record(Call::Delete(id.clone()));
        self.accept
    }
}
