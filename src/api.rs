use crate::{
    data::{Entity, ListPage, ListQuery, RecordId},
    error::AdminResult,
};
use async_trait::async_trait;

#[cfg(test)]
pub mod fake;
pub mod http;

///The backend's record operations for one kind of record.
///
///Mutations only report whether they worked: the backend's reasons get logged, not shown.
#[async_trait]
pub trait RecordApi<E: Entity>: Send + Sync {
    async fn fetch_list(&self, query: &ListQuery) -> AdminResult<ListPage<E>>;
    async fn get(&self, id: &RecordId) -> AdminResult<Option<E>>;
    async fn create(&self, draft: &E::Draft) -> bool;
    async fn update(&self, id: &RecordId, draft: &E::Draft) -> bool;
    async fn delete(&self, id: &RecordId) -> bool;
}

