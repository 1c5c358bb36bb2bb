use crate::{
    api::RecordApi,
    config::ApiConfig,
    data::{Entity, ListPage, ListQuery, RecordId},
    error::{
        AdminResult, BuildHttpClientSnafu, DecodeResponseSnafu, SendRequestSnafu,
        UnexpectedStatusSnafu, UnusableRecordIdSnafu,
    },
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, header::AUTHORIZATION};
use serde::{Deserialize, de::DeserializeOwned};
use snafu::{OptionExt, ResultExt, ensure};
use std::{marker::PhantomData, sync::Arc};

#[derive(Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct Envelope<T> {
    data: T,
}

pub fn build_client(config: &ApiConfig) -> AdminResult<Client> {
    Client::builder()
        .timeout(config.timeout())
        .build()
        .context(BuildHttpClientSnafu)
}

#[derive(Debug)]
pub struct HttpRecordApi<E> {
    client: Client,
    config: Arc<ApiConfig>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> HttpRecordApi<E> {
    pub const fn new(client: Client, config: Arc<ApiConfig>) -> Self {
        Self {
            client,
            config,
            _entity: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        self.config.endpoint_url(E::ENDPOINT)
    }

    ///The id always lands as one encoded segment under the collection.
    fn record_url(&self, id: &RecordId) -> AdminResult<String> {
        let segment = id.path_segment().context(UnusableRecordIdSnafu {
            id: id.to_string(),
        })?;
        Ok(format!("{}/{segment}", self.collection_url()))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self.client.request(method, url);
        match self.config.bearer_header() {
            Some(bearer) => request.header(AUTHORIZATION, bearer),
            None => request,
        }
    }

    async fn mutate_record(&self, method: Method, id: &RecordId, draft: Option<&E::Draft>) -> bool {
        match self.record_url(id) {
            Ok(url) => self.mutate(method, url, draft).await,
            Err(e) => {
                warn!(?e, %method, "Not sending change for unusable id");
                false
            }
        }
    }

    async fn mutate(&self, method: Method, url: String, draft: Option<&E::Draft>) -> bool {
        let mut request = self.request(method.clone(), &url);
        if let Some(draft) = draft {
            request = request.json(draft);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                debug!(%method, %url, status = %response.status(), "Backend accepted change");
                true
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                warn!(%method, %url, %status, ?body, "Backend rejected change");
                false
            }
            Err(e) => {
                warn!(?e, %method, %url, "Unable to reach backend");
                false
            }
        }
    }
}

#[async_trait]
impl<E: Entity> RecordApi<E> for HttpRecordApi<E> {
    async fn fetch_list(&self, query: &ListQuery) -> AdminResult<ListPage<E>> {
        let url = self.collection_url();
        let response = self
            .request(Method::GET, &url)
            .query(&[
                ("page", query.page.to_string()),
                ("limit", query.page_size.to_string()),
                ("search", query.search.clone()),
            ])
            .send()
            .await
            .context(SendRequestSnafu { url: url.clone() })?;

        let status = response.status();
        ensure!(
            status.is_success(),
            UnexpectedStatusSnafu {
                status,
                url: url.clone()
            }
        );

        response
            .json::<ListPage<E>>()
            .await
            .context(DecodeResponseSnafu { url })
    }

    async fn get(&self, id: &RecordId) -> AdminResult<Option<E>> {
        let url = self.record_url(id)?;
        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .context(SendRequestSnafu { url: url.clone() })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        ensure!(
            status.is_success(),
            UnexpectedStatusSnafu {
                status,
                url: url.clone()
            }
        );

        let Envelope { data } = response
            .json::<Envelope<E>>()
            .await
            .context(DecodeResponseSnafu { url })?;
        Ok(Some(data))
    }

    async fn create(&self, draft: &E::Draft) -> bool {
        self.mutate(Method::POST, self.collection_url(), Some(draft))
            .await
    }

    async fn update(&self, id: &RecordId, draft: &E::Draft) -> bool {
        self.mutate_record(Method::PUT, id, Some(draft)).await
    }

    async fn delete(&self, id: &RecordId) -> bool {
        self.mutate_record(Method::DELETE, id, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::student::{
        Student, StudentDraft,
        fixtures::{complete_draft, student_json},
    };
    use axum::{
        Json, Router,
        extract::{Path, Query},
        http::HeaderMap,
        routing::{delete, get},
    };
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use std::{
        collections::HashMap,
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };
    use tokio::net::TcpListener;

    const TOKEN: &str = "Bearer t0ken";

    static TEACHER_DELETES: AtomicUsize = AtomicUsize::new(0);

    fn authorised(headers: &HeaderMap) -> Result<(), StatusCode> {
        match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
            Some(TOKEN) => Ok(()),
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }

    async fn list(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> Result<Json<Value>, StatusCode> {
        authorised(&headers)?;
        let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let limit: u32 = params.get("limit").and_then(|p| p.parse().ok()).unwrap_or(10);
        let data = match params.get("search").map(String::as_str) {
            Some("ana") => vec![student_json()],
            _ => vec![],
        };

        Ok(Json(json!({
            "data": data,
            "meta": { "page": page, "limit": limit, "total": 21, "totalPages": 3 }
        })))
    }

    async fn create(headers: HeaderMap, Json(body): Json<Value>) -> StatusCode {
        if authorised(&headers).is_err() {
            return StatusCode::UNAUTHORIZED;
        }
        if body["nama"] == "Ana Putri" && body["jenisKelamin"] == "P" {
            StatusCode::CREATED
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }

    async fn fetch_one(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
        match id.as_str() {
            "7" => Ok(Json(json!({ "data": student_json() }))),
            "broken" => Err(StatusCode::INTERNAL_SERVER_ERROR),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    async fn update(Path(id): Path<String>, Json(_body): Json<Value>) -> StatusCode {
        if id == "7" {
            StatusCode::OK
        } else {
            StatusCode::NOT_FOUND
        }
    }

    async fn remove(Path(id): Path<String>) -> StatusCode {
        if id == "7" {
            StatusCode::NO_CONTENT
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    async fn remove_teacher() -> StatusCode {
        TEACHER_DELETES.fetch_add(1, Ordering::SeqCst);
        StatusCode::NO_CONTENT
    }

    async fn backend() -> HttpRecordApi<Student> {
        let router = Router::new()
            .route("/api/siswa", get(list).post(create))
            .route("/api/siswa/{id}", get(fetch_one).put(update).delete(remove))
            .route("/api/guru/{id}", delete(remove_teacher));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });

        let config = Arc::new(ApiConfig::with_values(
            format!("http://{addr}/api/"),
            Some(SecretString::from("t0ken")),
            Duration::from_secs(5),
        ));
        HttpRecordApi::new(build_client(&config).unwrap(), config)
    }

    #[tokio::test]
    async fn list_sends_paging_search_and_token() {
        let api = backend().await;
        let page = api
            .fetch_list(&ListQuery {
                page: 2,
                page_size: 10,
                search: "ana".into(),
            })
            .await
            .unwrap();

        assert_eq!(page.meta.page, 2);
        assert_eq!(page.meta.total, 21);
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].name, "Ana Putri");
    }

    #[tokio::test]
    async fn get_distinguishes_missing_from_failure() {
        let api = backend().await;
        assert!(api.get(&RecordId::new("7")).await.unwrap().is_some());
        assert!(api.get(&RecordId::new("8")).await.unwrap().is_none());
        assert!(api.get(&RecordId::new("broken")).await.is_err());
    }

    #[tokio::test]
    async fn mutations_report_any_2xx_as_success() {
        let api = backend().await;
        let id = RecordId::new("7");

        assert!(api.create(&complete_draft()).await);
        assert!(api.update(&id, &complete_draft()).await);
        assert!(api.delete(&id).await);

        assert!(!api.create(&StudentDraft::default()).await);
        assert!(!api.update(&RecordId::new("8"), &complete_draft()).await);
        assert!(!api.delete(&RecordId::new("8")).await);
    }

    #[tokio::test]
    async fn ids_stay_inside_their_collection() {
        let api = backend().await;

        assert!(!api.delete(&RecordId::new("../guru/5")).await);
        assert!(!api.update(&RecordId::new("../guru/5"), &complete_draft()).await);
        assert!(!api.delete(&RecordId::new("..")).await);
        assert!(api.get(&RecordId::new("../guru/5")).await.unwrap().is_none());
        assert!(api.get(&RecordId::new("..")).await.is_err());
        assert_eq!(TEACHER_DELETES.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_refusal() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = Arc::new(ApiConfig::with_values(
            format!("http://{addr}"),
            None,
            Duration::from_secs(1),
        ));
        let api: HttpRecordApi<Student> =
            HttpRecordApi::new(build_client(&config).unwrap(), config);

        assert!(!api.delete(&RecordId::new("7")).await);
        assert!(
            api.fetch_list(&ListQuery {
                page: 1,
                page_size: 10,
                search: String::new(),
            })
            .await
            .is_err()
        );
    }
}
