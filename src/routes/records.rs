use crate::{
    api::RecordApi,
    config::date_display::DateDisplay,
    data::{Draft, Entity, FieldId, FieldSpec, FormMode, RecordId},
    error::{AdminResult, MissingRecordSnafu, UnknownFieldSnafu},
    form::{FieldOf, FormState},
    listing::{ListController, ListView},
    maud_conveniences::{
        LiveUpdate, draft_field, empty_table, error_alert, form_submit_button, placeholder_table,
        render_table, title,
    },
    state::AdminState,
    submission::{delete, submit},
};
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use maud::{Markup, html};
use serde::Deserialize;
use snafu::OptionExt;
use std::sync::Arc;

///htmx event fired on the body whenever the backend's records change
pub const RECORDS_CHANGED: &str = "records-changed";
const HX_TRIGGER: &str = "HX-Trigger";
const HX_TRIGGER_NAME: &str = "HX-Trigger-Name";

///A kind of record that gets its own list + dialog screen.
pub trait RecordScreen: Entity {
    const PATH: &'static str;
    ///plural, eg `Students`
    const TITLE: &'static str;
    ///singular, eg `Student`
    const LABEL: &'static str;
    const SEARCH_PLACEHOLDER: &'static str;
    ///not including the actions column
    const COLUMNS: &'static [&'static str];

    fn api(state: &AdminState) -> Arc<dyn RecordApi<Self>>;
    fn row(&self, dates: &DateDisplay) -> Vec<Markup>;
}

pub fn record_routes<E: RecordScreen>() -> Router<AdminState> {
    let path = E::PATH;
    Router::new()
        .route(path, get(get_screen::<E>).post(post_create::<E>))
        .route(&format!("{path}/list"), get(get_list::<E>))
        .route(&format!("{path}/new"), get(get_add_dialog::<E>))
        .route(&format!("{path}/new/fields/{{field}}"), post(post_refresh_field::<E>))
        .route(&format!("{path}/dialog/close"), get(get_close_dialog::<E>))
        .route(&format!("{path}/{{id}}/edit"), get(get_edit_dialog::<E>))
        .route(
            &format!("{path}/{{id}}"),
            axum::routing::put(put_update::<E>).delete(delete_record::<E>),
        )
}

fn columns<E: RecordScreen>() -> Vec<&'static str> {
    let mut columns = E::COLUMNS.to_vec();
    columns.push("Actions");
    columns
}

pub async fn get_screen<E: RecordScreen>(State(state): State<AdminState>) -> Markup {
    let list_url = format!("{}/list", E::PATH);

    state.render(html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-7xl w-full flex flex-col space-y-4" {
            div class="flex flex-row items-center justify-between" {
                (title(E::TITLE))
                button class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded" hx-get={(E::PATH) "/new"} hx-target="#dialog" {
                    "Add " (E::LABEL)
                }
            }
            input type="search" name="search" placeholder=(E::SEARCH_PLACEHOLDER)
                class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600"
                hx-get=(list_url) hx-trigger="input changed, search" hx-target="#records" hx-swap="outerHTML" hx-sync="this:replace" {}
            div id="records" hx-get=(list_url) hx-trigger="load" hx-swap="outerHTML" {
                (placeholder_table(&columns::<E>()))
            }
            div id="dialog" {}
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    page: Option<u32>,
    #[serde(default)]
    search: String,
}

///Without a page this is a fresh search, with one it re-fetches that page.
pub async fn get_list<E: RecordScreen>(
    State(state): State<AdminState>,
    Query(ListParams { page, search }): Query<ListParams>,
) -> Markup {
    let page_size = state.config().page_size();
    let mut list = ListController::<E>::restore(page.unwrap_or(1), page_size, search.clone());
    let ticket = if page.is_some() {
        list.refresh()
    } else {
        list.search(search)
    };

    let result = E::api(&state).fetch_list(&ticket.query).await;
    list.complete(&ticket, result);

    render_list(&list, &state.config().date_display())
}

pub fn render_list<E: RecordScreen>(list: &ListController<E>, dates: &DateDisplay) -> Markup {
    let list_url = format!("{}/list", E::PATH);
    let columns = columns::<E>();
    let previous = list.clone().previous_page().map(|ticket| ticket.query.page);
    let next = list.clone().next_page().map(|ticket| ticket.query.page);
    let meta = list.meta();

    html! {
        div id="records" hx-get=(list_url) hx-trigger={(RECORDS_CHANGED) " from:body"} hx-include="find .list-state" hx-swap="outerHTML" {
            input type="hidden" class="list-state" name="page" value=(list.page()) {}
            input type="hidden" class="list-state" name="search" value=(list.search_term()) {}

            @match list.view() {
                ListView::Loading => (placeholder_table(&columns)),
                ListView::Empty => (empty_table(&columns, &format!("No {} found.", E::TITLE.to_lowercase()))),
                ListView::Unavailable => (error_alert("Unable to load the list.", "The server could not be reached, please try again.")),
                ListView::Rows(records) => {
                    (render_table(&columns, records.iter().map(|record| {
                        let mut cells = record.row(dates);
                        cells.push(row_actions(record));
                        cells
                    }).collect()))
                }
            }

            div class="flex flex-row items-center justify-between mt-4 text-sm text-gray-300" {
                p {
                    "Total: "
                    span class="font-semibold text-white" {(meta.total) " " (E::TITLE.to_lowercase())}
                }
                div class="flex flex-row items-center space-x-2" {
                    span {"Page " (list.page()) " of " (meta.total_pages.max(1))}
                    button class="bg-slate-600 hover:bg-slate-800 disabled:opacity-50 py-1 px-3 rounded" disabled[previous.is_none()]
                        hx-get=(list_url) name="page" value=[previous] hx-include="#records .list-state[name='search']"
                        hx-target="#records" hx-swap="outerHTML" {
                        "Previous"
                    }
                    button class="bg-slate-600 hover:bg-slate-800 disabled:opacity-50 py-1 px-3 rounded" disabled[next.is_none()]
                        hx-get=(list_url) name="page" value=[next] hx-include="#records .list-state[name='search']"
                        hx-target="#records" hx-swap="outerHTML" {
                        "Next"
                    }
                }
            }
        }
    }
}

fn row_actions<E: RecordScreen>(record: &E) -> Markup {
    let Some(segment) = record.id().path_segment() else {
        warn!(id = %record.id(), noun = E::NOUN, "Record ID can't be used in a link");
        return html! {};
    };
    let confirm = format!(
        "Delete {}? This permanently removes the {} and the login account linked to it.",
        record.display_name(),
        E::NOUN
    );

    html! {
        div class="flex flex-row space-x-2" {
            button class="bg-slate-600 hover:bg-slate-800 font-bold py-1 px-3 rounded" hx-get={(E::PATH) "/" (segment) "/edit"} hx-target="#dialog" {
                "Edit"
            }
            button class="bg-red-600 hover:bg-red-800 font-bold py-1 px-3 rounded" hx-delete={(E::PATH) "/" (segment)} hx-target="#dialog" hx-confirm=(confirm) {
                "Delete"
            }
        }
    }
}

fn render_field<E: RecordScreen>(form: &FormState<E>, spec: &FieldSpec<FieldOf<E>>) -> Markup {
    let mirror_target = if form.mode().is_create() {
        <E::Draft as Draft>::MIRRORED
            .iter()
            .find(|(source, _)| *source == spec.field)
            .map(|(_, target)| target.id())
    } else {
        None
    };
    let post_to = mirror_target.map(|target| format!("{}/new/fields/{target}", E::PATH));
    let target = mirror_target.map(|target| format!("#field-{target}"));

    draft_field(
        spec,
        spec.field.id(),
        form.draft().value(spec.field),
        form.errors().get(spec.field),
        LiveUpdate {
            post_to: post_to.as_deref(),
            target: target.as_deref(),
        },
    )
}

pub fn render_dialog<E: RecordScreen>(form: &FormState<E>) -> Markup {
    if !form.is_open() {
        return html! {};
    }

    let (heading, post_url, put_url) = match form.mode() {
        FormMode::Create => (format!("Add New {}", E::LABEL), Some(E::PATH.to_string()), None),
        FormMode::Edit { id } => (
            format!("Edit {}", E::LABEL),
            None,
            id.path_segment()
                .map(|segment| format!("{}/{segment}", E::PATH)),
        ),
    };
    let creating = form.mode().is_create();

    html! {
        div class="fixed inset-0 bg-black/60 flex items-center justify-center z-50" {
            div class="bg-gray-800 p-8 rounded shadow-md max-w-3xl w-full max-h-[90vh] overflow-y-auto" {
                (title(heading))
                @if let Some(notice) = form.notice() {
                    (error_alert("Not saved.", notice))
                }
                form hx-post=[post_url] hx-put=[put_url] hx-target="#dialog" hx-sync="this:drop" hx-disabled-elt="find button[type='submit']" class="grid grid-cols-1 md:grid-cols-2 gap-x-4" {
                    @for spec in <E::Draft as Draft>::LAYOUT {
                        @if creating || !spec.create_only {
                            (render_field(form, spec))
                        }
                    }
                    div class="flex flex-row space-x-4 md:col-span-2" {
                        button type="button" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" hx-get={(E::PATH) "/dialog/close"} hx-target="#dialog" {
                            "Cancel"
                        }
                        (form_submit_button(Some("Save")))
                    }
                }
            }
        }
    }
}

pub async fn get_add_dialog<E: RecordScreen>() -> Markup {
    render_dialog(&FormState::<E>::open_add())
}

pub async fn get_edit_dialog<E: RecordScreen>(
    State(state): State<AdminState>,
    Path(id): Path<String>,
) -> AdminResult<Markup> {
    let id = RecordId::new(id);
    let record = E::api(&state)
        .get(&id)
        .await?
        .context(MissingRecordSnafu {
            entity: E::NOUN,
            id: id.to_string(),
        })?;

    Ok(render_dialog(&FormState::open_edit(&record)))
}

pub async fn get_close_dialog<E: RecordScreen>() -> Markup {
    let mut form = FormState::<E>::default();
    form.close();
    render_dialog(&form)
}

fn rebuild<E: RecordScreen>(mode: FormMode, fields: Vec<(String, String)>) -> AdminResult<FormState<E>> {
    let mut form = FormState::resume(mode);
    for (id, value) in fields {
        form.apply(&id, value)?;
    }
    Ok(form)
}

async fn save<E: RecordScreen>(
    state: &AdminState,
    mode: FormMode,
    fields: Vec<(String, String)>,
) -> AdminResult<Response> {
    let mut form = rebuild::<E>(mode, fields)?;
    let api = E::api(state);
    let outcome = submit(&mut form, api.as_ref()).await;

    let dialog = render_dialog(&form);
    Ok(if outcome.changed_records() {
        ([(HX_TRIGGER, RECORDS_CHANGED)], dialog).into_response()
    } else {
        dialog.into_response()
    })
}

pub async fn post_create<E: RecordScreen>(
    State(state): State<AdminState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> AdminResult<Response> {
    save::<E>(&state, FormMode::Create, fields).await
}

pub async fn put_update<E: RecordScreen>(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    Form(fields): Form<Vec<(String, String)>>,
) -> AdminResult<Response> {
    save::<E>(&state, FormMode::Edit { id: RecordId::new(id) }, fields).await
}

///Re-renders one field of the add dialog after another field it mirrors has changed.
pub async fn post_refresh_field<E: RecordScreen>(
    Path(field): Path<String>,
    headers: HeaderMap,
    Form(fields): Form<Vec<(String, String)>>,
) -> AdminResult<Markup> {
    let spec = <FieldOf<E>>::lookup(&field)
        .and_then(<E::Draft as Draft>::spec)
        .context(UnknownFieldSnafu {
            entity: E::NOUN,
            field,
        })?;

    //the element that fired goes last so its value wins
    let fired = headers
        .get(HX_TRIGGER_NAME)
        .and_then(|name| name.to_str().ok())
        .and_then(|name| fields.iter().rev().find(|(id, _)| id == name))
        .cloned();

    let mut form = rebuild::<E>(FormMode::Create, fields)?;
    if let Some((id, value)) = fired {
        form.apply(&id, value)?;
    }

    Ok(render_field(&form, spec))
}

pub async fn delete_record<E: RecordScreen>(
    State(state): State<AdminState>,
    Path(id): Path<String>,
) -> Response {
    let id = RecordId::new(id);
    let api = E::api(&state);

    if delete(api.as_ref(), &id).await {
        ([(HX_TRIGGER, RECORDS_CHANGED)], html! {}).into_response()
    } else {
        error_alert(
            "Not deleted.",
            format!("Unable to delete this {}, please try again.", E::NOUN),
        )
        .into_response()
    }
}
