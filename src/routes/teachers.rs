use crate::{
    api::RecordApi,
    config::date_display::DateDisplay,
    data::{or_placeholder, teacher::Teacher},
    maud_conveniences::badge,
    routes::records::RecordScreen,
    state::AdminState,
};
use maud::{Markup, html};
use std::sync::Arc;

impl RecordScreen for Teacher {
    const PATH: &'static str = "/teachers";
    const TITLE: &'static str = "Teachers";
    const LABEL: &'static str = "Teacher";
    const SEARCH_PLACEHOLDER: &'static str = "Search by NIP or name...";
    const COLUMNS: &'static [&'static str] = &[
        "Name",
        "Employment Status",
        "Homeroom",
        "NIP",
        "NUPTK",
        "Phone",
        "Sex",
        "Religion",
        "Status",
        "Updated",
    ];

    fn api(state: &AdminState) -> Arc<dyn RecordApi<Self>> {
        state.teachers()
    }

    fn row(&self, dates: &DateDisplay) -> Vec<Markup> {
        vec![
            html! {
                div class="font-medium" {(self.name)}
                div class="text-xs text-gray-400" {(or_placeholder(self.email.as_deref()))}
            },
            html! {
                span title=[self.employment_status.map(|s| s.label())] {
                    (or_placeholder(self.employment_status.map(|s| s.code())))
                }
            },
            html! { (or_placeholder(self.homeroom_class())) },
            html! { span class="font-mono text-xs" {(or_placeholder(self.nip.as_deref()))} },
            html! { span class="font-mono text-xs" {(or_placeholder(self.nuptk.as_deref()))} },
            html! { (or_placeholder(self.phone.as_deref())) },
            html! { (or_placeholder(self.gender.map(|g| g.label()))) },
            html! { (or_placeholder(self.religion.map(|r| r.label()))) },
            if self.is_active {
                badge("Active", true)
            } else {
                badge("Inactive", false)
            },
            html! {
                span title={"Created " (dates.short_date_time(self.created_at.as_deref()))} {
                    (dates.short_date_time(self.updated_at.as_deref()))
                }
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::fake::{Call, RecordingApi},
        config::{ApiConfig, RuntimeConfiguration},
        data::teacher::{TeacherDraft, fixtures::{complete_create_draft, teacher}},
        routes::records::{RECORDS_CHANGED, get_add_dialog, get_edit_dialog, post_create, post_refresh_field},
    };
    use axum::{
        Form,
        extract::{Path, State},
        http::{HeaderMap, HeaderValue},
    };
    use std::time::Duration;

    fn state_with(teachers: Arc<RecordingApi<Teacher>>) -> AdminState {
        let config = RuntimeConfiguration::from_parts(
            ApiConfig::with_values("http://sis.invalid", None, Duration::from_secs(1)),
            DateDisplay::utc(),
            10,
        );
        AdminState::with_apis(config, Arc::new(RecordingApi::accepting()), teachers)
    }

    fn pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn create_form() -> Vec<(String, String)> {
        pairs(&[
            ("name", "Drs. Bambang Sutrisno, M.Pd."),
            ("gender", "M"),
            ("religion", "Hindu"),
            ("birth_place", "Denpasar"),
            ("birth_date", "1987-03-15"),
            ("phone", "081234567890"),
            ("email", "bambang@sekolah.sch.id"),
            ("nik", "5171031503870002"),
            ("nuptk", "1234567890123456"),
            ("nip", "198703152010011002"),
            ("employment_status", "GTY"),
            ("address", "Jl. Gatot Subroto 1"),
            ("is_active", "false"),
            ("username", "198703152010011002"),
            ("default_password", "rahasia1"),
        ])
    }

    #[test]
    fn rows_show_homeroom_and_activity() {
        let cells: Vec<String> = teacher()
            .row(&DateDisplay::utc())
            .into_iter()
            .map(Markup::into_string)
            .collect();

        assert_eq!(cells.len(), Teacher::COLUMNS.len());
        assert!(cells[1].contains(">GTY<"));
        assert!(cells[1].contains(r#"title="Permanent Foundation Teacher (GTY)""#));
        assert_eq!(cells[2], "XI IPA 2");
        assert_eq!(cells[6], "Male");
        assert!(cells[8].contains("Inactive"));
        assert!(cells[9].contains(r#"title="Created "#));
        assert!(!cells[9].contains("Invalid Date"));
        assert!(!cells[9].contains("Created ---"));
    }

    #[test]
    fn teacher_without_homeroom_shows_placeholder() {
        let mut record = teacher();
        record.homeroom = None;
        let cells = record.row(&DateDisplay::utc());
        assert_eq!(cells[2].clone().into_string(), "---");
    }

    #[tokio::test]
    async fn add_dialog_offers_login_fields_but_edit_does_not() {
        let add = get_add_dialog::<Teacher>().await.into_string();
        assert!(add.contains("Add New Teacher"));
        assert!(add.contains(r#"name="default_password""#));
        assert!(add.contains(r#"hx-post="/teachers/new/fields/username""#));

        let api = Arc::new(RecordingApi::accepting().with_records(vec![teacher()], 1));
        let edit = get_edit_dialog::<Teacher>(State(state_with(api)), Path("g-12".into()))
            .await
            .unwrap()
            .into_string();
        assert!(edit.contains("Edit Teacher"));
        assert!(!edit.contains("default_password"));
        assert!(!edit.contains("/new/fields/"));
    }

    #[tokio::test]
    async fn create_sends_password_once() {
        let api = Arc::new(RecordingApi::accepting());
        let response = post_create::<Teacher>(State(state_with(api.clone())), Form(create_form()))
            .await
            .unwrap();

        assert_eq!(response.headers()["HX-Trigger"], RECORDS_CHANGED);
        assert_eq!(api.calls(), vec![Call::Create(complete_create_draft())]);
    }

    #[tokio::test]
    async fn create_without_login_details_is_rejected() {
        let api = Arc::new(RecordingApi::accepting());
        let form: Vec<_> = create_form()
            .into_iter()
            .filter(|(id, _)| id != "username" && id != "default_password")
            .collect();

        let body = post_create::<Teacher>(State(state_with(api.clone())), Form(form))
            .await
            .unwrap();
        let body = axum::body::to_bytes(body.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();

        //nip is still posted, so the username gets filled from it
        assert!(!body.contains("Username is required."));
        assert!(body.contains("Default password is required."));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn typing_nip_refreshes_username() {
        let mut headers = HeaderMap::new();
        headers.insert("HX-Trigger-Name", HeaderValue::from_static("nip"));

        //the field that fired is posted before the username it overwrites
        let markup = post_refresh_field::<Teacher>(
            Path("username".into()),
            headers,
            Form(pairs(&[("nip", "1987"), ("username", "old")])),
        )
        .await
        .unwrap()
        .into_string();

        assert!(markup.contains(r#"id="field-username""#));
        assert!(markup.contains(r#"value="1987""#));
    }

    #[tokio::test]
    async fn refreshing_unknown_field_fails() {
        let err = post_refresh_field::<Teacher>(Path("shoe_size".into()), HeaderMap::new(), Form(vec![]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("shoe_size"));
    }

    #[test]
    fn default_draft_is_active() {
        assert_eq!(TeacherDraft::default().is_active, Some(true));
    }
}
