use crate::{
    api::RecordApi,
    config::date_display::DateDisplay,
    data::{
        or_placeholder,
        student::{Student, StudentStatus},
    },
    maud_conveniences::badge,
    routes::records::RecordScreen,
    state::AdminState,
};
use maud::{Markup, html};
use std::sync::Arc;

impl RecordScreen for Student {
    const PATH: &'static str = "/students";
    const TITLE: &'static str = "Students";
    const LABEL: &'static str = "Student";
    const SEARCH_PLACEHOLDER: &'static str = "Search by NIS or name...";
    const COLUMNS: &'static [&'static str] = &[
        "Name",
        "NIS",
        "Sex",
        "Date of Birth",
        "NIK",
        "NISN",
        "Religion",
        "Address",
        "Status",
        "Updated",
    ];

    fn api(state: &AdminState) -> Arc<dyn RecordApi<Self>> {
        state.students()
    }

    fn row(&self, dates: &DateDisplay) -> Vec<Markup> {
        let address = self.short_address();

        vec![
            html! { span class="font-medium" {(self.name)} },
            html! { span class="font-mono text-xs" {(or_placeholder(self.nis.as_deref()))} },
            html! { (or_placeholder(self.gender.map(|g| g.code()))) },
            html! { (dates.short_date(self.birth_date.as_deref())) },
            html! { span class="font-mono text-xs" {(or_placeholder(self.nik.as_deref()))} },
            html! { span class="font-mono text-xs" {(or_placeholder(self.nisn.as_deref()))} },
            html! { (or_placeholder(self.religion.map(|r| r.label()))) },
            html! { span title=[self.address.as_deref()] {(or_placeholder(address.as_deref()))} },
            match self.status {
                Some(status) => badge(status.label(), status == StudentStatus::Active),
                None => html! {"---"},
            },
            html! { (dates.short_date(self.updated_at.as_deref())) },
        ]
    }
}
