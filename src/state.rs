use crate::{
    api::{
        RecordApi,
        http::{HttpRecordApi, build_client},
    },
    config::RuntimeConfiguration,
    data::{student::Student, teacher::Teacher},
    error::AdminResult,
};
use maud::{DOCTYPE, Markup, html};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AdminState {
    config: RuntimeConfiguration,
    students: Arc<dyn RecordApi<Student>>,
    teachers: Arc<dyn RecordApi<Teacher>>,
}

impl fmt::Debug for AdminState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AdminState {
    pub fn new(config: RuntimeConfiguration) -> AdminResult<Self> {
        let api_config = config.api_config();
        let client = build_client(&api_config)?;

        Ok(Self::with_apis(
            config,
            Arc::new(HttpRecordApi::<Student>::new(
                client.clone(),
                api_config.clone(),
            )),
            Arc::new(HttpRecordApi::<Teacher>::new(client, api_config)),
        ))
    }

    pub fn with_apis(
        config: RuntimeConfiguration,
        students: Arc<dyn RecordApi<Student>>,
        teachers: Arc<dyn RecordApi<Teacher>>,
    ) -> Self {
        Self {
            config,
            students,
            teachers,
        }
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    pub fn students(&self) -> Arc<dyn RecordApi<Student>> {
        self.students.clone()
    }

    pub fn teachers(&self) -> Arc<dyn RecordApi<Teacher>> {
        self.teachers.clone()
    }

    #[allow(clippy::unused_self, clippy::needless_pass_by_value)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "School Admin" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center text-white" {
                    nav class="w-full bg-gray-800 shadow-md mb-8" {
                        div class="container mx-auto flex flex-row space-x-4 px-4 py-3" {
                            a href="/" class="font-bold hover:text-blue-300" {"School Admin"}
                            a href="/students" class="hover:text-blue-300" {"Students"}
                            a href="/teachers" class="hover:text-blue-300" {"Teachers"}
                        }
                    }
                    (markup)
                }
            }
        }
    }
}
