use crate::{
    data::{FieldKind, FieldSpec, FieldValue},
    listing::PLACEHOLDER_ROWS,
};
use maud::{Markup, Render, html};

const INPUT_CLASSES: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";
const INVALID_INPUT_CLASSES: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-red-500";

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn form_element(id: &str, label: &str, input: Markup) -> Markup {
    html! {
        div id={"field-" (id)} class="mb-4" {
            label for=(id) class="block text-gray-300 text-sm font-bold mb-2" {(label)}
            (input)
        }
    }
}

pub fn error_message(message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            p class="text-red-400 text-xs italic mt-1" {(message)}
        }
    }
}

///Extra htmx wiring for a single input, eg to refresh another field as this one changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveUpdate<'a> {
    pub post_to: Option<&'a str>,
    pub target: Option<&'a str>,
}

///Renders one draft field as the input its kind asks for, with any validation message below it.
pub fn draft_field<F: 'static>(
    spec: &FieldSpec<F>,
    id: &str,
    value: FieldValue<'_>,
    error: Option<&str>,
    live: LiveUpdate<'_>,
) -> Markup {
    let text = value.as_text();
    let classes = if error.is_some() {
        INVALID_INPUT_CLASSES
    } else {
        INPUT_CLASSES
    };

    let input = match spec.kind {
        FieldKind::Text | FieldKind::Date | FieldKind::Email | FieldKind::Secret => {
            let input_type = match spec.kind {
                FieldKind::Date => "date",
                FieldKind::Email => "email",
                FieldKind::Secret => "password",
                _ => "text",
            };
            html! {
                input type=(input_type) id=(id) name=(id) value=[text] class=(classes)
                    hx-post=[live.post_to] hx-trigger=[live.post_to.map(|_| "input changed")]
                    hx-include=[live.post_to.map(|_| "closest form")]
                    hx-target=[live.target] hx-swap=[live.target.map(|_| "outerHTML")] {}
            }
        }
        FieldKind::LongText => html! {
            textarea id=(id) name=(id) rows="3" class=(classes) {(text.unwrap_or_default())}
        },
        FieldKind::Choice(options) => html! {
            select id=(id) name=(id) class=(classes) {
                @if text.is_none() {
                    option value="" selected {"Choose..."}
                }
                @for (code, label) in options {
                    option value=(code) selected[text == Some(*code)] {(label)}
                }
            }
        },
        FieldKind::Toggle { on, off } => {
            let checked = matches!(value, FieldValue::Flag(true));
            html! {
                div class="flex items-center" {
                    //unchecked boxes aren't posted, so the hidden input supplies the `false`
                    input type="hidden" name=(id) value="false" {}
                    input type="checkbox" id=(id) name=(id) value="true" checked[checked] class="mr-2 leading-tight" {}
                    span class="text-gray-300" {(if checked { on } else { off })}
                }
            }
        }
    };

    form_element(
        id,
        spec.label,
        html! {
            (input)
            (error_message(error))
        },
    )
}

pub fn form_submit_button(text: Option<&str>) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" class="bg-blue-500 hover:bg-blue-700 disabled:opacity-50 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text.unwrap_or("Submit"))
            }
        }
    }
}

pub fn error_alert(heading: &str, message: impl Render) -> Markup {
    html! {
        div role="alert" class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" {
            strong class="font-bold" {(heading)}
            " "
            span class="block sm:inline" {(message)}
        }
    }
}

pub fn badge(text: &str, positive: bool) -> Markup {
    let classes = if positive {
        "inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium bg-green-800 text-green-100"
    } else {
        "inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium bg-gray-600 text-gray-200"
    };
    html! {
        span class=(classes) {(text)}
    }
}

pub fn render_table(titles: &[&str], rows: Vec<Vec<Markup>>) -> Markup {
    html! {
        div class="overflow-x-auto" {
            table class="min-w-full bg-gray-800 rounded shadow-md" {
                (table_head(titles))
                tbody {
                    @for row in rows {
                        tr class="hover:bg-gray-700" {
                            @for col in row {
                                td class="py-2 px-4 border-b border-gray-600 text-gray-200" {(col)}
                            }
                        }
                    }
                }
            }
        }
    }
}

///Skeleton rows shown while a page is on its way.
pub fn placeholder_table(titles: &[&str]) -> Markup {
    html! {
        div class="overflow-x-auto" {
            table class="min-w-full bg-gray-800 rounded shadow-md" {
                (table_head(titles))
                tbody {
                    @for _ in 0..PLACEHOLDER_ROWS {
                        tr class="placeholder-row" {
                            td colspan=(titles.len()) class="py-3 px-4 border-b border-gray-600" {
                                div class="flex space-x-2" {
                                    div class="h-4 w-40 bg-gray-600 rounded animate-pulse" {}
                                    div class="h-4 w-16 bg-gray-600 rounded animate-pulse" {}
                                    div class="h-4 w-12 bg-gray-600 rounded animate-pulse" {}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn empty_table(titles: &[&str], message: &str) -> Markup {
    html! {
        div class="overflow-x-auto" {
            table class="min-w-full bg-gray-800 rounded shadow-md" {
                (table_head(titles))
                tbody {
                    tr {
                        td colspan=(titles.len()) class="text-center py-12 text-gray-400" {(message)}
                    }
                }
            }
        }
    }
}

fn table_head(titles: &[&str]) -> Markup {
    html! {
        thead class="bg-gray-700" {
            tr {
                @for title in titles {
                    th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Field {
        Religion,
        Active,
    }

    #[test]
    fn placeholder_table_has_five_rows() {
        let markup = placeholder_table(&["Name", "NIK"]).into_string();
        assert_eq!(markup.matches("placeholder-row").count(), PLACEHOLDER_ROWS);
    }

    #[test]
    fn choice_marks_current_code_selected() {
        let spec = FieldSpec::new(
            Field::Religion,
            "Religion",
            FieldKind::Choice(&[("Islam", "Islam"), ("Hindu", "Hindu")]),
        );
        let markup = draft_field(
            &spec,
            "religion",
            FieldValue::Text("Hindu"),
            None,
            LiveUpdate::default(),
        )
        .into_string();
        assert!(markup.contains(r#"<option value="Hindu" selected>"#));
        assert!(!markup.contains("Choose..."));
    }

    #[test]
    fn toggle_posts_false_when_unchecked() {
        let spec = FieldSpec::new(
            Field::Active,
            "Status",
            FieldKind::Toggle {
                on: "Active",
                off: "Inactive",
            },
        );
        let markup = draft_field(
            &spec,
            "is_active",
            FieldValue::Flag(false),
            Some("nope"),
            LiveUpdate::default(),
        )
        .into_string();
        assert!(markup.contains(r#"type="hidden" name="is_active" value="false""#));
        assert!(!markup.contains("checked"));
        assert!(markup.contains("Inactive"));
        assert!(markup.contains("nope"));
    }
}
