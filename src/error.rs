use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::num::ParseIntError;

pub type AdminResult<T> = Result<T, AdminError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum AdminError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse env var `{}` as a number", name))]
    ParseNumber {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Unable to find timezone {:?}", tz))]
    InvalidTimezone { source: jiff::Error, tz: String },
    #[snafu(display("Unable to parse locale {:?}", provided))]
    InvalidLocale {
        source: icu::locale::ParseError,
        provided: String,
    },
    #[snafu(display("Unable to create date time formatter"))]
    BadDateTimeFormatter {
        source: icu::datetime::DateTimeFormatterLoadError,
    },
    #[snafu(display("Error building HTTP client"))]
    BuildHttpClient { source: reqwest::Error },
    #[snafu(display("Error sending request to {}", url))]
    SendRequest { source: reqwest::Error, url: String },
    #[snafu(display("Backend answered {} for {}", status, url))]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        url: String,
    },
    #[snafu(display("Error decoding backend response from {}", url))]
    DecodeResponse { source: reqwest::Error, url: String },
    #[snafu(display("Unable to find {} with ID: {}", entity, id))]
    MissingRecord { entity: &'static str, id: String },
    #[snafu(display("Record ID {:?} can't be used in a URL", id))]
    UnusableRecordId { id: String },
    #[snafu(display("Form for {} contained unknown field {:?}", entity, field))]
    UnknownField { entity: &'static str, field: String },
}

impl IntoResponse for AdminError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input
        const BG: StatusCode = StatusCode::BAD_GATEWAY; //backend misbehaved

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Admin Error "}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::BadEnvVar { .. } | Self::ParseNumber { .. } => ISE,
            Self::InvalidTimezone { .. } | Self::InvalidLocale { .. } => ISE,
            Self::BadDateTimeFormatter { .. } => ISE,
            Self::BuildHttpClient { .. } => ISE,
            Self::SendRequest { .. } => BG,
            Self::UnexpectedStatus { .. } => BG,
            Self::DecodeResponse { .. } => BG,
            Self::MissingRecord { .. } => NF,
            Self::UnknownField { .. } | Self::UnusableRecordId { .. } => BI,
        };

        error!(?self, "Error!");
        (status_code, Html(basic_error(self.to_string()))).into_response()
    }
}
