use serde::{Deserialize, Serialize};

use crate::entity::pdf;
use crate::store::{NewPdf, PdfChanges};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreatePdfRequest {
    #[schema(example = "Invoice")]
    pub name: String,
    #[serde(default)]
    pub selected: bool,
    /// Content reference (URL or path) supplied by the client.
    #[schema(example = "https://example.com/invoice.pdf")]
    pub file: String,
}

impl From<CreatePdfRequest> for NewPdf {
    fn from(req: CreatePdfRequest) -> Self {
        Self {
            name: req.name,
            selected: req.selected,
            file: req.file,
            storage_key: None,
        }
    }
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdatePdfRequest {
    pub name: Option<String>,
    pub selected: Option<bool>,
    pub file: Option<String>,
}

impl From<UpdatePdfRequest> for PdfChanges {
    fn from(req: UpdatePdfRequest) -> Self {
        Self {
            name: req.name,
            selected: req.selected,
            file: req.file,
        }
    }
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PdfListQuery {
    /// Only return records whose `selected` flag equals this value.
    pub selected: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct PdfResponse {
    pub id: i32,
    pub name: String,
    pub selected: bool,
    pub file: String,
}

impl From<pdf::Model> for PdfResponse {
    fn from(m: pdf::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            selected: m.selected,
            file: m.file,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "PDF successfully deleted from storage and database")]
    pub message: String,
}
