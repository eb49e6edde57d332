use serde::{Deserialize, Serialize};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SummarizeRequest {
    #[schema(example = "Rust is a multi-paradigm, general-purpose programming language...")]
    pub text: String,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct QuestionRequest {
    #[schema(example = "What is the total amount due?")]
    pub question: String,
}
