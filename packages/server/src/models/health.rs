use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// `ok` when every dependency answered, `degraded` otherwise.
    #[schema(example = "ok")]
    pub status: &'static str,
    #[schema(example = "up")]
    pub database: &'static str,
}
