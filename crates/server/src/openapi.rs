use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct CategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(utoipa::ToSchema)]
pub struct ServiceRequest {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub is_subcontracted: bool,
    pub category_id: Uuid,
    pub display_order: Option<i32>,
}

#[derive(utoipa::ToSchema)]
pub struct ReorderRequest {
    /// `up` or `down`
    pub direction: String,
}

#[derive(utoipa::ToSchema)]
pub struct InquiryRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service_id: Option<String>,
    pub message: String,
}

#[derive(utoipa::ToSchema)]
pub struct StatusRequest {
    /// NEW | READ | RESPONDED | ARCHIVED
    pub status: String,
}

#[derive(utoipa::ToSchema)]
pub struct SettingsRequest {
    pub service_area_lat: f64,
    pub service_area_lng: f64,
    pub service_area_miles: i32,
    pub company_name: String,
    pub company_phone: String,
    pub company_email: String,
    pub company_address: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::public::health,
        crate::routes::public::list_categories,
        crate::routes::public::list_services,
        crate::routes::public::get_service,
        crate::routes::public::search_index,
        crate::routes::public::search,
        crate::routes::public::create_inquiry,
        crate::routes::public::site_settings,
        crate::routes::admin_auth::login,
        crate::routes::admin_auth::logout,
        crate::routes::admin_auth::me,
        crate::routes::categories::list,
        crate::routes::categories::create,
        crate::routes::categories::get,
        crate::routes::categories::update,
        crate::routes::categories::delete,
        crate::routes::categories::reorder,
        crate::routes::services::list,
        crate::routes::services::grouped,
        crate::routes::services::create,
        crate::routes::services::get,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::services::reorder,
        crate::routes::inquiries::list,
        crate::routes::inquiries::get,
        crate::routes::inquiries::update_status,
        crate::routes::inquiries::delete,
        crate::routes::settings::update,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            CategoryRequest,
            ServiceRequest,
            ReorderRequest,
            InquiryRequest,
            StatusRequest,
            SettingsRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "public"),
        (name = "auth"),
        (name = "categories"),
        (name = "services"),
        (name = "inquiries"),
        (name = "settings")
    )
)]
pub struct ApiDoc;
