use axum::body::Bytes;
use server_api::ApiContext;

#[derive(Debug, Clone)]
pub(crate) struct PageSettings {
    pub(crate) title: String,
    pub(crate) heading: String,
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) page: PageSettings,
    pub(crate) favicon: Option<Bytes>,
}
