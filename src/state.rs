use std::sync::Arc;

use crate::external::ads_provider::AdsProvider;
use crate::external::report_provider::ReportProvider;

#[derive(Clone)]
pub struct AppState {
    pub ads_provider: Arc<dyn AdsProvider>,
    pub report_provider: Arc<dyn ReportProvider>,
}
