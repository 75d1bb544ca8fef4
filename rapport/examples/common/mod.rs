use rapport_core::connector::FeedConnector;
use std::sync::Arc;

#[must_use]
pub fn get_connector() -> Arc<dyn FeedConnector> {
    if std::env::var("RAPPORT_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        Arc::new(rapport_mock::MockConnector::new())
    } else {
        // Raw connector; the orchestrator builder layers caching itself
        Arc::new(rapport_feeds::FeedsConnector::new_raw())
    }
}
