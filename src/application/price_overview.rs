use crate::{
    application::ports::DashboardApi,
    domain::{
        analytics::PriceOverview,
        errors::AppError,
        logging::{LogComponent, get_logger},
    },
};

/// Fetch `/api/price-analysis` and format it for the overview cards.
/// Failures are logged only; the cards keep their placeholders.
pub async fn load_price_analysis<A: DashboardApi>(api: &A) -> Result<PriceOverview, AppError> {
    match api.price_analysis().await {
        Ok(analysis) => {
            let overview = PriceOverview::from(&analysis);
            get_logger().debug(
                LogComponent::Application("PriceOverview"),
                &format!("💰 Current price {}", overview.current_price),
            );
            Ok(overview)
        }
        Err(e) => {
            get_logger().warn(
                LogComponent::Application("PriceOverview"),
                &format!("⚠️ Error loading price analysis: {}", e),
            );
            Err(e)
        }
    }
}
