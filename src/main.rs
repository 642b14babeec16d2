use group_order::clients::{RawSelections, View};
use group_order::lifecycle::{setup_tracing, Config, OrderSystem};
use group_order::model::UserId;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    setup_tracing(&config.log_filter);

    info!(diners = config.demo_diners, "Starting group order demo");

    let system = match OrderSystem::start(&config) {
        Ok(system) => system,
        Err(e) => {
            error!(error = %e, "Cannot start without a menu");
            return Err(e.into());
        }
    };

    let item_ids: Vec<String> = system
        .engine()
        .catalog()
        .items()
        .iter()
        .map(|item| item.id.to_string())
        .collect();

    // Each diner picks a few dishes, then changes their mind about one.
    let mut handles = Vec::with_capacity(config.demo_diners);
    for diner in 0..config.demo_diners {
        let mut session = system.session();
        let item_ids = item_ids.clone();
        let span = tracing::info_span!("diner", n = diner);
        handles.push(tokio::spawn(
            async move {
                session.create_user(&format!("diner-{diner}")).await;

                let first: RawSelections = item_ids
                    .iter()
                    .enumerate()
                    .map(|(i, id)| (id.clone(), ((diner + i) % 3).to_string()))
                    .collect();
                session.submit(&first).await;

                let changed = item_ids[diner % item_ids.len()].clone();
                let second: RawSelections = [(changed, "1".to_string())].into();
                match session.submit(&second).await {
                    View::Order(order) => info!(total = %order.total, "Order placed"),
                    other => warn!(view = ?other, "Unexpected view"),
                }
            }
            .instrument(span),
        ));
    }
    for handle in handles {
        handle.await?;
    }

    let session = system.session();
    if let View::Totals(aggregate) = session.totals().await {
        info!(%aggregate, "Totals");
    }

    let snapshot = system.engine().snapshot().await;
    for order in &snapshot.users {
        info!(%order, "User order");
    }
    if !snapshot.is_consistent() {
        error!("Aggregate does not match the sum of user orders");
    }

    let ghost = UserId::from("nobody");
    if system.engine().user_order(&ghost).await.is_err() {
        info!(user = %ghost, "Unknown users have no order");
    }

    session.reset().await;
    system.shutdown().await;

    info!("Demo completed successfully");
    Ok(())
}
