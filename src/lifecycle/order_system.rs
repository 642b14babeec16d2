use crate::catalog::{Catalog, CatalogError};
use crate::clients::SessionClient;
use crate::engine::OrderEngine;
use crate::lifecycle::Config;
use std::sync::Arc;
use tracing::{debug, info};

/// The runtime orchestrator for the order system.
///
/// `OrderSystem` is responsible for:
/// - **Startup**: Loading the menu and creating the one [`OrderEngine`]
/// - **Wiring**: Handing out sessions that all share that engine
/// - **Shutdown**: Logging the final state before the engine is dropped
///
/// # Example
///
/// ```rust,no_run
/// # use group_order::lifecycle::{Config, OrderSystem};
/// # async fn run() -> Result<(), group_order::catalog::CatalogError> {
/// let system = OrderSystem::start(&Config::default())?;
///
/// let mut session = system.session();
/// session.create_user("alice").await;
///
/// system.shutdown().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OrderSystem {
    engine: Arc<OrderEngine>,
}

impl OrderSystem {
    /// Loads the menu at `config.menu_path` and starts an empty engine on it.
    ///
    /// # Errors
    /// Any [`CatalogError`]. Nothing is started if the menu is unusable.
    pub fn start(config: &Config) -> Result<Self, CatalogError> {
        info!(menu = %config.menu_path.display(), "Starting order system");
        let catalog = Catalog::load(&config.menu_path)?;
        Ok(Self::with_catalog(catalog))
    }

    /// Starts an empty engine on an already loaded catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            engine: Arc::new(OrderEngine::new(Arc::new(catalog))),
        }
    }

    pub fn engine(&self) -> &Arc<OrderEngine> {
        &self.engine
    }

    /// A new session with no diner identified yet.
    pub fn session(&self) -> SessionClient<OrderEngine> {
        SessionClient::new(Arc::clone(&self.engine))
    }

    /// Logs the final state and drops this handle on the engine.
    ///
    /// Sessions created from this system keep their own handle and stay usable.
    pub async fn shutdown(self) {
        info!("Shutting down order system...");
        let snapshot = self.engine.snapshot().await;
        info!(
            users = snapshot.users.len(),
            total = %snapshot.aggregate.total,
            "Final state"
        );
        debug!(state = %snapshot, "Final state dump");
        info!("Order system shutdown complete.");
    }
}
