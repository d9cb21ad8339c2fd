//! Named agent instances
//!
//! Each logical name resolves to exactly one `ReviewAgent`. The first lookup
//! of a name builds the agent and waits for its schema before returning, so
//! no request is ever served by an agent that isn't ready.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use axum::Router;
use tokio::sync::Mutex;
use crate::config::database_path_in;
use crate::inference::InferenceEngine;
use crate::storage::SqliteStore;
use crate::Result;
use super::{routes, ReviewAgent};

type AgentFactory = dyn Fn(&str) -> Result<ReviewAgent> + Send + Sync;

/// A resolved agent and the router serving its internal endpoints
#[derive(Clone)]
pub struct AgentHandle {
    pub agent: Arc<ReviewAgent>,
    pub service: Router,
}

pub struct AgentDirectory {
    factory: Box<AgentFactory>,
    agents: Mutex<HashMap<String, AgentHandle>>,
}

impl AgentDirectory {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&str) -> Result<ReviewAgent> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            agents: Mutex::new(HashMap::new()),
        }
    }

    /// Directory whose agents each get their own SQLite file under `data_dir`
    pub fn sqlite(data_dir: PathBuf, inference: Arc<dyn InferenceEngine>, model: String) -> Self {
        Self::new(move |name| {
            let path = database_path_in(&data_dir, name);
            tracing::info!("Opening store for agent '{}' at {}", name, path.display());
            let store = SqliteStore::open(&path)?;
            Ok(ReviewAgent::new(name, Arc::clone(&inference), Arc::new(store)).with_model(model.clone()))
        })
    }

    /// Resolve `name`, building and initializing the agent on first use.
    ///
    /// Lookups are serialized, so concurrent first requests wait for a single
    /// initialization instead of racing. A failed build is retried on the next lookup.
    pub async fn get(&self, name: &str) -> Result<AgentHandle> {
        let mut agents = self.agents.lock().await;
        if let Some(handle) = agents.get(name) {
            return Ok(handle.clone());
        }

        let agent = Arc::new((self.factory)(name)?);
        agent.ready().await?;

        let handle = AgentHandle {
            service: routes::router(Arc::clone(&agent)),
            agent,
        };
        agents.insert(name.to_string(), handle.clone());
        Ok(handle)
    }
}
