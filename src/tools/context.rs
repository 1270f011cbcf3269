use std::sync::Arc;

use crate::catalog::Catalog;

#[derive(Debug, Clone)]
pub struct ToolContext {
    pub catalog: Arc<Catalog>,
}

impl ToolContext {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new(Arc::new(Catalog::land_rover()))
    }
}
