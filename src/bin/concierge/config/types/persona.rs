use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PersonaConfig {
    /// Replaces the built-in concierge prompt
    pub system_prompt: Option<String>,
    /// Append the customer-interest profile to the prompt
    pub customer_profile: bool,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            customer_profile: true,
        }
    }
}
