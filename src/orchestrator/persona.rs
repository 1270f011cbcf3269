use std::fmt::Write;

const LAND_ROVER_PROMPT: &str = "\
You are an expert Land Rover concierge assistant helping a customer explore Land Rover vehicles.
The customer has expressed interest in Land Rover and is looking to learn more about the lineup.

Key responsibilities:
- Provide detailed, enthusiastic information about Land Rover vehicles
- Help compare different models based on customer needs
- Explain features, capabilities, and luxury amenities
- Assist with scheduling test drives
- Be professional, knowledgeable, and passionate about Land Rover heritage

Tone: Professional, sophisticated, and helpful. Emphasize Land Rover's luxury, capability, and British heritage.";

/// What the dealership already knows about the customer.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerInterests {
    pub preferred_models: Vec<String>,
    /// Budget in US dollars
    pub budget: u32,
    pub luxury: bool,
    pub off_road: bool,
    pub family_friendly: bool,
}

impl Default for CustomerInterests {
    fn default() -> Self {
        Self {
            preferred_models: vec!["Range Rover Sport".to_string(), "Defender 110".to_string()],
            budget: 100_000,
            luxury: true,
            off_road: true,
            family_friendly: true,
        }
    }
}

/// System instruction fixing the assistant's persona.
#[derive(Debug, Clone, PartialEq)]
pub struct Persona {
    prompt: String,
    interests: Option<CustomerInterests>,
}

impl Persona {
    pub fn land_rover() -> Self {
        Self {
            prompt: LAND_ROVER_PROMPT.to_string(),
            interests: Some(CustomerInterests::default()),
        }
    }

    pub fn custom(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            interests: None,
        }
    }

    pub fn with_interests(mut self, interests: Option<CustomerInterests>) -> Self {
        self.interests = interests;
        self
    }

    pub fn system_prompt(&self) -> String {
        let Some(interests) = &self.interests else {
            return self.prompt.clone();
        };
        let mut prompt = self.prompt.clone();
        prompt.push_str("\n\nCustomer profile:\n");
        if !interests.preferred_models.is_empty() {
            let _ = writeln!(
                prompt,
                "- Preferred models: {}",
                interests.preferred_models.join(", ")
            );
        }
        let _ = writeln!(prompt, "- Budget: ${}", interests.budget);
        let mut wants = Vec::new();
        if interests.luxury {
            wants.push("luxury");
        }
        if interests.off_road {
            wants.push("off-road capability");
        }
        if interests.family_friendly {
            wants.push("family-friendly");
        }
        if !wants.is_empty() {
            let _ = writeln!(prompt, "- Values: {}", wants.join(", "));
        }
        prompt.trim_end().to_string()
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::land_rover()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn land_rover_prompt_includes_profile() {
        let prompt = Persona::land_rover().system_prompt();
        assert!(prompt.starts_with("You are an expert Land Rover concierge"));
        assert!(prompt.contains("- Preferred models: Range Rover Sport, Defender 110"));
        assert!(prompt.ends_with("- Values: luxury, off-road capability, family-friendly"));
    }

    #[test]
    fn custom_prompt_is_used_verbatim() {
        assert_eq!(Persona::custom("Be brief.").system_prompt(), "Be brief.");
    }
}
