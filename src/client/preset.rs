/// A suggestion attached to a preset, shown after its first turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUpPrompt {
    pub title: &'static str,
    pub label: &'static str,
    pub action: &'static str,
}

/// Scripted demo conversation. Only the first message is sent immediately;
/// the rest become suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetConversation {
    pub title: &'static str,
    pub label: &'static str,
    pub action: &'static str,
    pub messages: &'static [&'static str],
    pub follow_up_prompts: &'static [FollowUpPrompt],
}

impl PresetConversation {
    /// The message sent when the preset is chosen.
    pub fn opening_message(&self) -> &'static str {
        self.messages.first().copied().unwrap_or(self.action)
    }
}

pub const PRESET_CONVERSATIONS: &[PresetConversation] = &[
    PresetConversation {
        title: "Show me",
        label: "the Range Rover Sport",
        action: "Tell me about the Range Rover Sport",
        messages: &[
            "Tell me about the Range Rover Sport",
            "What makes it different from other models?",
        ],
        follow_up_prompts: &[
            FollowUpPrompt {
                title: "Compare",
                label: "with the Defender",
                action: "How does the Range Rover Sport compare to the Defender 110?",
            },
            FollowUpPrompt {
                title: "Schedule",
                label: "a test drive",
                action: "I'd like to schedule a test drive for the Range Rover Sport",
            },
            FollowUpPrompt {
                title: "Tell me about",
                label: "financing options",
                action: "What financing options are available for the Range Rover Sport?",
            },
        ],
    },
    PresetConversation {
        title: "View",
        label: "available inventory",
        action: "Show me all available Land Rover vehicles",
        messages: &[
            "Show me all available Land Rover vehicles",
            "Which one is best for families?",
            "Tell me more about the safety features",
        ],
        follow_up_prompts: &[
            FollowUpPrompt {
                title: "Show me",
                label: "the Discovery Sport details",
                action: "Tell me more about the Discovery Sport",
            },
            FollowUpPrompt {
                title: "Compare",
                label: "family-friendly models",
                action: "Compare the Discovery Sport and Defender 110",
            },
            FollowUpPrompt {
                title: "What about",
                label: "cargo space?",
                action: "How much cargo space do these vehicles have?",
            },
        ],
    },
    PresetConversation {
        title: "Compare",
        label: "Defender vs Range Rover Sport",
        action: "Compare the Defender 110 and Range Rover Sport",
        messages: &[
            "Compare the Defender 110 and Range Rover Sport",
            "Which one has better fuel efficiency?",
        ],
        follow_up_prompts: &[
            FollowUpPrompt {
                title: "Tell me about",
                label: "off-road capabilities",
                action: "What are the off-road capabilities of the Defender?",
            },
            FollowUpPrompt {
                title: "Show me",
                label: "the Range Rover Sport",
                action: "I want to see more details about the Range Rover Sport",
            },
            FollowUpPrompt {
                title: "Schedule",
                label: "test drives for both",
                action: "Can I schedule test drives for both vehicles?",
            },
        ],
    },
    PresetConversation {
        title: "Schedule",
        label: "a test drive",
        action: "I'd like to schedule a test drive for the Range Rover Sport",
        messages: &["I'd like to schedule a test drive for the Range Rover Sport"],
        follow_up_prompts: &[
            FollowUpPrompt {
                title: "What should",
                label: "I expect during the test drive?",
                action: "What should I expect during the test drive?",
            },
            FollowUpPrompt {
                title: "Can I",
                label: "test drive multiple models?",
                action: "Can I schedule test drives for multiple models?",
            },
            FollowUpPrompt {
                title: "View",
                label: "other available models",
                action: "Show me other models I could test drive",
            },
        ],
    },
];
