use super::preset::PresetConversation;

pub const MAX_SUGGESTIONS: usize = 4;
pub const LABEL_MAX_CHARS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedAction {
    pub title: String,
    pub label: String,
    /// Text sent when the suggestion is chosen
    pub action: String,
    /// Index of the preset this suggestion starts, if any
    pub preset: Option<usize>,
}

/// One suggestion per preset, shown before the first turn.
pub fn initial_suggestions(presets: &[PresetConversation]) -> Vec<SuggestedAction> {
    presets
        .iter()
        .enumerate()
        .take(MAX_SUGGESTIONS)
        .map(|(index, preset)| SuggestedAction {
            title: preset.title.to_string(),
            label: preset.label.to_string(),
            action: preset.action.to_string(),
            preset: Some(index),
        })
        .collect()
}

/// Suggestions after a preset's first turn: its remaining scripted messages,
/// then its follow-up prompts, at most [`MAX_SUGGESTIONS`] in total.
pub fn follow_ups_for(preset: &PresetConversation) -> Vec<SuggestedAction> {
    let scripted = preset
        .messages
        .iter()
        .skip(1)
        .enumerate()
        .map(|(idx, msg)| SuggestedAction {
            title: if idx == 0 { "Ask about" } else { "Tell me" }.to_string(),
            label: truncate_label(msg),
            action: msg.to_string(),
            preset: None,
        });
    let prompts = preset.follow_up_prompts.iter().map(|p| SuggestedAction {
        title: p.title.to_string(),
        label: p.label.to_string(),
        action: p.action.to_string(),
        preset: None,
    });
    scripted.chain(prompts).take(MAX_SUGGESTIONS).collect()
}

fn truncate_label(text: &str) -> String {
    if text.chars().count() <= LABEL_MAX_CHARS {
        return text.to_string();
    }
    let mut label: String = text.chars().take(LABEL_MAX_CHARS).collect();
    label.push_str("...");
    label
}
