//! Outreach template, system prompt and personalization requests.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum length of the free-text event highlight
pub const EVENT_HIGHLIGHT_MAX_CHARS: usize = 200;

const DEFAULT_TEMPERATURE: f32 = 0.75;

/// Invitation used as-is by the "Basic Template" tab and as the base for
/// every personalized message
pub const BASE_TEMPLATE: &str = "Hi!

I'm part of the Organizing Committee for Global Diplomatic Summit-Lucknow MUN 2025. We're inviting bright minds to be a part of our upcoming conference that focuses on global challenges and leadership development.

The conference will feature multiple specialized committees addressing pressing international issues, with opportunities for both beginners and experienced delegates.

Would you be interested in learning more about the committees, awards, and registration process? I'd be happy to provide additional information.

Looking forward to hearing from you!

Best regards,
[Your Name]
Organizing Committee
Global Diplomatic Summit-Lucknow MUN 2025";

pub const SYSTEM_PROMPT: &str = "You are an assistant that personalizes invitation messages with moderate creativity.
Given a template message and specific details (like a name and other optional parameters), rewrite the message to include the details naturally.
Paraphrase the template creatively (around 50% flexibility) while maintaining the core information, key event details (Global Diplomatic Summit-Lucknow MUN 2025, focus on global challenges/leadership), and the overall purpose of the invitation.
Include any provided custom fields such as committee preferences, experience level, special invitations, deadlines, etc. naturally in the text.
Adjust the tone according to the specified preference (Formal, Semi-formal, or Conversational) if provided, otherwise use a semi-formal tone.
Do not add unrelated information. Only output the personalized message.";

/// Options offered by the generator form
pub const COMMITTEES: [&str; 7] = ["UNSC", "UNHRC", "ECOSOC", "DISEC", "WHO", "ICJ", "Crisis Committee"];
pub const POSITIONS: [&str; 4] = ["Delegate", "Head Delegate", "Faculty Advisor", "Observer"];
pub const EXPERIENCE_LEVELS: [&str; 5] = ["First-time", "Beginner", "Intermediate", "Advanced", "Professional"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Formal,
    #[default]
    #[serde(rename = "Semi-formal")]
    SemiFormal,
    Conversational,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Formal, Tone::SemiFormal, Tone::Conversational];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Formal => "Formal",
            Tone::SemiFormal => "Semi-formal",
            Tone::Conversational => "Conversational",
        }
    }

    /// Sampling temperature used for this tone
    pub fn temperature(self) -> f32 {
        match self {
            Tone::Formal => 0.4,
            Tone::Conversational => 0.8,
            Tone::SemiFormal => DEFAULT_TEMPERATURE,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|tone| tone.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tone '{s}'"))
    }
}

/// Details used to personalize one invitation. Not persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    pub name: String,
    pub committee: Option<String>,
    pub position: Option<String>,
    pub institution: Option<String>,
    pub experience_level: Option<String>,
    pub event_highlight: Option<String>,
    pub special_invite: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub tone: Tone,
}

/// System and user messages sent to a provider
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl GenerationRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    /// Personalization fields in prompt order. Tone is not listed; it only
    /// drives the temperature.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        let mut details = vec![("name", self.name.clone())];
        let optional = [
            ("committee", &self.committee),
            ("position", &self.position),
            ("institution", &self.institution),
            ("experience_level", &self.experience_level),
            ("event_highlight", &self.event_highlight),
            ("special_invite", &self.special_invite),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                details.push((key, value.to_string()));
            }
        }
        if let Some(deadline) = self.deadline {
            details.push(("deadline", deadline.format("%B %d, %Y").to_string()));
        }
        details
    }

    pub fn temperature(&self) -> f32 {
        self.tone.temperature()
    }

    pub fn prompt(&self) -> Prompt {
        let mut customization = String::from("Personalize for:\n");
        for (key, value) in self.details() {
            customization.push_str(&format!("- {key}: {value}\n"));
        }

        Prompt {
            system: SYSTEM_PROMPT.to_string(),
            user: format!(
                "Template:\n{BASE_TEMPLATE}\n\n{customization}\n\nRewrite the template including these details naturally, using the specified tone if provided."
            ),
        }
    }
}
