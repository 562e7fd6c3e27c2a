use serde::{Deserialize, Serialize};

use crate::model::character::CharacterType;

pub const DEFAULT_HEAL_AMOUNT: i32 = 30;
pub const MAX_HEAL_AMOUNT: i32 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub llm: LlmSettings,
    pub heal_amount: i32,

    /// Stop after this many rounds with no winner. `None` disables the cap.
    pub max_rounds: Option<u32>,

    pub team1: Vec<MemberSettings>,
    pub team2: Vec<MemberSettings>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            llm: LlmSettings::default(),
            heal_amount: DEFAULT_HEAL_AMOUNT,
            max_rounds: Some(100),

            team1: vec![
                MemberSettings::new("Legolas", CharacterType::Archer, PlayerKind::RuleBased),
                MemberSettings::new("Shadow", CharacterType::Rogue, PlayerKind::RuleBased),
            ],
            team2: vec![
                MemberSettings::new(
                    "Conan",
                    CharacterType::Warrior,
                    PlayerKind::Llm {
                        model: None,
                        label: Some("GPT-5".into()),
                    },
                ),
                MemberSettings::new(
                    "Gandalf",
                    CharacterType::Mage,
                    PlayerKind::Llm {
                        model: None,
                        label: Some("Claude-Sonnet-4.5".into()),
                    },
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// OpenAI-compatible chat completions URL.
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,

    /// Environment variable holding the bearer token, if any.
    pub api_key_env: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:1234/v1/chat/completions".into(),
            model: "local-model".into(),
            temperature: 0.7,
            timeout_secs: 30,
            api_key_env: "LLM_API_KEY".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSettings {
    pub name: String,
    pub class: CharacterType,
    pub player: PlayerKind,
}

impl MemberSettings {
    pub fn new(name: impl Into<String>, class: CharacterType, player: PlayerKind) -> Self {
        Self {
            name: name.into(),
            class,
            player,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    RuleBased,
    Llm {
        /// Overrides `llm.model` for this member.
        #[serde(default)]
        model: Option<String>,
        /// Name shown in logs and team setup.
        #[serde(default)]
        label: Option<String>,
    },
}
