/// Spell pipeline configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpellConfig {
    /// Tool marked in use while a cast holds player control.
    pub tool_name: String,
    /// Delay between opening a door and returning control, in milliseconds.
    pub unlock_delay_ms: u64,
    /// How the evaluator treats missing world-state configuration.
    pub missing_config: MissingConfigPolicy,
    /// How the dispatcher treats a cast arriving while control is locked.
    pub overlap: OverlapPolicy,
}

impl SpellConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TOOL_NAME: &'static str = "wand";
    pub const DEFAULT_UNLOCK_DELAY_MS: u64 = 1000;

    pub fn new() -> Self {
        Self {
            tool_name: Self::DEFAULT_TOOL_NAME.to_string(),
            unlock_delay_ms: Self::DEFAULT_UNLOCK_DELAY_MS,
            missing_config: MissingConfigPolicy::default(),
            overlap: OverlapPolicy::default(),
        }
    }

    pub fn with_missing_config(mut self, policy: MissingConfigPolicy) -> Self {
        self.missing_config = policy;
        self
    }

    pub fn with_overlap(mut self, policy: OverlapPolicy) -> Self {
        self.overlap = policy;
        self
    }

    pub fn with_unlock_delay_ms(mut self, delay_ms: u64) -> Self {
        self.unlock_delay_ms = delay_ms;
        self
    }

    pub fn unlock_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.unlock_delay_ms)
    }
}

impl Default for SpellConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Verdict used when a configuration node is missing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case")]
pub enum MissingConfigPolicy {
    /// Treat the requirements as satisfied (authoring convenience).
    #[default]
    FailOpen,
    /// Deny the cast until the configuration exists.
    FailClosed,
}

impl MissingConfigPolicy {
    pub const fn allows_cast(&self) -> bool {
        matches!(self, Self::FailOpen)
    }
}

/// Handling of a cast that arrives while another cast holds player control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case")]
pub enum OverlapPolicy {
    /// Refuse the new cast before any requirement is evaluated.
    #[default]
    Reject,
    /// Process the new cast; it re-locks control and the first continuation
    /// to finish restores it.
    Permit,
}
