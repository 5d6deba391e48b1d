//! Initial story flag loader.

use std::path::Path;

use serde_json::Value;
use spell_core::StoryFlags;

use crate::loaders::{LoadResult, read_file};

/// Loader for initial story flags from a JSON object.
pub struct FlagsLoader;

impl FlagsLoader {
    pub fn load(path: &Path) -> LoadResult<StoryFlags> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<StoryFlags> {
        match serde_json::from_str::<Value>(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse story flags JSON: {}", e))?
        {
            Value::Object(map) => Ok(StoryFlags::from(map)),
            other => Err(anyhow::anyhow!(
                "Story flags must be a JSON object, found {}",
                kind_of(&other)
            )),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object() {
        let flags = FlagsLoader::parse(r#"{ "learned_vanish": true, "attempts": 2 }"#).unwrap();
        assert!(flags.is_set("learned_vanish"));
        assert_eq!(flags.len(), 2);
    }

    #[test]
    fn rejects_non_object() {
        let err = FlagsLoader::parse("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("an array"));
    }
}
