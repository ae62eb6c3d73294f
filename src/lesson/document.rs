//! Persisted lesson documents.
//!
//! A lesson stores one record per segment. Presentation segments embed their
//! compiled script; guided and practice segments store only `{kind, seed}` and
//! regenerate the exact scenario when loaded.

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::guided::{GuidedStep, guided_steps};
use crate::scenario::{ManipulativeKind, ScenarioGenerator, ScenarioRef};
use crate::script::{Action, compile_with_id};

/// Scenarios per practice segment when a document does not say.
pub const DEFAULT_PRACTICE_SCENARIOS: usize = 3;

fn default_practice_scenarios() -> usize {
    DEFAULT_PRACTICE_SCENARIOS
}

/// One segment of a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Segment {
    /// Narrated presentation replayed from an embedded script.
    Presentation {
        id: String,
        script_id: String,
        script: Vec<Action>,
        #[serde(default)]
        scenario: Option<ScenarioRef>,
    },
    /// Build-along with checked steps.
    Guided {
        id: String,
        #[serde(default)]
        scenario: Option<ScenarioRef>,
        /// Falls back to the fixed steps of the scenario kind when empty.
        #[serde(default)]
        steps: Vec<GuidedStep>,
    },
    /// Independent practice questions.
    Practice {
        id: String,
        #[serde(default)]
        scenario: Option<ScenarioRef>,
        #[serde(default = "default_practice_scenarios")]
        scenarios: usize,
    },
}

impl Segment {
    pub fn id(&self) -> &str {
        match self {
            Self::Presentation { id, .. } | Self::Guided { id, .. } | Self::Practice { id, .. } => {
                id
            }
        }
    }

    /// Wire tag of the segment.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Presentation { .. } => "presentation",
            Self::Guided { .. } => "guided",
            Self::Practice { .. } => "practice",
        }
    }

    pub fn scenario(&self) -> Option<ScenarioRef> {
        match self {
            Self::Presentation { scenario, .. }
            | Self::Guided { scenario, .. }
            | Self::Practice { scenario, .. } => *scenario,
        }
    }
}

/// A complete lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonDocument {
    pub id: String,
    pub title: String,
    pub segments: Vec<Segment>,
}

impl LessonDocument {
    /// Presentation, guided and practice segments for one manipulative,
    /// all on the scenario of `seed`.
    pub fn standard(kind: ManipulativeKind, seed: u32, config: &GeneratorConfig) -> Result<Self> {
        let scenario = ScenarioGenerator::new(config.clone()).generate(kind, Some(seed))?;
        let reference = scenario.reference();
        let script_id = format!("{kind}-presentation-{seed}");
        let script = compile_with_id(&scenario, &script_id);
        let title = match kind {
            ManipulativeKind::GoldenBeads => "Multiplication with the Golden Beads",
            ManipulativeKind::StampGame => "Multiplication with the Stamp Game",
        };

        Ok(Self {
            id: format!("{kind}-multiplication-{seed}"),
            title: title.to_string(),
            segments: vec![
                Segment::Presentation {
                    id: "presentation".to_string(),
                    script_id,
                    script: script.actions,
                    scenario: Some(reference),
                },
                Segment::Guided {
                    id: "guided".to_string(),
                    scenario: Some(reference),
                    steps: guided_steps(kind),
                },
                Segment::Practice {
                    id: "practice".to_string(),
                    scenario: Some(ScenarioRef::new(kind, seed.wrapping_add(1))),
                    scenarios: DEFAULT_PRACTICE_SCENARIOS,
                },
            ],
        })
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_lesson_shape() {
        let doc = LessonDocument::standard(ManipulativeKind::StampGame, 8, &GeneratorConfig::default())
            .unwrap();
        let kinds: Vec<&str> = doc.segments.iter().map(Segment::kind_name).collect();
        assert_eq!(kinds, vec!["presentation", "guided", "practice"]);
        assert_eq!(doc.segments[0].scenario(), doc.segments[1].scenario());
    }

    #[test]
    fn test_segment_defaults_when_missing() {
        let doc = LessonDocument::from_json(
            r#"{"id": "l", "title": "t", "segments": [{"type": "practice", "id": "p"}]}"#,
        )
        .unwrap();
        assert_eq!(
            doc.segments[0],
            Segment::Practice {
                id: "p".into(),
                scenario: None,
                scenarios: DEFAULT_PRACTICE_SCENARIOS,
            }
        );
    }

    #[test]
    fn test_unknown_action_tag_rejected() {
        let text = r#"{"id": "l", "title": "t", "segments": [
            {"type": "presentation", "id": "p", "scriptId": "s",
             "script": [{"id": "s-0", "type": "teleport"}]}
        ]}"#;
        assert!(LessonDocument::from_json(text).is_err());
    }
}
