//! Prompt assembly and the versioned blueprint template.
//!
//! The system prompt is the output contract the upstream model is
//! instructed to follow. It is held as one base template plus an
//! append-only layout section so the two deployment variants share a
//! single source of truth instead of two drifting copies.

use std::fmt;
use std::str::FromStr;

use crate::blueprint::request::LevelParams;

/// Which blueprint template a deployment serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptVariant {
    /// Ten numbered sections of prose per level.
    #[default]
    Standard,
    /// Eleven sections: the tenth-plus-one is a fenced JSON layout block
    /// describing the level as a grid of rooms and connections.
    WithLayout,
}

impl PromptVariant {
    /// The fixed system prompt for this variant.
    pub fn system_prompt(&self) -> String {
        match self {
            PromptVariant::Standard => BLUEPRINT_TEMPLATE.to_string(),
            PromptVariant::WithLayout => format!("{BLUEPRINT_TEMPLATE}\n{LAYOUT_SECTION}"),
        }
    }
}

impl FromStr for PromptVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(PromptVariant::Standard),
            "with-layout" => Ok(PromptVariant::WithLayout),
            other => Err(format!(
                "unknown blueprint variant '{other}' (expected 'standard' or 'with-layout')"
            )),
        }
    }
}

impl fmt::Display for PromptVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptVariant::Standard => write!(f, "standard"),
            PromptVariant::WithLayout => write!(f, "with-layout"),
        }
    }
}

/// Fold the validated parameters into a single user instruction block.
///
/// Field values are interpolated verbatim. The caller controls these
/// strings and they are opaque to the rest of the service, so no escaping
/// is applied.
pub fn build_user_prompt(params: &LevelParams) -> String {
    format!(
        "Design level ideas for a video game with the following parameters.\n\
         \n\
         Genre: {genre}\n\
         Camera perspective: {camera}\n\
         Position in the game: {stage_position}\n\
         Target playtime per level: {playtime}\n\
         Difficulty: {difficulty}\n\
         Design focus: {focus}\n\
         Theme keywords: {theme_keywords}\n\
         Additional notes: {extra_notes}\n\
         \n\
         Generate exactly {count} distinct level ideas. Each idea must be \
         clearly separated and numbered, and each must follow the output \
         structure defined in the system instructions, with every section \
         present.",
        genre = params.genre,
        camera = params.camera,
        stage_position = params.stage_position,
        playtime = params.playtime,
        difficulty = params.difficulty,
        focus = params.focus,
        theme_keywords = params.theme_keywords,
        extra_notes = params.extra_notes,
        count = params.count,
    )
}

/// Blueprint output contract, template version 1.
const BLUEPRINT_TEMPLATE: &str = r#"You are a senior game level designer. For every level idea you produce, write a level blueprint in Markdown that follows this exact structure, using these numbered section headings in this order:

## 1. Level Name
A short, evocative title for the level.

## 2. Concept Summary
Two or three sentences capturing the core idea of the level and what makes it distinct.

## 3. Setting & Atmosphere
The location, time, weather, soundscape, and mood. Reference the theme keywords where they fit naturally.

## 4. Layout Overview
A prose walkthrough of the level's spaces in play order: entrances, main path, branches, and exit. Describe scale and verticality in concrete terms.

## 5. Core Mechanics & Interactions
The mechanics the level is built around, including any mechanic introduced or remixed here, and how the layout teaches it.

## 6. Enemies & Obstacles
Enemy placements, hazards, and traps, with a note on why each is placed where it is.

## 7. Pacing & Difficulty Curve
How tension rises and falls across the level, where the player can rest, and how the stated difficulty is expressed in practice.

## 8. Secrets & Optional Content
Hidden areas, collectibles, shortcuts, and the skill or curiosity required to find them.

## 9. Climax or Setpiece
The level's peak moment: a boss, a chase, a puzzle gauntlet, or a scripted event, and how the preceding sections build toward it.

## 10. Designer Notes
Implementation cautions, reuse opportunities, and tuning suggestions for the target playtime.

Rules:
- Produce the requested number of level ideas and no more.
- Keep each section heading exactly as written above.
- Stay consistent with the requested genre, camera perspective, position in the game, playtime, difficulty, and design focus.
- Write in Markdown only."#;

/// Appended for the with-layout variant: a machine-readable room graph
/// per level, emitted by the model and passed through unvalidated.
const LAYOUT_SECTION: &str = r#"## 11. Layout Data
End every level with a fenced code block tagged `json` containing the level's layout data, in exactly this shape:

```json
{
  "specVersion": "1.0",
  "theme": "<one-line theme description>",
  "flowType": "<linear | branching | hub | loop>",
  "rooms": [
    { "id": "<room id>", "x": 0, "y": 0, "w": 4, "h": 3, "type": "<start | combat | puzzle | treasure | rest | boss | exit>" }
  ],
  "connections": [
    { "from": "<room id>", "to": "<room id>", "type": "<door | corridor | drop | teleport | locked>" }
  ]
}
```

Layout rules:
- `x`, `y`, `w`, `h` are integers on a uniform grid; rooms must not overlap.
- Every room must be reachable from the room with type "start" through the connections.
- The layout data block is mandatory for every level."#;

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> LevelParams {
        LevelParams {
            api_key: "sk-test".to_string(),
            genre: "metroidvania".to_string(),
            camera: "side-scrolling".to_string(),
            stage_position: "mid-game".to_string(),
            playtime: "20 minutes".to_string(),
            difficulty: "hard".to_string(),
            focus: "exploration".to_string(),
            theme_keywords: "caverns, bioluminescence".to_string(),
            count: 3,
            extra_notes: "No additional notes.".to_string(),
        }
    }

    #[test]
    fn user_prompt_contains_every_field_and_the_count() {
        let prompt = build_user_prompt(&params());
        for value in [
            "metroidvania",
            "side-scrolling",
            "mid-game",
            "20 minutes",
            "hard",
            "exploration",
            "caverns, bioluminescence",
            "No additional notes.",
        ] {
            assert!(prompt.contains(value), "prompt missing {value:?}");
        }
        assert!(prompt.contains("exactly 3 distinct level ideas"));
    }

    #[test]
    fn user_prompt_never_contains_the_credential() {
        let prompt = build_user_prompt(&params());
        assert!(!prompt.contains("sk-test"));
    }

    #[test]
    fn standard_template_has_ten_sections() {
        let prompt = PromptVariant::Standard.system_prompt();
        for section in 1..=10 {
            assert!(prompt.contains(&format!("## {section}. ")));
        }
        assert!(!prompt.contains("## 11. "));
    }

    #[test]
    fn layout_variant_extends_the_standard_template() {
        let standard = PromptVariant::Standard.system_prompt();
        let with_layout = PromptVariant::WithLayout.system_prompt();
        assert!(with_layout.starts_with(&standard));
        for field in ["specVersion", "flowType", "rooms", "connections"] {
            assert!(with_layout.contains(field));
        }
        assert!(with_layout.contains("mandatory for every level"));
    }

    #[test]
    fn variant_round_trips_through_strings() {
        for variant in [PromptVariant::Standard, PromptVariant::WithLayout] {
            assert_eq!(variant.to_string().parse::<PromptVariant>(), Ok(variant));
        }
        assert!("layout".parse::<PromptVariant>().is_err());
    }
}
