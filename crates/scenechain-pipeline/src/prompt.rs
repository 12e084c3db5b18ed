//! Scene prompt construction.
//!
//! Pure and deterministic: identical inputs always produce identical
//! prompt text, which the continuity tests rely on.

/// Description substituted when a caption job returns an unusable output.
pub const DEFAULT_FRAME_DESCRIPTION: &str = "generic cinematic image";

/// Inputs to the prompt builder for one scene.
#[derive(Debug, Clone)]
pub struct ScenePromptParams<'a> {
    /// Global scenario shared by all scenes
    pub scenario: &'a str,
    /// Caption of the scene's seed frame
    pub frame_description: &'a str,
    /// Zero-based scene index
    pub scene_index: usize,
    /// Total number of scenes in the run
    pub total_scenes: usize,
    /// Full prompt of the previous scene, absent for scene 0
    pub previous_prompt: Option<&'a str>,
}

/// Build the generation prompt for one scene.
pub fn build_scene_prompt(params: &ScenePromptParams<'_>) -> String {
    let continuity = match params.previous_prompt {
        Some(previous) => format!("Continuity from previous scene prompt: {previous}"),
        None => "This is the opening scene, establish setting and character motion clearly."
            .to_string(),
    };

    [
        format!(
            "You are generating scene {} of {} for a coherent cinematic sequence.",
            params.scene_index + 1,
            params.total_scenes
        ),
        format!("Global scenario: {}", params.scenario),
        format!(
            "Current start frame description: {}",
            params.frame_description
        ),
        continuity,
        "Write one compact action prompt (max 80 words) describing camera movement, \
         subject action, environment continuity, and sound-relevant events."
            .to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params<'a>(index: usize, previous: Option<&'a str>) -> ScenePromptParams<'a> {
        ScenePromptParams {
            scenario: "A robot wakes in a junkyard",
            frame_description: "a rusty robot among scrap metal",
            scene_index: index,
            total_scenes: 3,
            previous_prompt: previous,
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let p = params(1, Some("previous prompt text"));
        assert_eq!(build_scene_prompt(&p), build_scene_prompt(&p));
    }

    #[test]
    fn test_opening_scene_clause() {
        let prompt = build_scene_prompt(&params(0, None));
        assert!(prompt.contains("scene 1 of 3"));
        assert!(prompt.contains("This is the opening scene"));
        assert!(!prompt.contains("Continuity from previous scene prompt"));
    }

    #[test]
    fn test_continuity_clause_embeds_previous_prompt_verbatim() {
        let previous = build_scene_prompt(&params(0, None));
        let prompt = build_scene_prompt(&params(1, Some(&previous)));
        assert!(prompt.contains("scene 2 of 3"));
        assert!(prompt.contains(&format!(
            "Continuity from previous scene prompt: {previous}"
        )));
    }

    #[test]
    fn test_prompt_carries_scenario_and_description() {
        let prompt = build_scene_prompt(&params(0, None));
        assert!(prompt.contains("Global scenario: A robot wakes in a junkyard"));
        assert!(prompt.contains(
            "Current start frame description: a rusty robot among scrap metal"
        ));
    }
}
