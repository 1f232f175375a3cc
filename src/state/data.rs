/// Shared data for the try-on workflow
///
/// Input slot identifiers and the fixed instruction texts.

/// Which input an acquired image belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The person wearing the item
    Model,
    /// The clothing or accessory
    Item,
}

impl Slot {
    pub fn label(self) -> &'static str {
        match self {
            Slot::Model => "1. Your Photo",
            Slot::Item => "2. Clothing / Accessory",
        }
    }

    /// Title of the camera view opened for this slot
    pub fn camera_title(self) -> &'static str {
        match self {
            Slot::Model => "Take Your Photo",
            Slot::Item => "Take Item Photo",
        }
    }
}

/// Instruction sent when the user leaves the custom instruction empty
pub const DEFAULT_INSTRUCTION: &str = "Create a photorealistic image of the model wearing the clothing item. \
Maintain the model's pose and facial features while naturally fitting the clothing. \
Ensure proper lighting, shadows, and texture integration. \
Keep the original background. Style: photorealistic, high-quality fashion photography.";

/// User-facing message when `try_on` is invoked without both images
pub const MISSING_IMAGES_MESSAGE: &str = "Please provide both a model and an item image.";

/// One-click instruction suggestions
pub const PROMPT_SUGGESTIONS: [&str; 4] = [
    "Make the clothing fit more loosely and add a casual style",
    "Add a vintage filter and make the colors more muted",
    "Make it look like a professional fashion photoshoot",
    "Add dramatic lighting and shadow effects",
];

/// Resolve the instruction actually sent to the backend
pub fn effective_instruction(custom: &str) -> &str {
    if custom.is_empty() {
        DEFAULT_INSTRUCTION
    } else {
        custom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_instruction_uses_default() {
        assert_eq!(effective_instruction(""), DEFAULT_INSTRUCTION);
    }

    #[test]
    fn test_custom_instruction_is_sent_verbatim() {
        assert_eq!(effective_instruction("  make it red "), "  make it red ");
    }
}
