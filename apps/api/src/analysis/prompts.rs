// Prompt and tool definition for energy analysis.

use serde_json::json;

use crate::llm_client::ToolSpec;

pub const MOOD_ANALYSIS_MAX_TOKENS: u32 = 256;

pub const MOOD_ANALYSIS_SYSTEM: &str = "\
You are helping someone understand the emotional energy in their journal entry.

Read their words with care. Your job is to sense the energy level: not whether \
they're happy or sad, but how much activation is present.

Think of energy as a spectrum:
- Depleted (0.0-0.2): exhausted, numb, withdrawn, can barely move
- Low (0.2-0.4): melancholy, calm, reflective, quiet
- Balanced (0.4-0.6): steady, present, okay, neutral
- Elevated (0.6-0.8): energized, anxious, excited, restless
- High (0.8-1.0): buzzing, intense, passionate, overwhelmed

Note: Anxiety and excitement both live in the elevated/high range. Grief and \
peaceful solitude both live in the low range. Energy isn't about good or bad.

Use the record_mood tool to share what you sense.";

pub const RECORD_MOOD_TOOL_NAME: &str = "record_mood";

pub fn record_mood_tool() -> ToolSpec {
    ToolSpec {
        name: RECORD_MOOD_TOOL_NAME,
        description: "Record the emotional energy level sensed in the journal entry",
        input_schema: json!({
            "type": "object",
            "properties": {
                "energy": {
                    "type": "number",
                    "description": "Energy level from 0 (depleted) to 1 (high activation)"
                },
                "reasoning": {
                    "type": "string",
                    "description": "Brief, gentle explanation of what you sensed (1-2 sentences, under 200 chars)"
                }
            },
            "required": ["energy", "reasoning"]
        }),
    }
}
