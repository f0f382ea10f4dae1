//! Prompt template for preset generation.

/// JSON skeleton the model is instructed to fill in. Knob values are
/// numeric; `UsageNotes` is free text. The handler never validates the
/// model's output against this shape.
const PRESET_SKELETON: &str = r#"{
  "UsageNotes": "",
  "NR": 0,
  "PRE": 0,
  "DST": 0,
  "AMP": 0,
  "CAB": 0,
  "EQ": 0,
  "MOD": 0,
  "DLY": 0,
  "REV": 0
}"#;

/// Build the generation prompt for a song.
pub fn build_prompt(song: &str) -> String {
    format!(
        "Create a professional guitar amp JSON preset for: \"{song}\". \
         Fill in this exact JSON structure with numeric knob values and a \
         short usage note. RAW JSON ONLY, no markdown:\n{PRESET_SKELETON}"
    )
}
