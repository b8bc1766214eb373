pub const ADVISORY_INSTRUCTIONS: &str = r#"
You are a helpful medical-information assistant for educational purposes only (not a doctor).
User will provide symptom text. Based on these symptoms:
1) Provide up to 3 **possible conditions** (short title + 1-line explanation each).
2) For each condition, add a short confidence estimate (e.g., "low / medium / high").
3) Provide recommended **next steps**, prioritized (self-care, when to seek urgent care, when to see a doctor).
4) Provide safety disclaimers **clearly**: say this is educational only and encourage seeking professional care for serious/worsening symptoms.
5) If symptoms indicate possible emergency (chest pain, severe breathing difficulty, heavy bleeding, sudden vision loss, confusion, severe head injury), explicitly say "Seek emergency care / call local emergency number immediately."
Be concise and use bullet points. At the end include "Suggested follow-ups" (what else to ask clinician).
Use plain English and avoid giving prescriptions or definitive diagnoses.
"#;

pub const SYMPTOMS_LABEL: &str = "Symptoms: ";

pub const RESPONSE_FORMAT_HINT: &str = "Respond in plain text with bullets as requested.";

/// Red-flag phrases the instruction block asks the model to escalate on.
pub const RED_FLAG_SYMPTOMS: &[&str] = &[
    "chest pain",
    "severe breathing difficulty",
    "heavy bleeding",
    "sudden vision loss",
    "confusion",
    "severe head injury",
];

pub const EMERGENCY_PHRASE: &str =
    "Seek emergency care / call local emergency number immediately.";

pub const DISCLAIMER: &str = "Educational Disclaimer: This output is for informational purposes only. Not a substitute for professional medical advice.";

pub const SAFETY_NOTES: &str = r#"Safety & Notes
- This tool is educational only. It does NOT replace professional medical evaluation.
- If you experience emergency symptoms (severe chest pain, sudden shortness of breath, severe bleeding, unconsciousness, fainting, sudden weakness on one side, sudden vision loss, severe head injury), seek emergency care immediately.
- The LLM may be mistaken, incomplete, or may omit rare diagnoses. Use clinical judgment and consult a clinician for any important decisions.
- Do NOT use this tool to obtain prescriptions.
- Keep your API key private and do not share personal health information publicly.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructions_cover_every_requirement() {
        assert!(ADVISORY_INSTRUCTIONS.contains("up to 3 **possible conditions**"));
        assert!(ADVISORY_INSTRUCTIONS.contains("low / medium / high"));
        assert!(ADVISORY_INSTRUCTIONS.contains("**next steps**"));
        assert!(ADVISORY_INSTRUCTIONS.contains("educational only"));
        assert!(ADVISORY_INSTRUCTIONS.contains("Suggested follow-ups"));
        assert!(ADVISORY_INSTRUCTIONS.contains(EMERGENCY_PHRASE));
    }

    #[test]
    fn every_red_flag_is_named_in_instructions() {
        for flag in RED_FLAG_SYMPTOMS {
            assert!(
                ADVISORY_INSTRUCTIONS.contains(flag),
                "red flag '{}' missing from instructions",
                flag
            );
        }
    }
}
