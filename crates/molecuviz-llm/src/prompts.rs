//! Prompt templates for the four AI endpoints.

use crate::knowledge::MOLECULES_CONTEXT;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A fully rendered two-message exchange plus its sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

const ASSISTANT_PERSONA: &str = "You are MolecuViz AI Assistant, an expert in chemistry and molecular structures. \
You help users understand molecules, their properties, structures, and chemistry concepts.";

const EDUCATOR_PERSONA: &str = "You are a chemistry educator. Explain molecular concepts clearly and accurately \
for students, using precise terminology and concrete examples.";

pub fn ask(question: &str, current_molecule: &str) -> Prompt {
    let current = if current_molecule.trim().is_empty() { "None" } else { current_molecule.trim() };
    let system = format!(
        "{ASSISTANT_PERSONA}\n\n\
         {MOLECULES_CONTEXT}\n\
         Currently viewing molecule: {current}\n\n\
         Provide clear, educational explanations about molecular structures, chemical properties, \
         bonding, polarity, geometry, and related chemistry concepts. Keep responses concise but informative. \
         If asked about molecules not in the database, provide general chemistry knowledge."
    );
    Prompt {
        system,
        user: question.to_string(),
        max_tokens: 500,
        temperature: DEFAULT_TEMPERATURE,
    }
}

/// Opening line of the explain prompt.
fn explain_request(name: &str, formula: &str) -> String {
    if formula.trim().is_empty() {
        format!("Explain the molecule {}.", name)
    } else {
        format!("Explain the molecule {} ({}).", name, formula)
    }
}

pub fn explain(name: &str, formula: &str) -> Prompt {
    let user = format!(
        "{}\n\
         Cover:\n\
         1. Molecular structure and geometry\n\
         2. Types of chemical bonds\n\
         3. Polarity and why\n\
         4. Key physical and chemical properties\n\
         5. Real-world applications\n\
         Keep it educational and under 200 words.",
        explain_request(name, formula)
    );
    Prompt {
        system: EDUCATOR_PERSONA.to_string(),
        user,
        max_tokens: 600,
        temperature: DEFAULT_TEMPERATURE,
    }
}

pub fn compare(first: &str, second: &str) -> Prompt {
    let user = format!(
        "Compare {first} and {second}. Discuss:\n\
         1. Molecular structure and geometry\n\
         2. Bonding\n\
         3. Polarity\n\
         4. Physical properties (boiling point, solubility, state at room temperature)\n\
         5. Uses and applications\n\
         Highlight the key similarities and differences."
    );
    Prompt {
        system: EDUCATOR_PERSONA.to_string(),
        user,
        max_tokens: 700,
        temperature: DEFAULT_TEMPERATURE,
    }
}

pub fn predict(formula: &str) -> Prompt {
    let user = format!(
        "Based on the molecular formula {formula}, predict:\n\
         1. Molecular geometry (VSEPR)\n\
         2. Polarity\n\
         3. Intermolecular forces\n\
         4. Physical properties (state, boiling point, solubility)\n\
         5. Chemical reactivity\n\
         Explain the reasoning behind each prediction."
    );
    Prompt {
        system: "You are a computational chemistry assistant that predicts molecular properties \
                 from formulas using VSEPR theory and general chemistry principles."
            .to_string(),
        user,
        max_tokens: 600,
        temperature: DEFAULT_TEMPERATURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_injects_knowledge_base_and_molecule() {
        let p = ask("What is water?", "Water (H2O)");
        assert!(p.system.contains("Available molecules in MolecuViz"));
        assert!(p.system.contains("Currently viewing molecule: Water (H2O)"));
        assert_eq!(p.user, "What is water?");
        assert_eq!(p.temperature, 0.7);
    }

    #[test]
    fn test_ask_without_molecule_says_none() {
        let p = ask("Hi", "  ");
        assert!(p.system.contains("Currently viewing molecule: None"));
    }

    #[test]
    fn test_explain_has_no_knowledge_base() {
        let p = explain("Water", "H2O");
        assert!(!p.system.contains("Available molecules"));
        assert!(p.user.starts_with("Explain the molecule Water (H2O)."));
        assert!(p.user.contains("Polarity"));
    }

    #[test]
    fn test_compare_and_predict_mention_inputs() {
        assert!(compare("Water", "Methane").user.contains("Compare Water and Methane"));
        let p = predict("NH3");
        assert!(p.user.contains("NH3"));
        assert!(p.user.contains("Intermolecular forces"));
    }
}
