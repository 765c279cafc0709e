/// One independently scored behavioral axis.
///
/// A dimension is pure data: its name tags persisted records, its
/// rubric becomes the system instruction, and the mandated response
/// key is derived from the name. The generic assessment worker is
/// driven entirely by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    name: &'static str,
    rubric: &'static str,
}

const POLITENESS_RUBRIC: &str = "Your goal is to ensure that agents are polite and treat \
customers well. You score agents on politeness using a scale from 1 to 5, where 1 is very \
impolite and 5 is extremely polite. Especially for agents who don't perform well, provide \
a detailed reasoning for the score.";

const EMPATHY_RUBRIC: &str = "Your goal is to ensure agents express understanding, concern, \
and support toward customers. You score agents on empathy using a scale from 1 to 5, where \
1 is lacking empathy and 5 is highly empathetic.";

const PROFESSIONALISM_RUBRIC: &str = "Your goal is to assess the agent's level of \
professionalism. Focus on whether the agent maintains a respectful and courteous tone, \
avoids inappropriate or dismissive language, and communicates in a clear and \
service-oriented manner. Pay close attention to word choice, tone consistency, and the \
ability to remain composed throughout the interaction. You score agents on professionalism \
using a scale from 1 to 5, where 1 is unprofessional and 5 is highly professional.";

impl Dimension {
    pub const POLITENESS: Dimension = Dimension {
        name: "politeness",
        rubric: POLITENESS_RUBRIC,
    };

    pub const EMPATHY: Dimension = Dimension {
        name: "empathy",
        rubric: EMPATHY_RUBRIC,
    };

    pub const PROFESSIONALISM: Dimension = Dimension {
        name: "professionalism",
        rubric: PROFESSIONALISM_RUBRIC,
    };

    /// The fixed set of scored dimensions; one worker subscription each.
    pub fn all() -> [Dimension; 3] {
        [Self::POLITENESS, Self::EMPATHY, Self::PROFESSIONALISM]
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Key the evaluator must use for the score in its JSON response.
    pub fn score_key(&self) -> String {
        format!("{}_score", self.name)
    }

    /// System instruction: rubric plus the strict-JSON response
    /// contract. Only the rubric varies across dimensions.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are a call center manager evaluating the performance of your agents. {} \
             You will also provide a brief summary of the call. The summary should include \
             the main points of the conversation and any issues that were raised, and be \
             concise and to the point. Respond ONLY with a single valid JSON object of the \
             form {{\"{}\": <score>, \"summary\": <summary>, \"reasoning\": <reasoning>}}. \
             Use double quotes for all keys and string values. Do NOT include any \
             explanations, markdown formatting like ```json, or extra text.",
            self.rubric,
            self.score_key(),
        )
    }

    /// User instruction carrying the transcript under evaluation.
    pub fn user_prompt(&self, transcript: &str) -> String {
        format!(
            "Transcript:\n{}\n\n{} score and reasoning:",
            transcript,
            self.name
        )
    }
}
