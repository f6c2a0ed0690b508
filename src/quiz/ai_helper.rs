use crate::quiz::bottleneck::Bottleneck;
use chatgpt::prelude::*;
use chatgpt::types::CompletionResponse;
use log::debug;

pub struct QuizHelper {
    personality: Personality,
    chat_gpt: ChatGPT,
}

impl QuizHelper {
    pub fn new(chat_gpt: ChatGPT, personality: Personality) -> Self {
        Self {
            personality,
            chat_gpt,
        }
    }

    pub async fn generate_coach_note(
        &self,
        first_name: &str,
        bottleneck: Bottleneck,
        magic_wand: &str,
    ) -> Result<String> {
        debug!("Generating coach note for bottleneck: {}", bottleneck);
        let prompt = coach_prompt(first_name, bottleneck, magic_wand, &self.personality);

        let response: CompletionResponse = self.chat_gpt.send_message(&prompt).await?;
        let content = response.message().clone().content;

        debug!("Completion: {:?}", content);

        Ok(content)
    }
}

pub fn coach_prompt(
    first_name: &str,
    bottleneck: Bottleneck,
    magic_wand: &str,
    personality: &Personality,
) -> String {
    let wish = if magic_wand.trim().is_empty() {
        "They skipped the magic wand question.".to_string()
    } else {
        format!("Asked what they would fix with a magic wand, they wrote: \"{}\".", magic_wand)
    };

    format!(
        "You are a sales coach for small service businesses.
        A business owner named {} just finished a diagnostic quiz. Their biggest bottleneck is \"{}\".
        {}
        Write them a short, encouraging note with one concrete next step. Write it the way {} would.
        Plain text only, no more than 300 characters.",
        first_name,
        bottleneck.label(),
        wish,
        personality.describe()
    )
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Personality {
    #[default]
    Mentor,
    Closer,
    Operator,
}

impl Personality {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mentor" => Some(Personality::Mentor),
            "closer" => Some(Personality::Closer),
            "operator" => Some(Personality::Operator),
            _ => None,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Personality::Mentor => "a patient mentor who has built three businesses",
            Personality::Closer => "a blunt, high-energy sales closer",
            Personality::Operator => "a calm operations consultant who loves checklists",
        }
    }
}
