pub mod ai_helper;
pub mod bottleneck;
pub mod options;
pub mod results;
pub mod scoring;

use std::collections::BTreeSet;

use bottleneck::Bottleneck;
use scoring::Scores;

/// Position in the quiz wizard. Results are a flag on the session, not a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Step {
    #[default]
    Intro,
    BusinessType,
    LeadTracking,
    Headaches,
    LeadCapacity,
    Revenue,
    Priority,
    MagicWand,
    Contact,
}

impl Step {
    const ALL: [Step; 9] = [
        Step::Intro,
        Step::BusinessType,
        Step::LeadTracking,
        Step::Headaches,
        Step::LeadCapacity,
        Step::Revenue,
        Step::Priority,
        Step::MagicWand,
        Step::Contact,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_multi_select(self) -> bool {
        matches!(self, Step::BusinessType | Step::LeadTracking | Step::Headaches)
    }

    pub fn is_single_select(self) -> bool {
        matches!(self, Step::LeadCapacity | Step::Revenue | Step::Priority)
    }

    /// Progress bar percentage. Steps past the six questions already read as done.
    pub fn progress(self) -> f64 {
        let index = f64::from(self.index().min(6));
        index / 6.0 * 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizAnswers {
    pub business_type: BTreeSet<String>,
    pub lead_tracking: BTreeSet<String>,
    pub headaches: BTreeSet<String>,
    pub lead_capacity: Option<String>,
    pub revenue: Option<String>,
    pub priority: Option<String>,
    pub magic_wand: String,
}

impl QuizAnswers {
    fn set_for(&mut self, step: Step) -> Option<&mut BTreeSet<String>> {
        match step {
            Step::BusinessType => Some(&mut self.business_type),
            Step::LeadTracking => Some(&mut self.lead_tracking),
            Step::Headaches => Some(&mut self.headaches),
            _ => None,
        }
    }

    fn choice_for(&mut self, step: Step) -> Option<&mut Option<String>> {
        match step {
            Step::LeadCapacity => Some(&mut self.lead_capacity),
            Step::Revenue => Some(&mut self.revenue),
            Step::Priority => Some(&mut self.priority),
            _ => None,
        }
    }

    /// Whether a multi-select option is currently chosen.
    pub fn is_selected(&self, step: Step, label: &str) -> bool {
        match step {
            Step::BusinessType => self.business_type.contains(label),
            Step::LeadTracking => self.lead_tracking.contains(label),
            Step::Headaches => self.headaches.contains(label),
            Step::LeadCapacity => self.lead_capacity.as_deref() == Some(label),
            Step::Revenue => self.revenue.as_deref() == Some(label),
            Step::Priority => self.priority.as_deref() == Some(label),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ContactField {
    FirstName,
    Email,
    CellNumber,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactInfo {
    pub first_name: String,
    pub email: String,
    pub cell_number: String,
}

impl ContactInfo {
    pub fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }

    /// First field that is still empty, in the order the bot asks for them.
    pub fn missing_field(&self) -> Option<ContactField> {
        if self.first_name.is_empty() {
            Some(ContactField::FirstName)
        } else if self.email.is_empty() {
            Some(ContactField::Email)
        } else if self.cell_number.is_empty() {
            Some(ContactField::CellNumber)
        } else {
            None
        }
    }

    fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::Email => &mut self.email,
            ContactField::CellNumber => &mut self.cell_number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Next,
    Back,
    /// Flip a multi-select option on the current step.
    Toggle(String),
    /// Choose the single option of the current step.
    Select(String),
    SetMagicWand(String),
    SetContact(ContactField, String),
    SubmitContact,
}

/// The whole quiz state. Every transition goes through [`QuizSession::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizSession {
    pub step: Step,
    pub answers: QuizAnswers,
    pub contact: ContactInfo,
    pub show_results: bool,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard for `Next` on the current step.
    pub fn can_advance(&self) -> bool {
        let answers = &self.answers;
        match self.step {
            Step::Intro | Step::MagicWand => true,
            Step::BusinessType => !answers.business_type.is_empty(),
            Step::LeadTracking => !answers.lead_tracking.is_empty(),
            Step::Headaches => !answers.headaches.is_empty(),
            Step::LeadCapacity => answers.lead_capacity.is_some(),
            Step::Revenue => answers.revenue.is_some(),
            Step::Priority => answers.priority.is_some(),
            Step::Contact => false,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.step == Step::Contact && self.contact.is_complete()
    }

    pub fn apply(&self, action: Action) -> Self {
        let mut next = self.clone();
        if self.show_results {
            return next;
        }

        match action {
            Action::Next => {
                if self.can_advance() {
                    if let Some(step) = self.step.next() {
                        next.step = step;
                    }
                }
            }
            Action::Back => {
                if self.step != Step::Contact {
                    if let Some(step) = self.step.prev() {
                        next.step = step;
                    }
                }
            }
            Action::Toggle(label) => {
                let step = self.step;
                if options::find_label(step, &label).is_none() {
                    return next;
                }
                if let Some(selected) = next.answers.set_for(step) {
                    if !selected.remove(&label) {
                        let capped = step == Step::Headaches && selected.len() >= options::MAX_HEADACHES;
                        if !capped {
                            selected.insert(label);
                        }
                    }
                }
            }
            Action::Select(label) => {
                let step = self.step;
                if options::find_label(step, &label).is_none() {
                    return next;
                }
                if let Some(choice) = next.answers.choice_for(step) {
                    *choice = Some(label);
                }
            }
            Action::SetMagicWand(text) => {
                if self.step == Step::MagicWand {
                    next.answers.magic_wand = text;
                }
            }
            Action::SetContact(field, value) => {
                if self.step == Step::Contact {
                    *next.contact.field_mut(field) = value;
                }
            }
            Action::SubmitContact => {
                if self.can_submit() {
                    next.show_results = true;
                }
            }
        }

        next
    }

    /// Applies actions in order, the same as folding [`QuizSession::apply`].
    pub fn apply_all(&self, actions: impl IntoIterator<Item = Action>) -> Self {
        actions
            .into_iter()
            .fold(self.clone(), |session, action| session.apply(action))
    }

    pub fn scores(&self) -> Scores {
        scoring::score(&self.answers)
    }

    pub fn bottleneck(&self) -> Bottleneck {
        Bottleneck::classify(&self.scores())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toggle(label: &str) -> Action {
        Action::Toggle(label.to_string())
    }

    fn select(label: &str) -> Action {
        Action::Select(label.to_string())
    }

    fn at(step: Step) -> QuizSession {
        QuizSession {
            step,
            ..QuizSession::new()
        }
    }

    #[test]
    fn intro_always_advances() {
        let session = QuizSession::new().apply(Action::Next);
        assert_eq!(session.step, Step::BusinessType);
    }

    #[test]
    fn question_steps_do_not_advance_without_answer() {
        for index in 1..=6 {
            let step = Step::from_index(index).unwrap();
            let session = at(step).apply(Action::Next);
            assert_eq!(session.step, step, "step {index} advanced without an answer");
        }
    }

    #[test]
    fn question_steps_advance_once_answered() {
        let session = at(Step::BusinessType)
            .apply(toggle("Real estate"))
            .apply(Action::Next)
            .apply(toggle("CRM or follow-up software"))
            .apply(Action::Next)
            .apply(toggle("Leads fall through the cracks"))
            .apply(Action::Next)
            .apply(select("We'd scramble but get it done"))
            .apply(Action::Next)
            .apply(select("$500K – $1M"))
            .apply(Action::Next)
            .apply(select("Better clients who actually pay"))
            .apply(Action::Next);
        assert_eq!(session.step, Step::MagicWand);

        let session = session.apply(Action::Next);
        assert_eq!(session.step, Step::Contact);
    }

    #[test]
    fn next_on_contact_step_is_a_no_op() {
        let session = at(Step::Contact).apply(Action::Next);
        assert_eq!(session.step, Step::Contact);
    }

    #[test]
    fn back_keeps_answers() {
        let session = at(Step::LeadTracking)
            .apply(toggle("Word-of-mouth or referrals"))
            .apply(Action::Next)
            .apply(Action::Back)
            .apply(Action::Back);
        assert_eq!(session.step, Step::BusinessType);
        assert!(session
            .answers
            .lead_tracking
            .contains("Word-of-mouth or referrals"));
    }

    #[test]
    fn back_is_blocked_on_intro_and_contact() {
        assert_eq!(QuizSession::new().apply(Action::Back).step, Step::Intro);
        assert_eq!(at(Step::Contact).apply(Action::Back).step, Step::Contact);
        assert_eq!(at(Step::MagicWand).apply(Action::Back).step, Step::Priority);
    }

    #[test]
    fn third_headache_is_ignored() {
        let session = at(Step::Headaches)
            .apply(toggle("Leads fall through the cracks"))
            .apply(toggle("It feels like I am the business"));
        let capped = session.apply(toggle("Team ignores systems I've set up"));

        assert_eq!(capped.answers.headaches.len(), 2);
        assert_eq!(capped.answers, session.answers);
    }

    #[test]
    fn deselecting_a_headache_frees_a_slot() {
        let session = at(Step::Headaches)
            .apply(toggle("Leads fall through the cracks"))
            .apply(toggle("It feels like I am the business"))
            .apply(toggle("Leads fall through the cracks"))
            .apply(toggle("Team ignores systems I've set up"));

        assert!(session.answers.headaches.contains("Team ignores systems I've set up"));
        assert!(!session.answers.headaches.contains("Leads fall through the cracks"));
    }

    #[test]
    fn other_multi_selects_are_uncapped() {
        let session = at(Step::LeadTracking).apply_all(
            options::LEAD_TRACKING_OPTIONS.iter().map(|label| toggle(label)),
        );
        assert_eq!(session.answers.lead_tracking.len(), 4);
    }

    #[test]
    fn unknown_or_off_step_labels_are_ignored() {
        let session = at(Step::Headaches)
            .apply(toggle("Something else entirely"))
            .apply(toggle("Real estate"))
            .apply(select("Leads fall through the cracks"));
        assert_eq!(session, at(Step::Headaches));
    }

    #[test]
    fn single_select_replaces_previous_choice() {
        let session = at(Step::Priority)
            .apply(select("Better clients who actually pay"))
            .apply(select("More customers without chasing"));
        assert_eq!(
            session.answers.priority.as_deref(),
            Some("More customers without chasing")
        );
    }

    #[test]
    fn contact_gate_requires_every_field() {
        let partial = at(Step::Contact)
            .apply(Action::SetContact(ContactField::FirstName, "Dana".into()))
            .apply(Action::SetContact(ContactField::Email, "dana@example.com".into()))
            .apply(Action::SubmitContact);
        assert!(!partial.show_results);
        assert_eq!(partial.contact.missing_field(), Some(ContactField::CellNumber));

        let complete = partial
            .apply(Action::SetContact(ContactField::CellNumber, "555-0100".into()))
            .apply(Action::SubmitContact);
        assert!(complete.show_results);
        assert_eq!(complete.step, Step::Contact);
    }

    #[test]
    fn contact_cannot_be_submitted_from_other_steps() {
        let mut session = at(Step::MagicWand);
        session.contact = ContactInfo {
            first_name: "Dana".into(),
            email: "dana@example.com".into(),
            cell_number: "555-0100".into(),
        };
        assert!(!session.apply(Action::SubmitContact).show_results);
    }

    #[test]
    fn results_freeze_the_session() {
        let mut done = at(Step::Contact);
        done.show_results = true;
        assert_eq!(done.apply(Action::Back), done);
        assert_eq!(
            done.apply(Action::SetContact(ContactField::Email, String::new())),
            done
        );
    }

    #[test]
    fn apply_does_not_mutate_input() {
        let session = at(Step::BusinessType);
        let _ = session.apply(toggle("Real estate"));
        assert!(session.answers.business_type.is_empty());
    }

    #[test]
    fn progress_is_clamped_after_questions() {
        assert_eq!(Step::Intro.progress(), 0.0);
        assert_eq!(Step::Revenue.progress(), 5.0 / 6.0 * 100.0);
        assert_eq!(Step::Priority.progress(), 100.0);
        assert_eq!(Step::MagicWand.progress(), 100.0);
        assert_eq!(Step::Contact.progress(), 100.0);
    }

    #[test]
    fn untouched_session_classifies_as_lead_flow() {
        let session = QuizSession::new();
        assert_eq!(session.scores(), Scores::default());
        assert_eq!(session.bottleneck(), Bottleneck::LeadFlowLeak);
    }

    #[test]
    fn step_index_round_trips() {
        for index in 0..=8 {
            assert_eq!(Step::from_index(index).unwrap().index(), index);
        }
        assert_eq!(Step::from_index(9), None);
        assert_eq!(Step::Contact.next(), None);
        assert_eq!(Step::Intro.prev(), None);
    }
}
