use teloxide::utils::html::escape;

use crate::quiz::{
    bottleneck::{Bottleneck, BottleneckContent},
    scoring::{ScoreKind, Scores},
    QuizSession,
};

/// External scheduler both result buttons open.
pub const BOOKING_URL: &str = "https://calendly.com/closerhq-sales/strategy-call";
pub const BOOK_CALL_LABEL: &str = "Book a strategy call";

#[derive(Debug, Clone)]
pub struct ResultsView {
    pub first_name: String,
    pub bottleneck: Bottleneck,
    pub scores: Scores,
    pub content: BottleneckContent,
    pub magic_wand: Option<String>,
}

impl ResultsView {
    pub fn new(session: &QuizSession) -> Self {
        let scores = session.scores();
        let bottleneck = Bottleneck::classify(&scores);
        let magic_wand = Some(session.answers.magic_wand.clone()).filter(|text| !text.is_empty());

        Self {
            first_name: session.contact.first_name.clone(),
            bottleneck,
            scores,
            content: bottleneck.content(),
            magic_wand,
        }
    }

    pub fn render_html(&self) -> String {
        let content = &self.content;
        let mut text = format!(
            "{} <b>{}, your biggest bottleneck is: {}</b>\n\n{}\n\n",
            content.icon,
            escape(&self.first_name),
            self.bottleneck.label(),
            content.diagnosis
        );

        text.push_str("<b>Your scores</b>\n");
        for kind in ScoreKind::ALL {
            let line = format!("{}: {}", kind.label(), self.scores.get(kind));
            // The winning score(s) are shown in bold
            if self.scores.is_max(kind) {
                text.push_str(&format!("▶️ <b>{}</b>\n", line));
            } else {
                text.push_str(&format!("▫️ {}\n", line));
            }
        }

        text.push_str("\n<b>Two quick wins</b>\n");
        for (i, tip) in content.tips.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", i + 1, tip));
        }

        if let Some(wish) = &self.magic_wand {
            text.push_str(&format!(
                "\n<b>Your magic wand wish</b>\n<i>\"{}\"</i>\n",
                escape(wish)
            ));
        }

        text.push_str(&format!("\n{}", content.solution));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Action, ContactField, Step};

    fn finished_session(magic_wand: &str) -> QuizSession {
        let mut session = QuizSession {
            step: Step::Contact,
            ..QuizSession::new()
        };
        session.answers.lead_tracking.insert("We don't really track much at all".into());
        session.answers.headaches.insert("Leads fall through the cracks".into());
        session.answers.headaches.insert("Team ignores systems I've set up".into());
        session.answers.lead_capacity = Some("We'd melt – can't take more right now".into());
        session.answers.priority = Some("A real system that doesn't rely on me".into());
        session.answers.magic_wand = magic_wand.into();
        session.apply_all([
            Action::SetContact(ContactField::FirstName, "Sam <3".into()),
            Action::SetContact(ContactField::Email, "sam@example.com".into()),
            Action::SetContact(ContactField::CellNumber, "555-0199".into()),
            Action::SubmitContact,
        ])
    }

    #[test]
    fn view_reflects_classification() {
        let view = ResultsView::new(&finished_session(""));
        assert_eq!(view.bottleneck, Bottleneck::OperationalBottleneck);
        assert_eq!(view.content, Bottleneck::OperationalBottleneck.content());
        assert_eq!(view.magic_wand, None);
    }

    #[test]
    fn only_the_highest_score_is_bold() {
        let html = ResultsView::new(&finished_session("")).render_html();
        assert!(html.contains("▶️ <b>Operational: 7</b>"));
        assert!(html.contains("▫️ Lead Flow: 3"));
        assert!(html.contains("▫️ Sales Gap: 5"));
    }

    #[test]
    fn user_text_is_escaped() {
        let html = ResultsView::new(&finished_session("Hire <b>two</b> techs & a dispatcher")).render_html();
        assert!(html.contains("Sam &lt;3"));
        assert!(html.contains("Hire &lt;b&gt;two&lt;/b&gt; techs &amp; a dispatcher"));
    }

    #[test]
    fn magic_wand_section_is_omitted_when_blank() {
        let html = ResultsView::new(&finished_session("")).render_html();
        assert!(!html.contains("magic wand"));
    }
}
