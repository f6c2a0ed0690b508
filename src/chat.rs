use teloxide::types::{KeyboardButton, KeyboardMarkup};
use teloxide::utils::html::escape;

use crate::quiz::{options, Action, ContactField, QuizSession, Step};

pub const START_BUTTON: &str = "Start the quiz 🚀";
pub const NEXT_BUTTON: &str = "Next ➡️";
pub const BACK_BUTTON: &str = "⬅️ Back";
pub const SKIP_BUTTON: &str = "Skip ⏭";
const SELECTED_MARK: &str = "✅ ";

const PROGRESS_CELLS: usize = 10;

pub const INTRO_TEXT: &str = "<b>Find the one bottleneck holding your business back</b>\n\n\
    Six quick questions, about two minutes. At the end you'll see whether your growth is stuck on \
    <b>lead flow</b>, <b>sales</b> or <b>operations</b>, plus two things you can fix this week.";

/// Turns a message into engine actions for the current step. Empty means the text meant nothing here.
pub fn parse_input(session: &QuizSession, text: &str) -> Vec<Action> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if text == BACK_BUTTON {
        return vec![Action::Back];
    }

    let step = session.step;
    match step {
        Step::Intro => vec![Action::Next],
        _ if step.is_multi_select() => {
            if text == NEXT_BUTTON {
                return vec![Action::Next];
            }
            let label = text.strip_prefix(SELECTED_MARK).unwrap_or(text);
            match options::find_label(step, label) {
                Some(label) => vec![Action::Toggle(label.to_string())],
                None => Vec::new(),
            }
        }
        _ if step.is_single_select() => {
            if text == NEXT_BUTTON {
                return vec![Action::Next];
            }
            let label = text.strip_prefix(SELECTED_MARK).unwrap_or(text);
            match options::find_label(step, label) {
                Some(label) => vec![Action::Select(label.to_string()), Action::Next],
                None => Vec::new(),
            }
        }
        Step::MagicWand => {
            if text == SKIP_BUTTON || text == NEXT_BUTTON {
                vec![Action::Next]
            } else {
                vec![Action::SetMagicWand(text.to_string()), Action::Next]
            }
        }
        Step::Contact => match session.contact.missing_field() {
            Some(field) => vec![
                Action::SetContact(field, text.to_string()),
                Action::SubmitContact,
            ],
            None => vec![Action::SubmitContact],
        },
        _ => Vec::new(),
    }
}

/// Reply sent when a message did not move the quiz forward.
pub fn hint(session: &QuizSession, text: &str) -> &'static str {
    let step = session.step;
    let text = text.trim();
    if text == NEXT_BUTTON && !session.can_advance() {
        return if step.is_multi_select() {
            "Pick at least one option first."
        } else {
            "Choose one of the options first."
        };
    }
    if step == Step::Headaches
        && session.answers.headaches.len() >= options::MAX_HEADACHES
        && options::find_label(step, text).is_some()
    {
        return "You can pick up to 2. Tap a selected one to remove it.";
    }
    "Please use the buttons below."
}

pub fn progress_bar(step: Step) -> String {
    let percent = step.progress();
    let filled = ((percent / 100.0) * PROGRESS_CELLS as f64).round() as usize;
    format!(
        "{}{} {}%",
        "▰".repeat(filled),
        "▱".repeat(PROGRESS_CELLS - filled),
        percent.round() as u32
    )
}

pub fn prompt(session: &QuizSession) -> String {
    let step = session.step;
    match step {
        Step::Intro => INTRO_TEXT.to_string(),
        Step::MagicWand => format!(
            "{}\n\n<b>{}</b>\n\nType your answer, or tap \"{}\".",
            progress_bar(step),
            options::question(step),
            SKIP_BUTTON
        ),
        Step::Contact => {
            let contact = &session.contact;
            let ask = match contact.missing_field() {
                Some(ContactField::FirstName) | None => "What's your first name?".to_string(),
                Some(ContactField::Email) => {
                    format!("Thanks, {}! What's your best email?", escape(&contact.first_name))
                }
                Some(ContactField::CellNumber) => "And your cell number?".to_string(),
            };
            format!(
                "{}\n\n<b>{}</b>\n\n{}",
                progress_bar(step),
                options::question(step),
                ask
            )
        }
        _ => {
            let mut text = format!(
                "<b>Question {} of 6</b>\n{}\n\n<b>{}</b>",
                step.index(),
                progress_bar(step),
                options::question(step)
            );
            if step.is_multi_select() {
                text.push_str(&format!("\n\nTap to select, then press \"{}\".", NEXT_BUTTON));
            }
            text
        }
    }
}

/// Reply keyboard for the current step. `None` means the keyboard should be removed.
pub fn keyboard(session: &QuizSession) -> Option<KeyboardMarkup> {
    let step = session.step;
    let mut rows: Vec<Vec<KeyboardButton>> = Vec::new();

    match step {
        Step::Intro => rows.push(vec![KeyboardButton::new(START_BUTTON)]),
        Step::MagicWand => rows.push(vec![KeyboardButton::new(SKIP_BUTTON)]),
        Step::Contact => return None,
        _ => {
            let labels = options::for_step(step).unwrap_or(&[]);
            for label in labels {
                let text = if session.answers.is_selected(step, label) {
                    format!("{}{}", SELECTED_MARK, label)
                } else {
                    label.to_string()
                };
                rows.push(vec![KeyboardButton::new(text)]);
            }
        }
    }

    let mut controls = Vec::new();
    if step.prev().is_some() {
        controls.push(KeyboardButton::new(BACK_BUTTON));
    }
    if step.is_multi_select() || (step.is_single_select() && session.can_advance()) {
        controls.push(KeyboardButton::new(NEXT_BUTTON));
    }
    if !controls.is_empty() {
        rows.push(controls);
    }

    Some(KeyboardMarkup::new(rows))
}
