use crate::quiz::QuizAnswers;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Scores {
    pub lead_flow: i32,
    pub sales_gap: i32,
    pub operational: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    LeadFlow,
    SalesGap,
    Operational,
}

impl ScoreKind {
    pub const ALL: [ScoreKind; 3] = [ScoreKind::LeadFlow, ScoreKind::SalesGap, ScoreKind::Operational];

    pub fn label(self) -> &'static str {
        match self {
            ScoreKind::LeadFlow => "Lead Flow",
            ScoreKind::SalesGap => "Sales Gap",
            ScoreKind::Operational => "Operational",
        }
    }
}

impl Scores {
    pub fn get(&self, kind: ScoreKind) -> i32 {
        match kind {
            ScoreKind::LeadFlow => self.lead_flow,
            ScoreKind::SalesGap => self.sales_gap,
            ScoreKind::Operational => self.operational,
        }
    }

    pub fn max(&self) -> i32 {
        self.lead_flow.max(self.sales_gap).max(self.operational)
    }

    /// True for every score tied at the maximum.
    pub fn is_max(&self, kind: ScoreKind) -> bool {
        self.get(kind) == self.max()
    }

    fn add(&mut self, rule: &ScoringRule) {
        self.lead_flow += rule.lead_flow;
        self.sales_gap += rule.sales_gap;
        self.operational += rule.operational;
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Condition {
    LeadTrackingContains(&'static str),
    HeadachesContains(&'static str),
    LeadCapacityIs(&'static str),
    PriorityIs(&'static str),
}

impl Condition {
    pub fn matches(&self, answers: &QuizAnswers) -> bool {
        match *self {
            Condition::LeadTrackingContains(label) => answers.lead_tracking.contains(label),
            Condition::HeadachesContains(label) => answers.headaches.contains(label),
            Condition::LeadCapacityIs(label) => answers.lead_capacity.as_deref() == Some(label),
            Condition::PriorityIs(label) => answers.priority.as_deref() == Some(label),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScoringRule {
    pub condition: Condition,
    pub lead_flow: i32,
    pub sales_gap: i32,
    pub operational: i32,
}

const fn rule(condition: Condition, lead_flow: i32, sales_gap: i32, operational: i32) -> ScoringRule {
    ScoringRule {
        condition,
        lead_flow,
        sales_gap,
        operational,
    }
}

use Condition::*;

/// Every matching rule adds its deltas. Business type and revenue are never scored.
pub const SCORING_RULES: [ScoringRule; 17] = [
    rule(LeadTrackingContains("Word-of-mouth or referrals"), 2, 0, 0),
    rule(LeadTrackingContains("We don't really track much at all"), 3, 2, 0),
    rule(LeadTrackingContains("Spreadsheets or manual tracking"), 0, 2, 0),
    rule(LeadTrackingContains("CRM or follow-up software"), 0, -1, 0),
    rule(HeadachesContains("Leads fall through the cracks"), 0, 3, 0),
    rule(HeadachesContains("Prospects ghost me after initial contact"), 0, 3, 0),
    rule(HeadachesContains("Paying for marketing that doesn't convert"), 3, 0, 0),
    rule(HeadachesContains("Team ignores systems I've set up"), 0, 0, 3),
    rule(HeadachesContains("I'm stuck at the same revenue level"), 0, 0, 2),
    rule(HeadachesContains("It feels like I am the business"), 0, 0, 3),
    rule(LeadCapacityIs("We'd melt – can't take more right now"), 0, 0, 3),
    rule(LeadCapacityIs("We'd scramble but get it done"), 0, 0, 1),
    rule(LeadCapacityIs("We're ready – systems + staff in place"), 0, 1, 0),
    rule(PriorityIs("My time – I'm tired of doing everything"), 0, 0, 2),
    rule(PriorityIs("Better clients who actually pay"), 2, 0, 0),
    rule(PriorityIs("More customers without chasing"), 0, 2, 0),
    rule(PriorityIs("A real system that doesn't rely on me"), 0, 0, 2),
];

pub fn score(answers: &QuizAnswers) -> Scores {
    SCORING_RULES
        .iter()
        .filter(|rule| rule.condition.matches(answers))
        .fold(Scores::default(), |mut scores, rule| {
            scores.add(rule);
            scores
        })
}
