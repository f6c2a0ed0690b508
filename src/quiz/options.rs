use crate::quiz::Step;

// Scoring matches these labels by exact string equality, so they must not be reworded.

pub const BUSINESS_TYPES: [&str; 8] = [
    "Home services (HVAC, plumbing, roofing)",
    "Auto detailing or repair",
    "Real estate",
    "Dental or medical practice",
    "Barber shop or salon",
    "Fitness or wellness",
    "Professional services",
    "Other",
];

pub const LEAD_TRACKING_OPTIONS: [&str; 4] = [
    "Word-of-mouth or referrals",
    "Spreadsheets or manual tracking",
    "CRM or follow-up software",
    "We don't really track much at all",
];

pub const HEADACHE_OPTIONS: [&str; 6] = [
    "Leads fall through the cracks",
    "Prospects ghost me after initial contact",
    "Paying for marketing that doesn't convert",
    "Team ignores systems I've set up",
    "I'm stuck at the same revenue level",
    "It feels like I am the business",
];

pub const CAPACITY_OPTIONS: [&str; 3] = [
    "We'd melt – can't take more right now",
    "We'd scramble but get it done",
    "We're ready – systems + staff in place",
];

pub const REVENUE_OPTIONS: [&str; 5] = [
    "Under $250K",
    "$250K – $500K",
    "$500K – $1M",
    "$1M – $3M",
    "Over $3M",
];

pub const PRIORITY_OPTIONS: [&str; 4] = [
    "My time – I'm tired of doing everything",
    "Better clients who actually pay",
    "More customers without chasing",
    "A real system that doesn't rely on me",
];

/// Maximum number of headaches a respondent may pick.
pub const MAX_HEADACHES: usize = 2;

/// Option list for a question step, `None` for the intro, bonus and contact steps.
pub fn for_step(step: Step) -> Option<&'static [&'static str]> {
    match step {
        Step::BusinessType => Some(&BUSINESS_TYPES),
        Step::LeadTracking => Some(&LEAD_TRACKING_OPTIONS),
        Step::Headaches => Some(&HEADACHE_OPTIONS),
        Step::LeadCapacity => Some(&CAPACITY_OPTIONS),
        Step::Revenue => Some(&REVENUE_OPTIONS),
        Step::Priority => Some(&PRIORITY_OPTIONS),
        Step::Intro | Step::MagicWand | Step::Contact => None,
    }
}

pub fn question(step: Step) -> &'static str {
    match step {
        Step::Intro => "Find the one bottleneck holding your business back",
        Step::BusinessType => "What kind of business do you run?",
        Step::LeadTracking => "How do you track your leads today?",
        Step::Headaches => "What are your biggest headaches right now? (pick up to 2)",
        Step::LeadCapacity => "If we sent you 20 extra leads next month, what would happen?",
        Step::Revenue => "What's your annual revenue?",
        Step::Priority => "What matters most to you over the next 12 months?",
        Step::MagicWand => {
            "Bonus: if you could wave a magic wand and fix one thing in your business, what would it be?"
        }
        Step::Contact => "Where should we send your results?",
    }
}

/// Resolves free text to the canonical label of the current step, if any.
pub fn find_label(step: Step, text: &str) -> Option<&'static str> {
    for_step(step)?
        .iter()
        .copied()
        .find(|label| *label == text)
}
