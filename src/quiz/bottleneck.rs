use crate::quiz::scoring::Scores;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Bottleneck {
    LeadFlowLeak,
    SalesGap,
    OperationalBottleneck,
}

/// Fixed copy shown on the results screen for one bottleneck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BottleneckContent {
    pub icon: &'static str,
    pub diagnosis: &'static str,
    pub tips: [&'static str; 2],
    pub solution: &'static str,
    pub call_to_action: &'static str,
}

impl Bottleneck {
    /// Ties go to lead flow first, then sales gap. All-zero scores land on `LeadFlowLeak`.
    pub fn classify(scores: &Scores) -> Self {
        if scores.lead_flow >= scores.sales_gap && scores.lead_flow >= scores.operational {
            Bottleneck::LeadFlowLeak
        } else if scores.sales_gap >= scores.operational {
            Bottleneck::SalesGap
        } else {
            Bottleneck::OperationalBottleneck
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Bottleneck::LeadFlowLeak => "Lead Flow Leak",
            Bottleneck::SalesGap => "Sales Gap",
            Bottleneck::OperationalBottleneck => "Operational Bottleneck",
        }
    }

    pub fn content(self) -> BottleneckContent {
        match self {
            Bottleneck::LeadFlowLeak => BottleneckContent {
                icon: "🚰",
                diagnosis: "You're doing good work, but not enough of the right people know about it. \
                    Your pipeline depends on referrals and luck, so revenue rises and falls with whoever \
                    happens to call this month.",
                tips: [
                    "Pick one paid or outbound channel and run it consistently for 90 days before judging it.",
                    "Ask every happy customer for a referral at the moment the job is finished, not weeks later.",
                ],
                solution: "A predictable lead engine turns the tap back on so you choose your clients \
                    instead of waiting for them.",
                call_to_action: "Fix My Lead Flow",
            },
            Bottleneck::SalesGap => BottleneckContent {
                icon: "🎯",
                diagnosis: "Leads are coming in, but too many of them never turn into paying customers. \
                    Slow follow-up and no clear process mean you're paying for opportunities that quietly \
                    slip away.",
                tips: [
                    "Respond to every new lead within five minutes. Speed beats a perfect pitch.",
                    "Write a simple follow-up sequence and put every prospect through it until they say yes or no.",
                ],
                solution: "A sales system with scripts, tracking and follow-up closes the gap between \
                    the leads you get and the revenue you keep.",
                call_to_action: "Close My Sales Gap",
            },
            Bottleneck::OperationalBottleneck => BottleneckContent {
                icon: "⚙️",
                diagnosis: "The business can't grow past you. Every decision, fire and follow-up runs \
                    through your phone, so more leads would only mean more chaos.",
                tips: [
                    "Write down the three tasks you repeat every week and hand one of them off this month.",
                    "Hold a short weekly meeting where the team reports numbers, not excuses.",
                ],
                solution: "Systems your team actually follows free up your time and let the business run \
                    without you in every conversation.",
                call_to_action: "Build My Systems",
            },
        }
    }
}

impl std::fmt::Display for Bottleneck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
