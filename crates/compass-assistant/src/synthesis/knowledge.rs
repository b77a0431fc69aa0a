//! Knowledge served without a network round trip: company and product
//! blurbs, the creator profile, and the ancillary fact/joke/tip pools the
//! greeting and terminal stages draw from.

use chrono::{Datelike, Utc};

/// Fixed self-identification embedded in every greeting and identity reply.
pub const SELF_IDENTIFICATION: &str = "AI Compass Assistant";

pub const SANOFI_OVERVIEW: &str = "Sanofi is a global healthcare company focused on vaccines, \
medicines, and consumer health, with teams in more than 90 countries. Inside Sanofi, AI Compass \
is the internal catalog that maps which AI tools are approved, what they're good at, and who \
they're meant for. Ask me about a team or a task and I'll point you to the right entry.";

pub const PRODUCT_FEATURES: &str = "Here's what AI Compass can do for you:\n\
1. **Discover** — browse approved AI tools with plain-language descriptions.\n\
2. **Recommend** — tell me your team or task and I'll suggest a short list.\n\
3. **Compare** — put two or more tools side by side to see which fits.\n\
4. **Translate** — common phrases across the eight languages I support.\n\
5. **Learn** — your thumbs up/down teach me which answers land.";

pub const ANALYTICS_CAPABILITIES: &str = "I don't crunch numbers or build dashboards myself — \
analytics lives in the catalog's dedicated tools. What I can do is point you to the analytics \
entries that match your team, compare them side by side, or pull up one tool's details. Try \
\"recommend an analytics tool for manufacturing\".";

pub const CREATOR_PROFILE: &str = "I was built by the AI Compass team in Sanofi Digital — a small \
group of engineers and designers who maintain the internal AI tool catalog. They wire me up, \
review my answers, and read every piece of feedback you leave.";

pub const FACTS: &[&str] = &[
    "The term \"artificial intelligence\" was coined at the Dartmouth workshop in 1956.",
    "Modern language models don't look words up — they predict text one token at a time.",
    "The first chatbot, ELIZA, was written in 1966 and mostly rephrased what you typed.",
    "More than half of large companies now run an internal catalog of approved AI tools.",
    "Translation was one of the very first tasks ever attempted with computers, back in 1954.",
    "A single modern AI training run can use as much electricity as a small town does in a day.",
];

pub const JOKES: &[&str] = &[
    "Why did the chatbot go to therapy? Too many unresolved dependencies.",
    "I asked an AI to tell me a joke about recursion. It said: \"I asked an AI to tell me a joke about recursion…\"",
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "My favorite machine-learning exercise? Jumping to conclusions.",
    "I'd tell you a UDP joke, but you might not get it.",
];

pub const TIPS: &[&str] = &[
    "Name your team in the query — \"for medical writers\" gets sharper recommendations than \"for us\".",
    "You can compare tools directly: try \"compare Concierge vs ChatGPT\".",
    "Thumbs up or down on my answers — I keep count and it genuinely changes what I suggest.",
    "Ask \"what can compass do\" any time for a refresher on my capabilities.",
    "Translation works both ways: \"translate merci to english\" is fine too.",
    "Shorter, concrete queries beat long ones — one task per question works best.",
];

/// Deterministic within a calendar day, rotating through the pool.
pub fn tip_of_the_day() -> &'static str {
    let day = Utc::now().ordinal() as usize;
    TIPS[day % TIPS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tip_of_the_day_is_stable_within_a_day() {
        assert_eq!(tip_of_the_day(), tip_of_the_day());
        assert!(TIPS.contains(&tip_of_the_day()));
    }

    #[test]
    fn ancillary_pools_are_populated() {
        assert!(!FACTS.is_empty());
        assert!(!JOKES.is_empty());
        assert!(!TIPS.is_empty());
    }
}
