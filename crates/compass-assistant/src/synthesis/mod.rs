//! Response synthesis. A second ordered cascade, independent of the intent
//! classifier, that turns the original query plus any executor output into
//! final reply text. [`STAGE_ORDER`] is the contract: stages run in array
//! order and the first one that resolves wins. Translation intent sits ahead
//! of greetings because a translation payload can contain greeting tokens
//! ("translate hello to french"), and the analytics gate sits ahead of the
//! tool stages because capability questions often contain the word "tool".
//!
//! The cascade never errors outward. Every network failure degrades to the
//! next stage, and the terminal stage always produces text.

pub mod format;
pub mod knowledge;
pub mod responses;

pub use format::format_tool_result;

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

use crate::backend::RemoteBackend;
use crate::language::{detect_language, LanguageCode};
use crate::profile::UserProfile;
use crate::translate::{supported_languages_message, TranslationChain};
use crate::types::{Message, ToolResult};

/// One stage of the synthesis cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    EmptyQuery,
    TranslationIntent,
    TranslationCapability,
    AnalyticsCapability,
    OutOfScope,
    SmallTalk,
    ToolResult,
    KnowledgeBase,
    Clarification,
    RemoteBackend,
    Terminal,
}

/// Evaluation order. First stage to resolve short-circuits the rest.
pub const STAGE_ORDER: [Stage; 11] = [
    Stage::EmptyQuery,
    Stage::TranslationIntent,
    Stage::TranslationCapability,
    Stage::AnalyticsCapability,
    Stage::OutOfScope,
    Stage::SmallTalk,
    Stage::ToolResult,
    Stage::KnowledgeBase,
    Stage::Clarification,
    Stage::RemoteBackend,
    Stage::Terminal,
];

const EMPTY_QUERY_PROMPT: &str =
    "I didn't catch anything there. Ask me about a tool, describe what your team needs, or just say hi!";

const WEATHER_DISCLAIMER: &str = "I don't have access to live weather data, so I can't tell you \
    what it's like outside. What I can do: recommend tools from the catalog, compare them, or \
    translate a phrase for you.";

const RATINGS_DISCLAIMER: &str = "The catalog doesn't carry star ratings or user reviews, so I \
    can't rank tools that way. I can compare two tools feature by feature instead, just name them.";

const TERMINAL_FALLBACK: &str = "I don't have training on that yet. Here's what I can help with: \
    recommending tools for a team or task, comparing catalog tools side by side, translating \
    common phrases, and answering questions about Sanofi and AI Compass.";

static TRANSLATE_INTENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\btranslate\b[:\s]+(.+)\s+(?:to|into|in)\s+([^\s?!.,]+)")
        .expect("translate intent regex is valid")
});

static SAY_IN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bhow\s+do\s+(?:you|i)\s+say\b\s+(.+)\s+in\s+([^\s?!.,]+)")
        .expect("say-in regex is valid")
});

static TRANSLATION_CAPABILITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:can|do|could|are)\s+you\s+(?:able\s+to\s+)?translate\b|\bwhat\s+languages\b|\bwhich\s+languages\b|\bspeak\s+(?:other\s+)?languages\b",
    )
    .expect("translation capability regex is valid")
});

static ANALYTICS_CAPABILITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:can|do|could|are)\s+you\b.{0,40}\b(?:analytics|dashboards?|data\s+analysis|analy[sz]e|reports?)\b",
    )
    .expect("analytics capability regex is valid")
});

static WEATHER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:weather|forecast|temperature|raining|sunny|snowing)\b")
        .expect("weather regex is valid")
});

static RATINGS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:star\s+ratings?|ratings?|reviews?|rate\s+(?:this|the|it))\b")
        .expect("ratings regex is valid")
});

static GREETING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:hi|hiya|hello|hey|howdy|good\s+(?:morning|afternoon|evening)|bonjour|salut|hola|buenos\s+d[ií]as|hallo|guten\s+(?:tag|morgen)|ol[aá]|oi|xin\s+ch[àa]o|ch[àa]o|你好|您好|こんにちは|こんばんは)\b",
    )
    .expect("greeting regex is valid")
});

static HOW_ARE_YOU_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bhow\s+(?:are|r)\s+(?:you|u)\b|\bhow's\s+it\s+going\b|\bhow\s+do\s+you\s+do\b|\bça\s+va\b|\bc[óo]mo\s+est[áa]s\b|\bwie\s+geht\b|\bcomo\s+vai\b|元気|你好吗|khỏe\s+không",
    )
    .expect("how-are-you regex is valid")
});

static IDENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bwho\s+are\s+you\b|\bwhat\s+are\s+you\b|\bwhat(?:'s|\s+is)\s+your\s+name\b|\bintroduce\s+yourself\b|\bqui\s+es[- ]tu\b|\bqui[ée]n\s+eres\b",
    )
    .expect("identity regex is valid")
});

static WHO_BUILT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bwho\s+(?:built|made|created|developed|designed)\s+(?:you|this)\b")
        .expect("who-built regex is valid")
});

static HELP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*help\b|\bcan\s+you\s+help\b|\bwhat\s+can\s+you\s+do\b|\bwhat\s+do\s+you\s+do\b|\bhow\s+can\s+you\s+help\b|\bi\s+need\s+help\b",
    )
    .expect("help regex is valid")
});

static THANKS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bthank\s*you\b|\bthanks\b|\bthx\b|\bmerci\b|\bgracias\b|\bdanke\b|\bobrigad[oa]\b|\bcảm\s+ơn\b|谢谢|ありがとう",
    )
    .expect("thanks regex is valid")
});

static GOODBYE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bgood\s*bye\b|\bbye\b|\bsee\s+you\b|\bgood\s+night\b|\bau\s+revoir\b|\badi[óo]s\b|\btsch[üu]ss\b|\btchau\b|\btạm\s+biệt\b|再见|さようなら",
    )
    .expect("goodbye regex is valid")
});

static ACKNOWLEDGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:ok(?:ay)?|cool|got\s+it|nice|great|perfect|sounds\s+good|alright|sure|awesome|will\s+do|👍)\s*[?!.]*\s*$",
    )
    .expect("acknowledgment regex is valid")
});

#[derive(Debug, Clone, Copy)]
enum SmallTalk {
    Greeting,
    HowAreYou,
    Identity,
    WhoBuilt,
    Help,
    Thanks,
    Goodbye,
    Acknowledgment,
}

fn small_talk_family(query: &str) -> Option<SmallTalk> {
    if GREETING_RE.is_match(query) {
        Some(SmallTalk::Greeting)
    } else if HOW_ARE_YOU_RE.is_match(query) {
        Some(SmallTalk::HowAreYou)
    } else if IDENTITY_RE.is_match(query) {
        Some(SmallTalk::Identity)
    } else if WHO_BUILT_RE.is_match(query) {
        Some(SmallTalk::WhoBuilt)
    } else if HELP_RE.is_match(query) {
        Some(SmallTalk::Help)
    } else if THANKS_RE.is_match(query) {
        Some(SmallTalk::Thanks)
    } else if GOODBYE_RE.is_match(query) {
        Some(SmallTalk::Goodbye)
    } else if ACKNOWLEDGMENT_RE.is_match(query) {
        Some(SmallTalk::Acknowledgment)
    } else {
        None
    }
}

fn translation_capability_reply() -> String {
    let names: Vec<&str> = LanguageCode::ALL.iter().map(|l| l.display_name()).collect();
    format!(
        "Yes, I can translate common phrases between {} and {}. Try something like \"translate hello to french\".",
        names[..names.len() - 1].join(", "),
        names[names.len() - 1]
    )
}

fn out_of_scope_reply(lower: &str) -> Option<String> {
    if WEATHER_RE.is_match(lower) {
        return Some(WEATHER_DISCLAIMER.to_string());
    }
    if RATINGS_RE.is_match(lower) {
        return Some(RATINGS_DISCLAIMER.to_string());
    }
    None
}

fn clarification_reply(lower: &str) -> Option<String> {
    let comparisonish = ["compare", " vs ", " vs. ", "versus", "difference between"]
        .iter()
        .any(|marker| lower.contains(marker));
    if comparisonish {
        return Some(
            "Happy to compare. Which two catalog tools should I put side by side? \
             For example: \"compare Concierge vs ChatGPT\"."
                .to_string(),
        );
    }
    if lower.contains("recommend") || lower.contains("suggest") {
        return Some(
            "I can recommend something from the catalog. Tell me your team or the task \
             you're tackling and I'll narrow it down."
                .to_string(),
        );
    }
    let seeking = ["find", "show", "need", "looking", "want", "best", "good", "which", "what"]
        .iter()
        .any(|word| lower.contains(word));
    if seeking && (lower.contains("tool") || lower.contains("tools")) {
        return Some(
            "There's a lot in the catalog. Give me a keyword, a task, or a team name and \
             I'll pull out the tools that fit."
                .to_string(),
        );
    }
    None
}

/// Top-level reply builder. Holds the translation chain, the remote backend
/// for the generic fallback, and a seedable RNG for variant selection.
pub struct ResponseSynthesizer {
    chain: TranslationChain,
    backend: Arc<RemoteBackend>,
    fallback_budget: Duration,
    rng: Mutex<StdRng>,
}

impl ResponseSynthesizer {
    pub fn new(
        chain: TranslationChain,
        backend: Arc<RemoteBackend>,
        fallback_budget: Duration,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            chain,
            backend,
            fallback_budget,
            rng: Mutex::new(rng),
        }
    }

    /// Produce the reply for one turn. `tool_result` is present only when the
    /// classifier fired and the executor ran.
    pub async fn synthesize(
        &self,
        query: &str,
        history: &[Message],
        profile: &UserProfile,
        tool_result: Option<&ToolResult>,
    ) -> String {
        let lang = detect_language(query);
        let lower = query.trim().to_lowercase();

        for stage in STAGE_ORDER {
            if let Some(reply) = self
                .run_stage(stage, query, &lower, lang, history, profile, tool_result)
                .await
            {
                tracing::debug!(stage = ?stage, lang = %lang.code(), "Synthesizer stage resolved");
                return reply;
            }
        }

        // STAGE_ORDER ends with Terminal, which always resolves.
        self.terminal_reply(lang)
    }

    #[allow(clippy::too_many_arguments)]
    async fn run_stage(
        &self,
        stage: Stage,
        query: &str,
        lower: &str,
        lang: LanguageCode,
        history: &[Message],
        profile: &UserProfile,
        tool_result: Option<&ToolResult>,
    ) -> Option<String> {
        match stage {
            Stage::EmptyQuery => query
                .trim()
                .is_empty()
                .then(|| EMPTY_QUERY_PROMPT.to_string()),
            Stage::TranslationIntent => self.translation_intent_reply(query).await,
            Stage::TranslationCapability => TRANSLATION_CAPABILITY_RE
                .is_match(lower)
                .then(translation_capability_reply),
            Stage::AnalyticsCapability => ANALYTICS_CAPABILITY_RE
                .is_match(lower)
                .then(|| knowledge::ANALYTICS_CAPABILITIES.to_string()),
            Stage::OutOfScope => out_of_scope_reply(lower),
            Stage::SmallTalk => self.small_talk_reply(query, lang, profile),
            Stage::ToolResult => tool_result.map(format_tool_result),
            Stage::KnowledgeBase => self.knowledge_reply(lower),
            Stage::Clarification => clarification_reply(lower),
            Stage::RemoteBackend => self.backend_reply(query, history).await,
            Stage::Terminal => Some(self.terminal_reply(lang)),
        }
    }

    async fn translation_intent_reply(&self, query: &str) -> Option<String> {
        let caps = TRANSLATE_INTENT_RE
            .captures(query)
            .or_else(|| SAY_IN_RE.captures(query))?;
        let phrase = caps
            .get(1)?
            .as_str()
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '“' || c == '”')
            .trim();
        let target_name = caps.get(2)?.as_str();

        let Some(target) = LanguageCode::from_name(target_name) else {
            return Some(supported_languages_message());
        };
        if phrase.is_empty() {
            return Some(supported_languages_message());
        }

        match self.chain.try_translate(phrase, target).await {
            Some(translation) => Some(format!(
                "\"{}\" in {} is \"{}\"",
                phrase,
                target.display_name(),
                translation
            )),
            None => Some(supported_languages_message()),
        }
    }

    fn small_talk_reply(
        &self,
        query: &str,
        lang: LanguageCode,
        profile: &UserProfile,
    ) -> Option<String> {
        let family = small_talk_family(query)?;
        tracing::debug!(family = ?family, "Small-talk pattern matched");
        let reply = match family {
            SmallTalk::Greeting => self.greeting_reply(lang, profile),
            SmallTalk::HowAreYou => self.pick(responses::how_are_you_variants(lang)).to_string(),
            SmallTalk::Identity => self.pick(responses::identity_variants(lang)).to_string(),
            SmallTalk::WhoBuilt => self.pick(responses::who_built_variants(lang)).to_string(),
            SmallTalk::Help => self.pick(responses::help_variants(lang)).to_string(),
            SmallTalk::Thanks => self.pick(responses::thanks_variants(lang)).to_string(),
            SmallTalk::Goodbye => self.pick(responses::goodbye_variants(lang)).to_string(),
            SmallTalk::Acknowledgment => self
                .pick(responses::acknowledgment_variants(lang))
                .to_string(),
        };
        Some(reply)
    }

    fn greeting_reply(&self, lang: LanguageCode, profile: &UserProfile) -> String {
        let mut out = String::new();
        if lang == LanguageCode::En {
            if let Some(name) = profile.name.as_deref() {
                out.push_str(&format!("Welcome back, {name}! "));
            }
        }
        out.push_str(self.pick(responses::greeting_variants(lang)));
        out.push_str("\n\n");
        out.push_str(responses::capability_summary(lang));
        out.push_str("\n\n");
        out.push_str(&self.random_ancillary());
        out
    }

    fn knowledge_reply(&self, lower: &str) -> Option<String> {
        if lower.contains("your creator")
            || lower.contains("your developer")
            || lower.contains("about the team")
            || lower.contains("who maintains")
        {
            return Some(knowledge::CREATOR_PROFILE.to_string());
        }
        if lower.contains("sanofi") {
            return Some(knowledge::SANOFI_OVERVIEW.to_string());
        }
        if lower.contains("joke") || lower.contains("funny") {
            return Some(self.pick(knowledge::JOKES).to_string());
        }
        // Feature questions only count when the product is named, so words
        // like "feature" in unrelated queries don't hijack the turn.
        let feature_ask = ["feature", "capabilit", "function", "what is ai compass", "about ai compass"]
            .iter()
            .any(|needle| lower.contains(needle));
        if lower.contains("compass") && feature_ask {
            return Some(knowledge::PRODUCT_FEATURES.to_string());
        }
        None
    }

    async fn backend_reply(&self, query: &str, history: &[Message]) -> Option<String> {
        if !self.backend.has_key() {
            return None;
        }
        let mut messages = history.to_vec();
        messages.push(Message::user(query));
        match self.backend.chat(&messages, self.fallback_budget).await {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Backend fallback unavailable, degrading");
                None
            }
        }
    }

    fn terminal_reply(&self, lang: LanguageCode) -> String {
        let mut out = String::from(TERMINAL_FALLBACK);
        if self.rng.lock().gen_bool(0.5) {
            out.push_str("\n\n");
            out.push_str(&self.random_ancillary());
        }
        if lang == LanguageCode::En {
            out.push_str("\n\n💡 Tip of the day: ");
            out.push_str(knowledge::tip_of_the_day());
        }
        out
    }

    fn random_ancillary(&self) -> String {
        let mut rng = self.rng.lock();
        match rng.gen_range(0..3u8) {
            0 => format!(
                "🤓 Fun fact: {}",
                knowledge::FACTS[rng.gen_range(0..knowledge::FACTS.len())]
            ),
            1 => knowledge::JOKES[rng.gen_range(0..knowledge::JOKES.len())].to_string(),
            _ => format!(
                "💡 {}",
                knowledge::TIPS[rng.gen_range(0..knowledge::TIPS.len())]
            ),
        }
    }

    fn pick(&self, variants: &'static [&'static str]) -> &'static str {
        variants[self.rng.lock().gen_range(0..variants.len())]
    }
}
